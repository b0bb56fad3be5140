/// Pointer and wheel events forwarded by the host page.
/// Coordinates are viewport pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    /// Positive `delta_y` scrolls away from the page (zoom out).
    Wheel { delta_y: f32 },
}

/// Events buffered between frames.
///
/// Browsers fire pointermove far more often than the frame rate, so a move
/// that directly follows another move replaces it. Wheel deltas in a row are
/// summed. Down/up are always kept so drags start and end where they should.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        match (self.pending.last_mut(), event) {
            (Some(InputEvent::PointerMove { x, y }), InputEvent::PointerMove { x: nx, y: ny }) => {
                *x = nx;
                *y = ny;
            }
            (Some(InputEvent::Wheel { delta_y }), InputEvent::Wheel { delta_y: more }) => {
                *delta_y += more;
            }
            _ => self.pending.push(event),
        }
    }

    /// Take everything queued since the last frame.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
