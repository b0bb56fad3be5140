//! Renderer trait.
//!
//! The browser host draws from the published frame buffer, so the shipped
//! implementation is [`FrameBufferRenderer`](super::frame_buffer::FrameBufferRenderer).
//! Native GPU backends or headless test doubles implement the same contract.

use super::camera::CameraUniform;
use super::instance::NodeInstance;
use crate::systems::lighting::LightUniform;

pub trait Renderer {
    /// Backend identifier (e.g. "frame-buffer", "wgpu").
    fn backend(&self) -> &'static str;

    /// Draw a complete frame.
    fn draw(&mut self, frame: &FrameData);

    /// Resize the drawing surface.
    fn resize(&mut self, width: u32, height: u32);
}

/// Everything the engine produces for one frame.
pub struct FrameData<'a> {
    pub frame: u64,
    /// Simulation time passed to the scene update.
    pub time: f32,
    pub viewport: (f32, f32),
    pub camera: CameraUniform,
    pub ambient: [f32; 3],
    pub lights: &'a [LightUniform],
    /// Opaque, then alpha from `alpha_start`, then additive from `additive_start`.
    pub instances: &'a [NodeInstance],
    pub alpha_start: u32,
    pub additive_start: u32,
}
