//! requestAnimationFrame loop and window resize listener.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Call `on_frame` with the rAF timestamp (ms) every frame, forever.
pub fn start_loop(mut on_frame: impl FnMut(f64) + 'static) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let closure: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let closure_clone = closure.clone();

    *closure.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
        // Next frame is scheduled before this one runs.
        if let Some(window) = web_sys::window() {
            if let Some(ref cb) = *closure_clone.borrow() {
                let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }
        on_frame(timestamp);
    }));

    if let Some(ref cb) = *closure.borrow() {
        window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }
    Ok(())
}

/// Current window inner size in CSS pixels.
pub fn window_size() -> Option<(f32, f32)> {
    let window = web_sys::window()?;
    let w = window.inner_width().ok()?.as_f64()?;
    let h = window.inner_height().ok()?.as_f64()?;
    Some((w as f32, h as f32))
}

/// Call `on_resize` now and on every window resize.
pub fn listen_resize(mut on_resize: impl FnMut(f32, f32) + 'static) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    if let Some((w, h)) = window_size() {
        on_resize(w, h);
    }
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
        if let Some((w, h)) = window_size() {
            on_resize(w, h);
        }
    });
    window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
    // Listener lives for the page.
    closure.forget();
    Ok(())
}
