//! Animation-frame throttling for style writes.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;
use zoom_core::Coalescer;

use crate::error::ZoomError;

/// Applies at most one value per animation frame.
///
/// Scheduling a value cancels the frame requested for the previous one, so
/// only the latest value is ever applied.
pub struct FrameThrottle<T: 'static> {
    window: Window,
    slot: Rc<RefCell<Coalescer<T, i32>>>,
    on_frame: Closure<dyn FnMut(f64)>,
}

impl<T: 'static> FrameThrottle<T> {
    pub fn new<F>(window: Window, mut apply: F) -> Self
    where
        F: FnMut(T) + 'static,
    {
        let slot: Rc<RefCell<Coalescer<T, i32>>> = Rc::new(RefCell::new(Coalescer::new()));
        let slot_for_cb = Rc::clone(&slot);
        let on_frame = Closure::wrap(Box::new(move |_ts: f64| {
            let value = slot_for_cb.borrow_mut().take();
            if let Some(value) = value {
                apply(value);
            }
        }) as Box<dyn FnMut(f64)>);

        Self {
            window,
            slot,
            on_frame,
        }
    }

    /// Apply `value` on the next frame, superseding anything pending.
    pub fn schedule(&self, value: T) -> Result<(), ZoomError> {
        let handle = self
            .window
            .request_animation_frame(self.on_frame.as_ref().unchecked_ref())
            .map_err(ZoomError::from_js)?;

        let superseded = self.slot.borrow_mut().replace(value, handle);
        if let Some(old) = superseded {
            let _ = self.window.cancel_animation_frame(old);
        }
        Ok(())
    }

    /// Drop the pending value, if any.
    pub fn cancel(&self) {
        let pending = self.slot.borrow_mut().cancel();
        if let Some(handle) = pending {
            let _ = self.window.cancel_animation_frame(handle);
        }
    }
}

impl<T: 'static> Drop for FrameThrottle<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}
