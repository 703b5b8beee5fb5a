//! `requestAnimationFrame` loop with guaranteed cancellation
//!
//! The loop owns its callback. Dropping the [`FrameLoop`] cancels the pending
//! frame and frees the callback, so no frame can run for a closed game.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::session::FrameStatus;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub struct FrameLoop {
    callback: FrameCallback,
    /// Pending animation frame request, if any
    handle: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    /// Run `on_frame` once per display refresh until it returns
    /// [`FrameStatus::Exit`] or the loop is dropped
    pub fn start<F>(mut on_frame: F) -> Result<Self, JsValue>
    where
        F: FnMut(f64) -> FrameStatus + 'static,
    {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let handle = Rc::new(Cell::new(None));

        let next = callback.clone();
        let next_handle = handle.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
            next_handle.set(None);
            if on_frame(ts) == FrameStatus::Exit {
                log::debug!("Frame loop finished");
                return;
            }
            if let Err(e) = schedule(&next, &next_handle) {
                log::warn!("Could not schedule frame: {:?}", e);
            }
        }) as Box<dyn FnMut(f64)>));

        schedule(&callback, &handle)?;
        Ok(Self { callback, handle })
    }
}

fn schedule(callback: &FrameCallback, handle: &Cell<Option<i32>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    if let Some(closure) = callback.borrow().as_ref() {
        let id = window.request_animation_frame(closure.as_ref().unchecked_ref())?;
        handle.set(Some(id));
    }
    Ok(())
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let Some(id) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.cancel_animation_frame(id) {
                    log::warn!("Could not cancel frame {}: {:?}", id, e);
                }
            }
        }
        // The callback holds a clone of its own cell; dropping it breaks the cycle
        self.callback.borrow_mut().take();
    }
}
