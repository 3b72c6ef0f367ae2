//! Browser periodic timer
//!
//! `setInterval` wrapped so the callback closure and the interval handle share
//! one owner. Dropping the [`Interval`] clears the timer, so it cannot outlive
//! the view that started it.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

pub struct Interval {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    /// Call `f` every `period_ms` milliseconds until dropped
    pub fn new(period_ms: i32, f: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let callback = Closure::<dyn FnMut()>::new(f);
        let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            period_ms,
        )?;
        log::info!("Interval {handle} started ({period_ms} ms)");
        Ok(Self {
            handle,
            _callback: callback,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.handle);
            log::info!("Interval {} cleared", self.handle);
        }
    }
}
