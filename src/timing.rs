//! Debounce and animation-frame throttling for event handlers.

use gloo_timers::callback::Timeout;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Runs only the last call made within `delay_ms`.
pub struct Debouncer {
    delay_ms: u32,
    pending: RefCell<Option<Timeout>>,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            pending: RefCell::new(None),
        }
    }

    pub fn call<F: FnOnce() + 'static>(&self, f: F) {
        // Replacing the handle drops the previous Timeout, which cancels it.
        let handle = Timeout::new(self.delay_ms, f);
        *self.pending.borrow_mut() = Some(handle);
    }
}

/// Coalesces any number of `schedule` calls into one run per animation frame.
#[derive(Clone)]
pub struct FrameThrottle {
    scheduled: Rc<Cell<bool>>,
    task: Rc<dyn Fn()>,
}

impl FrameThrottle {
    pub fn new(task: impl Fn() + 'static) -> Self {
        Self {
            scheduled: Rc::new(Cell::new(false)),
            task: Rc::new(task),
        }
    }

    pub fn schedule(&self) {
        if self.scheduled.replace(true) {
            return;
        }
        let scheduled = self.scheduled.clone();
        let task = self.task.clone();
        let frame = Closure::once_into_js(move || {
            scheduled.set(false);
            task();
        });
        if gloo_utils::window()
            .request_animation_frame(frame.unchecked_ref())
            .is_err()
        {
            self.scheduled.set(false);
        }
    }
}
