use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::dom::{self, DomResult};

type FrameCallback = Closure<dyn FnMut(f64)>;

/// A `requestAnimationFrame` loop. The callback receives seconds elapsed since
/// the loop started and returns `false` to stop. Dropping the handle cancels
/// the pending frame.
pub struct FrameLoop {
    inner: Rc<RefCell<Option<FrameCallback>>>,
    handle: Rc<RefCell<Option<i32>>>,
}

impl FrameLoop {
    pub fn start<F>(mut tick: F) -> DomResult<Self>
    where
        F: FnMut(f64) -> bool + 'static,
    {
        let window = dom::window()?;
        let inner: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let handle: Rc<RefCell<Option<i32>>> = Rc::new(RefCell::new(None));
        let started: Rc<RefCell<Option<f64>>> = Rc::new(RefCell::new(None));

        let inner_clone = inner.clone();
        let handle_clone = handle.clone();
        let window_clone = window.clone();
        *inner.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
            let origin = *started.borrow_mut().get_or_insert(now);
            let keep_going = tick((now - origin) / 1000.0);
            if !keep_going {
                handle_clone.borrow_mut().take();
                return;
            }
            if let Some(callback) = inner_clone.borrow().as_ref() {
                match window_clone.request_animation_frame(callback.as_ref().unchecked_ref()) {
                    Ok(id) => *handle_clone.borrow_mut() = Some(id),
                    Err(_) => {
                        handle_clone.borrow_mut().take();
                    }
                }
            }
        }) as Box<dyn FnMut(f64)>));

        if let Some(callback) = inner.borrow().as_ref() {
            let id = window.request_animation_frame(callback.as_ref().unchecked_ref())?;
            *handle.borrow_mut() = Some(id);
        }

        Ok(Self { inner, handle })
    }

    pub fn is_running(&self) -> bool {
        self.handle.borrow().is_some()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let Some(id) = self.handle.borrow_mut().take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        // Break the closure's reference to itself.
        self.inner.borrow_mut().take();
    }
}
