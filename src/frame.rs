//! Animation-frame scheduling.
//!
//! Components own at most one pending [`FrameHandle`] and talk to the
//! platform only through [`FrameScheduler`], so the frame loop can be driven
//! by `requestAnimationFrame` in the browser and by hand in host tests.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

pub trait FrameScheduler {
    /// Ask for the bound frame body to run once on the next frame.
    fn request(&self) -> Option<FrameHandle>;
    /// Cancel a pending request; unknown or already-fired handles are ignored.
    fn cancel(&self, handle: FrameHandle);
}

#[cfg(target_arch = "wasm32")]
pub use raf::RafScheduler;

#[cfg(target_arch = "wasm32")]
mod raf {
    use super::{FrameHandle, FrameScheduler};
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys as web;

    type Body = Rc<RefCell<Option<Box<dyn FnMut()>>>>;

    /// `requestAnimationFrame` scheduler with a late-bound frame body.
    ///
    /// The JS closure exists from construction so the owning component can
    /// request its first frame inside its own constructor; the body is bound
    /// right after the component is wrapped in an `Rc`.
    pub struct RafScheduler {
        window: web::Window,
        body: Body,
        callback: Closure<dyn FnMut(f64)>,
    }

    impl RafScheduler {
        pub fn new(window: web::Window) -> Self {
            let body: Body = Rc::new(RefCell::new(None));
            let body_tick = body.clone();
            let callback = Closure::wrap(Box::new(move |_ts: f64| {
                if let Ok(mut slot) = body_tick.try_borrow_mut() {
                    if let Some(f) = slot.as_mut() {
                        f();
                    }
                }
            }) as Box<dyn FnMut(f64)>);
            Self {
                window,
                body,
                callback,
            }
        }

        pub fn bind(&self, body: impl FnMut() + 'static) {
            *self.body.borrow_mut() = Some(Box::new(body));
        }

        pub fn unbind(&self) {
            if let Ok(mut slot) = self.body.try_borrow_mut() {
                *slot = None;
            }
        }
    }

    impl FrameScheduler for RafScheduler {
        fn request(&self) -> Option<FrameHandle> {
            match self
                .window
                .request_animation_frame(self.callback.as_ref().unchecked_ref::<js_sys::Function>())
            {
                Ok(id) => Some(FrameHandle(id)),
                Err(e) => {
                    log::error!("[frame] requestAnimationFrame failed: {:?}", e);
                    None
                }
            }
        }

        fn cancel(&self, handle: FrameHandle) {
            _ = self.window.cancel_animation_frame(handle.0);
        }
    }
}
