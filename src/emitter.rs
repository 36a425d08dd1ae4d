//! Revocable listener sets shared by the scale adapter and the hotspot layer.
//!
//! Listeners are fallible: an `Err` from one listener is logged and does not
//! stop delivery to the others.

use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<RefCell<dyn FnMut(&T) -> anyhow::Result<()>>>;

struct Registry<T: ?Sized> {
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
}

impl<T: ?Sized> Registry<T> {
    fn contains(&self, id: u64) -> bool {
        self.listeners.iter().any(|(i, _)| *i == id)
    }
}

pub struct Emitter<T: ?Sized> {
    tag: &'static str,
    inner: Rc<RefCell<Registry<T>>>,
}

impl<T: ?Sized> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            tag: self.tag,
            inner: self.inner.clone(),
        }
    }
}

impl<T: ?Sized + 'static> Emitter<T> {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            inner: Rc::new(RefCell::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn subscribe(
        &self,
        listener: impl FnMut(&T) -> anyhow::Result<()> + 'static,
    ) -> Subscription {
        let id = {
            let mut reg = self.inner.borrow_mut();
            let id = reg.next_id;
            reg.next_id += 1;
            let listener: Listener<T> = Rc::new(RefCell::new(listener));
            reg.listeners.push((id, listener));
            id
        };
        let weak: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(reg) = weak.upgrade() {
                    reg.borrow_mut().listeners.retain(|(i, _)| *i != id);
                }
            })),
        }
    }

    /// Deliver `value` to every listener registered at call time; returns the
    /// number of listeners that completed without error.
    pub fn emit(&self, value: &T) -> usize {
        let snapshot: SmallVec<[(u64, Listener<T>); 4]> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(id, l)| (*id, l.clone()))
            .collect();
        let mut delivered = 0;
        for (id, listener) in snapshot {
            // A listener removed earlier in this round must not fire.
            if !self.inner.borrow().contains(id) {
                continue;
            }
            let Ok(mut f) = listener.try_borrow_mut() else {
                log::warn!("[{}] listener {} re-entered, skipped", self.tag, id);
                continue;
            };
            match (*f)(value) {
                Ok(()) => delivered += 1,
                Err(e) => log::warn!("[{}] listener {} failed: {:?}", self.tag, id, e),
            }
        }
        delivered
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().listeners.clear();
    }
}

/// Handle returned by [`Emitter::subscribe`].
///
/// Dropping the handle keeps the listener registered; call
/// [`Subscription::unsubscribe`] to revoke it.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}
