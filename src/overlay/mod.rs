//! Overlay layers kept in registration with the scaled stage.
//!
//! [`ZoneLayout`] is the placement core every layer shares: it owns the
//! zone → element pairs and writes the projected rectangle into each element
//! on every scale change, plus once eagerly when attached.

use crate::config::{DesignSpace, Zone};
use crate::emitter::Subscription;
use crate::frame::FrameScheduler;
use crate::projector::{project, PixelRect};
use crate::scale::{ScaleAdapter, ScaleHost, ScaleReader};
use fnv::FnvHashMap;
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
pub mod controls;
#[cfg(target_arch = "wasm32")]
pub mod debug;

/// Something a layer can position over the stage.
pub trait ZoneElement {
    fn place(&self, rect: &PixelRect) -> anyhow::Result<()>;
    fn detach(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationKind {
    Click,
}

/// Payload delivered to hotspot listeners when a zone button is activated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activation {
    pub id: String,
    pub action: String,
    #[serde(rename = "type")]
    pub kind: ActivationKind,
}

impl Activation {
    pub fn click(zone: &Zone) -> Self {
        Self {
            id: zone.id.clone(),
            action: zone.action_or_empty().to_string(),
            kind: ActivationKind::Click,
        }
    }
}

pub struct Placement<E> {
    pub zone: Zone,
    pub element: E,
}

pub struct ZoneLayout<E> {
    design: DesignSpace,
    scale: RefCell<ScaleReader>,
    entries: Rc<Vec<Placement<E>>>,
    index: FnvHashMap<String, usize>,
    subscription: RefCell<Option<Subscription>>,
    destroyed: Cell<bool>,
}

impl<E: ZoneElement + 'static> ZoneLayout<E> {
    pub fn new(design: DesignSpace, scale: ScaleReader, entries: Vec<Placement<E>>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, p)| (p.zone.id.clone(), i))
            .collect();
        Self {
            design,
            scale: RefCell::new(scale),
            entries: Rc::new(entries),
            index,
            subscription: RefCell::new(None),
            destroyed: Cell::new(false),
        }
    }

    /// Lay out once now, then again on every scale change.
    pub fn attach<H: ScaleHost, S: FrameScheduler>(&self, adapter: &ScaleAdapter<H, S>) {
        if self.destroyed.get() {
            return;
        }
        let reader = adapter.reader();
        *self.scale.borrow_mut() = reader.clone();
        if let Err(e) = self.layout() {
            log::warn!("[overlay] initial layout: {:?}", e);
        }
        let entries = self.entries.clone();
        let design = self.design;
        let sub = adapter.on_change(move |_| layout_entries(&entries, &design, reader.get()));
        if let Some(mut old) = self.subscription.borrow_mut().replace(sub) {
            old.unsubscribe();
        }
    }

    pub fn layout(&self) -> anyhow::Result<()> {
        layout_entries(&self.entries, &self.design, self.scale.borrow().get())
    }

    pub fn design(&self) -> DesignSpace {
        self.design
    }

    pub fn entries(&self) -> &[Placement<E>] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&Placement<E>> {
        self.index.get(id).and_then(|&i| self.entries.get(i))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn destroy(&self) {
        if self.destroyed.replace(true) {
            return;
        }
        if let Some(mut sub) = self.subscription.borrow_mut().take() {
            sub.unsubscribe();
        }
        for p in self.entries.iter() {
            p.element.detach();
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }
}

// Every element is placed even if an earlier one fails; the first error wins.
fn layout_entries<E: ZoneElement>(
    entries: &[Placement<E>],
    design: &DesignSpace,
    scale: f64,
) -> anyhow::Result<()> {
    let mut first_err = None;
    for p in entries {
        let rect = project(&p.zone.rect, design, scale);
        if let Err(e) = p.element.place(&rect) {
            log::debug!("[overlay] place {} failed: {:?}", p.zone.id, e);
            first_err.get_or_insert(e);
        }
    }
    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
