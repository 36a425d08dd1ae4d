//! Single source of truth for the design-space → viewport scale.

use crate::config::DesignSpace;
use crate::emitter::{Emitter, Subscription};
use crate::error::Result;
use crate::frame::{FrameHandle, FrameScheduler};
use crate::projector::scale_for_viewport;
use std::cell::Cell;
use std::rc::Rc;

/// Platform side of the adapter: measures the viewport, styles the stage.
pub trait ScaleHost {
    fn viewport_width(&self) -> f64;
    /// One-time stage setup (transform origin).
    fn prepare(&self) -> anyhow::Result<()>;
    fn apply_scale(&self, scale: f64) -> anyhow::Result<()>;
}

/// Read-only view of the live scale. Consumers pull on demand instead of
/// caching the value across frames.
#[derive(Clone, Debug)]
pub struct ScaleReader(Rc<Cell<f64>>);

impl ScaleReader {
    /// A reader pinned to `scale`, for components used without an adapter.
    pub fn fixed(scale: f64) -> Self {
        Self(Rc::new(Cell::new(scale)))
    }

    #[inline]
    pub fn get(&self) -> f64 {
        self.0.get()
    }
}

pub struct ScaleAdapter<H, S> {
    design: DesignSpace,
    scale: Rc<Cell<f64>>,
    changes: Emitter<f64>,
    host: H,
    scheduler: S,
    pending: Cell<Option<FrameHandle>>,
    destroyed: Cell<bool>,
}

impl<H: ScaleHost, S: FrameScheduler> ScaleAdapter<H, S> {
    /// Validates the design space and applies the initial scale eagerly, so
    /// `get_scale` is meaningful before the first resize.
    pub fn new(design: DesignSpace, host: H, scheduler: S) -> Result<Self> {
        design.validate()?;
        let scale = scale_for_viewport(host.viewport_width(), design.design_width);
        if let Err(e) = host.prepare() {
            log::warn!("[scale] stage setup failed: {:?}", e);
        }
        if let Err(e) = host.apply_scale(scale) {
            log::warn!("[scale] apply failed: {:?}", e);
        }
        log::info!(
            "[scale] design={}x{} scale={:.4}",
            design.design_width,
            design.design_height,
            scale
        );
        Ok(Self {
            design,
            scale: Rc::new(Cell::new(scale)),
            changes: Emitter::new("scale"),
            host,
            scheduler,
            pending: Cell::new(None),
            destroyed: Cell::new(false),
        })
    }

    #[inline]
    pub fn get_scale(&self) -> f64 {
        self.scale.get()
    }

    pub fn reader(&self) -> ScaleReader {
        ScaleReader(self.scale.clone())
    }

    pub fn design(&self) -> DesignSpace {
        self.design
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Not fired on subscribe; consumers lay out once themselves.
    pub fn on_change(&self, f: impl FnMut(&f64) -> anyhow::Result<()> + 'static) -> Subscription {
        self.changes.subscribe(f)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    /// Coalesce: only the most recent request per frame survives.
    pub fn handle_resize(&self) {
        if self.destroyed.get() {
            return;
        }
        if let Some(h) = self.pending.take() {
            self.scheduler.cancel(h);
        }
        self.pending.set(self.scheduler.request());
    }

    /// Scheduled recomputation: compute, apply, then notify synchronously.
    pub fn on_frame(&self) -> f64 {
        self.pending.set(None);
        if self.destroyed.get() {
            return self.scale.get();
        }
        let scale = scale_for_viewport(self.host.viewport_width(), self.design.design_width);
        self.scale.set(scale);
        if let Err(e) = self.host.apply_scale(scale) {
            log::warn!("[scale] apply failed: {:?}", e);
        }
        log::debug!("[scale] recomputed scale={:.4}", scale);
        self.changes.emit(&scale);
        scale
    }

    pub fn destroy(&self) {
        if self.destroyed.replace(true) {
            return;
        }
        if let Some(h) = self.pending.take() {
            self.scheduler.cancel(h);
        }
        self.changes.clear();
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }
}
