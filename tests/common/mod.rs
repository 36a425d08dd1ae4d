// Host-side fakes standing in for requestAnimationFrame and the DOM.
#![allow(dead_code)]

use stage_web::frame::{FrameHandle, FrameScheduler};
use stage_web::overlay::ZoneElement;
use stage_web::parallax::ParallaxHost;
use stage_web::projector::PixelRect;
use stage_web::scale::ScaleHost;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Default)]
pub struct FrameLog {
    next: i32,
    pub live: Vec<FrameHandle>,
    pub requested: usize,
    pub cancelled: usize,
}

#[derive(Clone, Default)]
pub struct FakeScheduler {
    pub log: Rc<RefCell<FrameLog>>,
}

impl FrameScheduler for FakeScheduler {
    fn request(&self) -> Option<FrameHandle> {
        let mut log = self.log.borrow_mut();
        log.next += 1;
        let h = FrameHandle(log.next);
        log.live.push(h);
        log.requested += 1;
        Some(h)
    }

    fn cancel(&self, handle: FrameHandle) {
        let mut log = self.log.borrow_mut();
        let before = log.live.len();
        log.live.retain(|h| *h != handle);
        if log.live.len() != before {
            log.cancelled += 1;
        }
    }
}

impl FakeScheduler {
    pub fn live(&self) -> usize {
        self.log.borrow().live.len()
    }

    pub fn requested(&self) -> usize {
        self.log.borrow().requested
    }

    pub fn cancelled(&self) -> usize {
        self.log.borrow().cancelled
    }

    /// Advance one frame: consume every live request and run `body` once if
    /// anything was pending. Returns whether the body ran.
    pub fn fire(&self, body: impl FnOnce()) -> bool {
        let had = !self.log.borrow().live.is_empty();
        self.log.borrow_mut().live.clear();
        if had {
            body();
        }
        had
    }
}

#[derive(Clone)]
pub struct FakeScaleHost {
    pub viewport: Rc<Cell<f64>>,
    pub applied: Rc<RefCell<Vec<f64>>>,
    pub prepared: Rc<Cell<bool>>,
}

impl FakeScaleHost {
    pub fn with_width(width: f64) -> Self {
        Self {
            viewport: Rc::new(Cell::new(width)),
            applied: Rc::new(RefCell::new(Vec::new())),
            prepared: Rc::new(Cell::new(false)),
        }
    }

    pub fn applied_count(&self) -> usize {
        self.applied.borrow().len()
    }
}

impl ScaleHost for FakeScaleHost {
    fn viewport_width(&self) -> f64 {
        self.viewport.get()
    }

    fn prepare(&self) -> anyhow::Result<()> {
        self.prepared.set(true);
        Ok(())
    }

    fn apply_scale(&self, scale: f64) -> anyhow::Result<()> {
        self.applied.borrow_mut().push(scale);
        Ok(())
    }
}

#[derive(Clone)]
pub struct FakeParallaxHost {
    pub selectors: Rc<Vec<String>>,
    pub top: Rc<Cell<Option<f64>>>,
    /// Last translation written per layer index.
    pub offsets: Rc<RefCell<Vec<Option<f64>>>>,
    pub writes: Rc<Cell<usize>>,
    pub attr: Rc<RefCell<Option<String>>>,
}

impl FakeParallaxHost {
    pub fn new(selectors: &[&str]) -> Self {
        Self {
            selectors: Rc::new(selectors.iter().map(|s| s.to_string()).collect()),
            top: Rc::new(Cell::new(Some(0.0))),
            offsets: Rc::new(RefCell::new(vec![None; selectors.len()])),
            writes: Rc::new(Cell::new(0)),
            attr: Rc::new(RefCell::new(None)),
        }
    }

    pub fn set_top(&self, top: f64) {
        self.top.set(Some(top));
    }

    pub fn offset(&self, layer: usize) -> Option<f64> {
        self.offsets.borrow()[layer]
    }

    pub fn attr(&self) -> Option<String> {
        self.attr.borrow().clone()
    }
}

impl ParallaxHost for FakeParallaxHost {
    type Layer = usize;

    fn resolve_layer(&self, selector: &str) -> Option<usize> {
        self.selectors.iter().position(|s| s == selector)
    }

    fn stage_top(&self) -> Option<f64> {
        self.top.get()
    }

    fn translate(&self, layer: &usize, y_px: f64) -> anyhow::Result<()> {
        self.offsets.borrow_mut()[*layer] = Some(y_px);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn reflect(&self, state: Option<bool>) {
        *self.attr.borrow_mut() = state.map(|on| if on { "on" } else { "off" }.to_string());
    }
}

/// Records every rectangle written into it.
#[derive(Clone, Default)]
pub struct FakeElement {
    pub placed: Rc<RefCell<Vec<PixelRect>>>,
    pub detached: Rc<Cell<bool>>,
    pub fail: bool,
}

impl FakeElement {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn last(&self) -> Option<PixelRect> {
        self.placed.borrow().last().copied()
    }

    pub fn count(&self) -> usize {
        self.placed.borrow().len()
    }
}

impl ZoneElement for FakeElement {
    fn place(&self, rect: &PixelRect) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("element detached from document");
        }
        self.placed.borrow_mut().push(*rect);
        Ok(())
    }

    fn detach(&self) {
        self.detached.set(true);
    }
}
