//! Scroll-coupled background parallax.
//!
//! The engine never reads scroll-container state: every frame it samples the
//! stage's viewport-relative top, compares it with the baseline captured on
//! the first sample after (re)start and derives the compensating offset from
//! that delta. The offset is exponentially smoothed and written as a vertical
//! translation on each resolved layer.
//!
//! Enabled = explicit toggle AND NOT reduced motion. Both inputs go through
//! the same state transition.

use crate::config::{LayerSpec, ParallaxConfig, ParallaxPatch};
use crate::constants::DEFAULT_LAYER_DEPTH;
use crate::error::{Result, StageError};
use crate::frame::{FrameHandle, FrameScheduler};
use crate::projector::snap;
use crate::scale::ScaleReader;
use serde::Serialize;

/// Platform side of the engine: stage geometry, layer styling, state hook.
pub trait ParallaxHost {
    type Layer;

    fn resolve_layer(&self, selector: &str) -> Option<Self::Layer>;
    /// Stage top relative to the viewport, `None` for a degenerate sample
    /// (zero-sized viewport, detached stage).
    fn stage_top(&self) -> Option<f64>;
    fn translate(&self, layer: &Self::Layer, y_px: f64) -> anyhow::Result<()>;
    /// `Some(on)` reflects the state on the stage, `None` clears the hook.
    fn reflect(&self, state: Option<bool>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParallaxState {
    Disabled,
    EnabledIdle,
    EnabledRunning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParallaxSnapshot {
    pub state: ParallaxState,
    pub user_enabled: bool,
    pub reduced_motion: bool,
    pub baseline_top: Option<f64>,
    pub current_offset: f64,
    pub config: ParallaxConfig,
    pub layer_count: usize,
}

struct BoundLayer<L> {
    selector: String,
    depth: f64,
    handle: L,
}

pub struct ParallaxEngine<H: ParallaxHost, S> {
    host: H,
    scheduler: S,
    scale: ScaleReader,
    config: ParallaxConfig,
    layers: Vec<BoundLayer<H::Layer>>,
    baseline_top: Option<f64>,
    current_offset: f64,
    user_enabled: bool,
    reduced_motion: bool,
    active: bool,
    pending: Option<FrameHandle>,
    destroyed: bool,
}

fn bind_layers<H: ParallaxHost>(host: &H, specs: &[LayerSpec]) -> Vec<BoundLayer<H::Layer>> {
    specs
        .iter()
        .filter_map(|spec| match host.resolve_layer(&spec.selector) {
            Some(handle) => Some(BoundLayer {
                selector: spec.selector.clone(),
                depth: if spec.depth.is_finite() { spec.depth } else { DEFAULT_LAYER_DEPTH },
                handle,
            }),
            None => {
                log::warn!("[parallax] layer {} not found", spec.selector);
                None
            }
        })
        .collect()
}

fn selector_list(specs: &[LayerSpec]) -> String {
    specs
        .iter()
        .map(|s| s.selector.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl<H: ParallaxHost, S: FrameScheduler> ParallaxEngine<H, S> {
    /// Fails when no configured layer resolves: there is nothing to animate.
    /// Otherwise starts running unless `reduced_motion` is set.
    pub fn new(
        host: H,
        scheduler: S,
        scale: ScaleReader,
        config: ParallaxConfig,
        reduced_motion: bool,
    ) -> Result<Self> {
        let layers = bind_layers(&host, &config.layers);
        if layers.is_empty() {
            return Err(StageError::NoLayers(selector_list(&config.layers)));
        }
        let mut engine = Self {
            host,
            scheduler,
            scale,
            config,
            layers,
            baseline_top: None,
            current_offset: 0.0,
            user_enabled: true,
            reduced_motion,
            active: false,
            pending: None,
            destroyed: false,
        };
        engine.active = engine.wants_enabled();
        engine.host.reflect(Some(engine.active));
        if engine.active {
            engine.start();
        } else {
            engine.write_neutral();
        }
        log::info!(
            "[parallax] layers={} ratioY={:.2} smooth={:.2} enabled={}",
            engine.layers.len(),
            engine.config.ratio_y,
            engine.config.smooth,
            engine.active
        );
        Ok(engine)
    }

    fn wants_enabled(&self) -> bool {
        !self.destroyed && self.user_enabled && !self.reduced_motion
    }

    pub fn state(&self) -> ParallaxState {
        match (self.active, self.pending.is_some()) {
            (false, _) => ParallaxState::Disabled,
            (true, true) => ParallaxState::EnabledRunning,
            (true, false) => ParallaxState::EnabledIdle,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.active
    }

    /// The explicit toggle, independent of the reduced-motion preference.
    pub fn user_enabled(&self) -> bool {
        self.user_enabled
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn current_offset(&self) -> f64 {
        self.current_offset
    }

    pub fn baseline_top(&self) -> Option<f64> {
        self.baseline_top
    }

    pub fn config(&self) -> &ParallaxConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn snapshot(&self) -> ParallaxSnapshot {
        ParallaxSnapshot {
            state: self.state(),
            user_enabled: self.user_enabled,
            reduced_motion: self.reduced_motion,
            baseline_top: self.baseline_top,
            current_offset: self.current_offset,
            config: self.config.clone(),
            layer_count: self.layers.len(),
        }
    }

    /// Schedule the loop; the first sample after this becomes the baseline.
    pub fn start(&mut self) {
        if !self.active || self.pending.is_some() {
            return;
        }
        self.baseline_top = None;
        self.pending = self.scheduler.request();
    }

    pub fn stop(&mut self) {
        if let Some(h) = self.pending.take() {
            self.scheduler.cancel(h);
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.user_enabled = enabled;
        self.sync();
    }

    /// Platform preference, observed live.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
        self.sync();
    }

    fn sync(&mut self) {
        let next = self.wants_enabled();
        if next == self.active {
            return;
        }
        self.active = next;
        self.host.reflect(Some(next));
        if next {
            self.baseline_top = None;
            self.start();
        } else {
            self.stop();
            self.current_offset = 0.0;
            self.write_neutral();
        }
        log::info!("[parallax] {}", if next { "enabled" } else { "disabled" });
    }

    /// Merge `patch`, re-baseline, and recompute once right away so an idle or
    /// disabled engine still shows the new resting state.
    pub fn set_config(&mut self, patch: &ParallaxPatch) {
        if self.destroyed {
            return;
        }
        let previous_layers = self.config.layers.clone();
        self.config.apply(patch);
        if patch.layers.is_some() {
            let bound = bind_layers(&self.host, &self.config.layers);
            if bound.is_empty() {
                log::warn!(
                    "[parallax] none of [{}] resolved, keeping current layers",
                    selector_list(&self.config.layers)
                );
                self.config.layers = previous_layers;
            } else {
                self.write_neutral();
                self.layers = bound;
            }
        }
        self.baseline_top = None;
        if self.active {
            self.step();
        } else {
            self.write_neutral();
        }
    }

    /// The scheduled frame body.
    pub fn on_frame(&mut self) {
        self.pending = None;
        if !self.active {
            return;
        }
        self.step();
        if self.active {
            self.pending = self.scheduler.request();
        }
    }

    /// One measure → target → smooth → apply cycle. Returns the applied offset.
    pub fn step(&mut self) -> f64 {
        let target = self.target_offset();
        let smooth = self.config.smooth;
        if smooth >= 1.0 {
            self.current_offset = target;
        } else {
            self.current_offset += (target - self.current_offset) * smooth.max(0.0);
        }
        self.write(self.current_offset);
        self.current_offset
    }

    fn target_offset(&mut self) -> f64 {
        let Some(top) = self.host.stage_top().filter(|t| t.is_finite()) else {
            log::debug!("[parallax] degenerate sample, target=0");
            return 0.0;
        };
        let baseline = *self.baseline_top.get_or_insert(top);
        let scrolled = baseline - top;
        scrolled * (1.0 - self.config.ratio_y)
    }

    fn write(&self, offset: f64) {
        let scale = self.scale.get();
        for layer in &self.layers {
            let y = snap(offset * layer.depth, scale);
            if let Err(e) = self.host.translate(&layer.handle, y) {
                log::debug!("[parallax] write {} failed: {:?}", layer.selector, e);
            }
        }
    }

    fn write_neutral(&self) {
        for layer in &self.layers {
            if let Err(e) = self.host.translate(&layer.handle, 0.0) {
                log::debug!("[parallax] reset {} failed: {:?}", layer.selector, e);
            }
        }
    }

    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.stop();
        self.destroyed = true;
        self.active = false;
        self.current_offset = 0.0;
        self.write_neutral();
        self.host.reflect(None);
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}
