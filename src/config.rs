//! Static stage configuration: design canvas, zones, parallax tuning and
//! sprite-sheet animations.
//!
//! Everything here is read once at startup from embedded JSON and is
//! read-only afterwards, except [`ParallaxConfig`] which can be patched at
//! runtime through [`ParallaxPatch`].

use crate::constants::{
    DEFAULT_LAYER_DEPTH, DEFAULT_LAYER_SELECTOR, DEFAULT_RATIO_Y, DEFAULT_SMOOTH,
    DEFAULT_SPRITE_FPS, DEFAULT_SPRITE_FRAME_HEIGHT, DEFAULT_SPRITE_FRAME_WIDTH,
};
use crate::error::{Result, StageError};
use fnv::FnvHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The fixed logical canvas every percentage rectangle is relative to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSpace {
    pub design_width: f64,
    pub design_height: f64,
}

impl DesignSpace {
    pub fn new(design_width: f64, design_height: f64) -> Result<Self> {
        let space = Self {
            design_width,
            design_height,
        };
        space.validate()?;
        Ok(space)
    }

    pub fn validate(&self) -> Result<()> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.design_width) && ok(self.design_height) {
            Ok(())
        } else {
            Err(StageError::InvalidDesignSpace {
                width: self.design_width,
                height: self.design_height,
            })
        }
    }
}

/// Percentage rectangle, each component expected in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRect {
    pub x_pct: f64,
    pub y_pct: f64,
    pub w_pct: f64,
    pub h_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    Control,
    Apartment,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ZoneKind,
    pub rect: ZoneRect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl Zone {
    /// Accessible name: the label when present, the id otherwise.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }

    pub fn action_or_empty(&self) -> &str {
        self.action.as_deref().unwrap_or("")
    }
}

/// Contents of the zones file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZonesData {
    #[serde(default)]
    pub meta: Option<DesignSpace>,
    #[serde(default)]
    pub zones: Vec<Zone>,
}

impl ZonesData {
    pub fn from_json(text: &str) -> Result<Self> {
        let data: ZonesData = serde_json::from_str(text).map_err(|source| StageError::Parse {
            what: "zones",
            source,
        })?;
        data.validate()?;
        Ok(data)
    }

    pub fn validate(&self) -> Result<()> {
        self.design()?.validate()?;
        let mut seen = FnvHashSet::default();
        for zone in &self.zones {
            if !seen.insert(zone.id.as_str()) {
                return Err(StageError::DuplicateZone(zone.id.clone()));
            }
        }
        Ok(())
    }

    /// The design canvas from the `meta` block.
    pub fn design(&self) -> Result<DesignSpace> {
        self.meta.ok_or(StageError::MissingDesignSpace)
    }

    pub fn of_kind(&self, kind: ZoneKind) -> impl Iterator<Item = &Zone> + '_ {
        self.zones.iter().filter(move |z| z.kind == kind)
    }
}

fn default_depth() -> f64 {
    DEFAULT_LAYER_DEPTH
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub selector: String,
    #[serde(default = "default_depth")]
    pub depth: f64,
}

impl LayerSpec {
    pub fn new(selector: impl Into<String>, depth: f64) -> Self {
        Self {
            selector: selector.into(),
            depth,
        }
    }
}

/// Live parallax tuning.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParallaxConfig {
    /// Fraction of true scroll speed the background travels at (1 = with the page).
    pub ratio_y: f64,
    /// Per-frame interpolation factor (1 = snap).
    pub smooth: f64,
    pub layers: Vec<LayerSpec>,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            ratio_y: DEFAULT_RATIO_Y,
            smooth: DEFAULT_SMOOTH,
            layers: vec![LayerSpec::new(DEFAULT_LAYER_SELECTOR, DEFAULT_LAYER_DEPTH)],
        }
    }
}

impl ParallaxConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let mut cfg = Self::default();
        cfg.apply(&ParallaxPatch::from_json(text)?);
        Ok(cfg)
    }

    /// Merge a patch; numbers are clamped into `[0, 1]`, non-finite ones ignored.
    pub fn apply(&mut self, patch: &ParallaxPatch) {
        if let Some(v) = patch.ratio_y.and_then(unit_interval) {
            self.ratio_y = v;
        }
        if let Some(v) = patch.smooth.and_then(unit_interval) {
            self.smooth = v;
        }
        if let Some(layers) = &patch.layers {
            self.layers = layers.clone();
        }
    }
}

fn unit_interval(v: f64) -> Option<f64> {
    v.is_finite().then(|| v.clamp(0.0, 1.0))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetaPatch {
    ratio_y: Option<f64>,
    smooth: Option<f64>,
}

/// Partial update for [`ParallaxConfig`]. Absent fields leave the live value alone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawPatch")]
pub struct ParallaxPatch {
    pub ratio_y: Option<f64>,
    pub smooth: Option<f64>,
    pub layers: Option<Vec<LayerSpec>>,
}

// Older parallax files nest the numbers under "meta"; top-level fields win.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPatch {
    ratio_y: Option<f64>,
    smooth: Option<f64>,
    layers: Option<Vec<LayerSpec>>,
    meta: Option<MetaPatch>,
}

impl From<RawPatch> for ParallaxPatch {
    fn from(raw: RawPatch) -> Self {
        let (meta_ratio, meta_smooth) = raw
            .meta
            .map(|m| (m.ratio_y, m.smooth))
            .unwrap_or((None, None));
        Self {
            ratio_y: raw.ratio_y.or(meta_ratio),
            smooth: raw.smooth.or(meta_smooth),
            layers: raw.layers,
        }
    }
}

impl ParallaxPatch {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|source| StageError::Parse {
            what: "parallax",
            source,
        })
    }

    pub fn ratio_y(mut self, v: f64) -> Self {
        self.ratio_y = Some(v);
        self
    }

    pub fn smooth(mut self, v: f64) -> Self {
        self.smooth = Some(v);
        self
    }

    pub fn layers(mut self, layers: Vec<LayerSpec>) -> Self {
        self.layers = Some(layers);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationKind {
    SpriteSteps,
    #[default]
    #[serde(other)]
    Other,
}

/// Axis the frames are laid out along in the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpriteLayout {
    #[default]
    Horizontal,
    Vertical,
}

fn default_fps() -> f64 {
    DEFAULT_SPRITE_FPS
}

fn default_frame_width() -> f64 {
    DEFAULT_SPRITE_FRAME_WIDTH
}

fn default_frame_height() -> f64 {
    DEFAULT_SPRITE_FRAME_HEIGHT
}

/// One looping sprite sheet that replaces the static art of the zone it is
/// keyed by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpriteSheet {
    #[serde(rename = "type", default)]
    pub kind: AnimationKind,
    #[serde(default)]
    pub frames: u32,
    #[serde(default = "default_fps")]
    pub fps: f64,
    #[serde(default)]
    pub layout: SpriteLayout,
    /// Sheet URL.
    #[serde(default)]
    pub sprite: String,
    #[serde(default = "default_frame_width")]
    pub frame_width: f64,
    #[serde(default = "default_frame_height")]
    pub frame_height: f64,
}

impl SpriteSheet {
    /// Entries of another kind, without frames, without a sheet or with a
    /// non-positive frame rate are skipped.
    pub fn is_playable(&self) -> bool {
        self.kind == AnimationKind::SpriteSteps
            && self.frames > 0
            && !self.sprite.is_empty()
            && self.fps.is_finite()
            && self.fps > 0.0
    }

    /// Seconds per loop.
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        self.frames as f64 / self.fps
    }
}

/// Contents of the animations file: zone id → animation entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimationsConfig {
    pub entries: BTreeMap<String, SpriteSheet>,
}

impl AnimationsConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|source| StageError::Parse {
            what: "animations",
            source,
        })
    }

    /// Playable sheets in zone-id order.
    pub fn sprites(&self) -> impl Iterator<Item = (&str, &SpriteSheet)> + '_ {
        self.entries
            .iter()
            .filter(|(_, sheet)| sheet.is_playable())
            .map(|(id, sheet)| (id.as_str(), sheet))
    }
}
