/// Stage layout and motion tuning constants.
///
/// These constants express intended behavior (scale bound, parallax and
/// sprite defaults, DOM hooks) and keep magic numbers and selectors out of the code.
// The design is authored at its largest intended size and only shrinks
pub const MAX_SCALE: f64 = 1.0;

// Parallax defaults
pub const DEFAULT_RATIO_Y: f64 = 0.6; // background keeps up with 60% of scroll
pub const DEFAULT_SMOOTH: f64 = 0.12; // per-frame interpolation factor
pub const DEFAULT_LAYER_DEPTH: f64 = 1.0;
pub const DEFAULT_LAYER_SELECTOR: &str = ".city";

// DOM hooks
pub const STAGE_SELECTOR: &str = ".stage";
pub const SCALE_CSS_VAR: &str = "--computed-scale";
pub const PARALLAX_ATTR: &str = "data-parallax";
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

// Overlay classes
pub const DEBUG_OVERLAY_CLASS: &str = "zone-overlay";
pub const DEBUG_BOX_CLASS: &str = "zone-box";
pub const DEBUG_LABEL_CLASS: &str = "zone-label";
pub const CONTROLS_LAYER_CLASS: &str = "controls-layer";
pub const CONTROL_BUTTON_CLASS: &str = "control-btn";
pub const APARTMENT_BUTTON_CLASS: &str = "apartment-btn";

// Sprite-sheet animations
pub const DEFAULT_SPRITE_FPS: f64 = 6.0;
pub const DEFAULT_SPRITE_FRAME_WIDTH: f64 = 200.0;
pub const DEFAULT_SPRITE_FRAME_HEIGHT: f64 = 650.0;
pub const SPRITE_CLASS: &str = "ap-sprite";
pub const SPRITE_Z_INDEX: i32 = 51; // just above the static apartment layers (50)
pub const SPRITE_HOST_SELECTOR: &str = ".layer.apartment"; // + ".{zone id}"
pub const SPRITE_KEYFRAMES_X: &str = "sprite-anim";
pub const SPRITE_KEYFRAMES_Y: &str = "sprite-anim-y";
