use crate::config::{DesignSpace, ZoneRect};
use crate::constants::MAX_SCALE;

/// A zone rectangle projected into design-space pixels, snapped so that the
/// stage's own `scale()` transform lands every edge on a whole device pixel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// `min(viewport_width / design_width, 1)`; degenerate widths map to 1.
#[inline]
pub fn scale_for_viewport(viewport_width: f64, design_width: f64) -> f64 {
    if !(viewport_width.is_finite() && viewport_width > 0.0) {
        return MAX_SCALE;
    }
    if !(design_width.is_finite() && design_width > 0.0) {
        return MAX_SCALE;
    }
    (viewport_width / design_width).min(MAX_SCALE)
}

/// Round at the rendering scale, then un-scale.
#[inline]
pub fn snap(value: f64, scale: f64) -> f64 {
    let s = if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        MAX_SCALE
    };
    (value * s).round() / s
}

#[inline]
pub fn project(rect: &ZoneRect, design: &DesignSpace, scale: f64) -> PixelRect {
    let x = rect.x_pct / 100.0 * design.design_width;
    let y = rect.y_pct / 100.0 * design.design_height;
    let w = rect.w_pct / 100.0 * design.design_width;
    let h = rect.h_pct / 100.0 * design.design_height;
    PixelRect {
        left: snap(x, scale),
        top: snap(y, scale),
        width: snap(w, scale),
        height: snap(h, scale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_is_identity_at_unit_scale_for_integers() {
        assert_eq!(snap(37.0, 1.0), 37.0);
        assert_eq!(snap(37.4, 1.0), 37.0);
    }

    #[test]
    fn snap_falls_back_to_unit_scale() {
        assert_eq!(snap(10.6, 0.0), 11.0);
        assert_eq!(snap(10.6, f64::NAN), 11.0);
        assert_eq!(snap(10.6, -2.0), 11.0);
    }
}
