//! Stepped sprite-sheet animations layered over static apartment art.
//!
//! Each playable entry of the animations file becomes one element covering
//! the whole stage, animated with a CSS `steps()` keyframe loop. The static
//! layer it replaces is hidden while the sprite is mounted. Nothing is
//! mounted when the user prefers reduced motion.

use crate::config::{SpriteLayout, SpriteSheet};
use crate::constants::{SPRITE_KEYFRAMES_X, SPRITE_KEYFRAMES_Y, SPRITE_Z_INDEX};

/// Inline style for one sprite element sized `width` × `height`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteStyle {
    pub width: f64,
    pub height: f64,
    pub frames: u32,
    pub layout: SpriteLayout,
    pub duration_secs: f64,
    pub sheet_url: String,
}

impl SpriteStyle {
    pub fn for_sheet(sheet: &SpriteSheet, width: f64, height: f64) -> Self {
        Self {
            width: width.round(),
            height: height.round(),
            frames: sheet.frames,
            layout: sheet.layout,
            duration_secs: sheet.duration_secs(),
            sheet_url: sheet.sprite.clone(),
        }
    }

    pub fn animation_name(&self) -> &'static str {
        match self.layout {
            SpriteLayout::Horizontal => SPRITE_KEYFRAMES_X,
            SpriteLayout::Vertical => SPRITE_KEYFRAMES_Y,
        }
    }

    /// The sheet grows by `frames` along its layout axis so each frame
    /// fills the element.
    pub fn background_size(&self) -> String {
        let n = self.frames as f64;
        match self.layout {
            SpriteLayout::Horizontal => format!("{}px 100%", self.width * n),
            SpriteLayout::Vertical => format!("100% {}px", self.height * n),
        }
    }

    /// CSS declarations in application order. Animation longhands only: a
    /// later `animation` shorthand would reset them.
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        vec![
            ("position", "absolute".into()),
            ("left", "0px".into()),
            ("top", "0px".into()),
            ("width", format!("{}px", self.width)),
            ("height", format!("{}px", self.height)),
            ("z-index", SPRITE_Z_INDEX.to_string()),
            ("pointer-events", "none".into()),
            ("image-rendering", "pixelated".into()),
            ("backface-visibility", "hidden".into()),
            ("will-change", "background-position".into()),
            ("--frame-w", format!("{}px", self.width)),
            ("--frame-h", format!("{}px", self.height)),
            ("--frames", self.frames.to_string()),
            ("background-image", format!("url({})", self.sheet_url)),
            ("background-repeat", "no-repeat".into()),
            ("background-position", "0 0".into()),
            ("background-size", self.background_size()),
            ("animation-name", self.animation_name().into()),
            ("animation-duration", format!("{}s", self.duration_secs)),
            ("animation-timing-function", format!("steps({})", self.frames)),
            ("animation-iteration-count", "infinite".into()),
            ("animation-fill-mode", "none".into()),
            ("animation-direction", "normal".into()),
            ("animation-delay", "0s".into()),
        ]
    }
}

#[cfg(target_arch = "wasm32")]
pub use layer::SpriteLayer;

#[cfg(target_arch = "wasm32")]
mod layer {
    use super::SpriteStyle;
    use crate::config::AnimationsConfig;
    use crate::constants::{SPRITE_CLASS, SPRITE_HOST_SELECTOR};
    use crate::dom::{self, js_err};
    use std::cell::{Cell, RefCell};
    use wasm_bindgen::JsCast;
    use web_sys as web;

    struct MountedSprite {
        element: web::HtmlElement,
        /// Static art hidden while the sprite plays.
        host: Option<web::HtmlElement>,
    }

    pub struct SpriteLayer {
        sprites: RefCell<Vec<MountedSprite>>,
        destroyed: Cell<bool>,
    }

    fn host_layer(stage: &web::HtmlElement, zone_id: &str) -> Option<web::HtmlElement> {
        stage
            .query_selector(&format!("{}.{}", SPRITE_HOST_SELECTOR, zone_id))
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    }

    impl SpriteLayer {
        /// Mounts every playable sprite, or none when `reduced_motion` is set.
        pub fn mount(
            document: &web::Document,
            stage: &web::HtmlElement,
            config: &AnimationsConfig,
            reduced_motion: bool,
        ) -> anyhow::Result<Self> {
            let layer = Self {
                sprites: RefCell::new(Vec::new()),
                destroyed: Cell::new(false),
            };
            if reduced_motion {
                log::info!("[sprite] reduced motion, animations skipped");
                return Ok(layer);
            }

            let width = stage.client_width() as f64;
            let height = stage.client_height() as f64;
            for (id, sheet) in config.sprites() {
                let style = SpriteStyle::for_sheet(sheet, width, height);
                let el = dom::create_html(document, "div", &format!("{} {}", SPRITE_CLASS, id))?;
                let decls = style.declarations();
                let pairs: Vec<(&str, &str)> = decls.iter().map(|(k, v)| (*k, v.as_str())).collect();
                dom::set_styles(&el, &pairs)?;

                let host = host_layer(stage, id);
                if let Some(h) = &host {
                    _ = dom::set_styles(h, &[("visibility", "hidden")]);
                }
                stage.append_child(&el).map_err(js_err)?;
                layer.sprites.borrow_mut().push(MountedSprite { element: el, host });
            }
            log::info!("[sprite] mounted={}", layer.len());
            Ok(layer)
        }

        pub fn len(&self) -> usize {
            self.sprites.borrow().len()
        }

        pub fn is_empty(&self) -> bool {
            self.sprites.borrow().is_empty()
        }

        /// Removes the sprites and shows the static art again; idempotent.
        pub fn destroy(&self) {
            if self.destroyed.replace(true) {
                return;
            }
            for sprite in self.sprites.borrow_mut().drain(..) {
                sprite.element.remove();
                if let Some(h) = sprite.host {
                    _ = h.style().remove_property("visibility");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnimationKind;

    fn sheet(frames: u32, fps: f64, layout: SpriteLayout) -> SpriteSheet {
        SpriteSheet {
            kind: AnimationKind::SpriteSteps,
            frames,
            fps,
            layout,
            sprite: "ap.png".into(),
            frame_width: 200.0,
            frame_height: 650.0,
        }
    }

    #[test]
    fn element_size_is_rounded() {
        let s = SpriteStyle::for_sheet(&sheet(4, 6.0, SpriteLayout::Horizontal), 799.6, 2600.2);
        assert_eq!((s.width, s.height), (800.0, 2600.0));
    }

    #[test]
    fn vertical_sheets_use_the_y_keyframes() {
        let s = SpriteStyle::for_sheet(&sheet(3, 6.0, SpriteLayout::Vertical), 800.0, 2600.0);
        assert_eq!(s.animation_name(), SPRITE_KEYFRAMES_Y);
        assert_eq!(s.background_size(), "100% 7800px");
    }
}
