use crate::constants::{PARALLAX_ATTR, REDUCED_MOTION_QUERY, SCALE_CSS_VAR};
use crate::overlay::ZoneElement;
use crate::parallax::ParallaxHost;
use crate::projector::PixelRect;
use crate::scale::ScaleHost;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

pub fn create_html(
    document: &web::Document,
    tag: &str,
    class: &str,
) -> anyhow::Result<web::HtmlElement> {
    let el = document.create_element(tag).map_err(js_err)?;
    el.set_class_name(class);
    el.dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow::anyhow!("<{}> is not an HtmlElement: {:?}", tag, e))
}

pub fn set_styles(el: &web::HtmlElement, styles: &[(&str, &str)]) -> anyhow::Result<()> {
    let style = el.style();
    for (k, v) in styles {
        style.set_property(k, v).map_err(js_err)?;
    }
    Ok(())
}

/// Absolutely positioned container sized to the design canvas; the stage's
/// own transform takes care of scaling.
pub fn create_design_layer(
    document: &web::Document,
    class: &str,
    width: f64,
    height: f64,
) -> anyhow::Result<web::HtmlElement> {
    let layer = create_html(document, "div", class)?;
    set_styles(
        &layer,
        &[
            ("position", "absolute"),
            ("inset", "0"),
            ("pointer-events", "none"),
            ("width", &format!("{}px", width)),
            ("height", &format!("{}px", height)),
        ],
    )?;
    Ok(layer)
}

impl ZoneElement for web::HtmlElement {
    fn place(&self, rect: &PixelRect) -> anyhow::Result<()> {
        set_styles(
            self,
            &[
                ("left", &format!("{}px", rect.left)),
                ("top", &format!("{}px", rect.top)),
                ("width", &format!("{}px", rect.width)),
                ("height", &format!("{}px", rect.height)),
            ],
        )
    }

    fn detach(&self) {
        self.remove();
    }
}

/// A DOM listener that is removed again when dropped.
pub struct EventBinding {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl EventBinding {
    pub fn new<E: JsCast + 'static>(
        target: &web::EventTarget,
        event: &'static str,
        mut handler: impl FnMut(E) + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            handler(ev.unchecked_into::<E>());
        }) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(js_err)?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for EventBinding {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

pub struct WebScaleHost {
    root: web::HtmlElement,
    stage: web::HtmlElement,
}

impl WebScaleHost {
    pub fn new(document: &web::Document, stage: web::HtmlElement) -> anyhow::Result<Self> {
        let root = document
            .document_element()
            .ok_or_else(|| anyhow::anyhow!("no document element"))?
            .dyn_into::<web::HtmlElement>()
            .map_err(|e| anyhow::anyhow!("document element is not an HtmlElement: {:?}", e))?;
        Ok(Self { root, stage })
    }
}

impl ScaleHost for WebScaleHost {
    fn viewport_width(&self) -> f64 {
        self.root.client_width() as f64
    }

    fn prepare(&self) -> anyhow::Result<()> {
        set_styles(&self.stage, &[("transform-origin", "top left")])
    }

    fn apply_scale(&self, scale: f64) -> anyhow::Result<()> {
        set_styles(&self.stage, &[("transform", &format!("scale({})", scale))])?;
        set_styles(&self.root, &[(SCALE_CSS_VAR, &scale.to_string())])
    }
}

pub struct WebParallaxHost {
    window: web::Window,
    stage: web::HtmlElement,
}

impl WebParallaxHost {
    pub fn new(window: web::Window, stage: web::HtmlElement) -> Self {
        Self { window, stage }
    }
}

impl ParallaxHost for WebParallaxHost {
    type Layer = web::HtmlElement;

    fn resolve_layer(&self, selector: &str) -> Option<web::HtmlElement> {
        self.stage
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    }

    fn stage_top(&self) -> Option<f64> {
        let vw = self.window.inner_width().ok()?.as_f64()?;
        let vh = self.window.inner_height().ok()?.as_f64()?;
        if vw <= 0.0 || vh <= 0.0 {
            return None;
        }
        let rect = self.stage.get_bounding_client_rect();
        Some(rect.top())
    }

    fn translate(&self, layer: &web::HtmlElement, y_px: f64) -> anyhow::Result<()> {
        set_styles(
            layer,
            &[("transform", &format!("translate3d(0, {}px, 0)", y_px))],
        )
    }

    fn reflect(&self, state: Option<bool>) {
        match state {
            Some(on) => {
                _ = self
                    .stage
                    .set_attribute(PARALLAX_ATTR, if on { "on" } else { "off" });
            }
            None => {
                _ = self.stage.remove_attribute(PARALLAX_ATTR);
            }
        }
    }
}

pub fn reduced_motion_query(window: &web::Window) -> Option<web::MediaQueryList> {
    match window.match_media(REDUCED_MOTION_QUERY) {
        Ok(q) => q,
        Err(e) => {
            log::warn!("[parallax] matchMedia failed: {:?}", e);
            None
        }
    }
}
