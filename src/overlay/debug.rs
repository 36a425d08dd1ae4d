// Dashed zone boxes drawn over the scaled stage for authoring. Hidden by
// default; toggled with the "D" shortcut.
use super::{Placement, ZoneLayout};
use crate::config::ZonesData;
use crate::constants::{DEBUG_BOX_CLASS, DEBUG_LABEL_CLASS, DEBUG_OVERLAY_CLASS};
use crate::dom::{self, js_err};
use crate::frame::FrameScheduler;
use crate::scale::{ScaleAdapter, ScaleHost};
use std::cell::Cell;
use web_sys as web;

pub struct DebugOverlay {
    container: web::HtmlElement,
    layout: ZoneLayout<web::HtmlElement>,
    visible: Cell<bool>,
}

impl DebugOverlay {
    pub fn new<H: ScaleHost, S: FrameScheduler>(
        document: &web::Document,
        stage: &web::Element,
        zones: &ZonesData,
        adapter: &ScaleAdapter<H, S>,
        initially_visible: bool,
    ) -> anyhow::Result<Self> {
        let design = zones.design()?;
        let container = dom::create_design_layer(
            document,
            DEBUG_OVERLAY_CLASS,
            design.design_width,
            design.design_height,
        )?;
        stage.append_child(&container).map_err(js_err)?;

        let mut entries = Vec::with_capacity(zones.zones.len());
        for zone in &zones.zones {
            let el = dom::create_html(document, "div", DEBUG_BOX_CLASS)?;
            _ = el.set_attribute("data-id", &zone.id);
            dom::set_styles(
                &el,
                &[
                    ("position", "absolute"),
                    ("box-sizing", "border-box"),
                    ("pointer-events", "none"),
                ],
            )?;
            let label = dom::create_html(document, "div", DEBUG_LABEL_CLASS)?;
            label.set_text_content(Some(zone.id.as_str()));
            el.append_child(&label).map_err(js_err)?;
            container.append_child(&el).map_err(js_err)?;
            entries.push(Placement {
                zone: zone.clone(),
                element: el,
            });
        }

        let layout = ZoneLayout::new(design, adapter.reader(), entries);
        layout.attach(adapter);

        let overlay = Self {
            container,
            layout,
            visible: Cell::new(initially_visible),
        };
        overlay.apply_visibility();
        log::info!("[overlay] debug boxes={}", overlay.layout.len());
        Ok(overlay)
    }

    fn apply_visibility(&self) {
        let display = if self.visible.get() { "block" } else { "none" };
        _ = dom::set_styles(&self.container, &[("display", display)]);
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
        self.apply_visibility();
    }

    pub fn toggle(&self) -> bool {
        self.set_visible(!self.visible.get());
        self.visible.get()
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    pub fn destroy(&self) {
        if self.layout.is_destroyed() {
            return;
        }
        self.layout.destroy();
        self.container.remove();
    }
}
