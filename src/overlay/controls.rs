//! Semantic `<button>` hotspots for control zones and enabled apartments.
//!
//! Activation (click, Enter on keydown, Space on keyup) is broadcast as an
//! [`Activation`] to every listener registered with
//! [`ControlsLayer::on_activate`].

use super::{Activation, Placement, ZoneLayout};
use crate::config::{Zone, ZoneKind, ZonesData};
use crate::constants::{APARTMENT_BUTTON_CLASS, CONTROLS_LAYER_CLASS, CONTROL_BUTTON_CLASS};
use crate::dom::{self, js_err, EventBinding};
use crate::emitter::{Emitter, Subscription};
use crate::frame::FrameScheduler;
use crate::input::{button_key_action, nav_move_for_key, nav_target, ButtonKey, KeyPhase};
use crate::scale::{ScaleAdapter, ScaleHost};
use std::cell::RefCell;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct ControlsLayer {
    container: web::HtmlElement,
    layout: ZoneLayout<web::HtmlElement>,
    activations: Emitter<Activation>,
    bindings: RefCell<Vec<EventBinding>>,
}

fn button_class(kind: ZoneKind) -> &'static str {
    match kind {
        ZoneKind::Apartment => APARTMENT_BUTTON_CLASS,
        _ => CONTROL_BUTTON_CLASS,
    }
}

fn wire_button(
    btn: &web::HtmlElement,
    zone: &Zone,
    activations: &Emitter<Activation>,
) -> anyhow::Result<Vec<EventBinding>> {
    let target: &web::EventTarget = btn.as_ref();

    let btn_down = btn.clone();
    let keydown = EventBinding::new(target, "keydown", move |ev: web::KeyboardEvent| {
        match button_key_action(KeyPhase::Down, &ev.key(), &ev.code()) {
            ButtonKey::Suppress => ev.prevent_default(),
            ButtonKey::Activate => {
                ev.prevent_default();
                btn_down.click();
            }
            ButtonKey::Ignore => {}
        }
    })?;

    let btn_up = btn.clone();
    let keyup = EventBinding::new(target, "keyup", move |ev: web::KeyboardEvent| {
        if button_key_action(KeyPhase::Up, &ev.key(), &ev.code()) == ButtonKey::Activate {
            ev.prevent_default();
            btn_up.click();
        }
    })?;

    let emitter = activations.clone();
    let payload = Activation::click(zone);
    let click = EventBinding::new(target, "click", move |_: web::MouseEvent| {
        log::debug!("[controls] activated {} ({})", payload.id, payload.action);
        emitter.emit(&payload);
    })?;

    Ok(vec![keydown, keyup, click])
}

// Arrow keys / Home / End move focus between visible apartment buttons.
fn wire_arrow_navigation(container: &web::HtmlElement) -> anyhow::Result<EventBinding> {
    let root = container.clone();
    let selector = format!(".{}", APARTMENT_BUTTON_CLASS);
    let target: &web::EventTarget = container.as_ref();
    EventBinding::new(
        target,
        "keydown",
        move |ev: web::KeyboardEvent| {
            if ev.alt_key() || ev.ctrl_key() || ev.meta_key() {
                return;
            }
            let Some(mv) = nav_move_for_key(&ev.key()) else {
                return;
            };
            let Some(current) = ev
                .target()
                .and_then(|t| t.dyn_into::<web::HtmlElement>().ok())
            else {
                return;
            };
            if !current.matches(&selector).unwrap_or(false) {
                return;
            }
            let Ok(nodes) = root.query_selector_all(&selector) else {
                return;
            };
            let buttons: Vec<web::HtmlElement> = (0..nodes.length())
                .filter_map(|i| nodes.item(i))
                .filter_map(|n| n.dyn_into::<web::HtmlElement>().ok())
                .filter(|b| !b.has_attribute("disabled") && b.offset_parent().is_some())
                .collect();
            let index = buttons.iter().position(|b| *b == current);
            if let Some(next) = nav_target(index, buttons.len(), mv) {
                ev.prevent_default();
                _ = buttons[next].focus();
            }
        },
    )
}

impl ControlsLayer {
    /// Builds one button per control zone plus one per apartment zone whose
    /// id is listed in `enabled_apartments`.
    pub fn new<H: ScaleHost, S: FrameScheduler>(
        document: &web::Document,
        stage: &web::Element,
        zones: &ZonesData,
        adapter: &ScaleAdapter<H, S>,
        enabled_apartments: &[&str],
    ) -> anyhow::Result<Self> {
        let design = zones.design()?;
        let container = dom::create_design_layer(
            document,
            CONTROLS_LAYER_CLASS,
            design.design_width,
            design.design_height,
        )?;
        _ = container.set_attribute("role", "toolbar");
        _ = container.set_attribute("aria-label", "Billboard controls");
        stage.append_child(&container).map_err(js_err)?;

        let activations = Emitter::new("controls");
        let mut bindings = Vec::new();
        let mut entries = Vec::new();
        let wanted = zones.zones.iter().filter(|z| match z.kind {
            ZoneKind::Control => true,
            ZoneKind::Apartment => enabled_apartments.contains(&z.id.as_str()),
            ZoneKind::Other => false,
        });
        for zone in wanted {
            let btn: web::HtmlButtonElement = document
                .create_element("button")
                .map_err(js_err)?
                .dyn_into()
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            btn.set_type("button");
            btn.set_class_name(button_class(zone.kind));
            let btn = web::HtmlElement::from(btn);
            _ = btn.set_attribute("data-id", &zone.id);
            _ = btn.set_attribute("data-action", zone.action_or_empty());
            _ = btn.set_attribute("aria-label", zone.display_label());
            dom::set_styles(
                &btn,
                &[
                    ("position", "absolute"),
                    ("pointer-events", "auto"),
                    ("background", "transparent"),
                    ("border", "none"),
                    ("padding", "0"),
                    ("cursor", "pointer"),
                ],
            )?;
            bindings.extend(wire_button(&btn, zone, &activations)?);
            container.append_child(&btn).map_err(js_err)?;
            entries.push(Placement {
                zone: zone.clone(),
                element: btn,
            });
        }
        bindings.push(wire_arrow_navigation(&container)?);

        let layout = ZoneLayout::new(design, adapter.reader(), entries);
        layout.attach(adapter);
        log::info!("[controls] buttons={}", layout.len());

        Ok(Self {
            container,
            layout,
            activations,
            bindings: RefCell::new(bindings),
        })
    }

    pub fn on_activate(
        &self,
        f: impl FnMut(&Activation) -> anyhow::Result<()> + 'static,
    ) -> Subscription {
        self.activations.subscribe(f)
    }

    pub fn get_button(&self, id: &str) -> Option<web::HtmlElement> {
        self.layout.get(id).map(|p| p.element.clone())
    }

    pub fn get_container(&self) -> &web::HtmlElement {
        &self.container
    }

    pub fn destroy(&self) {
        if self.layout.is_destroyed() {
            return;
        }
        self.activations.clear();
        self.bindings.borrow_mut().clear();
        self.layout.destroy();
        self.container.remove();
    }
}
