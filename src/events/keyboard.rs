use crate::dom::EventBinding;
use crate::input::{shortcut_for_key, Shortcut};
use crate::overlay::debug::DebugOverlay;
use crate::stage::ParallaxController;
use std::rc::Rc;
use web_sys as web;

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    parallax: Option<&ParallaxController>,
    debug: Option<&DebugOverlay>,
) {
    let modified = ev.alt_key() || ev.ctrl_key() || ev.meta_key();
    match shortcut_for_key(&ev.key(), ev.repeat(), modified) {
        Some(Shortcut::ToggleParallax) => {
            if let Some(p) = parallax {
                let on = p.toggle();
                log::info!("[keys] parallax {}", if on { "enabled" } else { "disabled" });
            }
        }
        Some(Shortcut::ToggleDebugOverlay) => {
            if let Some(d) = debug {
                let visible = d.toggle();
                log::info!("[keys] debug overlay visible={}", visible);
            }
        }
        None => {}
    }
}

// "M" toggles parallax, "D" toggles the zone debug overlay.
pub fn wire_global_keydown(
    window: &web::Window,
    parallax: Option<Rc<ParallaxController>>,
    debug: Option<Rc<DebugOverlay>>,
) -> anyhow::Result<EventBinding> {
    EventBinding::new(window.as_ref(), "keydown", move |ev: web::KeyboardEvent| {
        handle_global_keydown(&ev, parallax.as_deref(), debug.as_deref());
    })
}
