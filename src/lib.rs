pub mod config;
pub mod constants;
pub mod emitter;
pub mod error;
pub mod frame;
pub mod input;
pub mod overlay;
pub mod parallax;
pub mod projector;
pub mod scale;
pub mod sprite;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod stage;

#[cfg(target_arch = "wasm32")]
pub use app::*;

#[cfg(target_arch = "wasm32")]
mod app {
    use crate::config::{AnimationsConfig, ParallaxConfig, ParallaxPatch, ZonesData};
    use crate::constants::STAGE_SELECTOR;
    use crate::dom::EventBinding;
    use crate::error::StageError;
    use crate::events;
    use crate::overlay::controls::ControlsLayer;
    use crate::overlay::debug::DebugOverlay;
    use crate::sprite::SpriteLayer;
    use crate::stage::{ParallaxController, StageScale};
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys as web;

    // Static content is embedded at build time.
    static ZONES_JSON: &str = include_str!("../assets/zones.json");
    static PARALLAX_JSON: &str = include_str!("../assets/parallax.json");
    static ANIMATIONS_JSON: &str = include_str!("../assets/animations.json");

    // Apartments that have dialog content; only these get a hotspot button.
    const ENABLED_APARTMENTS: &[&str] = &["ap-00", "ap-03"];

    struct StageApp {
        scale: StageScale,
        debug: Rc<DebugOverlay>,
        controls: ControlsLayer,
        parallax: Option<Rc<ParallaxController>>,
        sprites: Option<SpriteLayer>,
        _keys: EventBinding,
    }

    impl StageApp {
        fn destroy(&self) {
            if let Some(s) = &self.sprites {
                s.destroy();
            }
            if let Some(p) = &self.parallax {
                p.destroy();
            }
            self.controls.destroy();
            self.debug.destroy();
            self.scale.destroy();
        }
    }

    thread_local! {
        static APP: RefCell<Option<StageApp>> = const { RefCell::new(None) };
    }

    fn with_app<R>(f: impl FnOnce(&StageApp) -> R) -> Option<R> {
        APP.with(|app| app.borrow().as_ref().map(f))
    }

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("stage-web starting");

        let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        if document.ready_state() == web::DocumentReadyState::Loading {
            let on_ready = Closure::once_into_js(move || run_init());
            document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
        } else {
            run_init();
        }
        Ok(())
    }

    fn run_init() {
        match init() {
            Ok(app) => APP.with(|slot| *slot.borrow_mut() = Some(app)),
            Err(e) => log::error!("init error: {:?}", e),
        }
    }

    fn init() -> anyhow::Result<StageApp> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow::anyhow!("no document"))?;

        let stage: web::HtmlElement = document
            .query_selector(STAGE_SELECTOR)
            .map_err(crate::dom::js_err)?
            .ok_or_else(|| StageError::MissingStage(STAGE_SELECTOR.to_string()))?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        let zones = ZonesData::from_json(ZONES_JSON)?;
        let design = zones.design()?;

        let scale = StageScale::mount(&window, &document, stage.clone(), design)?;
        let debug = Rc::new(DebugOverlay::new(
            &document,
            &stage,
            &zones,
            scale.adapter(),
            false,
        )?);
        let controls = ControlsLayer::new(
            &document,
            &stage,
            &zones,
            scale.adapter(),
            ENABLED_APARTMENTS,
        )?;
        // Debug breadcrumb; dialogs and audio subscribe from JS.
        let _ = controls.on_activate(|a| {
            log::info!("[controls] activated: {} action={}", a.id, a.action);
            Ok(())
        });

        // A stage without parallax layers still works; the failure is logged loudly.
        let parallax = match ParallaxConfig::from_json(PARALLAX_JSON)
            .map_err(anyhow::Error::from)
            .and_then(|cfg| ParallaxController::mount(&window, stage.clone(), scale.reader(), cfg))
        {
            Ok(p) => Some(Rc::new(p)),
            Err(e) => {
                log::error!("[parallax] not started: {:?}", e);
                None
            }
        };

        // Sprites are decoration; a bad animations file only loses them.
        let reduced = crate::dom::reduced_motion_query(&window)
            .map(|q| q.matches())
            .unwrap_or(false);
        let sprites = match AnimationsConfig::from_json(ANIMATIONS_JSON)
            .map_err(anyhow::Error::from)
            .and_then(|cfg| SpriteLayer::mount(&document, &stage, &cfg, reduced))
        {
            Ok(s) => Some(s),
            Err(e) => {
                log::error!("[sprite] not mounted: {:?}", e);
                None
            }
        };

        let keys = events::keyboard::wire_global_keydown(&window, parallax.clone(), Some(debug.clone()))?;

        Ok(StageApp {
            scale,
            debug,
            controls,
            parallax,
            sprites,
            _keys: keys,
        })
    }

    /// Current design → viewport scale, `1.0` before the stage is mounted.
    #[wasm_bindgen]
    pub fn stage_scale() -> f64 {
        with_app(|app| app.scale.get_scale()).unwrap_or(1.0)
    }

    #[wasm_bindgen]
    pub fn set_parallax_enabled(enabled: bool) {
        with_app(|app| {
            if let Some(p) = &app.parallax {
                p.set_enabled(enabled);
            }
        });
    }

    /// Accepts a partial `{ratioY?, smooth?, layers?}` object.
    #[wasm_bindgen]
    #[allow(deprecated)]
    pub fn set_parallax_config(patch: JsValue) -> Result<(), JsValue> {
        let patch: ParallaxPatch = patch
            .into_serde()
            .map_err(|e| JsValue::from_str(&format!("invalid parallax patch: {}", e)))?;
        with_app(|app| {
            if let Some(p) = &app.parallax {
                p.set_config(&patch);
            }
        });
        Ok(())
    }

    #[wasm_bindgen]
    pub fn start_parallax() {
        with_app(|app| {
            if let Some(p) = &app.parallax {
                p.start();
            }
        });
    }

    #[wasm_bindgen]
    pub fn stop_parallax() {
        with_app(|app| {
            if let Some(p) = &app.parallax {
                p.stop();
            }
        });
    }

    #[wasm_bindgen]
    pub fn is_parallax_enabled() -> bool {
        with_app(|app| app.parallax.as_ref().is_some_and(|p| p.is_enabled())).unwrap_or(false)
    }

    /// Engine state for debugging, `undefined` when parallax is not running.
    #[wasm_bindgen]
    #[allow(deprecated)]
    pub fn parallax_snapshot() -> JsValue {
        with_app(|app| app.parallax.as_ref().map(|p| p.snapshot()))
            .flatten()
            .and_then(|snap| JsValue::from_serde(&snap).ok())
            .unwrap_or(JsValue::UNDEFINED)
    }

    #[wasm_bindgen]
    pub fn toggle_debug_overlay() -> bool {
        with_app(|app| app.debug.toggle()).unwrap_or(false)
    }

    #[wasm_bindgen]
    pub fn set_debug_overlay_visible(visible: bool) {
        with_app(|app| app.debug.set_visible(visible));
    }

    #[wasm_bindgen]
    pub fn is_debug_overlay_visible() -> bool {
        with_app(|app| app.debug.is_visible()).unwrap_or(false)
    }

    /// The hotspot button for `id`, if that zone has one.
    #[wasm_bindgen]
    pub fn stage_button(id: &str) -> Option<web::HtmlElement> {
        with_app(|app| app.controls.get_button(id)).flatten()
    }

    #[wasm_bindgen]
    pub fn stage_controls_container() -> Option<web::HtmlElement> {
        with_app(|app| app.controls.get_container().clone())
    }

    /// Forward hotspot activations (`{id, action, type}`) to a JS callback.
    /// Returns a function that removes the callback again, or `undefined`
    /// before the stage is mounted.
    #[wasm_bindgen]
    #[allow(deprecated)]
    pub fn on_stage_activate(callback: js_sys::Function) -> JsValue {
        with_app(|app| {
            let mut sub = app.controls.on_activate(move |a| {
                let payload = JsValue::from_serde(a)?;
                callback
                    .call1(&JsValue::NULL, &payload)
                    .map_err(crate::dom::js_err)?;
                Ok(())
            });
            Closure::once_into_js(move || sub.unsubscribe())
        })
        .unwrap_or(JsValue::UNDEFINED)
    }

    #[wasm_bindgen]
    pub fn destroy_stage() {
        if let Some(app) = APP.with(|slot| slot.borrow_mut().take()) {
            app.destroy();
            log::info!("stage destroyed");
        }
    }
}
