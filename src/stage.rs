// Browser wiring for the scale adapter and the parallax engine: binds their
// frame bodies to requestAnimationFrame and their inputs to DOM events.
use crate::config::{DesignSpace, ParallaxConfig, ParallaxPatch};
use crate::dom::{self, EventBinding, WebParallaxHost, WebScaleHost};
use crate::frame::RafScheduler;
use crate::parallax::{ParallaxEngine, ParallaxSnapshot};
use crate::scale::{ScaleAdapter, ScaleReader};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub type WebScaleAdapter = ScaleAdapter<WebScaleHost, RafScheduler>;
pub type WebParallaxEngine = ParallaxEngine<WebParallaxHost, RafScheduler>;

pub struct StageScale {
    adapter: Rc<WebScaleAdapter>,
    resize: RefCell<Option<EventBinding>>,
}

impl StageScale {
    pub fn mount(
        window: &web::Window,
        document: &web::Document,
        stage: web::HtmlElement,
        design: DesignSpace,
    ) -> anyhow::Result<Self> {
        let host = WebScaleHost::new(document, stage)?;
        let adapter = Rc::new(ScaleAdapter::new(
            design,
            host,
            RafScheduler::new(window.clone()),
        )?);

        let weak = Rc::downgrade(&adapter);
        adapter.scheduler().bind(move || {
            if let Some(a) = weak.upgrade() {
                a.on_frame();
            }
        });

        let weak = Rc::downgrade(&adapter);
        let resize = EventBinding::new(window.as_ref(), "resize", move |_: web::Event| {
            if let Some(a) = weak.upgrade() {
                a.handle_resize();
            }
        })?;

        Ok(Self {
            adapter,
            resize: RefCell::new(Some(resize)),
        })
    }

    pub fn adapter(&self) -> &WebScaleAdapter {
        &self.adapter
    }

    pub fn get_scale(&self) -> f64 {
        self.adapter.get_scale()
    }

    pub fn reader(&self) -> ScaleReader {
        self.adapter.reader()
    }

    pub fn destroy(&self) {
        self.resize.borrow_mut().take();
        self.adapter.destroy();
        self.adapter.scheduler().unbind();
    }
}

pub struct ParallaxController {
    engine: Rc<RefCell<WebParallaxEngine>>,
    media: RefCell<Option<EventBinding>>,
}

impl ParallaxController {
    pub fn mount(
        window: &web::Window,
        stage: web::HtmlElement,
        scale: ScaleReader,
        config: ParallaxConfig,
    ) -> anyhow::Result<Self> {
        let query = dom::reduced_motion_query(window);
        let reduced = query.as_ref().map(|q| q.matches()).unwrap_or(false);

        let host = WebParallaxHost::new(window.clone(), stage);
        let engine = Rc::new(RefCell::new(ParallaxEngine::new(
            host,
            RafScheduler::new(window.clone()),
            scale,
            config,
            reduced,
        )?));

        let weak = Rc::downgrade(&engine);
        engine.borrow().scheduler().bind(move || {
            if let Some(e) = weak.upgrade() {
                if let Ok(mut e) = e.try_borrow_mut() {
                    e.on_frame();
                }
            }
        });

        let media = match &query {
            Some(q) => {
                let weak = Rc::downgrade(&engine);
                let binding = EventBinding::new(q.as_ref(), "change", move |ev: web::MediaQueryListEvent| {
                    if let Some(e) = weak.upgrade() {
                        log::info!("[parallax] reduced-motion changed: {}", ev.matches());
                        e.borrow_mut().set_reduced_motion(ev.matches());
                    }
                })?;
                Some(binding)
            }
            None => None,
        };

        Ok(Self {
            engine,
            media: RefCell::new(media),
        })
    }

    pub fn start(&self) {
        self.engine.borrow_mut().start();
    }

    pub fn stop(&self) {
        self.engine.borrow_mut().stop();
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.engine.borrow_mut().set_enabled(enabled);
    }

    pub fn is_enabled(&self) -> bool {
        self.engine.borrow().is_enabled()
    }

    /// Flip the user toggle; returns the resulting effective state.
    pub fn toggle(&self) -> bool {
        let mut e = self.engine.borrow_mut();
        let next = !e.user_enabled();
        e.set_enabled(next);
        e.is_enabled()
    }

    pub fn set_config(&self, patch: &ParallaxPatch) {
        self.engine.borrow_mut().set_config(patch);
    }

    pub fn snapshot(&self) -> ParallaxSnapshot {
        self.engine.borrow().snapshot()
    }

    pub fn destroy(&self) {
        self.media.borrow_mut().take();
        let mut e = self.engine.borrow_mut();
        e.destroy();
        e.scheduler().unbind();
    }
}
