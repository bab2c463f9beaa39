#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use strata_core::CompositorConfig;
use strata_runtime::preload;
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlCanvasElement, MouseEvent, WheelEvent};

use crate::canvas::CanvasSurface;
use crate::console;
use crate::controls::Controls;
use crate::loader::ImageLoader;
use crate::runner_core::RunnerCore;

/// State shared with the DOM listeners.
struct Session {
    core: RefCell<RunnerCore<CanvasSurface>>,
    controls: Controls,
    canvas: HtmlCanvasElement,
}

impl Session {
    /// Canvas-relative position of a mouse event.
    fn point(&self, event: &MouseEvent) -> (f64, f64) {
        let rect = self.canvas.get_bounding_client_rect();
        (
            f64::from(event.client_x()) - rect.left(),
            f64::from(event.client_y()) - rect.top(),
        )
    }

    /// Reflect selection changes back onto the checkboxes.
    fn sync_controls(&self) {
        let views = {
            let mut core = self.core.borrow_mut();
            let pruned = core.take_pruned();
            if !pruned.is_empty() {
                debug!(count = pruned.len(), "unchecking pruned attributes");
            }
            core.take_logs();
            core.toggle_views()
        };
        if let Err(err) = self.controls.sync(&views) {
            warn!(?err, "checkbox sync failed");
        }
    }
}

/// Layered image compositor bound to a `<canvas>` and a controls container.
#[wasm_bindgen]
pub struct StrataWeb {
    config: CompositorConfig,
    session: Option<Rc<Session>>,
    listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl StrataWeb {
    /// Parse `config_json`, or use the built-in catalog when absent.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<StrataWeb, JsValue> {
        let config = match config_json {
            Some(json) => CompositorConfig::from_json_str(&json),
            None => CompositorConfig::builtin(),
        }
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
        console::install(config.max_level());
        Ok(Self {
            config,
            session: None,
            listeners: Vec::new(),
        })
    }

    /// Preload every image, draw the first frame, then build the controls
    /// and start accepting input.
    ///
    /// Exported as an async JS function returning a Promise.
    pub async fn start(
        &mut self,
        canvas: HtmlCanvasElement,
        controls: Element,
    ) -> Result<(), JsValue> {
        if self.session.is_some() {
            return Err(JsValue::from_str("already started"));
        }
        let document = canvas
            .owner_document()
            .ok_or_else(|| JsValue::from_str("canvas is not attached to a document"))?;
        let surface = CanvasSurface::new(canvas.clone())?;

        let sources = self.config.catalog.asset_sources();
        let assets = preload(&ImageLoader, &sources).await;

        let mut core = RunnerCore::new(&self.config, surface, assets);
        core.init();
        let controls = Controls::mount(&document, &controls, &core.toggle_views(), core.notes())?;

        let session = Rc::new(Session {
            core: RefCell::new(core),
            controls,
            canvas,
        });
        self.listeners = attach(&session);
        self.session = Some(session);
        info!("compositor started");
        Ok(())
    }

    /// Detach listeners and remove created controls.
    pub fn destroy(&mut self) {
        self.listeners.clear();
        if let Some(session) = self.session.take() {
            session.controls.unmount();
        }
    }
}

fn attach(session: &Rc<Session>) -> Vec<EventListener> {
    let mut listeners = Vec::new();

    for (tag, input) in session.controls.inputs() {
        let s = Rc::clone(session);
        let tag = tag.clone();
        let target = input.clone();
        listeners.push(EventListener::new(input, "change", move |_| {
            s.core.borrow_mut().toggle(tag.as_str(), target.checked());
            s.sync_controls();
        }));
    }

    let canvas = session.canvas.clone();

    let s = Rc::clone(session);
    listeners.push(EventListener::new_with_options(
        &canvas,
        "wheel",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let Some(event) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            event.prevent_default();
            let (x, y) = s.point(event);
            s.core.borrow_mut().wheel(x, y, event.delta_y());
        },
    ));

    let s = Rc::clone(session);
    listeners.push(EventListener::new(&canvas, "mousedown", move |event| {
        if let Some(event) = event.dyn_ref::<MouseEvent>() {
            let (x, y) = s.point(event);
            s.core.borrow_mut().pointer_down(x, y);
        }
    }));

    let s = Rc::clone(session);
    listeners.push(EventListener::new(&canvas, "mousemove", move |event| {
        if let Some(event) = event.dyn_ref::<MouseEvent>() {
            let (x, y) = s.point(event);
            s.core.borrow_mut().pointer_move(x, y);
        }
    }));

    let s = Rc::clone(session);
    listeners.push(EventListener::new(&canvas, "mouseup", move |_| {
        s.core.borrow_mut().pointer_up();
    }));

    let s = Rc::clone(session);
    listeners.push(EventListener::new(&canvas, "mouseleave", move |_| {
        s.core.borrow_mut().pointer_leave();
    }));

    listeners
}
