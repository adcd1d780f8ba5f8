use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Event, HtmlElement, HtmlImageElement, KeyboardEvent, Node, TouchEvent, TouchList,
    WheelEvent, Window,
};

use crate::binding::Discovery;
use crate::config::ZoomConfig;
use crate::controller::{ClickTarget, ZoomController};
use crate::error::ZoomError;
use crate::geometry::Point;
use crate::host::Host;
use crate::state::{FrameToken, SessionId};
use crate::util::js_error_text;

pub type SharedController = Rc<RefCell<ZoomController<DomHost>>>;
type WeakController = Weak<RefCell<ZoomController<DomHost>>>;

/// The overlay container and preview image, shared by every zoom.
#[derive(Clone)]
pub struct OverlaySurface {
    pub overlay: HtmlElement,
    pub preview: HtmlImageElement,
}

impl OverlaySurface {
    /// Adopts an existing `#overlay_id > #image_id` pair or builds one under `body`.
    pub fn ensure(document: &Document, body: &HtmlElement, config: &ZoomConfig) -> Result<Self, ZoomError> {
        if let Some(existing) = document.get_element_by_id(&config.overlay_id) {
            let overlay = existing.dyn_into::<HtmlElement>().map_err(|_| {
                ZoomError::Dom(format!("#{} is not an html element", config.overlay_id))
            })?;
            let preview = document
                .get_element_by_id(&config.image_id)
                .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
                .filter(|img| overlay.contains(Some(img.unchecked_ref::<Node>())))
                .ok_or_else(|| {
                    ZoomError::Dom(format!(
                        "#{} has no <img id=\"{}\"> inside it",
                        config.overlay_id, config.image_id
                    ))
                })?;
            log::debug!("zoom: reusing overlay #{}", config.overlay_id);
            return Ok(Self { overlay, preview });
        }

        let overlay = document
            .create_element("div")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| ZoomError::Dom("created overlay is not an html element".into()))?;
        overlay.set_id(&config.overlay_id);
        let preview = document
            .create_element("img")?
            .dyn_into::<HtmlImageElement>()
            .map_err(|_| ZoomError::Dom("created preview is not an image".into()))?;
        preview.set_id(&config.image_id);
        preview.set_alt("");
        overlay.append_child(&preview)?;
        body.append_child(&overlay)?;
        Ok(Self { overlay, preview })
    }
}

pub struct DomHost {
    window: Window,
    body: HtmlElement,
    surface: OverlaySurface,
    active_class: String,
    frame_id: Option<i32>,
    controller: WeakController,
}

impl Host for DomHost {
    fn show_overlay(&mut self, src: &str, alt: &str) {
        self.surface.preview.set_src(src);
        self.surface.preview.set_alt(alt);
        if let Err(err) = self.surface.overlay.class_list().add_1(&self.active_class) {
            log::warn!("zoom: could not activate overlay: {}", js_error_text(&err));
        }
    }

    fn hide_overlay(&mut self) {
        if let Err(err) = self.surface.overlay.class_list().remove_1(&self.active_class) {
            log::warn!("zoom: could not deactivate overlay: {}", js_error_text(&err));
        }
    }

    fn clear_preview_source(&mut self) {
        if let Err(err) = self.surface.preview.remove_attribute("src") {
            log::warn!("zoom: could not clear preview: {}", js_error_text(&err));
        }
    }

    fn apply_scale(&mut self, scale: f64) {
        let style = self.surface.preview.style();
        if let Err(err) = style.set_property("transform", &format!("scale({})", scale)) {
            log::warn!("zoom: could not apply scale: {}", js_error_text(&err));
        }
    }

    fn body_overflow(&self) -> String {
        self.body
            .style()
            .get_property_value("overflow")
            .unwrap_or_default()
    }

    fn set_body_overflow(&mut self, value: &str) {
        if let Err(err) = self.body.style().set_property("overflow", value) {
            log::warn!("zoom: could not set body overflow: {}", js_error_text(&err));
        }
    }

    fn request_frame(&mut self, token: FrameToken) -> bool {
        let controller = self.controller.clone();
        let callback = Closure::once_into_js(move |_timestamp: f64| {
            if let Some(controller) = controller.upgrade() {
                controller.borrow_mut().on_frame(token);
            }
        });
        match self.window.request_animation_frame(callback.unchecked_ref()) {
            Ok(id) => {
                self.frame_id = Some(id);
                true
            }
            Err(err) => {
                self.frame_id = None;
                log::warn!("zoom: requestAnimationFrame failed: {}", js_error_text(&err));
                false
            }
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(id) = self.frame_id.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                log::warn!("zoom: cancelAnimationFrame failed: {}", js_error_text(&err));
            }
        }
    }

    fn schedule_source_clear(&mut self, delay_ms: u32, session: SessionId) {
        let controller = self.controller.clone();
        // Stale timers are filtered by session id, so nothing needs to cancel them.
        Timeout::new(delay_ms, move || {
            if let Some(controller) = controller.upgrade() {
                controller.borrow_mut().on_clear_timer(session);
            }
        })
        .forget();
    }
}

/// Keeps the overlay wired up. Dropping it removes the overlay and document
/// listeners and stops watching for new images.
pub struct ZoomHandle {
    controller: SharedController,
    _listeners: Vec<EventListener>,
    discovery: Discovery,
}

impl ZoomHandle {
    pub fn controller(&self) -> &SharedController {
        &self.controller
    }

    pub fn discovery(&self) -> &Discovery {
        &self.discovery
    }

    pub fn open(&self, src: &str, alt: &str) -> bool {
        self.controller.borrow_mut().open(src, alt)
    }

    pub fn close(&self) {
        self.controller.borrow_mut().close();
    }

    pub fn is_active(&self) -> bool {
        self.controller.borrow().is_active()
    }
}

/// Reads `#zoom-config` from the page and wires up every zoomable image.
pub fn setup_zoomable_images(document: &Document) -> Result<ZoomHandle, ZoomError> {
    let config = ZoomConfig::from_document(document)?;
    setup_with_config(document, config)
}

pub fn setup_with_config(document: &Document, config: ZoomConfig) -> Result<ZoomHandle, ZoomError> {
    config.validate()?;
    let window = web_sys::window().ok_or(ZoomError::NoWindow)?;
    let body = document.body().ok_or(ZoomError::NoBody)?;
    let surface = OverlaySurface::ensure(document, &body, &config)?;

    let controller: SharedController = Rc::new_cyclic(|weak| {
        let host = DomHost {
            window,
            body: body.clone(),
            surface: surface.clone(),
            active_class: config.active_class.clone(),
            frame_id: None,
            controller: weak.clone(),
        };
        RefCell::new(ZoomController::new(host, config.clone()))
    });
    controller.borrow_mut().host_mut().apply_scale(1.0);

    let listeners = overlay_listeners(document, &surface, &controller);
    let discovery = Discovery::start(document, &body, &controller, &config)?;
    log::info!(
        "zoom: ready, {} image(s) bound under {}",
        discovery.bound_count(),
        config.container_selector
    );
    Ok(ZoomHandle {
        controller,
        _listeners: listeners,
        discovery,
    })
}

/// Convenience entry for apps that do not hold a document reference.
pub fn setup_from_window() -> Result<ZoomHandle, ZoomError> {
    let window = web_sys::window().ok_or(ZoomError::NoWindow)?;
    let document = window.document().ok_or(ZoomError::NoDocument)?;
    setup_zoomable_images(&document)
}

pub(crate) fn touch_points(touches: &TouchList) -> Vec<Point> {
    (0..touches.length())
        .filter_map(|i| touches.item(i))
        .map(|t| Point::new(t.client_x() as f64, t.client_y() as f64))
        .collect()
}

fn with_controller(controller: &WeakController, f: impl FnOnce(&mut ZoomController<DomHost>)) {
    if let Some(controller) = controller.upgrade() {
        f(&mut controller.borrow_mut());
    }
}

fn overlay_listeners(
    document: &Document,
    surface: &OverlaySurface,
    controller: &SharedController,
) -> Vec<EventListener> {
    let overlay = &surface.overlay;
    let mut listeners = Vec::with_capacity(6);

    // Background click
    {
        let controller = Rc::downgrade(controller);
        let overlay_value: JsValue = overlay.clone().into();
        listeners.push(EventListener::new(overlay, "click", move |event: &Event| {
            let target = match event.target() {
                Some(t) if AsRef::<JsValue>::as_ref(&t) == &overlay_value => ClickTarget::Background,
                _ => ClickTarget::Preview,
            };
            with_controller(&controller, |c| c.on_overlay_click(target));
        }));
    }

    // Wheel
    {
        let controller = Rc::downgrade(controller);
        listeners.push(EventListener::new_with_options(
            overlay,
            "wheel",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                    return;
                };
                with_controller(&controller, |c| {
                    if c.on_wheel(wheel.delta_y()) {
                        event.prevent_default();
                    }
                });
            },
        ));
    }

    // Touch
    {
        let controller = Rc::downgrade(controller);
        listeners.push(EventListener::new(overlay, "touchstart", move |event: &Event| {
            let Some(touch) = event.dyn_ref::<TouchEvent>() else {
                return;
            };
            let points = touch_points(&touch.touches());
            with_controller(&controller, |c| c.on_touch_start(&points));
        }));
    }
    {
        let controller = Rc::downgrade(controller);
        listeners.push(EventListener::new_with_options(
            overlay,
            "touchmove",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                let Some(touch) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                let points = touch_points(&touch.touches());
                with_controller(&controller, |c| {
                    if c.on_touch_move(&points) {
                        event.prevent_default();
                    }
                });
            },
        ));
    }
    for kind in ["touchend", "touchcancel"] {
        let controller = Rc::downgrade(controller);
        listeners.push(EventListener::new(overlay, kind, move |event: &Event| {
            let remaining = event
                .dyn_ref::<TouchEvent>()
                .map(|t| t.touches().length() as usize)
                .unwrap_or(0);
            with_controller(&controller, |c| c.on_touch_end(remaining));
        }));
    }

    // Escape
    {
        let controller = Rc::downgrade(controller);
        listeners.push(EventListener::new(document, "keydown", move |event: &Event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                with_controller(&controller, |c| c.on_key(&key.key()));
            }
        }));
    }

    listeners
}
