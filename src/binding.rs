use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlImageElement, MutationObserver,
    MutationObserverInit, MutationRecord, NodeList,
};

use crate::config::ZoomConfig;
use crate::controller::ZoomController;
use crate::dom::{DomHost, SharedController};
use crate::error::ZoomError;
use crate::state::{DiscoveryQueue, ImageKey};
use crate::util::js_error_text;

/// `data-zoomable-bound`, set once per image and never removed.
pub const BOUND_MARKER: &str = "zoomableBound";

struct Binder {
    controller: Weak<RefCell<ZoomController<DomHost>>>,
    container_selector: String,
    image_selector: String,
    cursor: String,
    next_key: Cell<u32>,
    bound: Cell<usize>,
    queue: RefCell<DiscoveryQueue<Element>>,
}

impl Binder {
    fn candidates_selector(&self) -> String {
        format!("{} img, {}", self.container_selector, self.image_selector)
    }

    fn bind_list(&self, list: Result<NodeList, wasm_bindgen::JsValue>) -> usize {
        match list {
            Ok(list) => (0..list.length())
                .filter_map(|i| list.item(i))
                .filter_map(|node| node.dyn_into::<HtmlImageElement>().ok())
                .filter(|img| self.attach_to_image(img))
                .count(),
            Err(err) => {
                log::warn!("zoom: selector query failed: {}", js_error_text(&err));
                0
            }
        }
    }

    /// Binds the images an inserted subtree brings in.
    fn attach_in_tree(&self, root: &Element) -> usize {
        let mut bound = 0;
        if root.matches(&self.container_selector).unwrap_or(false) {
            bound += self.bind_list(root.query_selector_all("img"));
        }
        if let Some(img) = root.dyn_ref::<HtmlImageElement>() {
            let in_container = root
                .closest(&self.container_selector)
                .ok()
                .flatten()
                .is_some();
            let marked = root.matches(&self.image_selector).unwrap_or(false);
            if (in_container || marked) && self.attach_to_image(img) {
                bound += 1;
            }
        }
        bound += self.bind_list(root.query_selector_all(&self.candidates_selector()));
        bound
    }

    fn attach_to_image(&self, img: &HtmlImageElement) -> bool {
        let dataset = img.dataset();
        if dataset.get(BOUND_MARKER).as_deref() == Some("1") {
            return false;
        }
        if let Err(err) = dataset.set(BOUND_MARKER, "1") {
            log::warn!("zoom: could not mark image: {}", js_error_text(&err));
            return false;
        }

        let style = img.style();
        let has_cursor = style
            .get_property_value("cursor")
            .map(|c| !c.is_empty())
            .unwrap_or(false);
        if !has_cursor {
            if let Err(err) = style.set_property("cursor", &self.cursor) {
                log::warn!("zoom: could not set cursor: {}", js_error_text(&err));
            }
        }

        let key = ImageKey(self.next_key.get());
        self.next_key.set(key.0 + 1);

        let controller = self.controller.clone();
        EventListener::new(img, "click", move |event: &Event| {
            let Some((src, alt)) = event_image_source(event) else {
                return;
            };
            if let Some(controller) = controller.upgrade() {
                controller
                    .borrow_mut()
                    .on_image_tap(key, event.time_stamp(), &src, &alt);
            }
        })
        .forget();

        let controller = self.controller.clone();
        EventListener::new(img, "dblclick", move |event: &Event| {
            event.prevent_default();
            let Some((src, alt)) = event_image_source(event) else {
                return;
            };
            if let Some(controller) = controller.upgrade() {
                controller.borrow_mut().on_image_double_click(&src, &alt);
            }
        })
        .forget();

        self.bound.set(self.bound.get() + 1);
        true
    }

    fn enqueue(&self, batch: Vec<Element>) {
        self.queue.borrow_mut().push(batch);
        if !self.queue.borrow_mut().begin_drain() {
            return;
        }
        loop {
            let next = self.queue.borrow_mut().next_batch();
            let Some(batch) = next else {
                break;
            };
            let bound: usize = batch.iter().map(|el| self.attach_in_tree(el)).sum();
            if bound > 0 {
                log::debug!("zoom: bound {} inserted image(s)", bound);
            }
        }
    }
}

/// The image a listener fired on, resolved as `currentSrc` then `src`.
fn event_image_source(event: &Event) -> Option<(String, String)> {
    let img = event
        .current_target()
        .and_then(|t| t.dyn_into::<HtmlImageElement>().ok())?;
    let mut src = img.current_src();
    if src.is_empty() {
        src = img.src();
    }
    Some((src, img.alt()))
}

type MutationCallback = Closure<dyn FnMut(js_sys::Array, MutationObserver)>;

/// Initial binding pass plus the observer that binds later insertions.
pub struct Discovery {
    binder: Rc<Binder>,
    observer: MutationObserver,
    _callback: MutationCallback,
}

impl Discovery {
    pub fn start(
        document: &Document,
        body: &HtmlElement,
        controller: &SharedController,
        config: &ZoomConfig,
    ) -> Result<Self, ZoomError> {
        let binder = Rc::new(Binder {
            controller: Rc::downgrade(controller),
            container_selector: config.container_selector.clone(),
            image_selector: config.image_selector.clone(),
            cursor: config.cursor.clone(),
            next_key: Cell::new(1),
            bound: Cell::new(0),
            queue: RefCell::new(DiscoveryQueue::default()),
        });

        // A bad selector is a setup error, not something to skip quietly.
        let initial = document.query_selector_all(&binder.candidates_selector())?;
        binder.bind_list(Ok(initial));

        let callback: MutationCallback = {
            let binder = Rc::downgrade(&binder);
            Closure::wrap(Box::new(move |records: js_sys::Array, _observer: MutationObserver| {
                let Some(binder) = binder.upgrade() else {
                    return;
                };
                let mut added = Vec::new();
                for record in records.iter() {
                    let Ok(record) = record.dyn_into::<MutationRecord>() else {
                        continue;
                    };
                    let nodes = record.added_nodes();
                    for i in 0..nodes.length() {
                        if let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                            added.push(el);
                        }
                    }
                }
                binder.enqueue(added);
            }) as Box<dyn FnMut(js_sys::Array, MutationObserver)>)
        };
        let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        observer.observe_with_options(body, &init)?;

        Ok(Self {
            binder,
            observer,
            _callback: callback,
        })
    }

    /// Runs a binding pass over `root` without waiting for the observer.
    pub fn rescan(&self, root: &Element) -> usize {
        self.binder.attach_in_tree(root)
    }

    pub fn bound_count(&self) -> usize {
        self.binder.bound.get()
    }
}

impl Drop for Discovery {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
