//! Thin wrappers over the DOM APIs the frontend needs. Every handle that registers a
//! JS callback releases it on drop.

use dev_site::sections::{IntersectionBand, IntersectionSample, OBSERVER_THRESHOLDS};
use js_sys::{Array, Function, Reflect};
use std::cell::Cell;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, Element, Event, EventTarget, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, MediaQueryList, ScrollBehavior,
    ScrollToOptions, Storage,
};

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

pub fn read_storage(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

pub fn write_storage(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(key, value);
    }
}

pub fn media_query(query: &str) -> Option<MediaQueryList> {
    window()?.match_media(query).ok().flatten()
}

pub fn media_matches(query: &str) -> bool {
    media_query(query).map(|mq| mq.matches()).unwrap_or(false)
}

pub fn prefers_reduced_motion() -> bool {
    media_matches("(prefers-reduced-motion: reduce)")
}

pub fn now_ms() -> u64 {
    js_sys::Date::now().max(0.0) as u64
}

pub fn scroll_y() -> f64 {
    window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

pub fn viewport_width() -> f64 {
    window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0)
}

pub fn location_pathname() -> String {
    window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

pub fn location_hash() -> String {
    window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

/// Records `#id` in history without triggering the browser's own jump.
pub fn push_hash(id: &str) {
    let Some(history) = window().and_then(|w| w.history().ok()) else {
        return;
    };
    let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&format!("#{id}")));
}

pub fn scroll_to(top: f64, smooth: bool) {
    let Some(w) = window() else {
        return;
    };

    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(if smooth {
        ScrollBehavior::Smooth
    } else {
        ScrollBehavior::Instant
    });
    w.scroll_to_with_scroll_to_options(&options);
}

/// Document-space top edge of an element.
pub fn document_top(element: &Element) -> f64 {
    element.get_bounding_client_rect().top() + scroll_y()
}

pub fn set_document_title(title: &str) {
    if let Some(document) = document() {
        document.set_title(title);
    }
}

pub fn set_root_attribute(name: &str, value: &str) {
    if let Some(root) = document().and_then(|d| d.document_element()) {
        let _ = root.set_attribute(name, value);
    }
}

/// Runs `update` inside `document.startViewTransition` when the browser has it and
/// motion is allowed; otherwise runs it directly.
pub fn with_view_transition(update: impl FnOnce() + 'static) {
    if prefers_reduced_motion() {
        update();
        return;
    }

    let Some(document) = document() else {
        update();
        return;
    };

    let document_js: JsValue = document.into();
    let start = Reflect::get(&document_js, &JsValue::from_str("startViewTransition"))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok());
    let Some(start) = start else {
        update();
        return;
    };

    let callback = Closure::once_into_js(update);
    if let Err(error) = start.call1(&document_js, &callback) {
        // The callback never ran, so apply the change through it directly.
        if let Some(callback) = callback.dyn_ref::<Function>() {
            let _ = callback.call0(&JsValue::NULL);
        }
        web_sys::console::warn_1(&error);
    }
}

pub struct EventListener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Option<Self> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .ok()?;

        Some(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }

    pub fn on_window(kind: &'static str, handler: impl FnMut(Event) + 'static) -> Option<Self> {
        let target: EventTarget = window()?.into();
        Self::new(&target, kind, handler)
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// One re-armable `setTimeout`. The JS callback is created once, so re-arming from
/// inside the callback never frees the closure that is running.
pub struct Timer {
    callback: Closure<dyn FnMut()>,
    handle: Cell<Option<i32>>,
}

impl Timer {
    pub fn new(on_fire: impl FnMut() + 'static) -> Self {
        Self {
            callback: Closure::<dyn FnMut()>::new(on_fire),
            handle: Cell::new(None),
        }
    }

    /// Replaces any pending timeout.
    pub fn arm(&self, delay_ms: u64) {
        self.cancel();
        let Some(w) = window() else {
            return;
        };

        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        let handle = w
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                self.callback.as_ref().unchecked_ref(),
                delay,
            )
            .ok();
        self.handle.set(handle);
    }

    pub fn cancel(&self) {
        if let (Some(handle), Some(w)) = (self.handle.take(), window()) {
            w.clear_timeout_with_handle(handle);
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// `IntersectionObserver` reporting samples for a band of the viewport. Targets are
/// identified by their `id` attribute.
pub struct SectionObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array)>,
}

impl SectionObserver {
    pub fn new(
        band: IntersectionBand,
        mut on_samples: impl FnMut(Vec<IntersectionSample>) + 'static,
    ) -> Option<Self> {
        let callback = Closure::<dyn FnMut(Array)>::new(move |entries: Array| {
            let samples: Vec<IntersectionSample> = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| IntersectionSample {
                    id: entry.target().id(),
                    ratio: entry.intersection_ratio(),
                    is_intersecting: entry.is_intersecting(),
                })
                .filter(|sample| !sample.id.is_empty())
                .collect();

            if !samples.is_empty() {
                on_samples(samples);
            }
        });

        let thresholds: Array = OBSERVER_THRESHOLDS
            .iter()
            .map(|threshold| JsValue::from_f64(*threshold))
            .collect();
        let init = IntersectionObserverInit::new();
        init.set_root_margin(&band.root_margin());
        init.set_threshold(&thresholds);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init).ok()?;

        Some(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }

    pub fn unobserve(&self, element: &Element) {
        self.observer.unobserve(element);
    }
}

impl Drop for SectionObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
