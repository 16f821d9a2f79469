use std::{collections::HashMap, time::Duration};

use chrono::NaiveDate;
use gloo::timers::callback::Timeout;
use shared::domain::Rect;
use tracing::{debug, warn};
use view_core::{Deferred, ObserverKind, PageEvent, PageSurface, ScrollBehavior};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollToOptions, Window,
};

use crate::settings::SETTINGS_ELEMENT_ID;

type IntersectionCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

struct Observer {
    inner: IntersectionObserver,
    _callback: IntersectionCallback,
}

impl Observer {
    fn new(kind: ObserverKind) -> Result<Self, JsValue> {
        let callback: IntersectionCallback =
            Closure::new(move |entries: js_sys::Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    super::dispatch(PageEvent::Intersection {
                        kind,
                        target: entry.target(),
                        intersecting: entry.is_intersecting(),
                    });
                }
            });

        let options = kind.options();
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(options.root_margin);
        let inner =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        Ok(Self {
            inner,
            _callback: callback,
        })
    }
}

pub struct WebPage {
    window: Window,
    document: Document,
    observers: HashMap<ObserverKind, Observer>,
}

impl WebPage {
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;

        let mut observers = HashMap::new();
        for kind in [ObserverKind::Reveal, ObserverKind::LazyImage] {
            observers.insert(kind, Observer::new(kind)?);
        }

        Ok(Self {
            window,
            document,
            observers,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn embedded_settings(&self) -> Option<String> {
        self.document
            .get_element_by_id(SETTINGS_ELEMENT_ID)
            .and_then(|node| node.text_content())
    }
}

fn control_value(control: &Element) -> Option<String> {
    if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(area) = control.dyn_ref::<HtmlTextAreaElement>() {
        return Some(area.value());
    }
    control.dyn_ref::<HtmlSelectElement>().map(HtmlSelectElement::value)
}

impl PageSurface for WebPage {
    type Node = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_selector(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_selector_all(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            warn!(selector, "invalid selector");
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|idx| list.item(idx))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn query_within(&self, root: &Element, selector: &str) -> Option<Element> {
        root.query_selector(selector).ok().flatten()
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn closest(&self, node: &Element, selector: &str) -> Option<Element> {
        node.closest(selector).ok().flatten()
    }

    fn matches(&self, node: &Element, selector: &str) -> bool {
        node.matches(selector).unwrap_or(false)
    }

    fn set_class(&mut self, node: &Element, class: &str, present: bool) {
        if let Err(err) = node.class_list().toggle_with_force(class, present) {
            warn!(class, error = ?err, "class update failed");
        }
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_style(&mut self, node: &Element, property: &str, value: &str) {
        let Some(element) = node.dyn_ref::<HtmlElement>() else {
            debug!(property, "style write on non-HTML element ignored");
            return;
        };
        if let Err(err) = element.style().set_property(property, value) {
            warn!(property, error = ?err, "style update failed");
        }
    }

    fn style(&self, node: &Element, property: &str) -> Option<String> {
        node.dyn_ref::<HtmlElement>()?
            .style()
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn text_content(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text_content(&mut self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn inner_html(&self, node: &Element) -> String {
        node.inner_html()
    }

    fn set_inner_html(&mut self, node: &Element, html: &str) {
        node.set_inner_html(html);
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) {
        if let Err(err) = node.set_attribute(name, value) {
            warn!(name, error = ?err, "attribute update failed");
        }
    }

    fn set_disabled(&mut self, node: &Element, disabled: bool) {
        if let Some(button) = node.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
            return;
        }
        let result = if disabled {
            node.set_attribute("disabled", "")
        } else {
            node.remove_attribute("disabled")
        };
        if let Err(err) = result {
            warn!(error = ?err, "disabled flag update failed");
        }
    }

    fn is_disabled(&self, node: &Element) -> bool {
        node.has_attribute("disabled")
    }

    fn field_value(&self, form: &Element, name: &str) -> Option<String> {
        let control = form
            .query_selector(&format!("[name=\"{name}\"]"))
            .ok()
            .flatten()?;
        control_value(&control)
    }

    fn reset_form(&mut self, form: &Element) {
        match form.dyn_ref::<HtmlFormElement>() {
            Some(form) => form.reset(),
            None => warn!("reset target is not a form"),
        }
    }

    fn focus(&mut self, node: &Element) {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            if let Err(err) = element.focus() {
                warn!(error = ?err, "focus failed");
            }
        }
    }

    fn create_element(&mut self, tag: &str) -> Option<Element> {
        match self.document.create_element(tag) {
            Ok(element) => Some(element),
            Err(err) => {
                warn!(tag, error = ?err, "element creation failed");
                None
            }
        }
    }

    fn append_to_body(&mut self, node: &Element) {
        let Some(body) = self.document.body() else {
            warn!("document has no body");
            return;
        };
        if let Err(err) = body.append_child(node) {
            warn!(error = ?err, "append to body failed");
        }
    }

    fn remove(&mut self, node: &Element) {
        node.remove();
    }

    fn is_attached(&self, node: &Element) -> bool {
        node.is_connected()
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|height| height.as_f64())
            .unwrap_or(0.0)
    }

    fn bounding_rect(&self, node: &Element) -> Rect {
        let rect = node.get_bounding_client_rect();
        Rect::new(rect.top(), rect.bottom())
    }

    fn offset_top(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map(|element| f64::from(element.offset_top()))
            .unwrap_or(0.0)
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn observe(&mut self, node: &Element, kind: ObserverKind) {
        if let Some(observer) = self.observers.get(&kind) {
            observer.inner.observe(node);
        }
    }

    fn unobserve(&mut self, node: &Element, kind: ObserverKind) {
        if let Some(observer) = self.observers.get(&kind) {
            observer.inner.unobserve(node);
        }
    }

    fn schedule(&mut self, delay: Duration, task: Deferred<Element>) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, move || {
            super::dispatch(PageEvent::Deferred(task));
        })
        .forget();
    }

    fn today(&self) -> NaiveDate {
        let now = js_sys::Date::new_0();
        i32::try_from(now.get_full_year())
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, now.get_month() + 1, now.get_date()))
            .unwrap_or_default()
    }
}
