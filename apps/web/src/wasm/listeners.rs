use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use tracing::debug;
use view_core::PageEvent;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, Element, ErrorEvent, Event, KeyboardEvent, PerformanceEntry, PerformanceObserver,
    PerformanceObserverEntryList, Window,
};

use crate::routing;

use super::{dispatch, with_app};

type PaintCallback = Closure<dyn FnMut(PerformanceObserverEntryList, PerformanceObserver)>;

pub(super) struct PaintObserver {
    _observer: PerformanceObserver,
    _callback: PaintCallback,
}

fn cancellable() -> EventListenerOptions {
    EventListenerOptions {
        phase: EventListenerPhase::Bubble,
        passive: false,
    }
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// `await_dom_ready` is false when the document finished parsing before the
/// module started; the caller dispatches `Loaded` itself in that case.
pub(super) fn install(
    window: &Window,
    document: &Document,
    await_dom_ready: bool,
) -> Vec<EventListener> {
    let mut listeners = Vec::new();

    listeners.push(EventListener::new(window, "scroll", |_event| {
        dispatch(PageEvent::Scrolled);
    }));

    if await_dom_ready {
        listeners.push(EventListener::once(document, "DOMContentLoaded", |_event| {
            dispatch(PageEvent::Loaded);
        }));
    }

    listeners.push(EventListener::new_with_options(
        document,
        "click",
        cancellable(),
        |event| {
            let Some(target) = event_element(event) else {
                return;
            };
            let routed =
                with_app(|app| routing::route_click(&app.page, &target)).unwrap_or_default();
            let mut prevent = false;
            for page_event in routed {
                prevent |= dispatch(page_event);
            }
            if prevent {
                event.prevent_default();
            }
        },
    ));

    listeners.push(EventListener::new_with_options(
        document,
        "keydown",
        cancellable(),
        |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if dispatch(routing::route_key(&key.key(), key.ctrl_key())) {
                event.prevent_default();
            }
        },
    ));

    listeners.push(EventListener::new_with_options(
        document,
        "submit",
        cancellable(),
        |event| {
            let Some(form) = event_element(event) else {
                return;
            };
            let Some(submit) = with_app(|app| routing::route_submit(&app.page, &form)).flatten()
            else {
                debug!("submit from an unmanaged form");
                return;
            };
            if dispatch(submit) {
                event.prevent_default();
            }
        },
    ));

    listeners.push(EventListener::new(window, "error", |event| {
        let detail = event
            .dyn_ref::<ErrorEvent>()
            .map(ErrorEvent::message)
            .unwrap_or_else(|| "unknown error".to_string());
        dispatch(PageEvent::UncaughtError { detail });
    }));

    listeners
}

pub(super) fn observe_paint() -> Result<PaintObserver, JsValue> {
    let callback: PaintCallback = Closure::new(
        |entries: PerformanceObserverEntryList, _observer: PerformanceObserver| {
            for entry in entries.get_entries().iter() {
                let Ok(entry) = entry.dyn_into::<PerformanceEntry>() else {
                    continue;
                };
                dispatch(PageEvent::Paint {
                    name: entry.name(),
                    start_ms: entry.start_time(),
                });
            }
        },
    );
    let observer = PerformanceObserver::new(callback.as_ref().unchecked_ref())?;

    let options = js_sys::Object::new();
    js_sys::Reflect::set(
        &options,
        &JsValue::from_str("entryTypes"),
        &js_sys::Array::of1(&JsValue::from_str("paint")),
    )?;
    let observe: js_sys::Function =
        js_sys::Reflect::get(&observer, &JsValue::from_str("observe"))?.dyn_into()?;
    observe.call1(&observer, &options)?;

    Ok(PaintObserver {
        _observer: observer,
        _callback: callback,
    })
}

/// Publishes `scrollToSection`, `toggleMobileMenu` and `closeMobileMenu` on
/// `window` for markup that calls them from inline handlers.
pub(super) fn install_globals(window: &Window) -> Result<(), JsValue> {
    let scroll = Closure::<dyn Fn(String) -> bool>::new(|href: String| {
        super::scroll_to_section(&href)
    });
    let toggle = Closure::<dyn Fn() -> bool>::new(super::toggle_mobile_menu);
    let close = Closure::<dyn Fn()>::new(super::close_mobile_menu);

    js_sys::Reflect::set(window, &JsValue::from_str("scrollToSection"), scroll.as_ref())?;
    js_sys::Reflect::set(window, &JsValue::from_str("toggleMobileMenu"), toggle.as_ref())?;
    js_sys::Reflect::set(window, &JsValue::from_str("closeMobileMenu"), close.as_ref())?;

    scroll.forget();
    toggle.forget();
    close.forget();
    Ok(())
}
