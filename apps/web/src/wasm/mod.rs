use std::{cell::RefCell, rc::Rc};

use email_delivery::EmailDelivery;
use gloo::events::EventListener;
use tracing::{info, warn};
use view_core::{PageEvent, PendingSubmission, ViewController};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::{delivery::delivery_for, settings::settings_from_embedded};

mod dom;
mod listeners;
mod logging;

use dom::WebPage;

struct App {
    controller: ViewController,
    page: WebPage,
    delivery: Rc<dyn EmailDelivery>,
    _listeners: Vec<EventListener>,
    _paint: Option<listeners::PaintObserver>,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

fn with_app<R>(f: impl FnOnce(&mut App) -> R) -> Option<R> {
    APP.with(|slot| match slot.try_borrow_mut() {
        Ok(mut app) => app.as_mut().map(f),
        Err(_) => {
            warn!("page controller busy");
            None
        }
    })
}

/// Feeds one event through the controller. Returns whether the browser's
/// default action should be cancelled.
fn dispatch(event: PageEvent<Element>) -> bool {
    let outcome = with_app(|app| {
        let dispatch = app.controller.dispatch(&mut app.page, event);
        (dispatch, Rc::clone(&app.delivery))
    });
    let Some((dispatch, delivery)) = outcome else {
        return false;
    };
    if let Some(pending) = dispatch.submission {
        deliver(delivery, pending);
    }
    dispatch.prevent_default
}

// A send that outlives the controller's deadline finishes into a no-op.
fn deliver(delivery: Rc<dyn EmailDelivery>, pending: PendingSubmission<Element>) {
    spawn_local(async move {
        let result = delivery.send(&pending.message).await;
        let finished = with_app(move |app| {
            app.controller
                .finish_submission(&mut app.page, pending, result)
        });
        if finished.is_none() {
            warn!("contact submission finished after the page controller went away");
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init();

    let page = WebPage::new()?;
    let settings = settings_from_embedded(page.embedded_settings().as_deref());
    let delivery = delivery_for(&settings.email);
    let window = page.window().clone();
    let document = page.document().clone();
    let still_loading = document.ready_state() == "loading";

    let paint = match listeners::observe_paint() {
        Ok(observer) => Some(observer),
        Err(err) => {
            warn!(error = ?err, "paint timing unavailable");
            None
        }
    };

    APP.with(|slot| {
        *slot.borrow_mut() = Some(App {
            controller: ViewController::new(settings),
            page,
            delivery,
            _listeners: listeners::install(&window, &document, still_loading),
            _paint: paint,
        });
    });
    listeners::install_globals(&window)?;
    info!("portfolio page script attached");

    if !still_loading {
        dispatch(PageEvent::Loaded);
    }
    Ok(())
}

#[wasm_bindgen(js_name = scrollToSection)]
pub fn scroll_to_section(href: &str) -> bool {
    with_app(|app| app.controller.scroll_to_section(&mut app.page, href)).unwrap_or(false)
}

#[wasm_bindgen(js_name = toggleMobileMenu)]
pub fn toggle_mobile_menu() -> bool {
    with_app(|app| app.controller.toggle_mobile_menu(&mut app.page).is_open()).unwrap_or(false)
}

#[wasm_bindgen(js_name = closeMobileMenu)]
pub fn close_mobile_menu() {
    with_app(|app| app.controller.close_mobile_menu(&mut app.page));
}
