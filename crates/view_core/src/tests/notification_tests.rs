use super::*;
use chrono::NaiveDate;

use crate::{memory::MemoryPage, PageEvent, ViewController};

fn setup() -> (ViewController, MemoryPage) {
    let page = MemoryPage::portfolio()
        .with_today(NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date"));
    (ViewController::new(Settings::default()), page)
}

#[test]
fn toast_slides_in_then_out_and_is_removed() {
    let (mut controller, mut page) = setup();

    let toast = controller
        .notify(&mut page, "Saved", Severity::Success)
        .expect("toast");
    assert!(page.is_attached(&toast));
    assert!(page.has_class(&toast, "notification"));
    assert!(page.has_class(&toast, "notification-success"));
    assert_eq!(page.style(&toast, "transform").as_deref(), Some(HIDDEN_TRANSFORM));
    assert_eq!(
        page.style(&toast, "background").as_deref(),
        Some(Severity::Success.background())
    );

    page.advance(&mut controller, Duration::from_millis(100));
    assert_eq!(page.style(&toast, "transform").as_deref(), Some(SHOWN_TRANSFORM));

    page.advance(&mut controller, Duration::from_millis(3900));
    assert_eq!(page.style(&toast, "transform").as_deref(), Some(HIDDEN_TRANSFORM));
    assert!(page.is_attached(&toast));

    page.advance(&mut controller, Duration::from_millis(300));
    assert!(!page.is_attached(&toast));
    assert_eq!(page.pending_timers(), 0);
}

#[test]
fn every_severity_is_gone_within_its_lifetime() {
    let (mut controller, mut page) = setup();
    let lifetime = controller.notifier().lifetime();
    assert_eq!(lifetime, Duration::from_millis(4300));

    let toasts: Vec<_> = [Severity::Info, Severity::Success, Severity::Error]
        .into_iter()
        .map(|severity| {
            controller
                .notify(&mut page, "", severity)
                .expect("toast")
        })
        .collect();

    page.advance(&mut controller, lifetime);
    for toast in &toasts {
        assert!(!page.is_attached(toast));
    }
}

#[test]
fn concurrent_toasts_stack_independently() {
    let (mut controller, mut page) = setup();

    let first = controller
        .notify(&mut page, "first", Severity::Info)
        .expect("toast");
    page.advance(&mut controller, Duration::from_millis(2000));
    let second = controller
        .notify(&mut page, "first", Severity::Info)
        .expect("toast");
    assert_eq!(page.query_selector_all(".notification").len(), 2);

    page.advance(&mut controller, Duration::from_millis(2300));
    assert!(!page.is_attached(&first));
    assert!(page.is_attached(&second));

    page.run_until_idle(&mut controller);
    assert!(!page.is_attached(&second));
}

#[test]
fn removing_an_already_detached_toast_is_harmless() {
    let (mut controller, mut page) = setup();
    let toast = controller
        .notify(&mut page, "bye", Severity::Error)
        .expect("toast");
    page.remove(&toast);

    controller.dispatch(&mut page, PageEvent::Deferred(Deferred::ToastRemove { toast }));
    page.run_until_idle(&mut controller);
    assert!(!page.is_attached(&toast));
}
