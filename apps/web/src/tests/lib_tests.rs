use email_delivery::EmailJsConfig;
use shared::{domain::ContactMessage, error::DeliveryError};
use view_core::{memory::MemoryPage, PageEvent, PageSurface};

use crate::{delivery::delivery_for, routing, settings::settings_from_embedded};

#[test]
fn anchor_click_is_tracked_then_navigates() {
    let page = MemoryPage::portfolio();
    let hero = page.query_selector(".hero-btn").expect("hero button");

    assert_eq!(
        routing::route_click(&page, &hero),
        vec![
            PageEvent::Clicked { target: hero },
            PageEvent::NavLinkClicked {
                href: "#contact".into()
            },
        ]
    );
}

#[test]
fn menu_button_click_toggles_instead_of_navigating() {
    let page = MemoryPage::portfolio();
    let button = page.query_selector(".mobile-menu-btn").expect("menu button");

    let events = routing::route_click(&page, &button);
    assert_eq!(events.len(), 2);
    assert_eq!(events[1], PageEvent::MenuButtonClicked);
}

#[test]
fn external_and_plain_clicks_only_record_analytics() {
    let mut page = MemoryPage::portfolio();
    let body = page.body();
    let external = page
        .element(body, "a")
        .attr("href", "https://github.com/")
        .build();
    let year = page.element_by_id("current-year").expect("year");

    assert_eq!(routing::route_click(&page, &external).len(), 1);
    assert_eq!(routing::route_click(&page, &year).len(), 1);
}

#[test]
fn only_the_contact_form_is_intercepted() {
    let mut page = MemoryPage::portfolio();
    let contact = page.element_by_id("contact-form").expect("form");
    let body = page.body();
    let search = page.element(body, "form").id("search").build();

    assert_eq!(
        routing::route_submit(&page, &contact),
        Some(PageEvent::FormSubmitted)
    );
    assert_eq!(routing::route_submit(&page, &search), None);
}

#[test]
fn key_events_carry_the_ctrl_modifier() {
    let event: PageEvent<()> = routing::route_key("k", true);
    match event {
        PageEvent::KeyDown(key) => assert!(key.is_contact_shortcut()),
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn embedded_settings_override_defaults_and_fall_back_on_error() {
    assert_eq!(settings_from_embedded(None), Default::default());
    assert_eq!(settings_from_embedded(Some("  \n")), Default::default());

    let tuned = settings_from_embedded(Some("header_offset_px = 64.0"));
    assert_eq!(tuned.header_offset_px, 64.0);

    let broken = settings_from_embedded(Some("toast_display_ms = \"soon\""));
    assert_eq!(broken, Default::default());
}

#[tokio::test]
async fn unusable_email_config_degrades_to_failing_delivery() {
    let config = EmailJsConfig {
        service_id: String::new(),
        ..EmailJsConfig::default()
    };
    let delivery = delivery_for(&config);
    let message = ContactMessage {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        message: "hello".into(),
    };

    let err = delivery.send(&message).await.expect_err("no backend");
    assert!(matches!(err, DeliveryError::Unavailable(_)));
}
