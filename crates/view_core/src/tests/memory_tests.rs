use super::*;

#[test]
fn selectors_resolve_in_document_order() {
    let page = MemoryPage::portfolio();

    let links = page.query_selector_all(".nav-link, .mobile-nav-link");
    assert_eq!(links.len(), 12);
    assert_eq!(page.attribute(&links[0], "href").as_deref(), Some("#home"));

    let button = page
        .query_selector(r#"#contact-form button[type="submit"]"#)
        .expect("submit button");
    assert_eq!(page.text_content(&button), "Send Message");
    assert!(page.query_selector("#projects button[type=\"submit\"]").is_none());
    assert!(page.query_selector("div > p").is_none());
}

#[test]
fn geometry_follows_scroll_offset() {
    let mut page = MemoryPage::portfolio();
    let skills = page.element_by_id("skills").expect("skills");

    assert_eq!(page.bounding_rect(&skills), Rect::new(1700.0, 2500.0));
    page.set_scroll_y(1000.0);
    assert_eq!(page.bounding_rect(&skills), Rect::new(700.0, 1500.0));

    page.set_scroll_y(1_000_000.0);
    assert_eq!(page.scroll_y(), 5220.0 - 800.0);
    page.set_scroll_y(-50.0);
    assert_eq!(page.scroll_y(), 0.0);
}

#[test]
fn created_elements_attach_and_detach() {
    let mut page = MemoryPage::new();
    let node = page.create_element("div").expect("element");
    assert!(!page.is_attached(&node));

    page.append_to_body(&node);
    assert!(page.is_attached(&node));
    page.remove(&node);
    page.remove(&node);
    assert!(!page.is_attached(&node));
}

#[test]
fn inner_html_keeps_markup_and_text_drops_it() {
    let mut page = MemoryPage::new();
    let body = page.body();
    let button = page.element(body, "button").text("Send").build();

    page.set_inner_html(&button, r#"<i data-lucide="loader-2"></i> Sending..."#);
    assert_eq!(page.text_content(&button), " Sending...");
    assert!(page.inner_html(&button).starts_with("<i"));
}

#[test]
fn advance_runs_timers_in_due_order() {
    let mut page = MemoryPage::portfolio();
    let mut controller = ViewController::new(crate::Settings::default());
    let name = page.element_by_id("name").expect("name");
    let email = page.element_by_id("email").expect("email");

    page.schedule(
        Duration::from_millis(20),
        Deferred::FocusField { id: "email".into() },
    );
    page.schedule(
        Duration::from_millis(10),
        Deferred::FocusField { id: "name".into() },
    );

    page.advance(&mut controller, Duration::from_millis(15));
    assert_eq!(page.focused(), Some(name));
    assert_eq!(page.now(), Duration::from_millis(15));

    page.advance(&mut controller, Duration::from_millis(5));
    assert_eq!(page.focused(), Some(email));
    assert_eq!(page.pending_timers(), 0);
}
