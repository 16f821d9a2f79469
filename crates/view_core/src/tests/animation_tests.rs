use super::*;
use crate::memory::MemoryPage;

#[test]
fn reveal_targets_start_hidden_and_observed() {
    let mut page = MemoryPage::portfolio();

    assert_eq!(prepare_reveal(&mut page), 4);
    for card in page.query_selector_all(REVEAL_SELECTOR) {
        assert_eq!(page.style(&card, "opacity").as_deref(), Some("0"));
        assert_eq!(page.style(&card, "transform").as_deref(), Some("translateY(30px)"));
        assert!(page.is_observed(card, ObserverKind::Reveal));
    }
}

#[test]
fn intersecting_card_is_revealed() {
    let mut page = MemoryPage::portfolio();
    prepare_reveal(&mut page);
    let card = page.query_selector(".project-card").expect("card");

    on_intersection(&mut page, ObserverKind::Reveal, &card, false);
    assert_eq!(page.style(&card, "opacity").as_deref(), Some("0"));

    on_intersection(&mut page, ObserverKind::Reveal, &card, true);
    assert_eq!(page.style(&card, "opacity").as_deref(), Some("1"));
    assert_eq!(page.style(&card, "transform").as_deref(), Some("translateY(0)"));
}

#[test]
fn lazy_image_loads_once_and_stops_being_observed() {
    let mut page = MemoryPage::portfolio();
    assert_eq!(prepare_lazy_images(&mut page), 1);
    let image = page.query_selector(LAZY_IMAGE_SELECTOR).expect("image");
    assert!(page.has_class(&image, LAZY_CLASS));

    on_intersection(&mut page, ObserverKind::LazyImage, &image, true);

    assert_eq!(page.attribute(&image, "src").as_deref(), Some("assets/profile.jpg"));
    assert!(!page.has_class(&image, LAZY_CLASS));
    assert!(!page.is_observed(image, ObserverKind::LazyImage));
}

#[test]
fn lazy_image_without_source_is_released_untouched() {
    let mut page = MemoryPage::new();
    let body = page.body();
    let image = page
        .element(body, "img")
        .class("lazy")
        .attr("data-src", "")
        .build();
    prepare_lazy_images(&mut page);

    on_intersection(&mut page, ObserverKind::LazyImage, &image, true);

    assert_eq!(page.attribute(&image, "src"), None);
    assert!(page.has_class(&image, LAZY_CLASS));
    assert!(!page.is_observed(image, ObserverKind::LazyImage));
}
