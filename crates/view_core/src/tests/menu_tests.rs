use super::*;
use crate::memory::MemoryPage;

#[test]
fn transition_table_matches_the_state_machine() {
    use MenuInput::*;
    use MenuState::*;

    assert_eq!(Closed.next(ButtonClicked), Open);
    assert_eq!(Open.next(ButtonClicked), Closed);
    assert_eq!(Open.next(NavLinkFollowed), Closed);
    assert_eq!(Open.next(EscapePressed), Closed);
    assert_eq!(Closed.next(NavLinkFollowed), Closed);
    assert_eq!(Closed.next(EscapePressed), Closed);
}

#[test]
fn open_and_close_are_idempotent() {
    let mut page = MemoryPage::portfolio();
    let overlay = page.element_by_id(MOBILE_MENU_ID).expect("overlay");
    let mut menu = MobileMenu::default();

    assert!(menu.open(&mut page));
    assert!(!menu.open(&mut page));
    assert_eq!(page.class_writes(overlay), 1);

    assert!(menu.close(&mut page));
    assert!(!menu.close(&mut page));
    assert_eq!(page.class_writes(overlay), 2);
    assert_eq!(menu.state(), MenuState::Closed);
}

#[test]
fn state_still_tracks_input_without_overlay_markup() {
    let mut page = MemoryPage::new();
    let mut menu = MobileMenu::default();

    assert!(menu.apply(&mut page, MenuInput::ButtonClicked));
    assert!(menu.is_open());
    assert!(menu.apply(&mut page, MenuInput::EscapePressed));
    assert!(!menu.is_open());
}
