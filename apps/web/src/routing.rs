use view_core::{
    contact::CONTACT_FORM_ID, menu::MOBILE_MENU_BUTTON, KeyPress, PageEvent, PageSurface,
};

pub const LINK_SELECTOR: &str = "a[href]";

/// Events produced by a click on `target`, in dispatch order: the analytics
/// click first, then either the menu toggle or in-page navigation.
pub fn route_click<S: PageSurface>(page: &S, target: &S::Node) -> Vec<PageEvent<S::Node>> {
    let mut events = vec![PageEvent::Clicked {
        target: target.clone(),
    }];

    if page.closest(target, MOBILE_MENU_BUTTON).is_some() {
        events.push(PageEvent::MenuButtonClicked);
    } else if let Some(href) = page
        .closest(target, LINK_SELECTOR)
        .and_then(|link| page.attribute(&link, "href"))
        .filter(|href| href.starts_with('#'))
    {
        events.push(PageEvent::NavLinkClicked { href });
    }

    events
}

/// Only the contact form is handled; other forms submit natively.
pub fn route_submit<S: PageSurface>(page: &S, form: &S::Node) -> Option<PageEvent<S::Node>> {
    (page.attribute(form, "id").as_deref() == Some(CONTACT_FORM_ID))
        .then_some(PageEvent::FormSubmitted)
}

pub fn route_key<N>(key: &str, ctrl: bool) -> PageEvent<N> {
    PageEvent::KeyDown(KeyPress {
        key: key.to_string(),
        ctrl,
    })
}
