use tracing::debug;

use crate::surface::PageSurface;

pub const MOBILE_MENU_ID: &str = "mobile-menu";
pub const MOBILE_MENU_BUTTON: &str = ".mobile-menu-btn";
pub const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    ButtonClicked,
    NavLinkFollowed,
    EscapePressed,
}

impl MenuState {
    pub fn next(self, input: MenuInput) -> MenuState {
        match (self, input) {
            (MenuState::Closed, MenuInput::ButtonClicked) => MenuState::Open,
            (MenuState::Open, MenuInput::ButtonClicked) => MenuState::Closed,
            (MenuState::Open, MenuInput::NavLinkFollowed) => MenuState::Closed,
            (MenuState::Open, MenuInput::EscapePressed) => MenuState::Closed,
            (MenuState::Closed, MenuInput::NavLinkFollowed | MenuInput::EscapePressed) => {
                MenuState::Closed
            }
        }
    }

    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }
}

#[derive(Debug, Default)]
pub struct MobileMenu {
    state: MenuState,
}

impl MobileMenu {
    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Applies `input`; the page is only touched when the state changes.
    pub fn apply<S: PageSurface>(&mut self, page: &mut S, input: MenuInput) -> bool {
        self.set(page, self.state.next(input))
    }

    pub fn open<S: PageSurface>(&mut self, page: &mut S) -> bool {
        self.set(page, MenuState::Open)
    }

    pub fn close<S: PageSurface>(&mut self, page: &mut S) -> bool {
        self.set(page, MenuState::Closed)
    }

    fn set<S: PageSurface>(&mut self, page: &mut S, next: MenuState) -> bool {
        if next == self.state {
            return false;
        }
        self.state = next;
        debug!(state = ?next, "mobile menu transition");

        let active = next.is_open();
        match page.element_by_id(MOBILE_MENU_ID) {
            Some(overlay) => page.set_class(&overlay, ACTIVE_CLASS, active),
            None => debug!("mobile menu overlay not present"),
        }
        if let Some(button) = page.query_selector(MOBILE_MENU_BUTTON) {
            page.set_class(&button, ACTIVE_CLASS, active);
        }
        true
    }
}

#[cfg(test)]
#[path = "tests/menu_tests.rs"]
mod tests;
