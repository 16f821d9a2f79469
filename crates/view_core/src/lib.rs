use chrono::Datelike;
use email_delivery::EmailDelivery;
use shared::{
    domain::Severity,
    error::{DeliveryError, PageError},
};
use tracing::{debug, error, info};

pub mod analytics;
pub mod animations;
pub mod config;
pub mod contact;
pub mod events;
pub mod memory;
pub mod menu;
pub mod notification;
pub mod progress;
pub mod scroll;
pub mod surface;

pub use analytics::{AnalyticsSink, RecordingSink, TracingSink};
pub use config::Settings;
pub use contact::{FormPhase, SubmissionOutcome};
pub use events::{Dispatch, KeyPress, PageEvent, PendingSubmission};
pub use menu::MenuState;
pub use surface::{Deferred, ObserverKind, PageSurface, ScrollBehavior};

use contact::ContactForm;
use menu::{MenuInput, MobileMenu};
use notification::Notifier;
use progress::{ProgressReveal, RevealPhase, SKILLS_SECTION_ID};
use scroll::{ScrollTracker, NAVIGATION_ID, SCROLLED_CLASS};

pub const CURRENT_YEAR_ID: &str = "current-year";
pub const CONTACT_SECTION: &str = "#contact";
pub const CONTACT_NAME_FIELD_ID: &str = "name";

pub struct ViewController {
    settings: Settings,
    notifier: Notifier,
    scroll: ScrollTracker,
    menu: MobileMenu,
    progress: ProgressReveal,
    contact: ContactForm,
    analytics: Box<dyn AnalyticsSink>,
    initialized: bool,
}

impl ViewController {
    pub fn new(settings: Settings) -> Self {
        Self::with_analytics(settings, Box::new(TracingSink))
    }

    pub fn with_analytics(settings: Settings, analytics: Box<dyn AnalyticsSink>) -> Self {
        Self {
            notifier: Notifier::from_settings(&settings),
            scroll: ScrollTracker::new(settings.scroll_threshold_px),
            menu: MobileMenu::default(),
            progress: ProgressReveal::new(settings.progress_stagger()),
            contact: ContactForm::default(),
            analytics,
            initialized: false,
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn is_scrolled(&self) -> bool {
        self.scroll.is_scrolled()
    }

    pub fn menu_state(&self) -> MenuState {
        self.menu.state()
    }

    pub fn is_mobile_menu_open(&self) -> bool {
        self.menu.is_open()
    }

    pub fn progress_phase(&self) -> RevealPhase {
        self.progress.phase()
    }

    pub fn form_phase(&self) -> FormPhase {
        self.contact.phase()
    }

    pub fn last_submission(&self) -> Option<&SubmissionOutcome> {
        self.contact.last_outcome()
    }

    pub fn dispatch<S: PageSurface>(
        &mut self,
        page: &mut S,
        event: PageEvent<S::Node>,
    ) -> Dispatch<S::Node> {
        debug!(event = event.name(), "page event");
        match event {
            PageEvent::Loaded => self.initialize(page),
            PageEvent::Scrolled => self.on_scroll(page),
            PageEvent::MenuButtonClicked => {
                self.toggle_mobile_menu(page);
            }
            PageEvent::NavLinkClicked { href } => return self.on_nav_link(page, &href),
            PageEvent::KeyDown(key) => return self.on_key(page, &key),
            PageEvent::FormSubmitted => {
                return Dispatch {
                    prevent_default: true,
                    submission: self.begin_submission(page),
                }
            }
            PageEvent::Clicked { target } => {
                for tracked in analytics::classify_click(page, &target) {
                    self.analytics.record(&tracked);
                }
            }
            PageEvent::Intersection {
                kind,
                target,
                intersecting,
            } => animations::on_intersection(page, kind, &target, intersecting),
            PageEvent::Deferred(task) => self.run_deferred(page, task),
            PageEvent::Paint { name, start_ms } => analytics::log_paint(&name, start_ms),
            PageEvent::UncaughtError { detail } => self.on_uncaught_error(page, &detail),
        }
        Dispatch::default()
    }

    fn initialize<S: PageSurface>(&mut self, page: &mut S) {
        if self.initialized {
            debug!("page already initialised");
            return;
        }
        self.initialized = true;
        self.progress.reset(page);
        if let Some(year) = page.element_by_id(CURRENT_YEAR_ID) {
            let current = page.today().year().to_string();
            page.set_text_content(&year, &current);
        }
        let reveal_targets = animations::prepare_reveal(page);
        let lazy_images = animations::prepare_lazy_images(page);
        info!(reveal_targets, lazy_images, "portfolio page initialised");
    }

    fn on_scroll<S: PageSurface>(&mut self, page: &mut S) {
        let debounce = self.settings.scroll_debounce();
        if debounce.is_zero() {
            self.handle_scroll(page);
            return;
        }
        let generation = self.scroll.bump_generation();
        page.schedule(debounce, Deferred::ScrollSettled { generation });
    }

    pub fn handle_scroll<S: PageSurface>(&mut self, page: &mut S) {
        if let Some(scrolled) = self.scroll.observe(page.scroll_y()) {
            match page.element_by_id(NAVIGATION_ID) {
                Some(nav) => page.set_class(&nav, SCROLLED_CLASS, scrolled),
                None => debug!("navigation element not present"),
            }
        }

        if let Some(skills) = page.element_by_id(SKILLS_SECTION_ID) {
            let rect = page.bounding_rect(&skills);
            if rect.intersects_viewport(page.viewport_height()) {
                self.progress.reveal(page);
            }
        }
    }

    pub fn toggle_mobile_menu<S: PageSurface>(&mut self, page: &mut S) -> MenuState {
        self.menu.apply(page, MenuInput::ButtonClicked);
        self.menu.state()
    }

    pub fn close_mobile_menu<S: PageSurface>(&mut self, page: &mut S) -> bool {
        self.menu.close(page)
    }

    fn on_nav_link<S: PageSurface>(&mut self, page: &mut S, href: &str) -> Dispatch<S::Node> {
        if !href.starts_with('#') {
            return Dispatch::default();
        }
        self.scroll_to_section(page, href);
        Dispatch::prevented()
    }

    /// Smooth-scrolls to the element named by a `#id` anchor, leaving room
    /// for the fixed header, and closes the mobile menu. Unknown anchors are
    /// ignored.
    pub fn scroll_to_section<S: PageSurface>(&mut self, page: &mut S, href: &str) -> bool {
        let Some(id) = href.strip_prefix('#').filter(|id| !id.is_empty()) else {
            debug!(href, "not an in-page anchor");
            return false;
        };
        let Some(target) = page.element_by_id(id) else {
            debug!(href, "anchor target not found");
            return false;
        };

        let top = (page.offset_top(&target) - self.settings.header_offset_px).max(0.0);
        page.scroll_to(top, ScrollBehavior::Smooth);
        self.menu.apply(page, MenuInput::NavLinkFollowed);
        true
    }

    fn on_key<S: PageSurface>(&mut self, page: &mut S, key: &KeyPress) -> Dispatch<S::Node> {
        if key.is_escape() {
            self.menu.apply(page, MenuInput::EscapePressed);
            return Dispatch::default();
        }
        if key.is_contact_shortcut() {
            if self.scroll_to_section(page, CONTACT_SECTION) {
                page.schedule(
                    self.settings.focus_delay(),
                    Deferred::FocusField {
                        id: CONTACT_NAME_FIELD_ID.to_string(),
                    },
                );
            }
            return Dispatch::prevented();
        }
        Dispatch::default()
    }

    /// Validates and locks the form. The returned submission fails on its
    /// own once the delivery timeout elapses without an outcome.
    pub fn begin_submission<S: PageSurface>(
        &mut self,
        page: &mut S,
    ) -> Option<PendingSubmission<S::Node>> {
        let pending = self.contact.begin(page, &self.notifier)?;
        page.schedule(self.settings.delivery_timeout(), pending.deadline());
        Some(pending)
    }

    pub fn finish_submission<S: PageSurface>(
        &mut self,
        page: &mut S,
        pending: PendingSubmission<S::Node>,
        result: Result<(), DeliveryError>,
    ) {
        self.contact.finish(page, &self.notifier, pending, result);
    }

    pub async fn submit_contact_form<S, D>(
        &mut self,
        page: &mut S,
        delivery: &D,
    ) -> Option<Result<(), DeliveryError>>
    where
        S: PageSurface,
        D: EmailDelivery + ?Sized,
    {
        let pending = self.begin_submission(page)?;
        let result = delivery.send(&pending.message).await;
        self.finish_submission(page, pending, result.clone());
        Some(result)
    }

    pub fn notify<S: PageSurface>(
        &self,
        page: &mut S,
        message: &str,
        severity: Severity,
    ) -> Option<S::Node> {
        self.notifier.show(page, message, severity)
    }

    fn on_uncaught_error<S: PageSurface>(&mut self, page: &mut S, detail: &str) {
        error!(detail, "uncaught page error");
        let summary = PageError::unexpected();
        self.notifier.show(page, &summary.message, Severity::Error);
    }

    pub fn run_deferred<S: PageSurface>(&mut self, page: &mut S, task: Deferred<S::Node>) {
        match task {
            Deferred::ScrollSettled { generation } => {
                if self.scroll.is_latest(generation) {
                    self.handle_scroll(page);
                }
            }
            Deferred::FillProgress { bar, width } => ProgressReveal::fill(page, &bar, width),
            Deferred::ToastEnter { toast } => self.notifier.enter(page, &toast),
            Deferred::ToastExit { toast } => self.notifier.exit(page, toast),
            Deferred::ToastRemove { toast } => self.notifier.remove(page, &toast),
            Deferred::FocusField { id } => match page.element_by_id(&id) {
                Some(field) => page.focus(&field),
                None => debug!(id = %id, "focus target not present"),
            },
            Deferred::SubmissionDeadline {
                ticket,
                button,
                original_label,
            } => self
                .contact
                .expire(page, &self.notifier, ticket, button, &original_label),
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
