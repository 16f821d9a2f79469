use std::time::Duration;

use shared::domain::Severity;
use tracing::{debug, warn};

use crate::{
    config::Settings,
    surface::{Deferred, PageSurface},
};

pub const NOTIFICATION_CLASS: &str = "notification";
pub const HIDDEN_TRANSFORM: &str = "translateX(100%)";
pub const SHOWN_TRANSFORM: &str = "translateX(0)";

#[derive(Debug, Clone)]
pub struct Notifier {
    enter_delay: Duration,
    display: Duration,
    exit: Duration,
}

impl Notifier {
    pub fn new(enter_delay: Duration, display: Duration, exit: Duration) -> Self {
        Self {
            enter_delay,
            display,
            exit,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.toast_enter_delay(),
            settings.toast_display(),
            settings.toast_exit(),
        )
    }

    /// Upper bound on how long a toast stays in the document.
    pub fn lifetime(&self) -> Duration {
        self.display + self.exit
    }

    pub fn show<S: PageSurface>(
        &self,
        page: &mut S,
        message: &str,
        severity: Severity,
    ) -> Option<S::Node> {
        let Some(toast) = page.create_element("div") else {
            warn!(message, "could not create notification element");
            return None;
        };

        page.set_class(&toast, NOTIFICATION_CLASS, true);
        page.set_class(
            &toast,
            &format!("{NOTIFICATION_CLASS}-{}", severity.as_str()),
            true,
        );
        page.set_attribute(&toast, "role", "status");
        page.set_text_content(&toast, message);

        let transition = format!("transform {}ms ease", self.exit.as_millis());
        for (property, value) in [
            ("position", "fixed"),
            ("top", "20px"),
            ("right", "20px"),
            ("z-index", "1000"),
            ("padding", "1rem 1.5rem"),
            ("border-radius", "0.5rem"),
            ("color", "white"),
            ("font-weight", "500"),
            ("transform", HIDDEN_TRANSFORM),
            ("transition", transition.as_str()),
            ("max-width", "300px"),
            ("word-wrap", "break-word"),
            ("background", severity.background()),
        ] {
            page.set_style(&toast, property, value);
        }

        page.append_to_body(&toast);
        page.schedule(
            self.enter_delay,
            Deferred::ToastEnter {
                toast: toast.clone(),
            },
        );
        page.schedule(
            self.display,
            Deferred::ToastExit {
                toast: toast.clone(),
            },
        );
        debug!(severity = severity.as_str(), message, "notification shown");
        Some(toast)
    }

    pub fn enter<S: PageSurface>(&self, page: &mut S, toast: &S::Node) {
        if page.is_attached(toast) {
            page.set_style(toast, "transform", SHOWN_TRANSFORM);
        }
    }

    pub fn exit<S: PageSurface>(&self, page: &mut S, toast: S::Node) {
        page.set_style(&toast, "transform", HIDDEN_TRANSFORM);
        page.schedule(self.exit, Deferred::ToastRemove { toast });
    }

    pub fn remove<S: PageSurface>(&self, page: &mut S, toast: &S::Node) {
        if page.is_attached(toast) {
            page.remove(toast);
        }
    }
}

#[cfg(test)]
#[path = "tests/notification_tests.rs"]
mod tests;
