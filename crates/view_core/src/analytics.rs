use std::{cell::RefCell, rc::Rc};

use shared::protocol::{LinkType, TrackedEvent};
use tracing::{info, warn};

use crate::surface::PageSurface;

pub const TRACKED_BUTTONS: &str = ".hero-btn, .project-btn, .contact-btn";
const UNKNOWN: &str = "unknown";

pub trait AnalyticsSink {
    fn record(&mut self, event: &TrackedEvent);
}

/// Writes each event to the `analytics` tracing target as JSON.
#[derive(Debug, Default)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn record(&mut self, event: &TrackedEvent) {
        match serde_json::to_string(event) {
            Ok(payload) => info!(target: "analytics", event = event.name(), %payload, "event tracked"),
            Err(err) => warn!(target: "analytics", event = event.name(), error = %err, "event not serializable"),
        }
    }
}

/// Keeps every event; clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Rc<RefCell<Vec<TrackedEvent>>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<TrackedEvent> {
        self.events.borrow().clone()
    }
}

impl AnalyticsSink for RecordingSink {
    fn record(&mut self, event: &TrackedEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

/// Every analytics event a click on `target` produces, in a fixed order.
pub fn classify_click<S: PageSurface>(page: &S, target: &S::Node) -> Vec<TrackedEvent> {
    let mut events = Vec::new();

    if page.matches(target, TRACKED_BUTTONS) {
        let section = page
            .closest(target, "section")
            .and_then(|section| page.attribute(&section, "id"))
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| UNKNOWN.to_string());
        events.push(TrackedEvent::ButtonClick {
            button_text: page.text_content(target).trim().to_string(),
            section,
        });
    }

    if page.closest(target, ".project-actions").is_some() {
        let project = page
            .closest(target, ".project-card")
            .and_then(|card| page.query_within(&card, "h3"))
            .map(|title| page.text_content(&title))
            .unwrap_or_else(|| UNKNOWN.to_string());
        let link_type = if page.text_content(target).contains("Code") {
            LinkType::Github
        } else {
            LinkType::Demo
        };
        events.push(TrackedEvent::ProjectLinkClick { project, link_type });
    }

    if let Some(social) = page.closest(target, ".social-btn") {
        let platform = page
            .attribute(&social, "aria-label")
            .unwrap_or_else(|| UNKNOWN.to_string());
        events.push(TrackedEvent::SocialLinkClick { platform });
    }

    events
}

pub fn log_paint(name: &str, start_ms: f64) {
    info!(target: "performance", "{name}: {start_ms}ms");
}

#[cfg(test)]
#[path = "tests/analytics_tests.rs"]
mod tests;
