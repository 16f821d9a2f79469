use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use email_delivery::EmailDelivery;
use portfolio_web::routing;
use serde::Serialize;
use shared::{
    domain::{ContactMessage, Severity},
    error::DeliveryError,
    protocol::TrackedEvent,
};
use tracing::{debug, info, warn};
use view_core::{
    contact::CONTACT_FORM_ID,
    memory::{MemoryPage, NodeId},
    notification::NOTIFICATION_CLASS,
    progress::PROGRESS_SELECTOR,
    PageEvent, PageSurface, RecordingSink, Settings, ViewController,
};

use crate::script::{Script, Step};

/// Stands in for the email provider: accepts or rejects every message.
pub struct SimulatedDelivery {
    accept: bool,
}

impl SimulatedDelivery {
    pub fn accepting() -> Self {
        Self { accept: true }
    }

    pub fn rejecting() -> Self {
        Self { accept: false }
    }
}

#[async_trait(?Send)]
impl EmailDelivery for SimulatedDelivery {
    async fn send(&self, message: &ContactMessage) -> Result<(), DeliveryError> {
        info!(from = %message.email, accept = self.accept, "simulated delivery");
        if self.accept {
            Ok(())
        } else {
            Err(DeliveryError::Rejected {
                status: 503,
                body: "simulated outage".into(),
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToastSnapshot {
    pub text: String,
    pub severity: Option<Severity>,
    pub transform: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub clock_ms: u64,
    pub scroll_y: f64,
    pub navigation_scrolled: bool,
    pub mobile_menu: String,
    pub progress: String,
    pub progress_widths: Vec<Option<String>>,
    pub form: String,
    pub last_submission: Option<String>,
    pub toasts: Vec<ToastSnapshot>,
    pub focused: Option<String>,
    pub scroll_requests: Vec<f64>,
    pub analytics: Vec<TrackedEvent>,
}

impl Snapshot {
    fn capture(page: &MemoryPage, controller: &ViewController, analytics: Vec<TrackedEvent>) -> Self {
        let toasts = page
            .query_selector_all(&format!(".{NOTIFICATION_CLASS}"))
            .into_iter()
            .map(|toast| ToastSnapshot {
                text: page.text_content(&toast),
                severity: [Severity::Info, Severity::Success, Severity::Error]
                    .into_iter()
                    .find(|severity| {
                        page.has_class(&toast, &format!("{NOTIFICATION_CLASS}-{}", severity.as_str()))
                    }),
                transform: page.style(&toast, "transform"),
            })
            .collect();

        Self {
            clock_ms: u64::try_from(page.now().as_millis()).unwrap_or(u64::MAX),
            scroll_y: page.scroll_y(),
            navigation_scrolled: controller.is_scrolled(),
            mobile_menu: format!("{:?}", controller.menu_state()),
            progress: format!("{:?}", controller.progress_phase()),
            progress_widths: page
                .query_selector_all(PROGRESS_SELECTOR)
                .iter()
                .map(|bar| page.style(bar, "width"))
                .collect(),
            form: format!("{:?}", controller.form_phase()),
            last_submission: controller.last_submission().map(|outcome| format!("{outcome:?}")),
            toasts,
            focused: page.focused().and_then(|node| page.attribute(&node, "id")),
            scroll_requests: page.scroll_log().iter().map(|(top, _)| *top).collect(),
            analytics,
        }
    }
}

pub async fn replay(
    settings: Settings,
    script: &Script,
    delivery: &dyn EmailDelivery,
) -> anyhow::Result<Snapshot> {
    let mut page = MemoryPage::portfolio();
    if let Some(today) = script.today {
        page = page.with_today(today);
    }
    let sink = RecordingSink::default();
    let mut controller = ViewController::with_analytics(settings, Box::new(sink.clone()));

    for (idx, step) in script.steps.iter().enumerate() {
        run_step(&mut page, &mut controller, delivery, step)
            .await
            .with_context(|| format!("step {} ({step:?}) failed", idx + 1))?;
    }

    Ok(Snapshot::capture(&page, &controller, sink.events()))
}

async fn run_step(
    page: &mut MemoryPage,
    controller: &mut ViewController,
    delivery: &dyn EmailDelivery,
    step: &Step,
) -> anyhow::Result<()> {
    match step {
        Step::Load => dispatch(page, controller, delivery, PageEvent::Loaded).await,
        Step::Scroll { y } => {
            page.set_scroll_y(*y);
            dispatch(page, controller, delivery, PageEvent::Scrolled).await;
        }
        Step::Advance { ms } => page.advance(controller, Duration::from_millis(*ms)),
        Step::Settle => page.run_until_idle(controller),
        Step::Click { selector } => {
            let target = page
                .query_selector(selector)
                .with_context(|| format!("nothing matches '{selector}'"))?;
            for event in routing::route_click(page, &target) {
                dispatch(page, controller, delivery, event).await;
            }
        }
        Step::Navigate { href } => {
            if !controller.scroll_to_section(page, href) {
                warn!(href = %href, "anchor did not resolve");
            }
        }
        Step::Key { key, ctrl } => {
            dispatch(page, controller, delivery, routing::route_key(key, *ctrl)).await
        }
        Step::Fill { field, value } => {
            anyhow::ensure!(page.fill(field, value), "no form control with id '{field}'");
        }
        Step::Submit => {
            let form = page
                .element_by_id(CONTACT_FORM_ID)
                .context("page has no contact form")?;
            if let Some(event) = routing::route_submit(page, &form) {
                dispatch(page, controller, delivery, event).await;
            }
        }
        Step::Intersect => {
            let delivered = page.intersect_visible(controller);
            debug!(delivered, "intersections delivered");
        }
        Step::Error { detail } => {
            let event = PageEvent::UncaughtError {
                detail: detail.clone(),
            };
            dispatch(page, controller, delivery, event).await
        }
        Step::Paint { name, start_ms } => {
            let event = PageEvent::Paint {
                name: name.clone(),
                start_ms: *start_ms,
            };
            dispatch(page, controller, delivery, event).await
        }
    }
    Ok(())
}

/// Dispatches one event and, when it starts a submission, completes the
/// delivery before returning.
async fn dispatch(
    page: &mut MemoryPage,
    controller: &mut ViewController,
    delivery: &dyn EmailDelivery,
    event: PageEvent<NodeId>,
) {
    let outcome = controller.dispatch(page, event);
    if let Some(pending) = outcome.submission {
        let result = delivery.send(&pending.message).await;
        controller.finish_submission(page, pending, result);
    }
}

#[cfg(test)]
#[path = "tests/replay_tests.rs"]
mod tests;
