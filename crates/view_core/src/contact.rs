use std::sync::LazyLock;

use regex::Regex;
use shared::{
    domain::{ContactDraft, ContactField, ContactMessage, Severity},
    error::{DeliveryError, PageError, ValidationError},
};
use tracing::{debug, error, info, warn};

use crate::{events::PendingSubmission, notification::Notifier, surface::PageSurface};

pub const CONTACT_FORM_ID: &str = "contact-form";
pub const SUBMIT_BUTTON_SELECTOR: &str = r#"button[type="submit"]"#;
pub const LOADING_LABEL: &str = r#"<i data-lucide="loader-2"></i> Sending..."#;
pub const DELIVERED_MESSAGE: &str = "Message sent successfully! Check your Gmail inbox.";

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Structural `local@domain.tld` check; not RFC 5322.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

pub fn validate(draft: &ContactDraft) -> Result<ContactMessage, ValidationError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    let email = draft.email.trim();
    if email.is_empty() || !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if draft.message.trim().is_empty() {
        return Err(ValidationError::MissingMessage);
    }

    Ok(ContactMessage {
        name: name.to_string(),
        email: email.to_string(),
        message: draft.message.clone(),
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Rejected(ValidationError),
    Delivered,
    Failed(DeliveryError),
}

#[derive(Debug, Default)]
pub struct ContactForm {
    phase: FormPhase,
    ticket: u64,
    last_outcome: Option<SubmissionOutcome>,
}

impl ContactForm {
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn last_outcome(&self) -> Option<&SubmissionOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn read_draft<S: PageSurface>(page: &S, form: &S::Node) -> ContactDraft {
        let field = |field: ContactField| page.field_value(form, field.form_name()).unwrap_or_default();
        ContactDraft {
            name: field(ContactField::Name),
            email: field(ContactField::Email),
            message: field(ContactField::Message),
        }
    }

    /// Validates the form and, when it passes, locks the submit button and
    /// returns the message to deliver. A second call while a submission is
    /// in flight is ignored.
    pub fn begin<S: PageSurface>(
        &mut self,
        page: &mut S,
        notifier: &Notifier,
    ) -> Option<PendingSubmission<S::Node>> {
        if self.phase == FormPhase::Submitting {
            debug!("contact submission already in flight; ignoring");
            return None;
        }
        let Some(form) = page.element_by_id(CONTACT_FORM_ID) else {
            warn!("contact form not present");
            return None;
        };

        let draft = Self::read_draft(page, &form);
        let message = match validate(&draft) {
            Ok(message) => message,
            Err(err) => {
                let summary = PageError::from(err);
                info!(field = ?err.field(), code = ?summary.code, reason = %err, "contact form rejected");
                notifier.show(page, &summary.message, Severity::Error);
                self.last_outcome = Some(SubmissionOutcome::Rejected(err));
                return None;
            }
        };

        let button = page.query_within(&form, SUBMIT_BUTTON_SELECTOR);
        let original_label = match &button {
            Some(button) => {
                let label = page.inner_html(button);
                page.set_inner_html(button, LOADING_LABEL);
                page.set_disabled(button, true);
                label
            }
            None => {
                warn!("contact form has no submit button");
                String::new()
            }
        };

        self.phase = FormPhase::Submitting;
        self.ticket += 1;
        info!(ticket = self.ticket, "contact message submitting");
        Some(PendingSubmission {
            message,
            button,
            original_label,
            ticket: self.ticket,
        })
    }

    pub fn finish<S: PageSurface>(
        &mut self,
        page: &mut S,
        notifier: &Notifier,
        pending: PendingSubmission<S::Node>,
        result: Result<(), DeliveryError>,
    ) {
        if !self.is_in_flight(pending.ticket) {
            info!(
                ticket = pending.ticket,
                delivered = result.is_ok(),
                "delivery outcome arrived after the deadline; ignoring"
            );
            return;
        }
        self.complete(
            page,
            notifier,
            pending.button.as_ref(),
            &pending.original_label,
            result,
        );
    }

    /// Fails submission `ticket` when its delivery never answered.
    pub fn expire<S: PageSurface>(
        &mut self,
        page: &mut S,
        notifier: &Notifier,
        ticket: u64,
        button: Option<S::Node>,
        original_label: &str,
    ) {
        if !self.is_in_flight(ticket) {
            return;
        }
        warn!(ticket, "contact message delivery timed out");
        let timed_out = DeliveryError::Transport("timed out".into());
        self.complete(page, notifier, button.as_ref(), original_label, Err(timed_out));
    }

    fn is_in_flight(&self, ticket: u64) -> bool {
        self.phase == FormPhase::Submitting && self.ticket == ticket
    }

    fn complete<S: PageSurface>(
        &mut self,
        page: &mut S,
        notifier: &Notifier,
        button: Option<&S::Node>,
        original_label: &str,
        result: Result<(), DeliveryError>,
    ) {
        match result {
            Ok(()) => {
                info!("contact message delivered");
                notifier.show(page, DELIVERED_MESSAGE, Severity::Success);
                if let Some(form) = page.element_by_id(CONTACT_FORM_ID) {
                    page.reset_form(&form);
                }
                self.last_outcome = Some(SubmissionOutcome::Delivered);
            }
            Err(err) => {
                let summary = PageError::from(&err);
                error!(error = %err, code = ?summary.code, "contact message delivery failed");
                notifier.show(page, &summary.message, Severity::Error);
                self.last_outcome = Some(SubmissionOutcome::Failed(err));
            }
        }

        if let Some(button) = button {
            page.set_inner_html(button, original_label);
            page.set_disabled(button, false);
        }
        self.phase = FormPhase::Idle;
    }
}

#[cfg(test)]
#[path = "tests/contact_tests.rs"]
mod tests;
