use shared::domain::ContactMessage;

use crate::surface::{Deferred, ObserverKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
        }
    }

    pub fn with_ctrl(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: true,
        }
    }

    pub fn is_escape(&self) -> bool {
        self.key == "Escape"
    }

    pub fn is_contact_shortcut(&self) -> bool {
        self.ctrl && self.key == "k"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent<N> {
    Loaded,
    Scrolled,
    MenuButtonClicked,
    NavLinkClicked { href: String },
    KeyDown(KeyPress),
    FormSubmitted,
    Clicked { target: N },
    Intersection {
        kind: ObserverKind,
        target: N,
        intersecting: bool,
    },
    Deferred(Deferred<N>),
    Paint { name: String, start_ms: f64 },
    UncaughtError { detail: String },
}

impl<N> PageEvent<N> {
    pub fn name(&self) -> &'static str {
        match self {
            PageEvent::Loaded => "loaded",
            PageEvent::Scrolled => "scrolled",
            PageEvent::MenuButtonClicked => "menu_button_clicked",
            PageEvent::NavLinkClicked { .. } => "nav_link_clicked",
            PageEvent::KeyDown(_) => "key_down",
            PageEvent::FormSubmitted => "form_submitted",
            PageEvent::Clicked { .. } => "clicked",
            PageEvent::Intersection { .. } => "intersection",
            PageEvent::Deferred(_) => "deferred",
            PageEvent::Paint { .. } => "paint",
            PageEvent::UncaughtError { .. } => "uncaught_error",
        }
    }
}

/// A submission that passed validation and is waiting on delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission<N> {
    pub message: ContactMessage,
    pub(crate) button: Option<N>,
    pub(crate) original_label: String,
    pub(crate) ticket: u64,
}

impl<N: Clone> PendingSubmission<N> {
    pub(crate) fn deadline(&self) -> Deferred<N> {
        Deferred::SubmissionDeadline {
            ticket: self.ticket,
            button: self.button.clone(),
            original_label: self.original_label.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch<N> {
    pub prevent_default: bool,
    pub submission: Option<PendingSubmission<N>>,
}

impl<N> Default for Dispatch<N> {
    fn default() -> Self {
        Self {
            prevent_default: false,
            submission: None,
        }
    }
}

impl<N> Dispatch<N> {
    pub(crate) fn prevented() -> Self {
        Self {
            prevent_default: true,
            submission: None,
        }
    }
}
