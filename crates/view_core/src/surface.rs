use std::{fmt, time::Duration};

use chrono::NaiveDate;
use shared::domain::Rect;

use crate::progress::Percent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

impl ScrollBehavior {
    pub fn as_str(self) -> &'static str {
        match self {
            ScrollBehavior::Smooth => "smooth",
            ScrollBehavior::Instant => "instant",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObserverKind {
    Reveal,
    LazyImage,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: &'static str,
}

impl ObserverKind {
    pub fn options(self) -> ObserverOptions {
        match self {
            ObserverKind::Reveal => ObserverOptions {
                threshold: 0.1,
                root_margin: "0px 0px -50px 0px",
            },
            ObserverKind::LazyImage => ObserverOptions {
                threshold: 0.0,
                root_margin: "0px",
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Deferred<N> {
    /// Trailing edge of the scroll debounce window.
    ScrollSettled { generation: u64 },
    FillProgress { bar: N, width: Percent },
    ToastEnter { toast: N },
    ToastExit { toast: N },
    ToastRemove { toast: N },
    FocusField { id: String },
    /// Fails submission `ticket` if no delivery outcome arrived in time.
    SubmissionDeadline {
        ticket: u64,
        button: Option<N>,
        original_label: String,
    },
}

pub trait PageSurface {
    type Node: Clone + PartialEq + fmt::Debug;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
    fn query_selector(&self, selector: &str) -> Option<Self::Node>;
    fn query_selector_all(&self, selector: &str) -> Vec<Self::Node>;
    fn query_within(&self, root: &Self::Node, selector: &str) -> Option<Self::Node>;
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;
    fn closest(&self, node: &Self::Node, selector: &str) -> Option<Self::Node>;
    fn matches(&self, node: &Self::Node, selector: &str) -> bool;

    fn set_class(&mut self, node: &Self::Node, class: &str, present: bool);
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn set_style(&mut self, node: &Self::Node, property: &str, value: &str);
    fn style(&self, node: &Self::Node, property: &str) -> Option<String>;
    fn text_content(&self, node: &Self::Node) -> String;
    fn set_text_content(&mut self, node: &Self::Node, text: &str);
    fn inner_html(&self, node: &Self::Node) -> String;
    fn set_inner_html(&mut self, node: &Self::Node, html: &str);
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);
    fn set_disabled(&mut self, node: &Self::Node, disabled: bool);
    fn is_disabled(&self, node: &Self::Node) -> bool;

    /// Current value of the control named `name` inside `form`.
    fn field_value(&self, form: &Self::Node, name: &str) -> Option<String>;
    fn reset_form(&mut self, form: &Self::Node);
    fn focus(&mut self, node: &Self::Node);

    fn create_element(&mut self, tag: &str) -> Option<Self::Node>;
    fn append_to_body(&mut self, node: &Self::Node);
    /// Detaches `node`; a node that is already detached is left alone.
    fn remove(&mut self, node: &Self::Node);
    fn is_attached(&self, node: &Self::Node) -> bool;

    fn scroll_y(&self) -> f64;
    fn viewport_height(&self) -> f64;
    fn bounding_rect(&self, node: &Self::Node) -> Rect;
    fn offset_top(&self, node: &Self::Node) -> f64;
    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);

    fn observe(&mut self, node: &Self::Node, kind: ObserverKind);
    fn unobserve(&mut self, node: &Self::Node, kind: ObserverKind);

    /// Hands `task` back to the controller once `delay` has elapsed.
    fn schedule(&mut self, delay: Duration, task: Deferred<Self::Node>);
    fn today(&self) -> NaiveDate;
}
