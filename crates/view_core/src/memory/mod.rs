use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    time::Duration,
};

use chrono::NaiveDate;
use shared::domain::Rect;
use tracing::warn;

use crate::{
    events::PageEvent,
    surface::{Deferred, ObserverKind, PageSurface, ScrollBehavior},
    ViewController,
};

mod fixture;
pub mod selector;

use selector::{Compound, SelectorList};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
struct MemoryNode {
    tag: String,
    attrs: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    styles: BTreeMap<String, String>,
    text: String,
    html: Option<String>,
    value: String,
    disabled: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    offset_top: f64,
    height: f64,
}

#[derive(Debug, Clone)]
struct Timer {
    due: Duration,
    seq: u64,
    task: Deferred<NodeId>,
}

#[derive(Debug)]
pub struct MemoryPage {
    nodes: Vec<MemoryNode>,
    scroll_y: f64,
    viewport_height: f64,
    document_height: f64,
    now: Duration,
    next_seq: u64,
    timers: Vec<Timer>,
    observed: HashSet<(NodeId, ObserverKind)>,
    class_writes: HashMap<NodeId, usize>,
    scroll_log: Vec<(f64, ScrollBehavior)>,
    focused: Option<NodeId>,
    today: NaiveDate,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    pub fn new() -> Self {
        let body = MemoryNode {
            tag: "body".into(),
            ..MemoryNode::default()
        };
        Self {
            nodes: vec![body],
            scroll_y: 0.0,
            viewport_height: 800.0,
            document_height: 0.0,
            now: Duration::ZERO,
            next_seq: 0,
            timers: Vec::new(),
            observed: HashSet::new(),
            class_writes: HashMap::new(),
            scroll_log: Vec::new(),
            focused: None,
            today: chrono::Utc::now().date_naive(),
        }
    }

    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn with_viewport_height(mut self, height: f64) -> Self {
        self.viewport_height = height;
        self
    }

    pub fn element(&mut self, parent: NodeId, tag: &str) -> ElementBuilder<'_> {
        let id = self.insert(MemoryNode {
            tag: tag.to_ascii_lowercase(),
            ..MemoryNode::default()
        });
        self.attach(parent, id);
        ElementBuilder { page: self, id }
    }

    fn insert(&mut self, node: MemoryNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.nodes[child.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != child);
        }
    }

    fn node(&self, id: NodeId) -> &MemoryNode {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut MemoryNode {
        &mut self.nodes[id.0]
    }

    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(root).children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        out
    }

    fn parse_selector(selector: &str) -> Option<SelectorList> {
        match SelectorList::parse(selector) {
            Ok(list) => Some(list),
            Err(err) => {
                warn!(selector, error = %err, "unsupported selector");
                None
            }
        }
    }

    fn matches_compound(&self, id: NodeId, compound: &Compound) -> bool {
        let node = self.node(id);
        if compound.tag.as_ref().is_some_and(|tag| *tag != node.tag) {
            return false;
        }
        if let Some(wanted) = &compound.id {
            if node.attrs.get("id") != Some(wanted) {
                return false;
            }
        }
        if !compound.classes.iter().all(|c| node.classes.contains(c)) {
            return false;
        }
        compound.attrs.iter().all(|attr| match (node.attrs.get(&attr.name), &attr.value) {
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => actual == expected,
            (None, _) => false,
        })
    }

    fn matches_list(&self, id: NodeId, list: &SelectorList) -> bool {
        list.0.iter().any(|complex| {
            let Some((last, ancestors)) = complex.0.split_last() else {
                return false;
            };
            if !self.matches_compound(id, last) {
                return false;
            }
            let mut cursor = self.node(id).parent;
            for compound in ancestors.iter().rev() {
                loop {
                    let Some(candidate) = cursor else {
                        return false;
                    };
                    cursor = self.node(candidate).parent;
                    if self.matches_compound(candidate, compound) {
                        break;
                    }
                }
            }
            true
        })
    }

    fn own_text(&self, id: NodeId) -> String {
        let node = self.node(id);
        let mut text = node.text.clone();
        for child in &node.children {
            text.push_str(&self.own_text(*child));
        }
        text
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Runs every timer due within `by`, in due order, through `controller`.
    pub fn advance(&mut self, controller: &mut ViewController, by: Duration) {
        let target = self.now + by;
        loop {
            let next = self
                .timers
                .iter()
                .enumerate()
                .filter(|(_, timer)| timer.due <= target)
                .min_by_key(|(_, timer)| (timer.due, timer.seq))
                .map(|(idx, _)| idx);
            let Some(idx) = next else {
                break;
            };
            let timer = self.timers.swap_remove(idx);
            self.now = timer.due;
            controller.dispatch(self, PageEvent::Deferred(timer.task));
        }
        self.now = target;
    }

    pub fn run_until_idle(&mut self, controller: &mut ViewController) {
        while let Some(due) = self.timers.iter().map(|timer| timer.due).max() {
            let by = due.saturating_sub(self.now);
            self.advance(controller, by);
        }
    }

    /// Moves the viewport without dispatching a scroll event.
    pub fn set_scroll_y(&mut self, y: f64) {
        let max = (self.document_height - self.viewport_height).max(0.0);
        self.scroll_y = y.clamp(0.0, max);
    }

    /// Dispatches an intersection event for every observed node currently in
    /// the viewport.
    pub fn intersect_visible(&mut self, controller: &mut ViewController) -> usize {
        let mut visible: Vec<(NodeId, ObserverKind)> = self
            .observed
            .iter()
            .filter(|(node, _)| {
                self.bounding_rect(node)
                    .intersects_viewport(self.viewport_height)
            })
            .copied()
            .collect();
        visible.sort_by_key(|(node, _)| *node);
        for (target, kind) in &visible {
            controller.dispatch(
                self,
                PageEvent::Intersection {
                    kind: *kind,
                    target: *target,
                    intersecting: true,
                },
            );
        }
        visible.len()
    }

    pub fn fill(&mut self, id: &str, value: &str) -> bool {
        match self.element_by_id(id) {
            Some(node) => {
                self.node_mut(node).value = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn value(&self, node: NodeId) -> &str {
        &self.node(node).value
    }

    pub fn is_observed(&self, node: NodeId, kind: ObserverKind) -> bool {
        self.observed.contains(&(node, kind))
    }

    pub fn class_writes(&self, node: NodeId) -> usize {
        self.class_writes.get(&node).copied().unwrap_or(0)
    }

    pub fn scroll_log(&self) -> &[(f64, ScrollBehavior)] {
        &self.scroll_log
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }
}

fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

impl PageSurface for MemoryPage {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.body())
            .into_iter()
            .find(|node| self.node(*node).attrs.get("id").map(String::as_str) == Some(id))
    }

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.query_within(&self.body(), selector)
    }

    fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        let Some(list) = Self::parse_selector(selector) else {
            return Vec::new();
        };
        self.descendants(self.body())
            .into_iter()
            .filter(|node| self.matches_list(*node, &list))
            .collect()
    }

    fn query_within(&self, root: &NodeId, selector: &str) -> Option<NodeId> {
        let list = Self::parse_selector(selector)?;
        self.descendants(*root)
            .into_iter()
            .find(|node| self.matches_list(*node, &list))
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.node(*node).parent
    }

    fn closest(&self, node: &NodeId, selector: &str) -> Option<NodeId> {
        let list = Self::parse_selector(selector)?;
        let mut cursor = Some(*node);
        while let Some(candidate) = cursor {
            if self.matches_list(candidate, &list) {
                return Some(candidate);
            }
            cursor = self.node(candidate).parent;
        }
        None
    }

    fn matches(&self, node: &NodeId, selector: &str) -> bool {
        Self::parse_selector(selector).is_some_and(|list| self.matches_list(*node, &list))
    }

    fn set_class(&mut self, node: &NodeId, class: &str, present: bool) {
        *self.class_writes.entry(*node).or_default() += 1;
        let classes = &mut self.node_mut(*node).classes;
        if present {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.node(*node).classes.contains(class)
    }

    fn set_style(&mut self, node: &NodeId, property: &str, value: &str) {
        self.node_mut(*node)
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn style(&self, node: &NodeId, property: &str) -> Option<String> {
        self.node(*node).styles.get(property).cloned()
    }

    fn text_content(&self, node: &NodeId) -> String {
        self.own_text(*node)
    }

    fn set_text_content(&mut self, node: &NodeId, text: &str) {
        for child in self.node(*node).children.clone() {
            self.detach(child);
        }
        let target = self.node_mut(*node);
        target.text = text.to_string();
        target.html = None;
    }

    fn inner_html(&self, node: &NodeId) -> String {
        let target = self.node(*node);
        target.html.clone().unwrap_or_else(|| self.own_text(*node))
    }

    fn set_inner_html(&mut self, node: &NodeId, html: &str) {
        for child in self.node(*node).children.clone() {
            self.detach(child);
        }
        let target = self.node_mut(*node);
        target.text = strip_tags(html);
        target.html = Some(html.to_string());
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.node(*node).attrs.get(name).cloned()
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        self.node_mut(*node)
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    fn set_disabled(&mut self, node: &NodeId, disabled: bool) {
        self.node_mut(*node).disabled = disabled;
    }

    fn is_disabled(&self, node: &NodeId) -> bool {
        self.node(*node).disabled
    }

    fn field_value(&self, form: &NodeId, name: &str) -> Option<String> {
        let control = self.query_within(form, &format!("[name=\"{name}\"]"))?;
        Some(self.node(control).value.clone())
    }

    fn reset_form(&mut self, form: &NodeId) {
        for node in self.descendants(*form) {
            let target = self.node_mut(node);
            if matches!(target.tag.as_str(), "input" | "textarea" | "select") {
                target.value.clear();
            }
        }
    }

    fn focus(&mut self, node: &NodeId) {
        self.focused = Some(*node);
    }

    fn create_element(&mut self, tag: &str) -> Option<NodeId> {
        Some(self.insert(MemoryNode {
            tag: tag.to_ascii_lowercase(),
            ..MemoryNode::default()
        }))
    }

    fn append_to_body(&mut self, node: &NodeId) {
        let body = self.body();
        self.attach(body, *node);
    }

    fn remove(&mut self, node: &NodeId) {
        self.detach(*node);
    }

    fn is_attached(&self, node: &NodeId) -> bool {
        let mut cursor = Some(*node);
        while let Some(candidate) = cursor {
            if candidate == self.body() {
                return true;
            }
            cursor = self.node(candidate).parent;
        }
        false
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn bounding_rect(&self, node: &NodeId) -> Rect {
        let target = self.node(*node);
        let top = target.offset_top - self.scroll_y;
        Rect::new(top, top + target.height)
    }

    fn offset_top(&self, node: &NodeId) -> f64 {
        self.node(*node).offset_top
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.scroll_log.push((top, behavior));
        self.set_scroll_y(top);
    }

    fn observe(&mut self, node: &NodeId, kind: ObserverKind) {
        self.observed.insert((*node, kind));
    }

    fn unobserve(&mut self, node: &NodeId, kind: ObserverKind) {
        self.observed.remove(&(*node, kind));
    }

    fn schedule(&mut self, delay: Duration, task: Deferred<NodeId>) {
        self.next_seq += 1;
        self.timers.push(Timer {
            due: self.now + delay,
            seq: self.next_seq,
            task,
        });
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}

pub struct ElementBuilder<'a> {
    page: &'a mut MemoryPage,
    id: NodeId,
}

impl ElementBuilder<'_> {
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: &str) -> Self {
        for name in class.split_whitespace() {
            self.page.nodes[self.id.0].classes.insert(name.to_string());
        }
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Self {
        self.page.nodes[self.id.0]
            .attrs
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(self, text: &str) -> Self {
        self.page.nodes[self.id.0].text = text.to_string();
        self
    }

    /// Places the element at `top` (document coordinates) with `height`.
    pub fn layout(self, top: f64, height: f64) -> Self {
        let node = &mut self.page.nodes[self.id.0];
        node.offset_top = top;
        node.height = height;
        self.page.document_height = self.page.document_height.max(top + height);
        self
    }

    pub fn build(self) -> NodeId {
        self.id
    }
}

#[cfg(test)]
#[path = "../tests/memory_tests.rs"]
mod tests;
