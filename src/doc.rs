//! In-memory element tree.
//!
//! `DocTree` is a minimal host document: elements with a tag, an attribute
//! map, and text, arranged in a parent/child tree rooted at `<html>`. It
//! implements [`Dom`] so the page controllers run against it in tests and in
//! any non-browser host. Visibility and dialog state live in the `hidden`
//! and `open` attributes, mirroring the browser.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::BTreeMap;

use crate::dom::Dom;
use crate::effect::Effect;
use crate::selector::{ElementView, Selector};

/// Index of an element within its [`DocTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// An element and its place in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    /// A detached element with the given tag name.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    #[must_use]
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    /// Append a class to the `class` attribute.
    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        let classes = self.attributes.entry("class".to_string()).or_default();
        if !classes.is_empty() {
            classes.push(' ');
        }
        classes.push_str(class);
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn tag_name(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn text_content(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }
}

impl ElementView for Element {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Arena-backed element tree.
#[derive(Debug, Clone)]
pub struct DocTree {
    nodes: Vec<Element>,
}

impl DocTree {
    /// A tree holding only the `<html>` root.
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: vec![Element::new("html")] }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Attach `element` as the last child of `parent` and return its id.
    ///
    /// An unknown `parent` attaches to the root instead.
    pub fn append(&mut self, parent: NodeId, mut element: Element) -> NodeId {
        let parent = if parent.0 < self.nodes.len() { parent } else { self.root() };
        let id = NodeId(self.nodes.len());
        element.parent = Some(parent);
        element.children.clear();
        self.nodes.push(element);
        self.nodes[parent.0].children.push(id);
        id
    }

    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.0)
    }

    /// Rendered text of `id`; empty for unknown nodes.
    #[must_use]
    pub fn text(&self, id: NodeId) -> &str {
        self.element(id).map_or("", Element::text_content)
    }

    #[must_use]
    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.element(id).is_some_and(|el| el.has_attribute("hidden"))
    }

    /// Whether `id` is an open dialog.
    #[must_use]
    pub fn is_open(&self, id: NodeId) -> bool {
        self.element(id).is_some_and(|el| el.has_attribute("open"))
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.element(id).and_then(Element::parent), |&p| {
            self.element(p).and_then(Element::parent)
        })
    }

    /// Descendants of `id` in document (pre-)order, excluding `id` itself.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let Some(el) = self.element(id) else {
            return out;
        };
        let mut stack: Vec<NodeId> = el.children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            if let Some(child) = self.element(next) {
                stack.extend(child.children.iter().rev().copied());
            }
        }
        out
    }

    fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        let Some(el) = self.element(id) else {
            return false;
        };
        selector.matches(el, self.ancestors(id).filter_map(|a| self.element(a)))
    }

    fn select(&self, scope: NodeId, selector: &str, include_scope: bool) -> Vec<NodeId> {
        let selector = match Selector::parse(selector) {
            Ok(s) => s,
            Err(err) => {
                log::warn!("ignoring selector: {err}");
                return Vec::new();
            }
        };
        let candidates = include_scope.then_some(scope).into_iter().chain(self.descendants(scope));
        candidates.filter(|&id| self.matches(id, &selector)).collect()
    }

    fn set_attribute(&mut self, id: NodeId, name: &str, value: String) {
        match self.nodes.get_mut(id.0) {
            Some(el) => {
                el.attributes.insert(name.to_string(), value);
            }
            None => log::warn!("effect targets unknown node {id:?}"),
        }
    }

    fn remove_attribute(&mut self, id: NodeId, name: &str) {
        match self.nodes.get_mut(id.0) {
            Some(el) => {
                el.attributes.remove(name);
            }
            None => log::warn!("effect targets unknown node {id:?}"),
        }
    }
}

impl Default for DocTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom for DocTree {
    type Node = NodeId;

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.select(self.root(), selector, true)
    }

    fn query_all_within(&self, scope: &NodeId, selector: &str) -> Vec<NodeId> {
        self.select(*scope, selector, false)
    }

    fn closest(&self, node: &NodeId, selector: &str) -> Option<NodeId> {
        let selector = match Selector::parse(selector) {
            Ok(s) => s,
            Err(err) => {
                log::warn!("ignoring selector: {err}");
                return None;
            }
        };
        self.element(*node)?;
        std::iter::once(*node)
            .chain(self.ancestors(*node))
            .find(|&id| self.matches(id, &selector))
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.element(*node)?.parent()
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        std::iter::once(self.root())
            .chain(self.descendants(self.root()))
            .find(|&n| self.element(n).and_then(|el| el.attribute("id")) == Some(id))
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.element(*node)?.attribute(name).map(str::to_string)
    }

    fn apply(&mut self, effect: &Effect<NodeId>) {
        match effect {
            Effect::SetText { node, text } => match self.nodes.get_mut(node.0) {
                Some(el) => el.text.clone_from(text),
                None => log::warn!("effect targets unknown node {node:?}"),
            },
            Effect::SetHidden { node, hidden: true } => self.set_attribute(*node, "hidden", String::new()),
            Effect::SetHidden { node, hidden: false } => self.remove_attribute(*node, "hidden"),
            Effect::SetAttribute { node, name, value } => self.set_attribute(*node, name, value.clone()),
            Effect::RemoveAttribute { node, name } => self.remove_attribute(*node, name),
            Effect::ShowModal { node } => self.set_attribute(*node, "open", String::new()),
            Effect::CloseModal { node } => self.remove_attribute(*node, "open"),
            Effect::PreventDefault => {}
        }
    }
}
