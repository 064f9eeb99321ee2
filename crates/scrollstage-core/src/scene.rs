//! # Scene Module
//!
//! Arena-based storage for the rendered element tree.
//!
//! ## Responsibilities
//! - **Element Storage**: append-only `Vec<Element>` arena with `ElementId` indices.
//! - **Hierarchy**: Parent-child relationships with cycle prevention.
//! - **Selection**: `.class` and tag lookups scoped to a root element.
//! - **Layout**: Vertical flow plus absolutely positioned overlays, with pin
//!   spacing inserted after pinned elements.

use crate::style::{Length, Style, Viewport};
use serde::Serialize;
use std::collections::BTreeMap;

pub type ElementId = usize;

/// Vertical extent of an element in document coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// Stacks below the previous flow sibling.
    Flow,
    /// Overlays the parent at the given offset from its top.
    Absolute { top: Length },
}

#[derive(Clone, Debug)]
pub struct Element {
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub text: Option<String>,
    pub height: Length,
    pub position: Position,
    pub children: Vec<ElementId>,
    pub parent: Option<ElementId>,
    /// Computed by `Scene::layout`.
    pub rect: Rect,
    /// Extra flow space reserved after this element while it is pinned.
    pub pin_spacing: f64,
    /// Visual shift applied while pinned so the element holds still on screen.
    pub pin_translate: f64,
    pub style: Style,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            text: None,
            height: Length::Px(0.0),
            position: Position::Flow,
            children: Vec::new(),
            parent: None,
            rect: Rect::default(),
            pin_spacing: 0.0,
            pin_translate: 0.0,
            style: Style::default(),
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.extend(class.split_whitespace().map(str::to_string));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    pub fn with_height(mut self, height: Length) -> Self {
        self.height = height;
        self
    }

    pub fn absolute(mut self, top: Length) -> Self {
        self.position = Position::Absolute { top };
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn matches(&self, selector: &Selector<'_>) -> bool {
        match selector {
            Selector::Class(class) => self.has_class(class),
            Selector::Tag(tag) => self.tag == *tag,
        }
    }
}

enum Selector<'a> {
    Class(&'a str),
    Tag(&'a str),
}

impl<'a> Selector<'a> {
    fn parse(input: &'a str) -> Option<Self> {
        let input = input.trim();
        if let Some(class) = input.strip_prefix('.') {
            (!class.is_empty()).then_some(Selector::Class(class))
        } else if !input.is_empty() && input.chars().all(|c| c.is_ascii_alphanumeric()) {
            Some(Selector::Tag(input))
        } else {
            None
        }
    }
}

/// The element arena.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub elements: Vec<Element>,
    page_height: f64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_element(&mut self, element: Element) -> ElementId {
        self.elements.push(element);
        self.elements.len() - 1
    }

    /// Adds `element` as the last child of `parent`.
    pub fn append(&mut self, parent: ElementId, element: Element) -> ElementId {
        let id = self.add_element(element);
        self.add_child(parent, id);
        id
    }

    /// Establishes a parent-child relationship.
    ///
    /// Returns `false` for missing elements, self-parenting, and cycles.
    pub fn add_child(&mut self, parent: ElementId, child: ElementId) -> bool {
        if parent == child || self.get(parent).is_none() || self.get(child).is_none() {
            return false;
        }

        let mut current = Some(parent);
        while let Some(id) = current {
            if id == child {
                return false;
            }
            current = self.get(id).and_then(|e| e.parent);
        }

        if let Some(old) = self.get(child).and_then(|e| e.parent) {
            if old == parent {
                return true;
            }
            self.remove_child(old, child);
        }

        if let Some(p) = self.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = Some(parent);
        }
        true
    }

    pub fn remove_child(&mut self, parent: ElementId, child: ElementId) {
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|&c| c != child);
        }
        if let Some(c) = self.get_mut(child) {
            if c.parent == Some(parent) {
                c.parent = None;
            }
        }
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    /// Descendants of `root` (excluding `root`) matching `selector`,
    /// in document order. Unparseable selectors match nothing.
    pub fn select(&self, root: ElementId, selector: &str) -> Vec<ElementId> {
        let Some(selector) = Selector::parse(selector) else {
            tracing::debug!(selector, "unsupported selector");
            return Vec::new();
        };
        let mut found = Vec::new();
        let mut stack: Vec<ElementId> = self
            .get(root)
            .map(|e| e.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(id) = stack.pop() {
            let Some(element) = self.get(id) else {
                continue;
            };
            if element.matches(&selector) {
                found.push(id);
            }
            stack.extend(element.children.iter().rev().copied());
        }
        found
    }

    pub fn query_one(&self, root: ElementId, selector: &str) -> Option<ElementId> {
        self.select(root, selector).into_iter().next()
    }

    /// Top-level elements (no parent), in arena order.
    pub fn roots(&self) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.parent.is_none())
            .map(|(id, _)| id)
            .collect()
    }

    /// Recomputes every element rectangle and the page height.
    pub fn layout(&mut self, viewport: &Viewport) {
        let mut cursor = 0.0;
        for root in self.roots() {
            cursor += self.layout_element(root, cursor, viewport);
        }
        self.page_height = cursor;
    }

    /// Lays out `id` at `top`; returns the flow space it consumes.
    fn layout_element(&mut self, id: ElementId, top: f64, viewport: &Viewport) -> f64 {
        let Some(element) = self.get(id) else {
            return 0.0;
        };
        let children = element.children.clone();
        let declared = element.height.resolve(viewport);

        let mut cursor = top;
        for child in children {
            let position = match self.get(child) {
                Some(c) => c.position,
                None => continue,
            };
            match position {
                Position::Flow => {
                    cursor += self.layout_element(child, cursor, viewport);
                }
                Position::Absolute { top: offset } => {
                    self.layout_element(child, top + offset.resolve(viewport), viewport);
                }
            }
        }

        let height = declared.max(cursor - top);
        let Some(element) = self.get_mut(id) else {
            return 0.0;
        };
        element.rect = Rect { top, height };
        height + element.pin_spacing
    }

    pub fn page_height(&self) -> f64 {
        self.page_height
    }

    /// Document-space rectangle as last computed by `layout`.
    pub fn rect(&self, id: ElementId) -> Option<Rect> {
        self.get(id).map(|e| e.rect)
    }

    pub fn ids(&self) -> impl Iterator<Item = ElementId> {
        0..self.elements.len()
    }
}
