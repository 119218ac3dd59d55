// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small in-memory element tree.
//!
//! [`ElementArena`] stores elements in insertion-ordered slots with tag, id, class
//! names, an optional layout rect, and a z-index. It implements [`ElementTree`]
//! with a deliberately small selector language:
//!
//! - `tag`, `#id`, `.class`, and `*`,
//! - compounds such as `div.card#main`,
//! - comma-separated lists such as `.a, .b`.
//!
//! Combinators (descendant, child, sibling) are not supported; a selector
//! containing whitespace inside a compound never matches.

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::Rect;

use crate::tree::{ElementTree, ParentLookup};

/// Identifier for an element in an [`ElementArena`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl ElementId {
    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Description of an element to insert.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementSpec {
    /// Tag name, matched case-insensitively.
    pub tag: String,
    /// Optional `id` attribute.
    pub id: Option<String>,
    /// Class names.
    pub classes: Vec<String>,
    /// Page-space layout rect; `None` means the element is not laid out.
    pub rect: Option<Rect>,
    /// Stacking order among siblings.
    pub z_index: i32,
}

impl ElementSpec {
    /// Start a spec for an element with the given tag.
    pub fn tag(tag: &str) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Set the `id` attribute.
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a class name.
    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set the layout rect.
    pub fn rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }

    /// Set the z-index.
    pub fn z_index(mut self, z: i32) -> Self {
        self.z_index = z;
        self
    }
}

#[derive(Clone, Debug)]
struct Element {
    spec: ElementSpec,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    child_index: usize,
}

/// Arena-backed element tree.
#[derive(Clone, Default)]
pub struct ElementArena {
    elements: Vec<Element>,
    roots: Vec<ElementId>,
}

impl core::fmt::Debug for ElementArena {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ElementArena")
            .field("elements", &self.elements.len())
            .field("roots", &self.roots.len())
            .finish_non_exhaustive()
    }
}

impl ElementArena {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new element as the last child of `parent` (or as the last root if `None`).
    pub fn insert(&mut self, parent: Option<ElementId>, spec: ElementSpec) -> ElementId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ElementId uses 32-bit indices by design."
        )]
        let id = ElementId(self.elements.len() as u32);
        let siblings = match parent {
            Some(p) => &mut self.elements[p.idx()].children,
            None => &mut self.roots,
        };
        let child_index = siblings.len();
        siblings.push(id);
        self.elements.push(Element {
            spec,
            parent,
            children: Vec::new(),
            child_index,
        });
        id
    }

    /// Number of elements in the arena.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Children of `id` in document order.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        &self.elements[id.idx()].children
    }

    /// Replace the layout rect of `id`; `None` marks it as not laid out.
    pub fn set_rect(&mut self, id: ElementId, rect: Option<Rect>) {
        self.elements[id.idx()].spec.rect = rect;
    }

    /// Replace the z-index of `id`.
    pub fn set_z_index(&mut self, id: ElementId, z: i32) {
        self.elements[id.idx()].spec.z_index = z;
    }

    /// Add a class name to `id`.
    pub fn add_class(&mut self, id: ElementId, class: &str) {
        let classes = &mut self.elements[id.idx()].spec.classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.into());
        }
    }

    /// Remove a class name from `id`.
    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        self.elements[id.idx()].spec.classes.retain(|c| c != class);
    }

    fn collect_matching(&self, from: &[ElementId], selector: &str, out: &mut Vec<ElementId>) {
        for &id in from {
            if self.matches(&id, selector) {
                out.push(id);
            }
            self.collect_matching(&self.elements[id.idx()].children, selector, out);
        }
    }
}

impl ParentLookup<ElementId> for ElementArena {
    fn parent_of(&self, element: &ElementId) -> Option<ElementId> {
        self.elements[element.idx()].parent
    }
}

impl ElementTree<ElementId> for ElementArena {
    fn child_index(&self, element: &ElementId) -> usize {
        self.elements[element.idx()].child_index
    }

    fn z_index(&self, element: &ElementId) -> i32 {
        self.elements[element.idx()].spec.z_index
    }

    fn matches(&self, element: &ElementId, selector: &str) -> bool {
        let spec = &self.elements[element.idx()].spec;
        selector
            .split(',')
            .any(|compound| matches_compound(spec, compound.trim()))
    }

    fn query_all(&self, context: Option<&ElementId>, selector: &str) -> Vec<ElementId> {
        let mut out = Vec::new();
        let from = match context {
            Some(ctx) => &self.elements[ctx.idx()].children,
            None => &self.roots,
        };
        self.collect_matching(from, selector, &mut out);
        out
    }

    fn rect_of(&self, element: &ElementId) -> Option<Rect> {
        self.elements[element.idx()].spec.rect
    }
}

fn matches_compound(spec: &ElementSpec, compound: &str) -> bool {
    if compound.is_empty() || compound.contains(char::is_whitespace) {
        return false;
    }
    let tag_end = compound.find(['.', '#']).unwrap_or(compound.len());
    let tag = &compound[..tag_end];
    if !tag.is_empty() && tag != "*" && !tag.eq_ignore_ascii_case(&spec.tag) {
        return false;
    }
    let mut rest = &compound[tag_end..];
    while let Some(kind) = rest.chars().next() {
        let body = &rest[1..];
        let end = body.find(['.', '#']).unwrap_or(body.len());
        let name = &body[..end];
        let ok = !name.is_empty()
            && match kind {
                '.' => spec.classes.iter().any(|c| c == name),
                _ => spec.id.as_deref() == Some(name),
            };
        if !ok {
            return false;
        }
        rest = &body[end..];
    }
    true
}
