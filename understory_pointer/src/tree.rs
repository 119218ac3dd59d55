// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element-tree lookups consumed by interaction crates.
//!
//! Hosts implement these traits over their own scene (a DOM, a widget tree, a box
//! tree). Interaction crates only ever ask questions through them and never hold
//! references into the host tree.

use alloc::vec::Vec;
use kurbo::Rect;

/// Look up the parent of an element.
pub trait ParentLookup<E> {
    /// Returns the parent of `element`, or `None` if `element` is a root.
    fn parent_of(&self, element: &E) -> Option<E>;
}

/// Queries over a host element tree.
pub trait ElementTree<E>: ParentLookup<E> {
    /// Position of `element` among its parent's children (or among the roots).
    ///
    /// Later siblings paint over earlier ones.
    fn child_index(&self, element: &E) -> usize;

    /// Stacking order of `element` among its siblings. Higher is on top.
    fn z_index(&self, _element: &E) -> i32 {
        0
    }

    /// Whether `element` matches `selector`.
    fn matches(&self, element: &E, selector: &str) -> bool;

    /// All elements matching `selector`, in document order.
    ///
    /// With a `context`, only descendants of `context` are considered.
    fn query_all(&self, context: Option<&E>, selector: &str) -> Vec<E>;

    /// Layout rectangle of `element` in page space, or `None` if it is not laid out.
    fn rect_of(&self, element: &E) -> Option<Rect>;
}

/// Root→`element` path, inclusive at both ends.
///
/// The caller guarantees the ancestry is acyclic.
pub fn path_to_root<E: Copy, T: ParentLookup<E> + ?Sized>(tree: &T, element: E) -> Vec<E> {
    let mut out = Vec::new();
    let mut cur = element;
    loop {
        out.push(cur);
        match tree.parent_of(&cur) {
            Some(p) => cur = p,
            None => break,
        }
    }
    out.reverse();
    out
}

/// Whether `ancestor` is `node` or one of its ancestors.
pub fn is_ancestor_or_self<E: Copy + PartialEq, T: ParentLookup<E> + ?Sized>(
    tree: &T,
    ancestor: E,
    node: E,
) -> bool {
    let mut cur = Some(node);
    while let Some(el) = cur {
        if el == ancestor {
            return true;
        }
        cur = tree.parent_of(&el);
    }
    false
}
