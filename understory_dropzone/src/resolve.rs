// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop resolution: which candidate, if any, the draggable is over.
//!
//! ## Overview
//!
//! [`drop_check`] evaluates one candidate: geometric overlap per the dropzone's
//! [`Overlap`](crate::overlap::Overlap) mode, refined by an optional custom
//! checker. [`get_drop`] checks every candidate and picks the visually topmost
//! hit with [`index_of_deepest`].
//!
//! ## Depth ordering
//!
//! Among several hits the winner is the one painted on top:
//!
//! - a descendant beats its ancestor,
//! - siblings are ordered by z-index, later sibling on ties,
//! - diverging branches are ordered by the branch roots' position among their
//!   common parent's children, later on top.
//!
//! A root element never beats a nested one. Elements from disjoint trees are
//! ordered by position in the input, later wins.

use alloc::vec::Vec;

use kurbo::{Rect, Vec2};
use understory_pointer::{ElementTree, PointerEvent, path_to_root};

use crate::event::DragEvent;
use crate::registry::ActiveDrop;
use crate::scope::{DropCheck, DropzoneId, Scope};

/// The element being dragged.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Draggable<E> {
    /// The dragged element.
    pub element: E,
    /// Offset added to drag positions for pointer overlap tests.
    pub origin: Vec2,
}

impl<E> Draggable<E> {
    /// A draggable with a zero origin.
    pub fn new(element: E) -> Self {
        Self {
            element,
            origin: Vec2::ZERO,
        }
    }
}

/// Whether the draggable is over `drop_element` of dropzone `dropzone`.
///
/// `rect` is the candidate's snapshotted rect; when `None` it is looked up
/// again. Without any rect only the custom checker can accept (with
/// `dropped = false`); without a checker the result is `false`.
pub fn drop_check<E, T>(
    scope: &Scope<E, T>,
    dropzone: DropzoneId,
    drag_event: &DragEvent<E>,
    pointer: &PointerEvent<E>,
    draggable: &Draggable<E>,
    drop_element: E,
    rect: Option<Rect>,
) -> bool
where
    E: Copy,
    T: ElementTree<E>,
{
    let Some(zone) = scope.dropzone(dropzone) else {
        return false;
    };
    let options = zone.options();
    let check = |dropped| DropCheck {
        drag_event,
        pointer,
        dropped,
        dropzone,
        drop_element,
        draggable,
    };

    let Some(rect) = rect.or_else(|| scope.tree().rect_of(&drop_element)) else {
        return options.checker.as_ref().is_some_and(|f| f(&check(false)));
    };

    let drag_rect = scope.tree().rect_of(&draggable.element);
    let dropped = options
        .overlap
        .check(drag_event.page, draggable.origin, drag_rect, rect);

    match &options.checker {
        Some(f) => f(&check(dropped)),
        None => dropped,
    }
}

/// Check every candidate in `active` and return the topmost hit.
pub fn get_drop<E, T>(
    scope: &Scope<E, T>,
    active: &[ActiveDrop<E>],
    drag_event: &DragEvent<E>,
    pointer: &PointerEvent<E>,
    draggable: &Draggable<E>,
) -> Option<ActiveDrop<E>>
where
    E: Copy + PartialEq,
    T: ElementTree<E>,
{
    let valid: Vec<Option<E>> = active
        .iter()
        .map(|drop| {
            drop_check(
                scope,
                drop.dropzone,
                drag_event,
                pointer,
                draggable,
                drop.element,
                drop.rect,
            )
            .then_some(drop.element)
        })
        .collect();
    index_of_deepest(scope.tree(), &valid).map(|i| active[i])
}

/// Index of the visually topmost element in `elements`, skipping `None`s.
///
/// Repeated elements keep their first index. Returns `None` when every entry
/// is `None`.
///
/// ```
/// use understory_dropzone::resolve::index_of_deepest;
/// use understory_pointer::{ElementArena, ElementSpec};
///
/// let mut tree = ElementArena::new();
/// let root = tree.insert(None, ElementSpec::tag("body"));
/// let outer = tree.insert(Some(root), ElementSpec::tag("div"));
/// let inner = tree.insert(Some(outer), ElementSpec::tag("div"));
///
/// assert_eq!(index_of_deepest(&tree, &[Some(inner), Some(outer)]), Some(0));
/// assert_eq!(index_of_deepest(&tree, &[None, Some(outer), Some(inner)]), Some(2));
/// assert_eq!(index_of_deepest(&tree, &[None, None]), None);
/// ```
pub fn index_of_deepest<E, T>(tree: &T, elements: &[Option<E>]) -> Option<usize>
where
    E: Copy + PartialEq,
    T: ElementTree<E> + ?Sized,
{
    let mut best: Option<(usize, E)> = None;
    // Root→best path, computed lazily and reset whenever `best` changes.
    let mut best_path: Vec<E> = Vec::new();

    for (index, element) in elements.iter().enumerate() {
        let Some(element) = *element else {
            continue;
        };
        let Some((_, deepest)) = best else {
            best = Some((index, element));
            continue;
        };
        if element == deepest {
            continue;
        }

        let Some(parent) = tree.parent_of(&element) else {
            continue;
        };
        let wins = match tree.parent_of(&deepest) {
            None => true,
            Some(deepest_parent) if deepest_parent == parent => {
                tree.z_index(&element) >= tree.z_index(&deepest)
            }
            Some(_) => {
                if best_path.is_empty() {
                    best_path = path_to_root(tree, deepest);
                }
                let path = path_to_root(tree, element);
                let common = path
                    .iter()
                    .zip(&best_path)
                    .take_while(|(a, b)| a == b)
                    .count();
                if common == 0 {
                    true
                } else {
                    match (path.get(common), best_path.get(common)) {
                        // `element` is a descendant of `deepest`.
                        (Some(_), None) => true,
                        // `element` is an ancestor of `deepest`.
                        (None, _) => false,
                        (Some(a), Some(b)) => tree.child_index(a) > tree.child_index(b),
                    }
                }
            }
        };

        if wins {
            best = Some((index, element));
            best_path.clear();
        }
    }

    best.map(|(index, _)| index)
}
