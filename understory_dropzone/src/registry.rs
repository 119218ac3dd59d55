// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Candidate collection: which (dropzone, element) pairs can receive a drag.

use alloc::vec::Vec;

use kurbo::Rect;
use understory_pointer::ElementTree;

use crate::scope::{Accept, AcceptQuery, DropTarget, Dropzone, DropzoneId, Scope};

/// A dropzone element that accepts the current draggable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DropCandidate<E> {
    /// Owning dropzone.
    pub dropzone: DropzoneId,
    /// The dropzone element.
    pub element: E,
}

/// A candidate together with its layout rect, snapshotted at collection time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ActiveDrop<E> {
    /// Owning dropzone.
    pub dropzone: DropzoneId,
    /// The dropzone element.
    pub element: E,
    /// The element's rect, or `None` if it was not laid out.
    pub rect: Option<Rect>,
}

fn accepts<E, T>(tree: &T, zone: &Dropzone<E>, dragged: E) -> bool
where
    E: Copy + PartialEq,
    T: ElementTree<E>,
{
    match &zone.options().accept {
        Accept::Any => true,
        Accept::Element(e) => *e == dragged,
        Accept::Selector(selector) => tree.matches(&dragged, selector),
        Accept::Callback(f) => f(&AcceptQuery {
            dropzone: zone.id(),
            draggable_element: dragged,
        }),
    }
}

/// Collect every enabled, accepting dropzone element for `dragged`.
///
/// Dropzones are visited in registration order and their elements in document
/// order. The dragged element itself is never a candidate.
pub fn collect_drops<E, T>(scope: &Scope<E, T>, dragged: E) -> Vec<DropCandidate<E>>
where
    E: Copy + PartialEq,
    T: ElementTree<E>,
{
    let tree = scope.tree();
    let mut drops = Vec::new();
    for zone in scope.dropzones() {
        if !zone.options().enabled || !accepts(tree, zone, dragged) {
            continue;
        }
        let mut push = |element: E| {
            if element != dragged {
                drops.push(DropCandidate {
                    dropzone: zone.id(),
                    element,
                });
            }
        };
        match zone.target() {
            DropTarget::Element(e) => push(*e),
            DropTarget::Elements(list) => list.iter().copied().for_each(&mut push),
            DropTarget::Selector(selector) => tree
                .query_all(zone.context(), selector)
                .into_iter()
                .for_each(&mut push),
        }
    }
    drops
}

/// [`collect_drops`] plus each candidate's current rect.
pub fn active_drops<E, T>(scope: &Scope<E, T>, dragged: E) -> Vec<ActiveDrop<E>>
where
    E: Copy + PartialEq,
    T: ElementTree<E>,
{
    let tree = scope.tree();
    collect_drops(scope, dragged)
        .into_iter()
        .map(|c| ActiveDrop {
            dropzone: c.dropzone,
            element: c.element,
            rect: tree.rect_of(&c.element),
        })
        .collect()
}
