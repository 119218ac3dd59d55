// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pointer --heading-base-level=0

//! Understory Pointer: shared vocabulary for pointer-driven interactions.
//!
//! This crate is the leaf of the interaction stack. It does not capture input or
//! recognize gestures; a host pointer layer does that and reports what it saw using
//! the types here:
//!
//! - [`Coords`] / [`Motion`] / [`CoordsSet`]: page and client positions with
//!   timestamps, plus the delta and velocity samples derived from them.
//! - [`PointerEvent`]: a single pointer report carrying the element it landed on.
//! - [`ActionKind`]: the action an interaction was prepared for.
//! - [`ParentLookup`] / [`ElementTree`]: the element-tree queries interaction crates
//!   need (ancestry, sibling order, z-index, selectors, layout rects).
//! - [`ElementArena`]: a small in-memory [`ElementTree`] for headless hosts and tests.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_pointer::{ElementArena, ElementSpec, ElementTree, is_ancestor_or_self};
//!
//! let mut doc = ElementArena::new();
//! let body = doc.insert(None, ElementSpec::tag("body"));
//! let zone = doc.insert(
//!     Some(body),
//!     ElementSpec::tag("div")
//!         .class("dropzone")
//!         .rect(Rect::new(0.0, 0.0, 100.0, 100.0)),
//! );
//!
//! assert_eq!(doc.query_all(None, ".dropzone"), vec![zone]);
//! assert!(is_ancestor_or_self(&doc, body, zone));
//! assert!(doc.rect_of(&zone).unwrap().contains(Point::new(50.0, 50.0)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod arena;
mod coords;
mod tree;

pub use arena::{ElementArena, ElementId, ElementSpec};
pub use coords::{ActionKind, Coords, CoordsSet, Motion, PointerEvent};
pub use tree::{ElementTree, ParentLookup, is_ancestor_or_self, path_to_root};
