// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dropzone --heading-base-level=0

//! Understory Dropzone: drop target resolution and drop event sequencing.
//!
//! ## Overview
//!
//! This crate decides which dropzone, if any, a dragged element is over, and turns
//! the drag's start, moves, and end into `dropactivate`, `dragenter`,
//! `dropmove`, `dragleave`, `drop`, and `dropdeactivate` events. It does not
//! move elements or read input; a host drag action calls in at each phase.
//!
//! ## Pieces
//!
//! - [`Scope`](crate::scope::Scope): the element tree plus registered dropzones and
//!   their options (acceptance rule, overlap mode, custom checker, listeners).
//! - [`registry`]: collects the (dropzone, element) candidates that accept a draggable.
//! - [`overlap`]: pointer, center, and area-ratio overlap predicates.
//! - [`resolve`]: checks candidates and picks the visually topmost hit.
//! - [`DropState`](crate::state::DropState): per-drag current and previous target,
//!   rejection, and the ordered event set for each frame.
//!
//! ## Workflow
//!
//! 1) Register dropzones on a [`Scope`](crate::scope::Scope) and
//!    [`configure`](crate::scope::Scope::configure) them; registration alone
//!    leaves a dropzone disabled.
//! 2) On drag start call [`DropState::start`](crate::state::DropState::start).
//! 3) On each drag move and on drag end call
//!    [`DropState::update`](crate::state::DropState::update), let the host handle
//!    the drag event (now annotated with `dropzone`, `drag_enter`, ...), then call
//!    [`DropState::fire`](crate::state::DropState::fire).
//! 4) On interaction stop call [`DropState::stop`](crate::state::DropState::stop).
//!
//! Listeners return an [`Outcome`](crate::event::Outcome). Returning `Reject`
//! vetoes the dropzone for the current target until the target changes.
//!
//! ## Depth ordering
//!
//! When several dropzones are hit, the most nested one wins; siblings are ordered
//! by z-index and then by document order. See [`resolve::index_of_deepest`].
//!
//! ## Features
//!
//! - `std` (default): forwards to Kurbo's `std`.
//! - `libm`: forwards to Kurbo's `libm` for `no_std` float math.
//! - `tracing` (default): debug and trace events for candidate collection,
//!   target changes, event delivery, and rejections.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod event;
pub mod overlap;
pub mod registry;
pub mod resolve;
pub mod scope;
pub mod state;

mod logging;
