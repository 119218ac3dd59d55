// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_inertia --heading-base-level=0

//! Understory Inertia: throw and smooth-end simulation for pointer interactions.
//!
//! ## Overview
//!
//! When the pointer is released while an element is moving fast, the element keeps
//! going and slows down exponentially. When it is released slowly but the host's
//! end-only modifiers (snapping, restriction) want it elsewhere, it glides there
//! with an ease-out curve. A pointer down on the moving element catches it and
//! resumes the interaction.
//!
//! The crate owns none of the interaction. The host implements [`Interaction`] for
//! its action state and [`FrameScheduler`] for its frame source, and
//! [`InertiaState`] drives both.
//!
//! ## Workflow
//!
//! 1) On pointer up, before ending the action, call [`InertiaState::release`]. If
//!    it returns a [`SimulationMode`], do not end the action; the simulation will.
//! 2) For each delivered frame call [`InertiaState::on_frame`] with the handle the
//!    scheduler returned. Stale handles are ignored.
//! 3) On pointer down call [`InertiaState::resume`]; `true` means the interaction
//!    continues from the new pointer.
//! 4) On interaction stop call [`InertiaState::stop`].
//!
//! ## Timing
//!
//! Times are milliseconds. The decay curve itself runs in seconds: speeds are
//! pixels per second and [`Decay::te`] is the throw duration in seconds.
//!
//! ## Features
//!
//! - `std` (default): float math from `std`, forwards to Kurbo's `std`.
//! - `libm`: float math through `libm` for `no_std` builds.
//! - `tracing` (default): debug events when a simulation is armed, finishes, resumes,
//!   or stops, and trace events per frame.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod easing;

mod float;
mod interaction;
mod logging;
mod options;
mod scheduler;
mod state;

pub use interaction::{
    EventPhase, InteractEvent, Interaction, ModifierArgs, ModifierPipeline, ModifierResult,
    NoModifiers,
};
pub use options::InertiaOptions;
pub use scheduler::{FrameHandle, FrameScheduler, ManualFrames};
pub use state::{Decay, InertiaState, SimulationMode, Tick, calc_inertia};
