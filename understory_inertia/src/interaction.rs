// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contracts: the interaction being simulated and its modifier pipeline.

use kurbo::{Point, Vec2};
use understory_pointer::{ActionKind, Coords, CoordsSet, PointerEvent};

use crate::options::InertiaOptions;

/// Phase of an [`InteractEvent`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventPhase {
    /// The action started.
    Start,
    /// The action moved.
    Move,
    /// The action ended.
    End,
    /// The pointer was released and a simulation took over.
    InertiaStart,
    /// A pointer down caught the simulated element and the action continues.
    Resume,
}

/// An action event fired on the interaction's target.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InteractEvent<E> {
    /// The action that produced the event.
    pub action: ActionKind,
    /// Event phase.
    pub phase: EventPhase,
    /// Page-space position.
    pub page: Point,
    /// Client-space position.
    pub client: Point,
    /// Event time in milliseconds.
    pub timestamp: f64,
    /// The interaction's element.
    pub target: E,
}

impl<E> InteractEvent<E> {
    /// Build an event at `coords`.
    pub fn new(action: ActionKind, phase: EventPhase, coords: Coords, target: E) -> Self {
        Self {
            action,
            phase,
            page: coords.page,
            client: coords.client,
            timestamp: coords.timestamp,
            target,
        }
    }
}

/// Arguments for [`ModifierPipeline::set_all`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ModifierArgs {
    /// Page position to run the modifiers against.
    pub page_coords: Point,
    /// The pointer has been released but the action has not ended yet.
    pub pre_end: bool,
    /// Only run modifiers configured to apply at the end of an action.
    pub require_end_only: bool,
}

/// Outcome of [`ModifierPipeline::set_all`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ModifierResult {
    /// Correction the modifiers want applied to `page_coords`.
    pub delta: Vec2,
    /// Whether any modifier changed the position.
    pub changed: bool,
}

/// The host's modifier pipeline (snapping, restriction, ...).
pub trait ModifierPipeline {
    /// Run every applicable modifier against `args.page_coords`.
    fn set_all(&mut self, args: &ModifierArgs) -> ModifierResult;
}

/// A pipeline with no modifiers; positions are never changed.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoModifiers;

impl ModifierPipeline for NoModifiers {
    fn set_all(&mut self, _args: &ModifierArgs) -> ModifierResult {
        ModifierResult::default()
    }
}

/// The interaction an [`InertiaState`](crate::InertiaState) drives.
///
/// The host's pointer layer implements this for its interaction type. The
/// simulation writes synthetic positions into [`Interaction::coords_mut`] and
/// then asks the host to process them as a move, exactly as if the pointer had
/// kept moving.
pub trait Interaction {
    /// Element key of the host tree.
    type Element: Copy + PartialEq;

    /// Whether an action is in progress.
    fn is_interacting(&self) -> bool;

    /// The action in progress.
    fn action(&self) -> ActionKind;

    /// The element being acted on.
    fn element(&self) -> Self::Element;

    /// Inertia settings for the current action, or `None` if it has none.
    fn inertia_options(&self) -> Option<InertiaOptions>;

    /// Coordinate history.
    fn coords(&self) -> &CoordsSet;

    /// Mutable coordinate history.
    fn coords_mut(&mut self) -> &mut CoordsSet;

    /// Fire `event` on the interaction's target.
    fn fire(&mut self, event: &InteractEvent<Self::Element>);

    /// Process `coords().cur` as an action move.
    fn pointer_move(&mut self);

    /// End the action with `event`.
    fn end(&mut self, event: &InteractEvent<Self::Element>);

    /// Record `down` as the interaction's pointer.
    fn update_pointer(&mut self, down: &PointerEvent<Self::Element>);

    /// Called when a simulation is interrupted by a pointer down on the element,
    /// before the `Resume` event fires.
    fn resumed(&mut self) {}
}
