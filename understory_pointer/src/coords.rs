// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate samples, pointer reports, and action kinds.

use kurbo::{Point, Vec2};

/// Smallest time step (in seconds) used when deriving a velocity.
///
/// Two samples with the same timestamp would otherwise divide by zero.
const MIN_VELOCITY_DT: f64 = 0.001;

/// A pointer position in page and client space at a point in time.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Coords {
    /// Position relative to the document origin (scroll included).
    pub page: Point,
    /// Position relative to the viewport.
    pub client: Point,
    /// Event time in milliseconds.
    pub timestamp: f64,
}

impl Coords {
    /// Create a sample where page and client space coincide.
    pub const fn at(point: Point, timestamp: f64) -> Self {
        Self {
            page: point,
            client: point,
            timestamp,
        }
    }

    /// Return a copy of this sample displaced by `offset` in both spaces.
    pub fn offset(self, offset: Vec2, timestamp: f64) -> Self {
        Self {
            page: self.page + offset,
            client: self.client + offset,
            timestamp,
        }
    }
}

/// A change between two samples: either a delta (pixels) or a velocity (pixels per second).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Motion {
    /// Page-space component.
    pub page: Vec2,
    /// Client-space component.
    pub client: Vec2,
    /// Elapsed time. Milliseconds for deltas, seconds for velocities.
    pub dt: f64,
}

/// The coordinate history of one interaction.
///
/// `cur` and `prev` are the two most recent samples; `delta` and `velocity`
/// are derived from them by [`CoordsSet::update_deltas`] and
/// [`CoordsSet::update_velocity`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CoordsSet {
    /// Sample at the start of the interaction.
    pub start: Coords,
    /// Most recent sample.
    pub cur: Coords,
    /// Sample before `cur`.
    pub prev: Coords,
    /// `cur - prev`, with `dt` in milliseconds.
    pub delta: Motion,
    /// `delta / dt`, in pixels per second.
    pub velocity: Motion,
}

impl CoordsSet {
    /// Start a history at `coords`; every sample equals it and motion is zero.
    pub fn new(coords: Coords) -> Self {
        Self {
            start: coords,
            cur: coords,
            prev: coords,
            delta: Motion::default(),
            velocity: Motion::default(),
        }
    }

    /// Replace the current sample.
    pub fn set_cur(&mut self, page: Point, client: Point, timestamp: f64) {
        self.cur = Coords {
            page,
            client,
            timestamp,
        };
    }

    /// Recompute `delta` as `cur - prev`.
    pub fn update_deltas(&mut self) {
        self.delta = Motion {
            page: self.cur.page - self.prev.page,
            client: self.cur.client - self.prev.client,
            dt: self.cur.timestamp - self.prev.timestamp,
        };
    }

    /// Recompute `velocity` from `delta`.
    pub fn update_velocity(&mut self) {
        let dt = (self.delta.dt / 1000.0).max(MIN_VELOCITY_DT);
        self.velocity = Motion {
            page: self.delta.page / dt,
            client: self.delta.client / dt,
            dt,
        };
    }

    /// Record a new sample: shift `cur` into `prev`, then refresh delta and velocity.
    pub fn push(&mut self, coords: Coords) {
        self.prev = self.cur;
        self.cur = coords;
        self.update_deltas();
        self.update_velocity();
    }

    /// Copy `cur` into `prev`.
    pub fn sync_prev(&mut self) {
        self.prev = self.cur;
    }
}

/// A pointer report from the host input layer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent<E> {
    /// Host pointer identifier.
    pub pointer_id: u32,
    /// Page-space position.
    pub page: Point,
    /// Client-space position.
    pub client: Point,
    /// Event time in milliseconds.
    pub timestamp: f64,
    /// Element the pointer landed on, if any.
    pub target: Option<E>,
}

impl<E> PointerEvent<E> {
    /// Build a report where page and client space coincide.
    pub fn at(pointer_id: u32, point: Point, timestamp: f64, target: Option<E>) -> Self {
        Self {
            pointer_id,
            page: point,
            client: point,
            timestamp,
            target,
        }
    }

    /// The report as a coordinate sample.
    pub fn coords(&self) -> Coords {
        Coords {
            page: self.page,
            client: self.client,
            timestamp: self.timestamp,
        }
    }
}

/// The action an interaction is performing.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ActionKind {
    /// Moving an element.
    Drag,
    /// Resizing an element from an edge or corner.
    Resize,
    /// Multi-touch pinch/rotate.
    Gesture,
}

impl ActionKind {
    /// Whether the action is driven by several pointers at once.
    pub const fn is_multi_touch(self) -> bool {
        matches!(self, Self::Gesture)
    }

    /// Event-name prefix for this action (`"drag"`, `"resize"`, `"gesture"`).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Drag => "drag",
            Self::Resize => "resize",
            Self::Gesture => "gesture",
        }
    }
}
