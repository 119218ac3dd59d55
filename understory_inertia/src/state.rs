// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The inertia simulation state machine.
//!
//! ## Modes
//!
//! On release, [`InertiaState::release`] picks one of two modes:
//!
//! - **Inertia**: the pointer was moving fast enough. The element keeps moving
//!   along the release velocity with exponential decay until its speed drops to
//!   `end_speed`. If the modifiers move the projected end point, the path bends
//!   towards the modified end along a quadratic curve.
//! - **Smooth end**: the pointer was slow but the end-only modifiers want to move
//!   the element. It glides to the modified position with a quadratic ease-out
//!   over `smooth_end_duration`.
//!
//! Each frame writes `up_coords + displacement` into the interaction's current
//! coordinates and asks the host to process a move. The last frame snaps to the
//! end point and ends the action with the synthetic `InertiaStart` event.

use kurbo::Vec2;
use understory_pointer::{Coords, ParentLookup, PointerEvent, is_ancestor_or_self};

use crate::easing::{ease_out_quad, quadratic_curve_point};
use crate::float;
use crate::interaction::{EventPhase, InteractEvent, Interaction, ModifierArgs, ModifierPipeline};
use crate::logging::{debug, trace};
use crate::options::InertiaOptions;
use crate::scheduler::{FrameHandle, FrameScheduler};

/// A release only counts as a throw if the last pointer sample is this recent, in milliseconds.
const RELEASE_WINDOW_MS: f64 = 50.0;

/// Constants of the exponential decay curve for one throw.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Decay {
    /// Duration of the throw in seconds.
    pub te: f64,
    /// `λ / v0`.
    pub lambda_v0: f64,
    /// `1 - end_speed / v0`.
    pub one_ve_v0: f64,
}

impl Decay {
    /// Projected end displacement for a throw at `velocity`.
    pub fn end_displacement(&self, resistance: f64, velocity: Vec2) -> Vec2 {
        Vec2::new(
            (velocity.x - self.te) / resistance,
            (velocity.y - self.te) / resistance,
        )
    }

    /// Fraction of the throw covered after `t` seconds, reaching `1` at `te`.
    pub fn progress(&self, resistance: f64, t: f64) -> f64 {
        1.0 - (float::exp(-resistance * t) - self.lambda_v0) / self.one_ve_v0
    }
}

/// Compute the decay curve for a throw at speed `v0`.
///
/// # Panics
///
/// Panics unless `v0 > end_speed > 0`.
///
/// ```
/// use understory_inertia::{InertiaOptions, calc_inertia};
///
/// let decay = calc_inertia(&InertiaOptions::default(), 200.0);
/// assert!((decay.te - 0.29957).abs() < 1e-5);
/// assert!((decay.lambda_v0 - 0.05).abs() < 1e-12);
/// assert!((decay.one_ve_v0 - 0.95).abs() < 1e-12);
/// ```
pub fn calc_inertia(options: &InertiaOptions, v0: f64) -> Decay {
    assert!(
        options.end_speed > 0.0 && v0 > options.end_speed,
        "a throw needs v0 > end_speed > 0"
    );
    let lambda = options.resistance;
    Decay {
        te: -float::ln(options.end_speed / v0) / lambda,
        lambda_v0: lambda / v0,
        one_ve_v0: 1.0 - options.end_speed / v0,
    }
}

/// Which simulation a release started.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SimulationMode {
    /// Exponential-decay throw.
    Inertia,
    /// Ease-out glide to the modified end position.
    SmoothEnd,
}

/// Result of delivering a frame.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Tick {
    /// The handle is not the pending frame; nothing happened.
    Stale,
    /// The element moved and another frame was requested.
    Moved,
    /// The element reached its end point and the action ended.
    Ended,
}

/// Inertia state of one interaction.
#[derive(Clone, Debug)]
pub struct InertiaState<E> {
    active: bool,
    smooth_end: bool,
    allow_resume: bool,
    options: InertiaOptions,
    start_event: Option<InteractEvent<E>>,
    up_coords: Coords,
    target: Vec2,
    modified_target: Vec2,
    displacement: Vec2,
    t0: f64,
    release_velocity: Vec2,
    v0: f64,
    decay: Decay,
    frame: Option<FrameHandle>,
}

impl<E> Default for InertiaState<E> {
    fn default() -> Self {
        Self {
            active: false,
            smooth_end: false,
            allow_resume: false,
            options: InertiaOptions::default(),
            start_event: None,
            up_coords: Coords::default(),
            target: Vec2::ZERO,
            modified_target: Vec2::ZERO,
            displacement: Vec2::ZERO,
            t0: 0.0,
            release_velocity: Vec2::ZERO,
            v0: 0.0,
            decay: Decay::default(),
            frame: None,
        }
    }
}

impl<E> InertiaState<E> {
    /// An idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a simulation is running.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the running simulation is a smooth end.
    pub fn is_smooth_end(&self) -> bool {
        self.smooth_end
    }

    /// Whether a pointer down on the element may resume the interaction.
    pub fn allow_resume(&self) -> bool {
        self.allow_resume
    }

    /// The synthetic `InertiaStart` event of the last release.
    pub fn start_event(&self) -> Option<&InteractEvent<E>> {
        self.start_event.as_ref()
    }

    /// Coordinates at release.
    pub fn up_coords(&self) -> Coords {
        self.up_coords
    }

    /// Unmodified end displacement.
    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// End displacement after modifiers.
    pub fn modified_target(&self) -> Vec2 {
        self.modified_target
    }

    /// Displacement applied by the last frame.
    pub fn displacement(&self) -> Vec2 {
        self.displacement
    }

    /// Release time in milliseconds.
    pub fn t0(&self) -> f64 {
        self.t0
    }

    /// Client-space velocity at release, in pixels per second.
    pub fn release_velocity(&self) -> Vec2 {
        self.release_velocity
    }

    /// Release speed, in pixels per second.
    pub fn v0(&self) -> f64 {
        self.v0
    }

    /// Decay curve of the current throw.
    pub fn decay(&self) -> Decay {
        self.decay
    }

    /// The frame the simulation is waiting for.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.frame
    }

    /// Cancel any pending frame and stop simulating. Safe to call repeatedly.
    pub fn stop<F: FrameScheduler + ?Sized>(&mut self, frames: &mut F) {
        if let Some(handle) = self.frame.take() {
            frames.cancel_frame(handle);
        }
        if self.active {
            debug!("inertia stopped");
        }
        self.active = false;
        self.smooth_end = false;
    }
}

impl<E: Copy + PartialEq> InertiaState<E> {
    /// Handle a pointer release before the action ends.
    ///
    /// Returns the mode of the simulation that took over, or `None` if the action
    /// should end normally. `skip` suppresses the simulation (for releases that
    /// must not run end-only modifiers).
    pub fn release<I, M, F>(
        &mut self,
        interaction: &mut I,
        modifiers: &mut M,
        frames: &mut F,
        event: &InteractEvent<E>,
        now: f64,
        skip: bool,
    ) -> Option<SimulationMode>
    where
        I: Interaction<Element = E>,
        M: ModifierPipeline + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        if !interaction.is_interacting() || self.active || skip {
            return None;
        }
        let options = interaction.inertia_options().unwrap_or_default();
        let cur = interaction.coords().cur;
        let velocity = interaction.coords().velocity.client;
        let speed = velocity.hypot();

        let possible = options.enabled
            && !interaction.action().is_multi_touch()
            && self.start_event.as_ref() != Some(event);
        let inertia = possible
            && now - cur.timestamp < RELEASE_WINDOW_MS
            && options.end_speed > 0.0
            && speed > options.min_speed
            && speed > options.end_speed;

        let args = ModifierArgs {
            page_coords: cur.page,
            pre_end: true,
            require_end_only: true,
        };
        let smooth = if possible && !inertia {
            Some(modifiers.set_all(&args)).filter(|r| r.changed)
        } else {
            None
        };
        if !inertia && smooth.is_none() {
            return None;
        }

        if let Some(handle) = self.frame.take() {
            frames.cancel_frame(handle);
        }
        self.options = options;
        self.up_coords = cur;
        let start = InteractEvent::new(
            interaction.action(),
            EventPhase::InertiaStart,
            Coords { timestamp: now, ..cur },
            interaction.element(),
        );
        self.start_event = Some(start);
        self.t0 = now;
        self.active = true;
        self.allow_resume = options.allow_resume;
        self.displacement = Vec2::ZERO;
        interaction.fire(&start);

        let mode = match smooth {
            None => {
                self.release_velocity = velocity;
                self.v0 = speed;
                self.decay = calc_inertia(&options, speed);
                self.target = self.decay.end_displacement(options.resistance, velocity);
                let projected = modifiers.set_all(&ModifierArgs {
                    page_coords: cur.page + self.target,
                    ..args
                });
                self.modified_target = self.target + projected.delta;
                SimulationMode::Inertia
            }
            Some(result) => {
                self.smooth_end = true;
                self.target = result.delta;
                self.modified_target = result.delta;
                SimulationMode::SmoothEnd
            }
        };
        self.frame = Some(frames.request_frame());
        debug!(action = interaction.action().name(), ?mode, speed, "inertia armed");
        Some(mode)
    }

    /// Advance the simulation for frame `handle` at time `now` (milliseconds).
    pub fn on_frame<I, F>(
        &mut self,
        handle: FrameHandle,
        interaction: &mut I,
        frames: &mut F,
        now: f64,
    ) -> Tick
    where
        I: Interaction<Element = E>,
        F: FrameScheduler + ?Sized,
    {
        if !self.active || self.frame != Some(handle) {
            trace!(frame = handle.get(), "stale inertia frame");
            return Tick::Stale;
        }
        self.frame = None;

        let running = if self.smooth_end {
            let t = now - self.t0;
            let duration = self.options.smooth_end_duration;
            if t < duration {
                self.displacement = Vec2::new(
                    ease_out_quad(t, 0.0, self.target.x, duration),
                    ease_out_quad(t, 0.0, self.target.y, duration),
                );
                true
            } else {
                self.displacement = self.target;
                false
            }
        } else {
            let t = (now - self.t0) / 1000.0;
            if t < self.decay.te {
                let progress = self.decay.progress(self.options.resistance, t);
                self.displacement = if self.modified_target == self.target {
                    self.target * progress
                } else {
                    quadratic_curve_point(Vec2::ZERO, self.target, self.modified_target, progress)
                };
                trace!(progress, "inertia tick");
                true
            } else {
                self.displacement = self.modified_target;
                false
            }
        };

        self.apply_displacement(interaction, now);
        interaction.pointer_move();
        let tick = if running {
            self.frame = Some(frames.request_frame());
            Tick::Moved
        } else {
            self.active = false;
            self.smooth_end = false;
            if let Some(start) = self.start_event {
                interaction.end(&start);
            }
            debug!("inertia finished");
            Tick::Ended
        };
        interaction.coords_mut().sync_prev();
        tick
    }

    /// Resume the interaction if `down` landed on the simulated element or inside it.
    ///
    /// Returns `true` if the simulation was interrupted.
    pub fn resume<I, T, F>(
        &mut self,
        interaction: &mut I,
        tree: &T,
        frames: &mut F,
        down: &PointerEvent<E>,
    ) -> bool
    where
        I: Interaction<Element = E>,
        T: ParentLookup<E> + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        if !self.active || !self.allow_resume {
            return false;
        }
        let Some(target) = down.target else {
            return false;
        };
        if !is_ancestor_or_self(tree, interaction.element(), target) {
            return false;
        }

        if let Some(handle) = self.frame.take() {
            frames.cancel_frame(handle);
        }
        self.active = false;
        self.smooth_end = false;

        interaction.update_pointer(down);
        interaction.coords_mut().cur = down.coords();
        interaction.resumed();
        let event = InteractEvent::new(
            interaction.action(),
            EventPhase::Resume,
            interaction.coords().cur,
            interaction.element(),
        );
        interaction.fire(&event);
        interaction.coords_mut().sync_prev();
        debug!("inertia resumed");
        true
    }

    fn apply_displacement<I: Interaction<Element = E>>(&self, interaction: &mut I, now: f64) {
        interaction
            .coords_mut()
            .push(self.up_coords.offset(self.displacement, now));
    }
}
