// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inertia configuration.

/// Per-action inertia settings.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InertiaOptions {
    /// Whether releasing the pointer may start a simulation. Defaults to `false`.
    pub enabled: bool,
    /// Decay rate λ, per second. Higher values stop sooner. Defaults to `10`.
    pub resistance: f64,
    /// Minimum release speed, in pixels per second, for an inertial throw. Defaults to `100`.
    pub min_speed: f64,
    /// Speed, in pixels per second, at which the throw is considered finished. Defaults to `10`.
    pub end_speed: f64,
    /// Whether a pointer down on the moving element resumes the interaction. Defaults to `true`.
    pub allow_resume: bool,
    /// Duration of the smooth-end glide, in milliseconds. Defaults to `300`.
    pub smooth_end_duration: f64,
}

impl Default for InertiaOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            resistance: 10.0,
            min_speed: 100.0,
            end_speed: 10.0,
            allow_resume: true,
            smooth_end_duration: 300.0,
        }
    }
}

impl InertiaOptions {
    /// Default settings with inertia turned on.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }
}
