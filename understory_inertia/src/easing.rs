// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing helpers for the simulation curves.

use kurbo::Vec2;

/// Quadratic ease-out: starts at `b`, changes by `c` over duration `d`, at time `t`.
///
/// ```
/// use understory_inertia::easing::ease_out_quad;
///
/// assert_eq!(ease_out_quad(0.0, 5.0, 10.0, 300.0), 5.0);
/// assert_eq!(ease_out_quad(300.0, 5.0, 10.0, 300.0), 15.0);
/// // Three quarters of the way there at half time.
/// assert_eq!(ease_out_quad(150.0, 0.0, 100.0, 300.0), 75.0);
/// ```
pub fn ease_out_quad(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    -c * t * (t - 2.0) + b
}

/// Point at parameter `t` on the quadratic Bézier `start → control → end`.
pub fn quadratic_curve_point(start: Vec2, control: Vec2, end: Vec2, t: f64) -> Vec2 {
    let it = 1.0 - t;
    start * (it * it) + control * (2.0 * it * t) + end * (t * t)
}
