// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the overlap predicates.
//!
//! 1. The covered fraction is always within `[0, 1]`.
//! 2. A draggable fully inside the dropzone is fully covered.
//! 3. Ratio hits are monotone in the threshold.
//! 4. A pointer hit implies the point is inside the rect, bounds included.
//! 5. Ratio thresholds are clamped into `[0, 1]`.

use kurbo::{Point, Rect, Vec2};
use proptest::prelude::*;
use understory_dropzone::overlap::{self, Overlap};

fn rect() -> impl Strategy<Value = Rect> {
    (-500_i32..500, -500_i32..500, 1_i32..300, 1_i32..300).prop_map(|(x, y, w, h)| {
        let (x, y) = (f64::from(x), f64::from(y));
        Rect::new(x, y, x + f64::from(w), y + f64::from(h))
    })
}

fn point() -> impl Strategy<Value = Point> {
    (-600_i32..600, -600_i32..600).prop_map(|(x, y)| Point::new(f64::from(x), f64::from(y)))
}

proptest! {
    #[test]
    fn ratio_is_a_fraction(drag in rect(), zone in rect()) {
        let r = overlap::ratio(drag, zone);
        prop_assert!((0.0..=1.0).contains(&r), "ratio {r} out of range");
    }

    #[test]
    fn contained_draggable_is_fully_covered(zone in rect(), fx in 0.0..1.0_f64, fy in 0.0..1.0_f64) {
        let w = zone.width() * 0.5;
        let h = zone.height() * 0.5;
        let x0 = zone.x0 + fx * (zone.width() - w);
        let y0 = zone.y0 + fy * (zone.height() - h);
        let drag = Rect::new(x0, y0, x0 + w, y0 + h);
        prop_assume!(drag.x1 <= zone.x1 && drag.y1 <= zone.y1);
        prop_assert_eq!(overlap::ratio(drag, zone), 1.0);
        prop_assert!(overlap::center(drag, zone));
    }

    #[test]
    fn ratio_hits_are_monotone(drag in rect(), zone in rect(), a in 0.0..=1.0_f64, b in 0.0..=1.0_f64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let hit = |t| Overlap::Ratio(t).check(Point::ZERO, Vec2::ZERO, Some(drag), zone);
        if hit(hi) {
            prop_assert!(hit(lo), "hit at {hi} but not at {lo}");
        }
    }

    #[test]
    fn pointer_hit_is_inside(page in point(), zone in rect()) {
        if overlap::pointer(page, zone) {
            prop_assert!(page.x >= zone.x0 && page.x <= zone.x1);
            prop_assert!(page.y >= zone.y0 && page.y <= zone.y1);
        }
        // Corners are never strictly inside.
        prop_assert!(!overlap::pointer(Point::new(zone.x0, zone.y0), zone));
        prop_assert!(!overlap::pointer(Point::new(zone.x1, zone.y1), zone));
    }

    #[test]
    fn thresholds_are_clamped(t in -10.0..10.0_f64) {
        match Overlap::ratio(t) {
            Some(Overlap::Ratio(r)) => prop_assert!((0.0..=1.0).contains(&r)),
            other => prop_assert!(false, "unexpected {other:?}"),
        }
    }
}
