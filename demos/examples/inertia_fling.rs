// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fling a dragged element and let it coast to a stop.
//!
//! A drag is released at 800 px/s. The inertia state takes over, and frames are
//! delivered by hand every 16 ms until the throw ends. A second throw is caught
//! by a pointer down halfway through and resumes the drag.
//!
//! Run:
//! - `cargo run -p understory_examples --example inertia_fling`

use kurbo::{Point, Vec2};
use understory_inertia::{
    EventPhase, InertiaOptions, InertiaState, InteractEvent, Interaction, ManualFrames,
    NoModifiers, Tick,
};
use understory_pointer::{
    ActionKind, Coords, CoordsSet, ElementArena, ElementId, ElementSpec, PointerEvent,
};

struct Drag {
    element: ElementId,
    interacting: bool,
    coords: CoordsSet,
}

impl Interaction for Drag {
    type Element = ElementId;

    fn is_interacting(&self) -> bool {
        self.interacting
    }
    fn action(&self) -> ActionKind {
        ActionKind::Drag
    }
    fn element(&self) -> ElementId {
        self.element
    }
    fn inertia_options(&self) -> Option<InertiaOptions> {
        Some(InertiaOptions::enabled())
    }
    fn coords(&self) -> &CoordsSet {
        &self.coords
    }
    fn coords_mut(&mut self) -> &mut CoordsSet {
        &mut self.coords
    }
    fn fire(&mut self, event: &InteractEvent<ElementId>) {
        println!(
            "  fire {:?} at ({:.1}, {:.1})",
            event.phase, event.page.x, event.page.y
        );
    }
    fn pointer_move(&mut self) {}
    fn end(&mut self, event: &InteractEvent<ElementId>) {
        println!("  end via {:?}", event.phase);
        self.interacting = false;
    }
    fn update_pointer(&mut self, down: &PointerEvent<ElementId>) {
        println!("  caught by pointer {}", down.pointer_id);
    }
}

fn release(drag: &mut Drag, state: &mut InertiaState<ElementId>, frames: &mut ManualFrames) {
    let end = InteractEvent::new(
        ActionKind::Drag,
        EventPhase::End,
        drag.coords.cur,
        drag.element,
    );
    let now = drag.coords.cur.timestamp + 4.0;
    let mode = state.release(drag, &mut NoModifiers, frames, &end, now, false);
    println!("  released into {mode:?}, te = {:.3} s", state.decay().te);
}

fn main() {
    let mut tree = ElementArena::new();
    let body = tree.insert(None, ElementSpec::tag("body"));
    let puck = tree.insert(Some(body), ElementSpec::tag("div").class("puck"));

    let start = Point::new(100.0, 100.0);
    let mut coords = CoordsSet::new(Coords::at(start, 0.0));
    coords.velocity.client = Vec2::new(800.0, 0.0);
    let mut drag = Drag {
        element: puck,
        interacting: true,
        coords,
    };
    let mut frames = ManualFrames::new();
    let mut state = InertiaState::new();

    println!("== Throw ==");
    release(&mut drag, &mut state, &mut frames);
    let mut now = state.t0();
    let mut count = 0;
    while let Some(handle) = frames.take_pending().pop() {
        now += 16.0;
        count += 1;
        if state.on_frame(handle, &mut drag, &mut frames, now) == Tick::Ended {
            break;
        }
    }
    let rest = drag.coords.cur.page;
    println!("  {count} frames, came to rest at ({:.1}, {:.1})", rest.x, rest.y);
    assert!(!drag.interacting);
    assert!(rest.x > start.x);

    println!("== Catch ==");
    drag.interacting = true;
    drag.coords = CoordsSet::new(Coords::at(rest, now));
    drag.coords.velocity.client = Vec2::new(0.0, -600.0);
    release(&mut drag, &mut state, &mut frames);
    for _ in 0..5 {
        let Some(handle) = frames.take_pending().pop() else {
            break;
        };
        now += 16.0;
        state.on_frame(handle, &mut drag, &mut frames, now);
    }
    let at = drag.coords.cur.page;
    let down = PointerEvent::at(7, at, now + 8.0, Some(puck));
    assert!(state.resume(&mut drag, &tree, &mut frames, &down));
    assert!(drag.interacting);
    assert_eq!(frames.pending_len(), 0);
}
