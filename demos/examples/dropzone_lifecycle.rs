// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop events for one drag across nested dropzones.
//!
//! A card is dragged over a bin, then onto a slot nested inside the bin, and
//! released there. The nested slot wins over its ancestor while both are hit.
//!
//! Run:
//! - `cargo run -p understory_examples --example dropzone_lifecycle`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_dropzone::event::{DragEvent, DragPhase, DropEventKinds, Outcome};
use understory_dropzone::overlap::Overlap;
use understory_dropzone::resolve::Draggable;
use understory_dropzone::scope::{DropTarget, DropzoneOptions, Scope};
use understory_dropzone::state::DropState;
use understory_pointer::{ElementArena, ElementId, ElementSpec, PointerEvent};

fn main() {
    let mut tree = ElementArena::new();
    let body = tree.insert(None, ElementSpec::tag("body"));
    let bin = tree.insert(
        Some(body),
        ElementSpec::tag("div")
            .id("bin")
            .rect(Rect::new(0.0, 0.0, 200.0, 200.0)),
    );
    let slot = tree.insert(
        Some(bin),
        ElementSpec::tag("div")
            .class("slot")
            .rect(Rect::new(50.0, 50.0, 100.0, 100.0)),
    );
    let card = tree.insert(
        Some(body),
        ElementSpec::tag("div")
            .class("card")
            .rect(Rect::new(300.0, 300.0, 340.0, 340.0)),
    );
    let name = move |el: ElementId| match el {
        e if e == bin => "bin",
        e if e == slot => "slot",
        _ => "?",
    };

    let log: Rc<RefCell<Vec<String>>> = Rc::default();
    let mut scope = Scope::new(tree);
    for target in [DropTarget::Element(bin), DropTarget::Selector(".slot".into())] {
        let id = scope.add_dropzone(target, None);
        let log = Rc::clone(&log);
        scope.configure(
            id,
            DropzoneOptions::new()
                .overlap(Overlap::Pointer)
                .listener(DropEventKinds::all(), move |ev| {
                    let el = ev.target.map_or("-", name);
                    log.borrow_mut().push(format!("{} {}", ev.kind.name(), el));
                    Outcome::Continue
                }),
        );
    }

    let draggable = Draggable::new(card);
    let mut state = DropState::new();
    let mut start = DragEvent::new(DragPhase::Start, Point::new(320.0, 320.0), 0.0, card);
    state.start(&mut scope, &draggable, &mut start);
    println!("== Start ==\n  {} candidates", state.active_drops().len());

    let path = [
        (DragPhase::Move, Point::new(250.0, 250.0)),
        (DragPhase::Move, Point::new(20.0, 20.0)),
        (DragPhase::Move, Point::new(30.0, 30.0)),
        (DragPhase::Move, Point::new(70.0, 70.0)),
        (DragPhase::End, Point::new(70.0, 70.0)),
    ];
    for (i, (phase, at)) in path.into_iter().enumerate() {
        let t = 16.0 * (i + 1) as f64;
        let mut drag = DragEvent::new(phase, at, t, card);
        state.update(&scope, &draggable, &mut drag, &PointerEvent::at(0, at, t, None));
        println!(
            "== {:?} at ({}, {}) ==\n  over {}",
            phase,
            at.x,
            at.y,
            drag.related_target.map_or("nothing", name)
        );
        state.fire(&mut scope);
    }
    state.stop();

    println!("== Events ==");
    for line in log.borrow().iter() {
        println!("  {line}");
    }
    let log = log.borrow();
    assert!(log.contains(&"dropactivate bin".to_string()));
    assert!(log.contains(&"dragenter slot".to_string()));
    assert!(log.contains(&"drop slot".to_string()));
    assert!(!log.contains(&"drop bin".to_string()));
}
