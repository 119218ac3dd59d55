// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-drag drop state and event sequencing.
//!
//! ## Lifecycle
//!
//! The host drag action drives a [`DropState`] with four calls:
//!
//! 1. [`DropState::start`] right after the drag starts: collects candidates and
//!    broadcasts `dropactivate` to each of them.
//! 2. [`DropState::update`] for every drag move and for the drag end: resolves the
//!    current target and computes this frame's events.
//! 3. [`DropState::fire`] after the host has handled that move or end: delivers
//!    the events in the order `dragleave`, `dropmove`, `dragenter`, `drop`, then
//!    broadcasts `dropdeactivate`, and rotates the current target into `prev`.
//! 4. [`DropState::stop`] when the interaction stops.
//!
//! ## Rejection
//!
//! A listener returning [`Outcome::Reject`] vetoes its dropzone for the current
//! target. While the resolved target stays the same, no enter, leave, move, or
//! drop events are produced. The veto clears as soon as the target changes.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_dropzone::event::{DragEvent, DragPhase};
//! use understory_dropzone::resolve::Draggable;
//! use understory_dropzone::scope::{DropTarget, DropzoneOptions, Scope};
//! use understory_dropzone::state::DropState;
//! use understory_pointer::{ElementArena, ElementSpec, PointerEvent};
//!
//! let mut tree = ElementArena::new();
//! let body = tree.insert(None, ElementSpec::tag("body"));
//! let bin = tree.insert(Some(body), ElementSpec::tag("div").rect(Rect::new(0.0, 0.0, 50.0, 50.0)));
//! let card = tree.insert(Some(body), ElementSpec::tag("div"));
//!
//! let mut scope = Scope::new(tree);
//! let zone = scope.add_dropzone(DropTarget::Element(bin), None);
//! scope.configure(zone, DropzoneOptions::new());
//!
//! let draggable = Draggable::new(card);
//! let mut state = DropState::new();
//! let mut start = DragEvent::new(DragPhase::Start, Point::new(100.0, 100.0), 0.0, card);
//! state.start(&mut scope, &draggable, &mut start);
//! assert_eq!(state.active_drops().len(), 1);
//!
//! let at = Point::new(10.0, 10.0);
//! let mut end = DragEvent::new(DragPhase::End, at, 16.0, card);
//! state.update(&scope, &draggable, &mut end, &PointerEvent::at(0, at, 16.0, None));
//! assert_eq!(end.dropzone, Some(zone));
//! assert_eq!(end.related_target, Some(bin));
//! state.fire(&mut scope);
//! ```

use alloc::vec::Vec;

use understory_pointer::{ElementTree, PointerEvent};

use crate::event::{DragEvent, DragPhase, DropEvent, DropEventKind, DropEvents, Outcome};
use crate::logging::{debug, trace};
use crate::registry::{ActiveDrop, active_drops};
use crate::resolve::{Draggable, get_drop};
use crate::scope::{DropzoneId, Scope};

/// A (dropzone, element) pair, either of which may be unset.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DropSlot<E> {
    /// The dropzone, if any.
    pub dropzone: Option<DropzoneId>,
    /// The dropzone element, if any.
    pub element: Option<E>,
}

impl<E> Default for DropSlot<E> {
    fn default() -> Self {
        Self {
            dropzone: None,
            element: None,
        }
    }
}

impl<E> DropSlot<E> {
    fn of(drop: ActiveDrop<E>) -> Self {
        Self {
            dropzone: Some(drop.dropzone),
            element: Some(drop.element),
        }
    }
}

/// Drop status of one drag interaction.
#[derive(Clone, Debug)]
pub struct DropState<E> {
    cur: DropSlot<E>,
    prev: DropSlot<E>,
    rejected: bool,
    active_drops: Vec<ActiveDrop<E>>,
    activated: Vec<ActiveDrop<E>>,
    events: Option<DropEvents<E>>,
}

impl<E> Default for DropState<E> {
    fn default() -> Self {
        Self {
            cur: DropSlot::default(),
            prev: DropSlot::default(),
            rejected: false,
            active_drops: Vec::new(),
            activated: Vec::new(),
            events: None,
        }
    }
}

impl<E> DropState<E> {
    /// An idle drop state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Target resolved by the last update.
    pub fn cur(&self) -> &DropSlot<E> {
        &self.cur
    }

    /// Target as of the last fired frame.
    pub fn prev(&self) -> &DropSlot<E> {
        &self.prev
    }

    /// Whether the current target has been vetoed by a listener.
    pub fn rejected(&self) -> bool {
        self.rejected
    }

    /// Candidates considered when resolving targets.
    pub fn active_drops(&self) -> &[ActiveDrop<E>] {
        &self.active_drops
    }

    /// Candidates that received `dropactivate` and will receive `dropdeactivate`.
    pub fn activated(&self) -> &[ActiveDrop<E>] {
        &self.activated
    }

    /// Events computed by the last update and not yet fired.
    pub fn pending_events(&self) -> Option<&DropEvents<E>> {
        self.events.as_ref()
    }

    /// Forget candidates, pending events, and targets.
    pub fn stop(&mut self) {
        self.active_drops.clear();
        self.activated.clear();
        self.events = None;
        self.cur = DropSlot::default();
        self.prev = DropSlot::default();
        self.rejected = false;
    }

    fn take_event(
        &mut self,
        pick: impl FnOnce(&mut DropEvents<E>) -> &mut Option<DropEvent<E>>,
    ) -> Option<DropEvent<E>> {
        self.events.as_mut().and_then(|events| pick(events).take())
    }
}

impl<E: Copy + PartialEq> DropState<E> {
    /// Begin a drag: collect candidates and broadcast `dropactivate`.
    pub fn start<T: ElementTree<E>>(
        &mut self,
        scope: &mut Scope<E, T>,
        draggable: &Draggable<E>,
        drag_event: &mut DragEvent<E>,
    ) {
        self.active_drops = active_drops(scope, draggable.element);
        self.activated = self.active_drops.clone();
        debug!(candidates = self.active_drops.len(), "drop candidates collected");

        self.events = Some(self.drop_events(drag_event));
        if let Some(activate) = self.take_event(|e| &mut e.activate) {
            self.broadcast(scope, activate);
        }
    }

    /// Resolve the target for a drag move or end and compute the frame's events.
    ///
    /// Start events are ignored; use [`DropState::start`].
    pub fn update<T: ElementTree<E>>(
        &mut self,
        scope: &Scope<E, T>,
        draggable: &Draggable<E>,
        drag_event: &mut DragEvent<E>,
        pointer: &PointerEvent<E>,
    ) {
        if drag_event.phase == DragPhase::Start {
            return;
        }
        if scope.dynamic_drop() {
            self.active_drops = active_drops(scope, draggable.element);
        }

        let result = get_drop(scope, &self.active_drops, drag_event, pointer, draggable)
            .map_or_else(DropSlot::default, DropSlot::of);
        self.rejected = self.rejected && result.dropzone.is_some() && result == self.cur;
        if result != self.cur {
            trace!(dropzone = ?result.dropzone, "drop target changed");
        }
        self.cur = result;
        self.events = Some(self.drop_events(drag_event));
    }

    /// Compute the events for `drag_event` from the current and previous targets.
    ///
    /// Writes `drag_enter`, `drag_leave`, `dropzone`, `prev_dropzone`, and
    /// `related_target` onto `drag_event` as appropriate.
    ///
    /// A `dropmove` is only produced while the target is unchanged. The move that
    /// enters a dropzone carries `dragenter` alone, not `dragenter` plus
    /// `dropmove`; the first `dropmove` arrives with the next move inside it.
    /// This keeps the delivered order `dragenter, dropmove...` even though a
    /// frame fires `dropmove` before `dragenter`.
    pub fn drop_events(&self, drag_event: &mut DragEvent<E>) -> DropEvents<E> {
        let mut events = DropEvents::default();
        let phase = drag_event.phase;
        let event = |kind, slot: &DropSlot<E>, drag: &DragEvent<E>| {
            DropEvent::from_drag(kind, drag).aimed_at(slot.dropzone, slot.element)
        };

        match phase {
            DragPhase::Start => {
                events.activate = Some(DropEvent::from_drag(DropEventKind::Activate, drag_event));
            }
            DragPhase::End => {
                events.deactivate =
                    Some(DropEvent::from_drag(DropEventKind::Deactivate, drag_event));
            }
            DragPhase::Move => {}
        }
        if self.rejected {
            return events;
        }

        let changed = self.cur.element != self.prev.element;
        if changed {
            if self.prev.dropzone.is_some() {
                events.leave = Some(event(DropEventKind::Leave, &self.prev, &*drag_event));
                drag_event.drag_leave = self.prev.element;
                drag_event.prev_dropzone = self.prev.dropzone;
            }
            if self.cur.dropzone.is_some() {
                events.enter = Some(event(DropEventKind::Enter, &self.cur, &*drag_event));
                drag_event.drag_enter = self.cur.element;
                drag_event.dropzone = self.cur.dropzone;
            }
        }

        if self.cur.dropzone.is_some() {
            match phase {
                DragPhase::End => {
                    events.drop = Some(event(DropEventKind::Drop, &self.cur, &*drag_event));
                    drag_event.dropzone = self.cur.dropzone;
                    drag_event.related_target = self.cur.element;
                }
                DragPhase::Move if !changed => {
                    events.drop_move = Some(event(DropEventKind::Move, &self.cur, &*drag_event));
                    drag_event.dropzone = self.cur.dropzone;
                }
                _ => {}
            }
        }
        events
    }

    /// Deliver the pending events and rotate the current target into `prev`.
    pub fn fire<T>(&mut self, scope: &mut Scope<E, T>) {
        if let Some(leave) = self.take_event(|e| &mut e.leave) {
            self.deliver(scope, &leave);
        }
        if let Some(drop_move) = self.take_event(|e| &mut e.drop_move) {
            self.deliver(scope, &drop_move);
        }
        if let Some(enter) = self.take_event(|e| &mut e.enter) {
            self.deliver(scope, &enter);
        }
        if let Some(drop) = self.take_event(|e| &mut e.drop) {
            self.deliver(scope, &drop);
        }
        if let Some(deactivate) = self.take_event(|e| &mut e.deactivate) {
            self.broadcast(scope, deactivate);
        }
        self.prev = self.cur;
        self.events = None;
    }

    fn deliver<T>(&mut self, scope: &mut Scope<E, T>, event: &DropEvent<E>) {
        let Some(dropzone) = event.dropzone else {
            return;
        };
        trace!(kind = event.kind.name(), ?dropzone, "drop event");
        if scope.fire(dropzone, event) == Outcome::Reject {
            self.reject(scope, event);
        }
    }

    /// Send `template` to every activated candidate, each with its own target.
    fn broadcast<T>(&mut self, scope: &mut Scope<E, T>, template: DropEvent<E>) {
        // Rejections shrink `activated` while it is being walked.
        let recipients = self.activated.clone();
        for drop in recipients {
            let event = template
                .clone()
                .aimed_at(Some(drop.dropzone), Some(drop.element));
            self.deliver(scope, &event);
        }
    }

    fn reject<T>(&mut self, scope: &mut Scope<E, T>, event: &DropEvent<E>) {
        let (Some(dropzone), Some(element)) = (event.dropzone, event.target) else {
            return;
        };
        let slot = DropSlot {
            dropzone: Some(dropzone),
            element: Some(element),
        };
        if event.kind != DropEventKind::Activate && slot != self.cur {
            return;
        }
        debug!(kind = event.kind.name(), ?dropzone, "drop target rejected");

        self.prev = slot;
        self.rejected = true;
        if let Some(events) = self.events.as_mut() {
            events.enter = None;
        }

        let follow_up = if event.kind == DropEventKind::Activate {
            let is_rejected = |d: &ActiveDrop<E>| d.dropzone == dropzone && d.element == element;
            if let Some(i) = self.active_drops.iter().position(is_rejected) {
                self.active_drops.remove(i);
            }
            if let Some(i) = self.activated.iter().position(is_rejected) {
                self.activated.remove(i);
            }
            DropEventKind::Deactivate
        } else {
            DropEventKind::Leave
        };
        let mut notice = event.clone();
        notice.kind = follow_up;
        // The vetoed dropzone is told once; its answer is not acted upon.
        scope.fire(dropzone, &notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::DropEventKinds;
    use crate::scope::{DropTarget, DropzoneOptions};
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;
    use kurbo::{Point, Rect};
    use understory_pointer::{ElementArena, ElementId, ElementSpec};

    type Log = Rc<RefCell<Vec<(DropEventKind, DropzoneId)>>>;

    struct Harness {
        scope: Scope<ElementId, ElementArena>,
        state: DropState<ElementId>,
        draggable: Draggable<ElementId>,
        zones: [DropzoneId; 2],
        elements: [ElementId; 2],
        log: Log,
        t: f64,
    }

    fn harness() -> Harness {
        let mut tree = ElementArena::new();
        let body = tree.insert(None, ElementSpec::tag("body"));
        let a = tree.insert(
            Some(body),
            ElementSpec::tag("div").rect(Rect::new(0.0, 0.0, 100.0, 100.0)),
        );
        let b = tree.insert(
            Some(body),
            ElementSpec::tag("div").rect(Rect::new(200.0, 0.0, 300.0, 100.0)),
        );
        let card = tree.insert(Some(body), ElementSpec::tag("div"));
        let mut scope = Scope::new(tree);
        let log: Log = Rc::default();
        let zones = [a, b].map(|el| {
            let id = scope.add_dropzone(DropTarget::Element(el), None);
            let log = log.clone();
            scope.configure(
                id,
                DropzoneOptions::new().listener(DropEventKinds::all(), move |e| {
                    log.borrow_mut().push((e.kind, e.dropzone.unwrap()));
                    Outcome::Continue
                }),
            );
            id
        });
        Harness {
            scope,
            state: DropState::new(),
            draggable: Draggable::new(card),
            zones,
            elements: [a, b],
            log,
            t: 0.0,
        }
    }

    impl Harness {
        fn start(&mut self, x: f64) -> DragEvent<ElementId> {
            let mut ev = DragEvent::new(
                DragPhase::Start,
                Point::new(x, 50.0),
                self.t,
                self.draggable.element,
            );
            self.state.start(&mut self.scope, &self.draggable, &mut ev);
            ev
        }

        fn step(&mut self, phase: DragPhase, x: f64) -> DragEvent<ElementId> {
            self.t += 16.0;
            let page = Point::new(x, 50.0);
            let mut ev = DragEvent::new(phase, page, self.t, self.draggable.element);
            let pointer = PointerEvent::at(0, page, self.t, None);
            self.state.update(&self.scope, &self.draggable, &mut ev, &pointer);
            self.state.fire(&mut self.scope);
            ev
        }

        fn take_log(&self) -> Vec<(DropEventKind, DropzoneId)> {
            core::mem::take(&mut *self.log.borrow_mut())
        }
    }

    #[test]
    fn lifecycle_sequence_across_two_dropzones() {
        use DropEventKind::*;
        let mut h = harness();
        let [a, b] = h.zones;
        h.start(500.0);
        h.step(DragPhase::Move, 50.0);
        h.step(DragPhase::Move, 60.0);
        h.step(DragPhase::Move, 70.0);
        h.step(DragPhase::Move, 250.0);
        h.step(DragPhase::Move, 260.0);
        h.step(DragPhase::End, 260.0);
        assert_eq!(
            h.take_log(),
            vec![
                (Activate, a),
                (Activate, b),
                (Enter, a),
                (Move, a),
                (Move, a),
                (Leave, a),
                (Enter, b),
                (Move, b),
                (Drop, b),
                (Deactivate, a),
                (Deactivate, b),
            ]
        );
    }

    #[test]
    fn drag_event_carries_drop_fields() {
        let mut h = harness();
        let [a, b] = h.zones;
        let [ea, eb] = h.elements;
        h.start(500.0);
        let enter = h.step(DragPhase::Move, 50.0);
        assert_eq!(enter.drag_enter, Some(ea));
        assert_eq!(enter.dropzone, Some(a));
        assert_eq!(enter.drag_leave, None);

        let switch = h.step(DragPhase::Move, 250.0);
        assert_eq!(switch.drag_leave, Some(ea));
        assert_eq!(switch.prev_dropzone, Some(a));
        assert_eq!(switch.drag_enter, Some(eb));
        assert_eq!(switch.dropzone, Some(b));

        let end = h.step(DragPhase::End, 250.0);
        assert_eq!(end.dropzone, Some(b));
        assert_eq!(end.related_target, Some(eb));
        assert_eq!(h.state.prev().element, Some(eb));
        assert!(h.state.pending_events().is_none());
    }

    #[test]
    fn ending_outside_only_deactivates() {
        use DropEventKind::*;
        let mut h = harness();
        let [a, b] = h.zones;
        h.start(500.0);
        h.step(DragPhase::Move, 50.0);
        h.step(DragPhase::End, 500.0);
        assert_eq!(
            h.take_log(),
            vec![
                (Activate, a),
                (Activate, b),
                (Enter, a),
                (Leave, a),
                (Deactivate, a),
                (Deactivate, b),
            ]
        );
    }

    #[test]
    fn rejection_suppresses_events_until_target_changes() {
        use DropEventKind::*;
        let mut h = harness();
        let [a, b] = h.zones;
        h.scope.on(a, "enter", |_| Outcome::Reject).unwrap();
        h.start(500.0);
        h.take_log();

        // Entering A is vetoed: A is told to leave immediately.
        h.step(DragPhase::Move, 50.0);
        assert_eq!(h.take_log(), vec![(Enter, a), (Leave, a)]);
        assert!(h.state.rejected());

        // Moving within A stays silent.
        h.step(DragPhase::Move, 60.0);
        h.step(DragPhase::Move, 70.0);
        assert!(h.take_log().is_empty());
        assert!(h.state.rejected());

        // Changing target clears the veto.
        h.step(DragPhase::Move, 250.0);
        assert!(!h.state.rejected());
        assert_eq!(h.take_log(), vec![(Leave, a), (Enter, b)]);
    }

    #[test]
    fn rejection_on_move_discards_nothing_else() {
        use DropEventKind::*;
        let mut h = harness();
        let [a, _] = h.zones;
        h.scope.on(a, "move", |_| Outcome::Reject).unwrap();
        h.start(500.0);
        h.take_log();
        h.step(DragPhase::Move, 50.0);
        h.step(DragPhase::Move, 60.0);
        assert_eq!(h.take_log(), vec![(Enter, a), (Move, a), (Leave, a)]);
        // Dropping while rejected only deactivates.
        h.step(DragPhase::End, 60.0);
        assert_eq!(
            h.take_log().into_iter().map(|(k, _)| k).collect::<Vec<_>>(),
            vec![Deactivate, Deactivate]
        );
    }

    #[test]
    fn rejecting_activation_removes_the_candidate() {
        use DropEventKind::*;
        let mut h = harness();
        let [a, b] = h.zones;
        h.scope.on(a, "activate", |_| Outcome::Reject).unwrap();
        h.start(500.0);
        assert_eq!(h.take_log(), vec![(Activate, a), (Deactivate, a), (Activate, b)]);
        assert_eq!(h.state.active_drops().len(), 1);
        assert_eq!(h.state.activated().len(), 1);
        assert_eq!(h.state.prev().dropzone, Some(a));

        // A is no longer a candidate.
        h.step(DragPhase::Move, 50.0);
        assert!(h.state.cur().dropzone.is_none());
        h.step(DragPhase::End, 50.0);
        assert_eq!(h.take_log().last(), Some(&(Deactivate, b)));
    }

    #[test]
    fn stop_resets_everything() {
        let mut h = harness();
        h.start(500.0);
        h.step(DragPhase::Move, 50.0);
        h.state.stop();
        assert_eq!(h.state.cur(), &DropSlot::default());
        assert_eq!(h.state.prev(), &DropSlot::default());
        assert!(!h.state.rejected());
        assert!(h.state.active_drops().is_empty());
        assert!(h.state.activated().is_empty());
    }

    #[test]
    fn dynamic_drop_follows_reflow() {
        let mut h = harness();
        let [a, _] = h.zones;
        let [ea, _] = h.elements;
        h.start(500.0);
        // Move A under the pointer after the drag started.
        h.scope
            .tree_mut()
            .set_rect(ea, Some(Rect::new(400.0, 0.0, 600.0, 100.0)));
        h.step(DragPhase::Move, 500.0);
        assert_eq!(h.state.cur().dropzone, None);

        h.scope.set_dynamic_drop(true);
        h.step(DragPhase::Move, 500.0);
        assert_eq!(h.state.cur().dropzone, Some(a));
    }

    #[test]
    fn activation_snapshot_gets_deactivate_in_dynamic_mode() {
        use DropEventKind::*;
        let mut h = harness();
        let [a, b] = h.zones;
        h.scope.set_dynamic_drop(true);
        h.start(450.0);
        assert_eq!(h.take_log(), vec![(Activate, a), (Activate, b)]);

        // A dropzone that appears mid-drag takes part in resolution only.
        let spec = ElementSpec::tag("div").rect(Rect::new(400.0, 0.0, 500.0, 100.0));
        let late = h.scope.tree_mut().insert(None, spec);
        let c = h.scope.add_dropzone(DropTarget::Element(late), None);
        let log = h.log.clone();
        h.scope.configure(
            c,
            DropzoneOptions::new().listener(DropEventKinds::all(), move |e| {
                log.borrow_mut().push((e.kind, e.dropzone.unwrap()));
                Outcome::Continue
            }),
        );

        h.step(DragPhase::Move, 450.0);
        h.step(DragPhase::End, 450.0);
        assert_eq!(
            h.take_log(),
            vec![(Enter, c), (Drop, c), (Deactivate, a), (Deactivate, b)]
        );
        assert_eq!(h.state.activated.len(), 2);
    }

    #[test]
    fn update_ignores_start_events() {
        let mut h = harness();
        h.start(50.0);
        let mut ev = DragEvent::new(
            DragPhase::Start,
            Point::new(50.0, 50.0),
            0.0,
            h.draggable.element,
        );
        let pointer = PointerEvent::at(0, Point::new(50.0, 50.0), 0.0, None);
        h.state.update(&h.scope, &h.draggable, &mut ev, &pointer);
        assert_eq!(h.state.cur().dropzone, None);
    }
}
