// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag and drop event types.
//!
//! A [`DragEvent`] is produced by the host drag action for every start, move, and
//! end. The [drop state](crate::state::DropState) reads it, writes the
//! drop-related fields back onto it for listener convenience, and derives the
//! [`DropEvent`]s delivered to dropzone listeners.

use kurbo::Point;

use crate::scope::DropzoneId;

/// Phase of the drag action that produced a [`DragEvent`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DragPhase {
    /// `dragstart`
    Start,
    /// `dragmove`
    Move,
    /// `dragend`
    End,
}

/// A drag action event as seen by the drop machinery.
#[derive(Clone, Debug, PartialEq)]
pub struct DragEvent<E> {
    /// Which drag phase this is.
    pub phase: DragPhase,
    /// Page-space pointer position, relative to the draggable's origin.
    pub page: Point,
    /// Event time in milliseconds.
    pub timestamp: f64,
    /// The dragged element.
    pub target: E,
    /// Element entered this frame, if any.
    pub drag_enter: Option<E>,
    /// Element left this frame, if any.
    pub drag_leave: Option<E>,
    /// Current dropzone, when entering, moving over, or dropping onto one.
    pub dropzone: Option<DropzoneId>,
    /// Dropzone left this frame, if any.
    pub prev_dropzone: Option<DropzoneId>,
    /// Dropzone element receiving a drop.
    pub related_target: Option<E>,
}

impl<E> DragEvent<E> {
    /// Create a drag event with no drop information attached yet.
    pub fn new(phase: DragPhase, page: Point, timestamp: f64, target: E) -> Self {
        Self {
            phase,
            page,
            timestamp,
            target,
            drag_enter: None,
            drag_leave: None,
            dropzone: None,
            prev_dropzone: None,
            related_target: None,
        }
    }
}

/// Kind of a [`DropEvent`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DropEventKind {
    /// `dropactivate`: an acceptable drag started.
    Activate,
    /// `dropdeactivate`: that drag ended.
    Deactivate,
    /// `dragenter`: the draggable entered the dropzone.
    Enter,
    /// `dragleave`: the draggable left the dropzone.
    Leave,
    /// `dropmove`: the draggable moved within the dropzone.
    Move,
    /// `drop`: the draggable was dropped onto the dropzone.
    Drop,
}

impl DropEventKind {
    /// Event type name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Activate => "dropactivate",
            Self::Deactivate => "dropdeactivate",
            Self::Enter => "dragenter",
            Self::Leave => "dragleave",
            Self::Move => "dropmove",
            Self::Drop => "drop",
        }
    }

    /// The single-kind mask for this event.
    pub const fn flag(self) -> DropEventKinds {
        match self {
            Self::Activate => DropEventKinds::ACTIVATE,
            Self::Deactivate => DropEventKinds::DEACTIVATE,
            Self::Enter => DropEventKinds::ENTER,
            Self::Leave => DropEventKinds::LEAVE,
            Self::Move => DropEventKinds::MOVE,
            Self::Drop => DropEventKinds::DROP,
        }
    }
}

bitflags::bitflags! {
    /// A set of drop event kinds a listener subscribes to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DropEventKinds: u8 {
        /// `dropactivate`
        const ACTIVATE   = 0b0000_0001;
        /// `dropdeactivate`
        const DEACTIVATE = 0b0000_0010;
        /// `dragenter`
        const ENTER      = 0b0000_0100;
        /// `dragleave`
        const LEAVE      = 0b0000_1000;
        /// `dropmove`
        const MOVE       = 0b0001_0000;
        /// `drop`
        const DROP       = 0b0010_0000;
    }
}

/// Error returned when a listener type name is not a drop event.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown drop event type `{name}`")]
pub struct ParseListenerError {
    name: alloc::string::String,
}

impl ParseListenerError {
    /// The offending type name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl DropEventKinds {
    /// Parse a space-separated list of listener type names.
    ///
    /// Both the short dropzone forms (`activate`, `deactivate`, `enter`, `leave`,
    /// `move`, `drop`) and the full event names (`dropactivate`, `dragenter`, ...)
    /// are accepted.
    ///
    /// ```
    /// use understory_dropzone::event::DropEventKinds;
    ///
    /// let kinds = DropEventKinds::parse("enter dragleave drop").unwrap();
    /// assert_eq!(kinds, DropEventKinds::ENTER | DropEventKinds::LEAVE | DropEventKinds::DROP);
    /// assert!(DropEventKinds::parse("dragstart").is_err());
    /// ```
    pub fn parse(names: &str) -> Result<Self, ParseListenerError> {
        let mut kinds = Self::empty();
        for name in names.split_whitespace() {
            let kind = Self::from_listener_name(name).ok_or_else(|| ParseListenerError {
                name: name.into(),
            })?;
            kinds |= kind;
        }
        Ok(kinds)
    }

    fn from_listener_name(name: &str) -> Option<Self> {
        // Short names get their action prefix: enter/leave are `drag*`, the rest `drop*`.
        let kind = match name {
            "activate" | "dropactivate" => Self::ACTIVATE,
            "deactivate" | "dropdeactivate" => Self::DEACTIVATE,
            "enter" | "dragenter" => Self::ENTER,
            "leave" | "dragleave" => Self::LEAVE,
            "move" | "dropmove" => Self::MOVE,
            "drop" => Self::DROP,
            _ => return None,
        };
        Some(kind)
    }
}

/// An event delivered to a dropzone.
#[derive(Clone, Debug, PartialEq)]
pub struct DropEvent<E> {
    /// Event kind.
    pub kind: DropEventKind,
    /// Dropzone element receiving the event.
    ///
    /// `None` only on the template of an activate/deactivate broadcast; every
    /// delivered event has a target.
    pub target: Option<E>,
    /// Dropzone receiving the event. `None` under the same rule as `target`.
    pub dropzone: Option<DropzoneId>,
    /// The dragged element.
    pub related_target: E,
    /// Phase of the drag event this was derived from.
    pub drag_phase: DragPhase,
    /// Page-space pointer position of that drag event.
    pub page: Point,
    /// Event time in milliseconds.
    pub timestamp: f64,
}

impl<E: Copy> DropEvent<E> {
    pub(crate) fn from_drag(kind: DropEventKind, drag: &DragEvent<E>) -> Self {
        Self {
            kind,
            target: None,
            dropzone: None,
            related_target: drag.target,
            drag_phase: drag.phase,
            page: drag.page,
            timestamp: drag.timestamp,
        }
    }

    pub(crate) fn aimed_at(mut self, dropzone: Option<DropzoneId>, target: Option<E>) -> Self {
        self.dropzone = dropzone;
        self.target = target;
        self
    }
}

/// The drop events produced for one drag frame. Each is optional.
#[derive(Clone, Debug, PartialEq)]
pub struct DropEvents<E> {
    /// Broadcast on drag start.
    pub activate: Option<DropEvent<E>>,
    /// Broadcast on drag end.
    pub deactivate: Option<DropEvent<E>>,
    /// Sent to the dropzone being entered.
    pub enter: Option<DropEvent<E>>,
    /// Sent to the dropzone being left.
    pub leave: Option<DropEvent<E>>,
    /// Sent to the current dropzone on move.
    pub drop_move: Option<DropEvent<E>>,
    /// Sent to the current dropzone on end.
    pub drop: Option<DropEvent<E>>,
}

impl<E> Default for DropEvents<E> {
    fn default() -> Self {
        Self {
            activate: None,
            deactivate: None,
            enter: None,
            leave: None,
            drop_move: None,
            drop: None,
        }
    }
}

impl<E> DropEvents<E> {
    /// Kinds present in this set.
    pub fn kinds(&self) -> DropEventKinds {
        let mut kinds = DropEventKinds::empty();
        kinds.set(DropEventKinds::ACTIVATE, self.activate.is_some());
        kinds.set(DropEventKinds::DEACTIVATE, self.deactivate.is_some());
        kinds.set(DropEventKinds::ENTER, self.enter.is_some());
        kinds.set(DropEventKinds::LEAVE, self.leave.is_some());
        kinds.set(DropEventKinds::MOVE, self.drop_move.is_some());
        kinds.set(DropEventKinds::DROP, self.drop.is_some());
        kinds
    }
}

/// Listener outcome controlling delivery.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Continue with the dropzone's remaining listeners.
    Continue,
    /// Skip the dropzone's remaining listeners for this event.
    Stop,
    /// Veto this dropzone for the current drag target and stop delivery.
    ///
    /// On `dropactivate` the dropzone is removed from the drag's candidates and
    /// receives a `dropdeactivate`. On other events the rejection only applies
    /// when the event is for the current target; the dropzone then receives a
    /// `dragleave` and no further enter/leave/move/drop events until the target
    /// changes.
    Reject,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_full_names_parse() {
        assert_eq!(
            DropEventKinds::parse("activate deactivate").unwrap(),
            DropEventKinds::ACTIVATE | DropEventKinds::DEACTIVATE
        );
        assert_eq!(
            DropEventKinds::parse("dropmove  move").unwrap(),
            DropEventKinds::MOVE
        );
        assert_eq!(DropEventKinds::parse("").unwrap(), DropEventKinds::empty());
    }

    #[test]
    fn unknown_names_report_the_offender() {
        let err = DropEventKinds::parse("enter dragstart").unwrap_err();
        assert_eq!(err.name(), "dragstart");
    }

    #[test]
    fn flag_constant_names_are_not_listener_names() {
        // `ACTIVATE` is the bitflags constant; listeners use `activate` / `dropactivate`.
        assert!(DropEventKinds::parse("ACTIVATE").is_err());
        assert_eq!(
            DropEventKinds::parse("dropactivate").unwrap(),
            DropEventKinds::ACTIVATE
        );
        assert_eq!(
            DropEventKinds::from_name("ACTIVATE"),
            Some(DropEventKinds::ACTIVATE)
        );
    }

    #[test]
    fn kind_names_and_flags_agree() {
        for kind in [
            DropEventKind::Activate,
            DropEventKind::Deactivate,
            DropEventKind::Enter,
            DropEventKind::Leave,
            DropEventKind::Move,
            DropEventKind::Drop,
        ] {
            assert_eq!(DropEventKinds::parse(kind.name()).unwrap(), kind.flag());
        }
    }

    #[test]
    fn event_set_reports_its_kinds() {
        let drag = DragEvent::new(DragPhase::End, Point::ZERO, 0.0, 1_u32);
        let events = DropEvents {
            deactivate: Some(DropEvent::from_drag(DropEventKind::Deactivate, &drag)),
            drop: Some(DropEvent::from_drag(DropEventKind::Drop, &drag)),
            ..Default::default()
        };
        assert_eq!(
            events.kinds(),
            DropEventKinds::DEACTIVATE | DropEventKinds::DROP
        );
    }
}
