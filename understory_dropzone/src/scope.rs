// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interaction scope: the element tree plus every registered dropzone.
//!
//! ## Overview
//!
//! [`Scope`] is the explicit context passed to the registry, the resolver, and the
//! [drop state](crate::state::DropState). It owns:
//!
//! - the host element tree,
//! - registered dropzones in registration order (order matters for ties),
//! - the dynamic-drop flag controlling per-move candidate recomputation.
//!
//! Dropzones are configured with [`DropzoneOptions`], merged with
//! [`Scope::configure`]. Merging is permissive: passing options enables the
//! dropzone unless [`DropzoneOptions::enabled`] says otherwise, unknown overlap
//! names are ignored, ratios are clamped, and only supplied fields change.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use understory_pointer::PointerEvent;

use crate::event::{DragEvent, DropEvent, DropEventKinds, Outcome, ParseListenerError};
use crate::overlap::Overlap;
use crate::resolve::Draggable;

/// Identifier of a registered dropzone.
///
/// Ids are never reused within a [`Scope`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct DropzoneId(u32);

/// Which elements a dropzone covers.
#[derive(Clone, Debug, PartialEq)]
pub enum DropTarget<E> {
    /// A single element.
    Element(E),
    /// A fixed list of elements.
    Elements(Vec<E>),
    /// Every element matching a selector, queried live within the dropzone's context.
    Selector(String),
}

/// Arguments passed to an [`Accept::Callback`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AcceptQuery<E> {
    /// The dropzone being asked.
    pub dropzone: DropzoneId,
    /// The element being dragged.
    pub draggable_element: E,
}

/// Arguments passed to a custom drop checker.
#[derive(Debug)]
pub struct DropCheck<'a, E> {
    /// The drag move or end event being checked.
    pub drag_event: &'a DragEvent<E>,
    /// The pointer report behind that drag event.
    pub pointer: &'a PointerEvent<E>,
    /// Result of the geometric overlap test (`false` when the dropzone has no rect).
    pub dropped: bool,
    /// The dropzone being checked.
    pub dropzone: DropzoneId,
    /// The dropzone element being checked.
    pub drop_element: E,
    /// The draggable.
    pub draggable: &'a Draggable<E>,
}

/// Acceptance predicate callback.
pub type AcceptFn<E> = Box<dyn Fn(&AcceptQuery<E>) -> bool>;
/// Custom drop checker; its return value replaces the geometric result.
pub type CheckerFn<E> = Box<dyn for<'a> Fn(&DropCheck<'a, E>) -> bool>;
/// Dropzone event listener.
pub type ListenerFn<E> = Box<dyn FnMut(&DropEvent<E>) -> Outcome>;

/// Which draggables a dropzone accepts.
#[derive(Default)]
pub enum Accept<E> {
    /// Any draggable.
    #[default]
    Any,
    /// Only this exact element.
    Element(E),
    /// Draggables matching this selector.
    Selector(String),
    /// Draggables for which the callback returns `true`.
    Callback(AcceptFn<E>),
}

impl<E: core::fmt::Debug> core::fmt::Debug for Accept<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::Element(e) => f.debug_tuple("Element").field(e).finish(),
            Self::Selector(s) => f.debug_tuple("Selector").field(s).finish(),
            Self::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// Drop behaviour of a dropzone.
pub struct DropOptions<E> {
    /// Whether the dropzone takes part in drags at all. Defaults to `false`.
    pub enabled: bool,
    /// Acceptance rule. Defaults to [`Accept::Any`].
    pub accept: Accept<E>,
    /// Overlap mode. Defaults to [`Overlap::Pointer`].
    pub overlap: Overlap,
    /// Optional custom checker refining the overlap result.
    pub checker: Option<CheckerFn<E>>,
}

impl<E> Default for DropOptions<E> {
    fn default() -> Self {
        Self {
            enabled: false,
            accept: Accept::Any,
            overlap: Overlap::Pointer,
            checker: None,
        }
    }
}

impl<E: core::fmt::Debug> core::fmt::Debug for DropOptions<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DropOptions")
            .field("enabled", &self.enabled)
            .field("accept", &self.accept)
            .field("overlap", &self.overlap)
            .field("checker", &self.checker.is_some())
            .finish()
    }
}

/// A partial dropzone configuration, merged by [`Scope::configure`].
pub struct DropzoneOptions<E> {
    enabled: Option<bool>,
    accept: Option<Accept<E>>,
    overlap: Option<Overlap>,
    checker: Option<Option<CheckerFn<E>>>,
    listeners: Option<Vec<(DropEventKinds, ListenerFn<E>)>>,
}

impl<E> Default for DropzoneOptions<E> {
    fn default() -> Self {
        Self {
            enabled: None,
            accept: None,
            overlap: None,
            checker: None,
            listeners: None,
        }
    }
}

impl<E> core::fmt::Debug for DropzoneOptions<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DropzoneOptions")
            .field("enabled", &self.enabled)
            .field("overlap", &self.overlap)
            .field("accept", &self.accept.is_some())
            .field("checker", &self.checker.is_some())
            .field("listeners", &self.listeners.as_ref().map(Vec::len))
            .finish()
    }
}

impl<E> DropzoneOptions<E> {
    /// Empty options; merging them only enables the dropzone.
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicitly enable or disable the dropzone.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Set the acceptance rule.
    pub fn accept(mut self, accept: Accept<E>) -> Self {
        self.accept = Some(accept);
        self
    }

    /// Set the overlap mode. Ratios are clamped to `[0, 1]`; a NaN ratio is ignored.
    pub fn overlap(mut self, overlap: Overlap) -> Self {
        self.overlap = match overlap {
            Overlap::Ratio(r) => Overlap::ratio(r).or(self.overlap),
            other => Some(other),
        };
        self
    }

    /// Set the overlap mode by name (`pointer` or `center`); other names are ignored.
    pub fn overlap_name(mut self, name: &str) -> Self {
        if let Ok(overlap) = name.parse() {
            self.overlap = Some(overlap);
        }
        self
    }

    /// Set a custom drop checker.
    pub fn checker(
        mut self,
        checker: impl for<'a> Fn(&DropCheck<'a, E>) -> bool + 'static,
    ) -> Self {
        self.checker = Some(Some(Box::new(checker)));
        self
    }

    /// Remove any custom drop checker.
    pub fn clear_checker(mut self) -> Self {
        self.checker = Some(None);
        self
    }

    /// Add a listener for `kinds`.
    ///
    /// Supplying any listener replaces every listener installed by earlier options.
    pub fn listener(
        mut self,
        kinds: DropEventKinds,
        listener: impl FnMut(&DropEvent<E>) -> Outcome + 'static,
    ) -> Self {
        self.listeners
            .get_or_insert_with(Vec::new)
            .push((kinds, Box::new(listener)));
        self
    }
}

struct Listener<E> {
    kinds: DropEventKinds,
    handler: ListenerFn<E>,
    from_options: bool,
}

/// A registered dropzone.
pub struct Dropzone<E> {
    id: DropzoneId,
    target: DropTarget<E>,
    context: Option<E>,
    options: DropOptions<E>,
    listeners: Vec<Listener<E>>,
}

impl<E: core::fmt::Debug> core::fmt::Debug for Dropzone<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dropzone")
            .field("id", &self.id)
            .field("target", &self.target)
            .field("context", &self.context)
            .field("options", &self.options)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<E> Dropzone<E> {
    /// The dropzone's id.
    pub fn id(&self) -> DropzoneId {
        self.id
    }

    /// The elements this dropzone covers.
    pub fn target(&self) -> &DropTarget<E> {
        &self.target
    }

    /// The element selector targets are queried within, if any.
    pub fn context(&self) -> Option<&E> {
        self.context.as_ref()
    }

    /// Current drop options.
    pub fn options(&self) -> &DropOptions<E> {
        &self.options
    }

    /// Number of installed listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Interaction scope: element tree, dropzones, and drop settings.
pub struct Scope<E, T> {
    tree: T,
    dropzones: Vec<Dropzone<E>>,
    next_id: u32,
    dynamic_drop: bool,
}

impl<E: core::fmt::Debug, T: core::fmt::Debug> core::fmt::Debug for Scope<E, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scope")
            .field("tree", &self.tree)
            .field("dropzones", &self.dropzones)
            .field("dynamic_drop", &self.dynamic_drop)
            .finish_non_exhaustive()
    }
}

impl<E, T> Scope<E, T> {
    /// Create a scope over `tree` with no dropzones and dynamic drop off.
    pub fn new(tree: T) -> Self {
        Self {
            tree,
            dropzones: Vec::new(),
            next_id: 0,
            dynamic_drop: false,
        }
    }

    /// The element tree.
    pub fn tree(&self) -> &T {
        &self.tree
    }

    /// Mutable access to the element tree, e.g. to apply a reflow.
    pub fn tree_mut(&mut self) -> &mut T {
        &mut self.tree
    }

    /// Whether candidates are recomputed on every drag move.
    pub fn dynamic_drop(&self) -> bool {
        self.dynamic_drop
    }

    /// Recompute candidates (and their rects) on every drag move instead of once
    /// per drag. Costs more per move but follows page reflow.
    pub fn set_dynamic_drop(&mut self, dynamic: bool) {
        self.dynamic_drop = dynamic;
    }

    /// Register a dropzone. It starts disabled with default options.
    pub fn add_dropzone(&mut self, target: DropTarget<E>, context: Option<E>) -> DropzoneId {
        let id = DropzoneId(self.next_id);
        self.next_id += 1;
        self.dropzones.push(Dropzone {
            id,
            target,
            context,
            options: DropOptions::default(),
            listeners: Vec::new(),
        });
        id
    }

    /// Unregister a dropzone. Returns `false` if `id` is unknown.
    pub fn remove_dropzone(&mut self, id: DropzoneId) -> bool {
        let before = self.dropzones.len();
        self.dropzones.retain(|z| z.id != id);
        before != self.dropzones.len()
    }

    /// Registered dropzones in registration order.
    pub fn dropzones(&self) -> impl Iterator<Item = &Dropzone<E>> + '_ {
        self.dropzones.iter()
    }

    /// Look up a dropzone.
    pub fn dropzone(&self, id: DropzoneId) -> Option<&Dropzone<E>> {
        self.dropzones.iter().find(|z| z.id == id)
    }

    fn dropzone_mut(&mut self, id: DropzoneId) -> Option<&mut Dropzone<E>> {
        self.dropzones.iter_mut().find(|z| z.id == id)
    }

    /// Merge `options` into a dropzone. Returns `false` if `id` is unknown.
    pub fn configure(&mut self, id: DropzoneId, options: DropzoneOptions<E>) -> bool {
        let Some(zone) = self.dropzone_mut(id) else {
            return false;
        };
        zone.options.enabled = options.enabled != Some(false);
        if let Some(listeners) = options.listeners {
            zone.listeners.retain(|l| !l.from_options);
            zone.listeners
                .extend(listeners.into_iter().map(|(kinds, handler)| Listener {
                    kinds,
                    handler,
                    from_options: true,
                }));
        }
        if let Some(overlap) = options.overlap {
            zone.options.overlap = overlap;
        }
        if let Some(accept) = options.accept {
            zone.options.accept = accept;
        }
        if let Some(checker) = options.checker {
            zone.options.checker = checker;
        }
        true
    }

    /// Enable or disable a dropzone without touching its other options.
    pub fn set_enabled(&mut self, id: DropzoneId, enabled: bool) -> bool {
        match self.dropzone_mut(id) {
            Some(zone) => {
                zone.options.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Add a listener for the space-separated event `names` (see
    /// [`DropEventKinds::parse`]). Listeners added here survive [`Scope::configure`].
    ///
    /// Returns `Ok(false)` if `id` is unknown.
    pub fn on(
        &mut self,
        id: DropzoneId,
        names: &str,
        listener: impl FnMut(&DropEvent<E>) -> Outcome + 'static,
    ) -> Result<bool, ParseListenerError> {
        let kinds = DropEventKinds::parse(names)?;
        let Some(zone) = self.dropzone_mut(id) else {
            return Ok(false);
        };
        zone.listeners.push(Listener {
            kinds,
            handler: Box::new(listener),
            from_options: false,
        });
        Ok(true)
    }

    /// Deliver `event` to the listeners of dropzone `id`, in installation order.
    ///
    /// Delivery stops at the first listener returning [`Outcome::Stop`] or
    /// [`Outcome::Reject`], and that outcome is returned. Unknown dropzones
    /// return [`Outcome::Continue`].
    pub fn fire(&mut self, id: DropzoneId, event: &DropEvent<E>) -> Outcome {
        let Some(zone) = self.dropzone_mut(id) else {
            return Outcome::Continue;
        };
        let flag = event.kind.flag();
        for listener in zone.listeners.iter_mut().filter(|l| l.kinds.contains(flag)) {
            match (listener.handler)(event) {
                Outcome::Continue => {}
                stop => return stop,
            }
        }
        Outcome::Continue
    }
}

impl<E: PartialEq, T> Scope<E, T> {
    /// Find a dropzone registered for exactly `target` within `context`.
    pub fn find(&self, target: &DropTarget<E>, context: Option<&E>) -> Option<DropzoneId> {
        self.dropzones
            .iter()
            .find(|z| &z.target == target && z.context.as_ref() == context)
            .map(|z| z.id)
    }
}
