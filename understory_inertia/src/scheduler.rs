// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame scheduling.
//!
//! The simulation never loops on its own. Each step asks the host for one frame
//! through [`FrameScheduler`] and returns; the host later calls
//! [`InertiaState::on_frame`](crate::InertiaState::on_frame) with the same handle.

use alloc::vec::Vec;

/// Identifies one requested frame.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

impl FrameHandle {
    /// Wrap a host frame id (for example a `requestAnimationFrame` id).
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The host frame id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A host animation-frame source.
pub trait FrameScheduler {
    /// Request a callback on the next frame.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a requested frame. Unknown or already delivered handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// A scheduler that only records requests; the caller delivers frames by hand.
///
/// ```
/// use understory_inertia::{FrameScheduler, ManualFrames};
///
/// let mut frames = ManualFrames::new();
/// let a = frames.request_frame();
/// let b = frames.request_frame();
/// frames.cancel_frame(a);
/// assert!(!frames.is_pending(a));
/// assert_eq!(frames.take_pending(), vec![b]);
/// assert_eq!(frames.pending_len(), 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualFrames {
    next: u64,
    pending: Vec<FrameHandle>,
}

impl ManualFrames {
    /// A scheduler with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every pending handle, oldest first.
    pub fn take_pending(&mut self) -> Vec<FrameHandle> {
        core::mem::take(&mut self.pending)
    }

    /// Whether `handle` has been requested and neither taken nor cancelled.
    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains(&handle)
    }

    /// Number of pending handles.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique_and_cancellable() {
        let mut frames = ManualFrames::new();
        let a = frames.request_frame();
        let b = frames.request_frame();
        assert_ne!(a, b, "each request gets a fresh handle");
        frames.cancel_frame(a);
        frames.cancel_frame(a);
        assert_eq!(frames.pending_len(), 1);
        assert!(frames.is_pending(b));
        let taken = frames.take_pending();
        assert_eq!(taken, [b]);
        let c = frames.request_frame();
        assert!(c.get() > b.get(), "handles are not reused");
    }
}
