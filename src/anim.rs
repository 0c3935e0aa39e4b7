//! Rotation state and next-frame scheduling.
//!
//! The pattern is either idle (rotation changes only through pointer drags) or animating
//! (rotation advances once per scheduled frame). At most one frame request is outstanding per
//! instance.

use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AnimationPhase {
    #[default]
    Idle,
    Animating,
}

/// Opaque id of a requested frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// Display-paced "call me on the next frame" capability supplied by the host.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancels a pending request. Cancelling an unknown or already-fired handle is a no-op.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

impl<F: FrameScheduler + ?Sized> FrameScheduler for &mut F {
    fn request_frame(&mut self) -> FrameHandle {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        (**self).cancel_frame(handle)
    }
}

/// Scheduler driven explicitly by the caller: requests queue up until [`ManualScheduler::poll`]
/// hands them out.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    next: u64,
    pending: VecDeque<FrameHandle>,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the oldest pending request, as if the display just refreshed.
    pub fn poll(&mut self) -> Option<FrameHandle> {
        self.pending.pop_front()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains(&handle)
    }

    /// Requests cancelled while still pending.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.pending.push_back(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(pos) = self.pending.iter().position(|h| *h == handle) {
            self.pending.remove(pos);
            self.cancelled += 1;
        }
    }
}

/// Per-instance rotation state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderState {
    /// Radians; unbounded, periodic through the trig functions.
    pub rotation: f64,
    pub phase: AnimationPhase,
    /// Last pointer x while a drag is in progress.
    pub drag_origin: Option<f64>,
    /// Outstanding frame request, only ever set while animating.
    pub pending_frame: Option<FrameHandle>,
    pub frames_advanced: u64,
}

impl RenderState {
    pub fn is_animating(&self) -> bool {
        self.phase == AnimationPhase::Animating
    }

    /// Enters the animating phase and requests the first frame. Returns `false` when already
    /// animating.
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) -> bool {
        if self.is_animating() {
            return false;
        }
        self.phase = AnimationPhase::Animating;
        self.drag_origin = None;
        self.frames_advanced = 0;
        self.pending_frame = Some(scheduler.request_frame());
        true
    }

    /// Returns to idle and cancels the outstanding frame request, if any.
    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) -> bool {
        let was_animating = self.is_animating();
        self.phase = AnimationPhase::Idle;
        if let Some(handle) = self.pending_frame.take() {
            scheduler.cancel_frame(handle);
        }
        was_animating
    }

    /// Consumes a fired frame request. Returns `true` when it is the live request and the
    /// rotation advanced by `step`; stale or foreign handles are ignored.
    pub fn advance(&mut self, handle: FrameHandle, step: f64) -> bool {
        if !self.is_animating() || self.pending_frame != Some(handle) {
            return false;
        }
        self.pending_frame = None;
        self.rotation += step;
        self.frames_advanced += 1;
        true
    }

    /// Requests the next frame after one was painted.
    pub fn reschedule(&mut self, scheduler: &mut dyn FrameScheduler) {
        if self.is_animating() && self.pending_frame.is_none() {
            self.pending_frame = Some(scheduler.request_frame());
        }
    }

    pub fn pointer_down(&mut self, x: f64) -> bool {
        if self.is_animating() {
            return false;
        }
        self.drag_origin = Some(x);
        true
    }

    /// Applies a drag move. Returns `true` when the rotation changed.
    pub fn pointer_move(&mut self, x: f64, rad_per_px: f64) -> bool {
        if self.is_animating() {
            return false;
        }
        let Some(last) = self.drag_origin else {
            return false;
        };
        let delta = (x - last) * rad_per_px;
        if !delta.is_finite() {
            return false;
        }
        self.rotation += delta;
        self.drag_origin = Some(x);
        true
    }

    pub fn pointer_up(&mut self) {
        self.drag_origin = None;
    }
}
