//! Next-frame scheduling
//!
//! Resize handling is deferred to the next animation frame so a burst of
//! notifications costs one recompute. Hosts implement [`FrameScheduler`]
//! on their own "run before next paint" primitive; [`FrameQueue`] is the
//! headless version, flushed explicitly with [`FrameQueue::run_frame`].

use std::cell::{Cell, RefCell};

/// Handle of a scheduled frame callback, used to cancel it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Callback run on the next frame
pub type FrameCallback = Box<dyn FnOnce()>;

/// Single-threaded "run on next frame" task queue
///
/// Implementations should defer the callback to a later frame. Running it
/// inline from `request_frame` is tolerated but defeats resize coalescing.
/// Callbacks may call `request_frame` again; those run on the frame after.
pub trait FrameScheduler {
    /// Schedules `callback` to run once on the next frame
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// Cancels a scheduled callback; already-run or unknown handles are ignored
    fn cancel_frame(&self, handle: FrameHandle);
}

/// Headless frame scheduler
#[derive(Default)]
pub struct FrameQueue {
    next_handle: Cell<u64>,
    pending: RefCell<Vec<(FrameHandle, FrameCallback)>>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every callback scheduled before this call
    ///
    /// Callbacks scheduled while the frame runs wait for the next frame.
    /// Returns the number of callbacks that ran.
    pub fn run_frame(&self) -> usize {
        let due = std::mem::take(&mut *self.pending.borrow_mut());
        let count = due.len();
        for (_, callback) in due {
            callback();
        }
        count
    }

    /// Number of callbacks waiting for the next frame
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let handle = FrameHandle(self.next_handle.get());
        self.next_handle.set(handle.0 + 1);
        self.pending.borrow_mut().push((handle, callback));
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.pending.borrow_mut().retain(|(h, _)| *h != handle);
    }
}
