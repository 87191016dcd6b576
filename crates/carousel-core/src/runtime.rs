//! Single-threaded runtime that owns the frame-callback registry.
//!
//! The host drives frames by calling [`RuntimeHandle::drain_frame_callbacks`]
//! once per vsync. Animations register one-shot callbacks through the
//! [`FrameClock`](crate::FrameClock) and re-register themselves until they
//! settle.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;

use crate::frame_clock::FrameClock;

pub type FrameCallbackId = u64;

type FrameCallback = Box<dyn FnOnce(u64)>;

#[derive(Default)]
struct RuntimeInner {
    next_callback_id: FrameCallbackId,
    frame_callbacks: IndexMap<FrameCallbackId, FrameCallback, FxBuildHasher>,
    frame_waker: Option<Rc<dyn Fn()>>,
    disposed: bool,
}

/// Cheaply clonable handle to the runtime.
#[derive(Clone, Default)]
pub struct RuntimeHandle {
    inner: Rc<RefCell<RuntimeInner>>,
}

impl RuntimeHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }

    /// Registers a callback for the next drained frame.
    ///
    /// Returns `None` once the runtime has been disposed.
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        let (id, waker) = {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed {
                return None;
            }
            inner.next_callback_id += 1;
            let id = inner.next_callback_id;
            inner.frame_callbacks.insert(id, Box::new(callback));
            (id, inner.frame_waker.clone())
        };
        log::trace!("registered frame callback {id}");
        if let Some(waker) = waker {
            waker();
        }
        Some(id)
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        self.inner.borrow_mut().frame_callbacks.shift_remove(&id);
    }

    /// Runs every callback registered before this call, in registration order.
    ///
    /// Callbacks registered while draining are deferred to the next frame.
    /// Returns how many callbacks ran.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) -> usize {
        let batch: SmallVec<[FrameCallback; 8]> = {
            let mut inner = self.inner.borrow_mut();
            std::mem::take(&mut inner.frame_callbacks)
                .into_values()
                .collect()
        };
        let count = batch.len();
        for callback in batch {
            callback(frame_time_nanos);
        }
        count
    }

    pub fn has_pending_frame_callbacks(&self) -> bool {
        !self.inner.borrow().frame_callbacks.is_empty()
    }

    /// Installs a waker invoked whenever a frame callback is registered.
    pub fn set_frame_waker(&self, waker: impl Fn() + 'static) {
        self.inner.borrow_mut().frame_waker = Some(Rc::new(waker));
    }

    pub fn clear_frame_waker(&self) {
        self.inner.borrow_mut().frame_waker = None;
    }

    /// Drops every pending callback and refuses new registrations.
    pub fn dispose(&self) {
        let pending = {
            let mut inner = self.inner.borrow_mut();
            inner.disposed = true;
            inner.frame_waker = None;
            std::mem::take(&mut inner.frame_callbacks)
        };
        log::debug!("runtime disposed with {} pending frame callbacks", pending.len());
        drop(pending);
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.borrow().disposed
    }
}

impl fmt::Debug for RuntimeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("RuntimeHandle")
            .field("pending_frame_callbacks", &inner.frame_callbacks.len())
            .field("disposed", &inner.disposed)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
