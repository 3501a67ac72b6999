//! Lifetime guard for objects shared between threads
//!
//! A [`Handle`] owns a resource that any number of threads may use while
//! any one of them may dispose it. Calls never take a lock. Instead the
//! handle counts calls in flight and releases the resource when the last
//! one finishes after disposal.
//!
//! ```text
//! counter:  0 idle, n > 0 calls in flight, -1 released
//!
//! call      0 ──begin──▶ 1 ──end──▶ 0
//! dispose   0 ──────────end───────▶ -1   (release)
//! racing    2 ──dispose──▶ 1 ──end──▶ 0 ──end──▶ -1   (last call releases)
//! ```
//!
//! Disposal takes the one count that represents the handle itself, so the
//! counter reaches -1 exactly once: either in `dispose` when nothing is in
//! flight, or when the last call in flight ends.
//!
//! # Safety
//!
//! The resource lives in an `UnsafeCell<ManuallyDrop<T>>`. Invariants:
//! - A shared reference to the resource exists only inside a call, and a
//!   call exists only while the counter is above -1
//! - The counter moves to -1 exactly once, on the thread that then drops the
//!   resource
//! - After that no call can begin, because beginning requires a counter
//!   above -1 and the counter never leaves -1
//! - `Drop` for the handle drops the resource only if the counter is not -1

#![allow(unsafe_code)]

use std::cell::UnsafeCell;
use std::fmt;
use std::mem::ManuallyDrop;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use thiserror::Error;
use tracing::{debug, trace};

const RELEASED: i64 = -1;

/// Errors from [`Handle::try_call`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HandleError {
    /// The handle was disposed before the call began
    #[error("{name} object has already been destroyed")]
    Disposed { name: &'static str },
}

/// A resource usable from many threads until it is disposed
pub struct Handle<T> {
    name: &'static str,
    calls: AtomicI64,
    disposed: AtomicBool,
    resource: UnsafeCell<ManuallyDrop<T>>,
}

// Safety: the resource is only reached through shared references inside
// calls, which may run on any thread, so `T: Sync` is needed for `Sync`.
// The resource may be dropped on whichever thread ends the last call, so
// both impls need `T: Send`.
unsafe impl<T: Send> Send for Handle<T> {}
unsafe impl<T: Send + Sync> Sync for Handle<T> {}

impl<T> Handle<T> {
    /// Wrap `resource`; `name` appears in errors and logs
    pub fn new(name: &'static str, resource: T) -> Self {
        Self {
            name,
            calls: AtomicI64::new(0),
            disposed: AtomicBool::new(false),
            resource: UnsafeCell::new(ManuallyDrop::new(resource)),
        }
    }

    /// Name given at construction
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether [`dispose`](Self::dispose) has been called
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// Run `f` with the resource
    ///
    /// # Panics
    ///
    /// When the handle has been disposed. Using a disposed object is a bug
    /// in the caller. Also panics if `i64::MAX` calls are in flight.
    pub fn call<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        match self.try_call(f) {
            Ok(result) => result,
            Err(err) => panic!("{err}"),
        }
    }

    /// Run `f` with the resource, or fail if the handle was disposed
    pub fn try_call<R>(&self, f: impl FnOnce(&T) -> R) -> Result<R, HandleError> {
        let guard = self.begin()?;
        Ok(f(guard.resource()))
    }

    /// Dispose the handle
    ///
    /// The resource is released now if no call is in flight, otherwise when
    /// the last one ends. Only the first dispose has an effect; it returns
    /// `true`.
    pub fn dispose(&self) -> bool {
        if self
            .disposed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }
        trace!("disposing {}", self.name);
        self.end();
        true
    }

    fn begin(&self) -> Result<CallGuard<'_, T>, HandleError> {
        if self.is_disposed() {
            return Err(HandleError::Disposed { name: self.name });
        }

        let mut current = self.calls.load(Ordering::Acquire);
        loop {
            if current <= RELEASED {
                return Err(HandleError::Disposed { name: self.name });
            }
            if current == i64::MAX {
                panic!("{} call counter overflow", self.name);
            }
            match self.calls.compare_exchange_weak(
                current,
                current + 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Ok(CallGuard { handle: self }),
                Err(actual) => current = actual,
            }
        }
    }

    fn end(&self) {
        if self.calls.fetch_sub(1, Ordering::AcqRel) == 0 {
            // Safety: this thread moved the counter from 0 to -1. No call is in
            // flight and none can begin, so nothing else references the resource.
            unsafe { ManuallyDrop::drop(&mut *self.resource.get()) };
            debug!("released {}", self.name);
        }
    }
}

impl<T> Drop for Handle<T> {
    fn drop(&mut self) {
        if *self.calls.get_mut() != RELEASED {
            // Safety: `&mut self` rules out calls in flight, and the resource
            // was not released because the counter never reached -1.
            unsafe { ManuallyDrop::drop(self.resource.get_mut()) };
            trace!("dropped undisposed {}", self.name);
        }
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("name", &self.name)
            .field("calls", &self.calls.load(Ordering::Relaxed))
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// One call in flight; ends the call when dropped, also during unwinding
struct CallGuard<'a, T> {
    handle: &'a Handle<T>,
}

impl<T> CallGuard<'_, T> {
    fn resource(&self) -> &T {
        // Safety: the guard holds one count, so the counter stays above -1
        // and the resource stays alive for the guard's lifetime.
        unsafe { &*self.handle.resource.get() }
    }
}

impl<T> Drop for CallGuard<'_, T> {
    fn drop(&mut self) {
        self.handle.end();
    }
}
