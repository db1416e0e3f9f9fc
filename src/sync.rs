#[cfg(not(all(test, feature = "loom")))]
use core::sync::atomic::{Ordering, AtomicU8};
#[cfg(not(all(test, feature = "loom")))]
use std::thread::yield_now;

#[cfg(all(test, feature = "loom"))]
use loom::{
    thread::yield_now,
    sync::atomic::{Ordering, AtomicU8}
};

use crate::config::LogConfig;
use crate::error::LoggerError;
use crate::prelude::Setup;

enum SlotState {
    Unloaded = 0,
    Locked = 1,
    Ready = 2
}

/// A slot that runs `H::setup` at most once successfully and hands out
/// shared references to the result.
pub(crate) struct Lazy<H: Setup<T, LoggerError>, T> {
    inner: core::cell::UnsafeCell<Option<T>>,
    state: AtomicU8,
    _handle_phantom: core::marker::PhantomData<fn() -> H>,
}

impl<H, T> Lazy<H, T>
where
    H: Setup<T, LoggerError>,
{
    pub fn new() -> Self {
        Self {
            inner: core::cell::UnsafeCell::new(None),
            state: AtomicU8::new(SlotState::Unloaded as u8),
            _handle_phantom: core::marker::PhantomData,
        }
    }

    /// The stored value, once setup has completed.
    pub fn get(&self) -> Option<&T> {
        if self.state.load(Ordering::Acquire) == SlotState::Ready as u8 {
            // SAFETY: `inner` is written only while Locked, and never again after
            // Ready is published with Release ordering.
            unsafe { (*self.inner.get()).as_ref() }
        } else {
            None
        }
    }

    /// Returns the stored value, running `H::setup(config)` if the slot is empty.
    ///
    /// Callers that lose the race wait for the winner. If the winner's setup
    /// fails or panics, the slot goes back to empty and a waiting caller tries its own
    /// config.
    pub fn get_or_init(&self, config: &LogConfig) -> Result<&T, LoggerError> {
        loop {
            if let Some(value) = self.get() {
                return Ok(value);
            }

            match self.state.compare_exchange(
                SlotState::Unloaded as u8,
                SlotState::Locked as u8,
                Ordering::Acquire,
                Ordering::Acquire
            ) {
                Ok(_) => {
                    // Reopens the slot if setup fails or unwinds.
                    let unlock = UnlockOnDrop { state: &self.state };
                    let value = H::setup(config)?;

                    // SAFETY: holding the Locked state makes this the only thread
                    // touching `inner`; readers wait for Ready.
                    unsafe {
                        *self.inner.get() = Some(value);
                    }

                    core::mem::forget(unlock);
                    self.state.store(SlotState::Ready as u8, Ordering::Release);

                    return self.get().ok_or(LoggerError::Poisoned);
                }

                Err(_) => {
                    // Yielding to the other thread
                    while self.state.load(Ordering::Acquire) == SlotState::Locked as u8 {
                        yield_now();
                    }
                }
            }
        }
    }
}

struct UnlockOnDrop<'a> {
    state: &'a AtomicU8,
}

impl Drop for UnlockOnDrop<'_> {
    fn drop(&mut self) {
        self.state.store(SlotState::Unloaded as u8, Ordering::Release);
    }
}

impl<H, T> Default for Lazy<H, T>
where
    H: Setup<T, LoggerError>,
{
    fn default() -> Self {
        Self::new()
    }
}

// SAFETY: `T` is only shared by reference after it has been published, and
// only moved in by the single thread holding the Locked state.
unsafe impl<H, T> Sync for Lazy<H, T>
where
    H: Setup<T, LoggerError>,
    T: Send + Sync,
{}
