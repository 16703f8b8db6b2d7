//! Lock-free single-slot signal store.
//!
//! [`SignalSlot`] holds at most one `u32` and supports one sender and one
//! receiver, including a sender running in interrupt context. It has no
//! blocking operation of its own: a kernel port pairs it with its own task
//! notification to build a [`SignalQueue`](crate::kernel::SignalQueue).

use crate::kernel::QueueFull;
use portable_atomic::{AtomicBool, AtomicU32, Ordering};

#[derive(Debug)]
pub struct SignalSlot {
    value: AtomicU32,
    full: AtomicBool,
}

impl SignalSlot {
    pub const fn new() -> Self {
        Self {
            value: AtomicU32::new(0),
            full: AtomicBool::new(false),
        }
    }

    /// Stores `signal` if the slot is empty.
    pub fn try_send(&self, signal: u32) -> Result<(), QueueFull> {
        if self.full.load(Ordering::Acquire) {
            return Err(QueueFull(signal));
        }
        self.value.store(signal, Ordering::Relaxed);
        self.full.store(true, Ordering::Release);
        Ok(())
    }

    /// Takes the stored signal, leaving the slot empty.
    pub fn try_receive(&self) -> Option<u32> {
        if !self.full.load(Ordering::Acquire) {
            return None;
        }
        let signal = self.value.load(Ordering::Relaxed);
        self.full.store(false, Ordering::Release);
        Some(signal)
    }

    pub fn is_full(&self) -> bool {
        self.full.load(Ordering::Acquire)
    }
}

impl Default for SignalSlot {
    fn default() -> Self {
        Self::new()
    }
}
