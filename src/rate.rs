//! The shared blink-rate factor.
//!
//! [`RateFactor`] is written only by the button interrupt handler and read by
//! both tasks. The `f32` is stored as its bit pattern in a 32-bit atomic, so
//! every read and write is a single word access on any target, including
//! ones without native float atomics.

use crate::time::TimeDuration;
use portable_atomic::{AtomicU32, Ordering};

/// Inclusive bounds applied to every rate update.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RateLimits {
    pub min: f32,
    pub max: f32,
}

impl RateLimits {
    /// Limits that never engage for a finite number of presses.
    pub const UNBOUNDED: RateLimits = RateLimits {
        min: f32::MIN_POSITIVE,
        max: f32::MAX,
    };

    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn clamp(&self, rate: f32) -> f32 {
        rate.clamp(self.min, self.max)
    }
}

impl Default for RateLimits {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// Multiplicative scale applied to the base send period and LED-on duration.
///
/// Single writer, many readers. Writers must not race each other: the
/// read-modify-write in [`scale_by`](Self::scale_by) is not a CAS loop.
#[derive(Debug)]
pub struct RateFactor {
    bits: AtomicU32,
    limits: RateLimits,
}

impl RateFactor {
    /// Creates a factor starting at `initial`, clamped to `limits`.
    pub fn new(initial: f32, limits: RateLimits) -> Self {
        Self {
            bits: AtomicU32::new(limits.clamp(initial).to_bits()),
            limits,
        }
    }

    /// Returns the current factor.
    #[inline]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Multiplies the factor by `multiplier` and returns the new value.
    pub fn scale_by(&self, multiplier: f32) -> f32 {
        let rate = self.limits.clamp(self.get() * multiplier);
        self.bits.store(rate.to_bits(), Ordering::Release);
        rate
    }

    /// Returns the limits this factor is clamped to.
    pub fn limits(&self) -> RateLimits {
        self.limits
    }

    /// Scales `base` by the current factor, rounded to the nearest millisecond.
    ///
    /// The factor is sampled once per call.
    pub fn scale<D: TimeDuration>(&self, base: D) -> D {
        scale_duration(base, self.get())
    }
}

/// Scales `base` by `rate`, rounded to the nearest millisecond.
///
/// The board firmware truncates here instead, so its durations can come out
/// one millisecond shorter. Saturates instead of overflowing for very large
/// rates.
pub fn scale_duration<D: TimeDuration>(base: D, rate: f32) -> D {
    let millis = libm::roundf(base.as_millis() as f32 * rate);
    // `as` saturates: negative and NaN map to 0, huge values to u64::MAX.
    D::from_millis(millis as u64)
}
