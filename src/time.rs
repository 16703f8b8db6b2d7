//! Time abstraction traits for platform-agnostic timing.
//!
//! The tasks and the button handler only ever talk to time through these
//! traits. [`TickInstant`] and [`TickDuration`] cover the common case of a
//! kernel with a wrapping 32-bit tick counter running at 1 kHz.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Whole milliseconds in this duration.
    fn as_millis(&self) -> u64;

    /// A duration of `millis` milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    type Duration: TimeDuration;

    /// The reading of the clock right after reset.
    const ZERO: Self;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Adds duration to instant, returns None on overflow.
    fn checked_add(self, duration: Self::Duration) -> Option<Self>;
}

/// Number of kernel ticks per millisecond for [`TickInstant`].
pub const TICKS_PER_MS: u32 = 1;

/// A span of kernel ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickDuration(pub u32);

impl TimeDuration for TickDuration {
    fn as_millis(&self) -> u64 {
        u64::from(self.0 / TICKS_PER_MS)
    }

    /// Saturates at `u32::MAX` ticks.
    fn from_millis(millis: u64) -> Self {
        let ticks = millis.saturating_mul(u64::from(TICKS_PER_MS));
        TickDuration(u32::try_from(ticks).unwrap_or(u32::MAX))
    }
}

/// A reading of a wrapping 32-bit kernel tick counter.
///
/// Arithmetic wraps the same way the counter does, so the elapsed time
/// between two readings is correct across a single rollover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickInstant(pub u32);

impl TimeInstant for TickInstant {
    type Duration = TickDuration;

    const ZERO: Self = TickInstant(0);

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TickDuration(self.0.wrapping_sub(earlier.0))
    }

    /// Never fails: the counter wraps.
    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        Some(TickInstant(self.0.wrapping_add(duration.0)))
    }
}
