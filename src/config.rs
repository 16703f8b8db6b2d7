//! Demo configuration.
//!
//! [`BlinkConfig::default`] reproduces the evaluation board demo: a signal
//! every second, the LED blue for half a second then red, each accepted button
//! press changing the timing by 10%.

use crate::debounce::DebouncePolicy;
use crate::kernel::Priority;
use crate::rate::RateLimits;
use crate::time::TimeDuration;
use palette::Srgb;

/// Color the consumer shows while the LED is "on".
pub const DEFAULT_ON_COLOR: Srgb = crate::BLUE;

/// Color the consumer leaves the LED in between blinks.
pub const DEFAULT_OFF_COLOR: Srgb = crate::RED;

/// Base producer period in milliseconds, before rate scaling.
pub const DEFAULT_SEND_PERIOD_MS: u64 = 1000;

/// Base LED-on duration in milliseconds, before rate scaling.
pub const DEFAULT_ON_DURATION_MS: u64 = 500;

/// Debounce window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// Fractional rate change per accepted press.
pub const DEFAULT_RATE_STEP: f32 = 0.1;

/// The kernel's minimal task stack, in words.
pub const DEFAULT_STACK_WORDS: usize = 128;

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Base send period is zero.
    ZeroBasePeriod,

    /// Base LED-on duration is zero.
    ZeroOnDuration,

    /// Rate step is not in the open interval (0, 1).
    InvalidRateStep,

    /// Initial rate is not a positive finite number.
    InvalidInitialRate,

    /// Rate limits are not positive, finite and ordered.
    InvalidRateLimits,

    /// Consumer priority must be above producer priority, and both above idle.
    PriorityOrder,

    /// A task stack size is zero.
    ZeroStack,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroBasePeriod => write!(f, "base period must be non-zero"),
            ConfigError::ZeroOnDuration => write!(f, "base on-duration must be non-zero"),
            ConfigError::InvalidRateStep => write!(f, "rate step must be between 0 and 1"),
            ConfigError::InvalidInitialRate => {
                write!(f, "initial rate must be positive and finite")
            }
            ConfigError::InvalidRateLimits => {
                write!(f, "rate limits must be positive, finite and ordered")
            }
            ConfigError::PriorityOrder => write!(
                f,
                "consumer priority must exceed producer priority, which must exceed idle"
            ),
            ConfigError::ZeroStack => write!(f, "task stack size must be non-zero"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Timing, color, task and policy settings for the demo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlinkConfig<D: TimeDuration> {
    /// Producer period at rate 1.0.
    pub base_period: D,

    /// LED-on hold at rate 1.0.
    pub base_on_duration: D,

    /// Minimum gap between accepted button presses.
    pub debounce_window: D,

    pub debounce_policy: DebouncePolicy,

    /// Fractional change per accepted press.
    pub rate_step: f32,

    pub initial_rate: f32,

    pub rate_limits: RateLimits,

    pub on_color: Srgb,

    pub off_color: Srgb,

    pub producer_priority: Priority,

    pub consumer_priority: Priority,

    pub stack_words: usize,
}

impl<D: TimeDuration> BlinkConfig<D> {
    /// Creates the board demo configuration.
    pub fn new() -> Self {
        Self {
            base_period: D::from_millis(DEFAULT_SEND_PERIOD_MS),
            base_on_duration: D::from_millis(DEFAULT_ON_DURATION_MS),
            debounce_window: D::from_millis(DEFAULT_DEBOUNCE_MS),
            debounce_policy: DebouncePolicy::default(),
            rate_step: DEFAULT_RATE_STEP,
            initial_rate: 1.0,
            rate_limits: RateLimits::UNBOUNDED,
            on_color: DEFAULT_ON_COLOR,
            off_color: DEFAULT_OFF_COLOR,
            producer_priority: Priority::above_idle(1),
            consumer_priority: Priority::above_idle(2),
            stack_words: DEFAULT_STACK_WORDS,
        }
    }

    /// Sets the base producer period and LED-on duration.
    pub fn with_timing(mut self, base_period: D, base_on_duration: D) -> Self {
        self.base_period = base_period;
        self.base_on_duration = base_on_duration;
        self
    }

    pub fn with_debounce(mut self, window: D, policy: DebouncePolicy) -> Self {
        self.debounce_window = window;
        self.debounce_policy = policy;
        self
    }

    pub fn with_rate_step(mut self, step: f32) -> Self {
        self.rate_step = step;
        self
    }

    pub fn with_initial_rate(mut self, rate: f32) -> Self {
        self.initial_rate = rate;
        self
    }

    /// Clamps the rate factor to `limits` on every update.
    pub fn with_rate_limits(mut self, limits: RateLimits) -> Self {
        self.rate_limits = limits;
        self
    }

    pub fn with_colors(mut self, on_color: Srgb, off_color: Srgb) -> Self {
        self.on_color = on_color;
        self.off_color = off_color;
        self
    }

    pub fn with_priorities(mut self, producer: Priority, consumer: Priority) -> Self {
        self.producer_priority = producer;
        self.consumer_priority = consumer;
        self
    }

    pub fn with_stack_words(mut self, words: usize) -> Self {
        self.stack_words = words;
        self
    }

    /// Checks the configuration.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_period.as_millis() == 0 {
            return Err(ConfigError::ZeroBasePeriod);
        }
        if self.base_on_duration.as_millis() == 0 {
            return Err(ConfigError::ZeroOnDuration);
        }
        if !(self.rate_step > 0.0 && self.rate_step < 1.0) {
            return Err(ConfigError::InvalidRateStep);
        }
        if !(self.initial_rate.is_finite() && self.initial_rate > 0.0) {
            return Err(ConfigError::InvalidInitialRate);
        }

        let RateLimits { min, max } = self.rate_limits;
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(ConfigError::InvalidRateLimits);
        }

        if !(self.consumer_priority > self.producer_priority
            && self.producer_priority > Priority::IDLE)
        {
            return Err(ConfigError::PriorityOrder);
        }
        if self.stack_words == 0 {
            return Err(ConfigError::ZeroStack);
        }
        Ok(())
    }
}

impl<D: TimeDuration> Default for BlinkConfig<D> {
    fn default() -> Self {
        Self::new()
    }
}
