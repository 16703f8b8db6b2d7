//! Core types shared by the tasks, the button handler and bootstrap.

use crate::config::ConfigError;

/// The only signal value the producer sends and the consumer acts on.
pub const BLINK_SIGNAL: u32 = 100;

/// Parameter the kernel hands to the producer task.
pub const PRODUCER_PARAMETER: u32 = 0x1111;

/// Parameter the kernel hands to the consumer task.
pub const CONSUMER_PARAMETER: u32 = 0x22;

/// Which rate button was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RateButton {
    /// Button A. Multiplies the rate by `1 + step`, lengthening the timing.
    SlowDown,

    /// Button B. Multiplies the rate by `1 - step`, shortening the timing.
    SpeedUp,
}

impl RateButton {
    /// The factor this button applies for the given step.
    #[inline]
    pub fn multiplier(self, step: f32) -> f32 {
        match self {
            RateButton::SlowDown => 1.0 + step,
            RateButton::SpeedUp => 1.0 - step,
        }
    }
}

/// What the consumer did with a received signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignalOutcome {
    /// The LED was driven through one on/off cycle.
    Blinked,

    /// The payload was not [`BLINK_SIGNAL`]; nothing happened.
    Ignored(u32),
}

/// What the button handler did with one interrupt.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// The press was accepted and the rate changed to `rate`.
    RateChanged { button: RateButton, rate: f32 },

    /// The interrupt fell inside the debounce window.
    Bounced,

    /// The interrupt was accepted but no rate button bit was set.
    NoButton,
}

/// Errors that stop the demo.
///
/// Every variant is fatal: there are no retries.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkError {
    /// The kernel could not allocate the signal queue. No tasks were created.
    QueueCreation,

    /// The kernel refused to create a task.
    Spawn {
        /// Name of the task that failed.
        task: &'static str,
    },

    /// The producer found the queue still full, so the consumer fell behind.
    QueueFull,

    /// A task entry point received the wrong parameter.
    ParameterMismatch {
        task: &'static str,
        expected: u32,
        actual: u32,
    },

    /// The next wake time is not representable by the instant type.
    TimerOverflow,

    /// The configuration failed validation.
    InvalidConfig(ConfigError),
}

impl core::fmt::Display for BlinkError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BlinkError::QueueCreation => write!(f, "failed to create the signal queue"),
            BlinkError::Spawn { task } => write!(f, "failed to create task {}", task),
            BlinkError::QueueFull => {
                write!(f, "signal queue full: consumer did not drain the previous signal")
            }
            BlinkError::ParameterMismatch {
                task,
                expected,
                actual,
            } => write!(
                f,
                "task {} started with parameter {:#x}, expected {:#x}",
                task, actual, expected
            ),
            BlinkError::TimerOverflow => write!(f, "next wake time overflows the timer"),
            BlinkError::InvalidConfig(err) => write!(f, "invalid configuration: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BlinkError {}

impl From<ConfigError> for BlinkError {
    fn from(err: ConfigError) -> Self {
        BlinkError::InvalidConfig(err)
    }
}
