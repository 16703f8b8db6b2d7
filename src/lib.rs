#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Blinky`**: Owns the signal queue and the rate factor; creates the tasks
//! - **`Producer`**: Sends `BLINK_SIGNAL` on an absolute, rate-scaled period
//! - **`Consumer`**: Blocks on the queue and blinks the LED for each signal
//! - **`ButtonHandler`**: Interrupt-context rate adjustment with debounce
//! - **`RateFactor`**: Lock-free shared scale applied to both base durations
//! - **`BlinkConfig`**: Timing, colors, priorities and policies
//! - **`Kernel`** / **`SignalQueue`** / **`TaskSpawner`**: Traits to implement for your RTOS
//! - **`RgbLed`** / **`ButtonPort`**: Traits to implement for your board
//! - **`TimeSource`**: Trait to implement for your timing system
//!
//! Durations are scaled in milliseconds and rounded to the nearest one.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod blinky;
pub mod board;
pub mod button;
pub mod config;
pub mod consumer;
pub mod debounce;
pub mod kernel;
pub mod producer;
pub mod rate;
pub mod slot;
pub mod time;
pub mod types;

pub use blinky::{BlinkTask, Blinky, TaskSpawner, CONSUMER_NAME, PRODUCER_NAME};
pub use board::{ButtonPort, ButtonStatus, Edge, RgbLed};
pub use button::ButtonHandler;
pub use config::{BlinkConfig, ConfigError};
pub use consumer::Consumer;
pub use debounce::{DebouncePolicy, Debouncer};
pub use kernel::{Kernel, Priority, QueueFull, SignalQueue, SpawnError, TaskSpec};
pub use producer::Producer;
pub use rate::{RateFactor, RateLimits};
pub use slot::SignalSlot;
pub use time::{TickDuration, TickInstant, TimeDuration, TimeInstant, TimeSource};
pub use types::{
    BLINK_SIGNAL, BlinkError, ButtonEvent, CONSUMER_PARAMETER, PRODUCER_PARAMETER, RateButton,
    SignalOutcome,
};

pub const COLOR_OFF: Srgb = Srgb::new(0.0, 0.0, 0.0);
pub const RED: Srgb = Srgb::new(1.0, 0.0, 0.0);
pub const GREEN: Srgb = Srgb::new(0.0, 1.0, 0.0);
pub const BLUE: Srgb = Srgb::new(0.0, 0.0, 1.0);
