//! The periodic signal producer.
//!
//! Wakes on an absolute schedule, `next = previous + base_period * rate`, and
//! sends [`BLINK_SIGNAL`] to the consumer after every wake. The rate is
//! re-read each period, so button presses change the schedule from the next
//! period on. Because the wake time is derived from the previous wake time
//! rather than from "now", time spent sending does not accumulate as drift.

use defmt_or_log as log;

use crate::kernel::{Kernel, QueueFull, SignalQueue};
use crate::rate::RateFactor;
use crate::time::TimeInstant;
use crate::types::{BLINK_SIGNAL, BlinkError};

/// Sends one [`BLINK_SIGNAL`] per scaled period.
pub struct Producer<'a, I: TimeInstant, K: Kernel<I>> {
    kernel: &'a K,
    queue: &'a K::Queue,
    rate: &'a RateFactor,
    base_period: I::Duration,
    last_wake: Option<I>,
}

impl<'a, I: TimeInstant, K: Kernel<I>> Producer<'a, I, K> {
    pub fn new(
        kernel: &'a K,
        queue: &'a K::Queue,
        rate: &'a RateFactor,
        base_period: I::Duration,
    ) -> Self {
        Self {
            kernel,
            queue,
            rate,
            base_period,
            last_wake: None,
        }
    }

    /// The period the producer would use if it computed its next wake now.
    pub fn effective_period(&self) -> I::Duration {
        self.rate.scale(self.base_period)
    }

    /// The most recent wake time, if one has been computed.
    pub fn last_wake(&self) -> Option<I> {
        self.last_wake
    }

    /// Computes and records the next absolute wake time.
    ///
    /// The first call seeds the schedule from the kernel's current time.
    ///
    /// # Errors
    /// `TimerOverflow` if the instant type cannot represent the result.
    pub fn next_wake(&mut self) -> Result<I, BlinkError> {
        let previous = match self.last_wake {
            Some(wake) => wake,
            None => self.kernel.now(),
        };
        let wake = previous
            .checked_add(self.effective_period())
            .ok_or(BlinkError::TimerOverflow)?;

        self.last_wake = Some(wake);
        Ok(wake)
    }

    /// Runs one period: sleep until the next wake time, then send the signal.
    ///
    /// # Errors
    /// * `QueueFull` - The consumer has not drained the previous signal
    /// * `TimerOverflow` - See [`next_wake`](Self::next_wake)
    pub fn step(&mut self) -> Result<(), BlinkError> {
        let wake = self.next_wake()?;
        self.kernel.sleep_until(wake);

        self.queue.try_send(BLINK_SIGNAL).map_err(|QueueFull(_)| BlinkError::QueueFull)?;
        log::trace!("signal sent");
        Ok(())
    }

    /// Runs forever.
    ///
    /// # Panics
    /// Panics on any error from [`step`](Self::step); each one means the
    /// single-slot queue invariant no longer holds.
    pub fn run(mut self) -> ! {
        log::info!("producer task started");
        loop {
            if let Err(err) = self.step() {
                log::error!("producer stopped: {}", err);
                panic!("producer: {}", err);
            }
        }
    }
}
