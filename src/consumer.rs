//! The LED-driving consumer.

use defmt_or_log as log;
use palette::Srgb;

use crate::board::RgbLed;
use crate::kernel::{Kernel, SignalQueue};
use crate::rate::RateFactor;
use crate::time::TimeInstant;
use crate::types::{BLINK_SIGNAL, SignalOutcome};

/// Turns each received [`BLINK_SIGNAL`] into one LED blink.
///
/// The on-duration uses the rate sampled when the signal arrives. This can
/// differ from the rate the producer used for the same period if a button is
/// pressed in between; the two are not reconciled.
pub struct Consumer<'a, I: TimeInstant, K: Kernel<I>, L: RgbLed> {
    kernel: &'a K,
    queue: &'a K::Queue,
    rate: &'a RateFactor,
    led: L,
    base_on_duration: I::Duration,
    on_color: Srgb,
    off_color: Srgb,
}

impl<'a, I: TimeInstant, K: Kernel<I>, L: RgbLed> Consumer<'a, I, K, L> {
    pub fn new(
        kernel: &'a K,
        queue: &'a K::Queue,
        rate: &'a RateFactor,
        led: L,
        base_on_duration: I::Duration,
        on_color: Srgb,
        off_color: Srgb,
    ) -> Self {
        Self {
            kernel,
            queue,
            rate,
            led,
            base_on_duration,
            on_color,
            off_color,
        }
    }

    /// The LED-on hold the consumer would use for a signal received now.
    pub fn on_duration(&self) -> I::Duration {
        self.rate.scale(self.base_on_duration)
    }

    /// Acts on one received signal.
    ///
    /// For [`BLINK_SIGNAL`], drives the LED to the on color, sleeps for the
    /// scaled on-duration, then drives it to the off color. Any other value is
    /// ignored.
    pub fn handle_signal(&mut self, signal: u32) -> SignalOutcome {
        if signal != BLINK_SIGNAL {
            log::warn!("ignoring unexpected signal {}", signal);
            return SignalOutcome::Ignored(signal);
        }

        let hold = self.on_duration();
        self.led.set_color(self.on_color);
        self.kernel.sleep_for(hold);
        self.led.set_color(self.off_color);
        SignalOutcome::Blinked
    }

    /// Blocks for the next signal and handles it.
    pub fn step(&mut self) -> SignalOutcome {
        let signal = self.queue.receive();
        self.handle_signal(signal)
    }

    /// Runs forever.
    pub fn run(mut self) -> ! {
        log::info!("consumer task started");
        loop {
            self.step();
        }
    }

    /// Returns a reference to the LED.
    pub fn led(&self) -> &L {
        &self.led
    }
}
