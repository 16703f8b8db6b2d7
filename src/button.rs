//! The button interrupt handler.
//!
//! [`ButtonHandler::on_interrupt`] is meant to be called from the GPIO port's
//! interrupt vector. It reads and acknowledges the pending status on every
//! call, applies the debounce window and, for an accepted press, scales the
//! shared [`RateFactor`]. It never blocks and does a bounded amount of work.

use defmt_or_log as log;

use crate::board::{ButtonPort, ButtonStatus, Edge};
use crate::debounce::{DebouncePolicy, Debouncer};
use crate::rate::RateFactor;
use crate::time::{TimeInstant, TimeSource};
use crate::types::{ButtonEvent, RateButton};

/// Adjusts the blink rate from button interrupts.
///
/// Owns the button port and the debounce timestamp; nothing else reads
/// either.
pub struct ButtonHandler<'a, I: TimeInstant, T: TimeSource<I>, B: ButtonPort> {
    time_source: &'a T,
    buttons: B,
    rate: &'a RateFactor,
    debouncer: Debouncer<I>,
    rate_step: f32,
}

impl<'a, I: TimeInstant, T: TimeSource<I>, B: ButtonPort> ButtonHandler<'a, I, T, B> {
    /// Creates a handler whose debounce window starts at `start`.
    pub fn new(
        time_source: &'a T,
        buttons: B,
        rate: &'a RateFactor,
        start: I,
        debounce_window: I::Duration,
        debounce_policy: DebouncePolicy,
        rate_step: f32,
    ) -> Self {
        Self {
            time_source,
            buttons,
            rate,
            debouncer: Debouncer::new(start, debounce_window, debounce_policy),
            rate_step,
        }
    }

    /// Configures both buttons to interrupt on a falling edge and enables
    /// the interrupt all the way up to the global mask.
    pub fn configure(&mut self) {
        self.buttons.init_buttons();
        self.buttons.set_interrupt_edge(Edge::Falling);
        self.buttons.enable_interrupt();
        self.buttons.enable_interrupt_line();
        self.buttons.enable_global_interrupts();
    }

    /// Services one button interrupt.
    pub fn on_interrupt(&mut self) -> ButtonEvent {
        // Acknowledge first: a pending status left set re-raises the interrupt
        // as soon as this handler returns.
        let status = self.buttons.read_interrupt_status(true);
        self.buttons.clear_interrupt(status);

        let now = self.time_source.now();
        if !self.debouncer.accept(now) {
            log::trace!("button bounce ignored");
            return ButtonEvent::Bounced;
        }

        let Some(button) = pressed_button(status) else {
            return ButtonEvent::NoButton;
        };

        let rate = self.rate.scale_by(button.multiplier(self.rate_step));
        log::info!("{:?} pressed, rate now {}", button, rate);
        ButtonEvent::RateChanged { button, rate }
    }

    /// Timestamp the debounce window is measured from.
    pub fn last_press(&self) -> I {
        self.debouncer.last_event()
    }

    /// Returns a reference to the button port.
    pub fn buttons(&self) -> &B {
        &self.buttons
    }
}

/// Button A wins when both bits are set.
fn pressed_button(status: ButtonStatus) -> Option<RateButton> {
    if status.contains(ButtonStatus::SLOW_DOWN) {
        Some(RateButton::SlowDown)
    } else if status.contains(ButtonStatus::SPEED_UP) {
        Some(RateButton::SpeedUp)
    } else {
        None
    }
}
