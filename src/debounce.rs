//! Time-window filter for button interrupts.

use crate::time::{TimeDuration, TimeInstant};

/// When the debounce window restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebouncePolicy {
    /// Every interrupt, accepted or not, restarts the window.
    ///
    /// A burst of edges spaced closer than the window keeps postponing the
    /// next accepted press for as long as it lasts.
    #[default]
    RestartOnEveryEdge,

    /// Only accepted presses restart the window.
    RestartOnAccepted,
}

/// Rejects events that arrive within `window` of the previous one.
#[derive(Clone, Copy)]
pub struct Debouncer<I: TimeInstant> {
    last_event: I,
    window: I::Duration,
    policy: DebouncePolicy,
}

impl<I: TimeInstant> Debouncer<I> {
    /// Creates a debouncer whose window starts at `start`.
    pub fn new(start: I, window: I::Duration, policy: DebouncePolicy) -> Self {
        Self {
            last_event: start,
            window,
            policy,
        }
    }

    /// Records an event at `now`, returning true if it should be acted on.
    ///
    /// An event is accepted when strictly more than `window` has elapsed
    /// since the recorded timestamp.
    pub fn accept(&mut self, now: I) -> bool {
        let elapsed = now.duration_since(self.last_event);
        let accepted = elapsed.as_millis() > self.window.as_millis();

        if accepted || self.policy == DebouncePolicy::RestartOnEveryEdge {
            self.last_event = now;
        }
        accepted
    }

    /// Timestamp of the last event that restarted the window.
    pub fn last_event(&self) -> I {
        self.last_event
    }

    pub fn policy(&self) -> DebouncePolicy {
        self.policy
    }
}
