#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that paces the BeeBot's sprite animation.

use std::time::Duration;

use beebot_core::{Command, Event};

/// Simulated time each animation frame stays on screen.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(250);

/// Timer emitting `AdvanceSprite` commands at a fixed cadence.
#[derive(Debug, Clone)]
pub struct Animation {
    accumulator: Duration,
    frame_interval: Duration,
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL)
    }
}

impl Animation {
    /// Creates a timer that advances the animation once per `frame_interval`.
    #[must_use]
    pub const fn new(frame_interval: Duration) -> Self {
        Self {
            accumulator: Duration::ZERO,
            frame_interval,
        }
    }

    /// Consumes world events and emits at most one `AdvanceSprite` command per call.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                self.accumulator = self.accumulator.saturating_add(*dt);
            }
        }

        if self.frame_interval.is_zero() || self.accumulator < self.frame_interval {
            return;
        }

        self.accumulator -= self.frame_interval;
        out.push(Command::AdvanceSprite);
    }
}
