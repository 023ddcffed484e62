#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system holding the BeeBot's instruction memory and replaying it step by step.

use std::time::Duration;

use beebot_core::{Command, Event, Instruction};
use log::{debug, info};

/// Simulated time between two replayed instructions.
pub const DEFAULT_STEP_INTERVAL: Duration = Duration::from_millis(600);

/// Instruction memory that turns a recorded program into `Execute` commands.
#[derive(Debug, Clone)]
pub struct Program {
    instructions: Vec<Instruction>,
    cursor: usize,
    running: bool,
    accumulator: Duration,
    step_interval: Duration,
}

impl Default for Program {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_INTERVAL)
    }
}

impl Program {
    /// Creates an empty program replayed at one instruction per `step_interval`.
    #[must_use]
    pub const fn new(step_interval: Duration) -> Self {
        Self {
            instructions: Vec::new(),
            cursor: 0,
            running: false,
            accumulator: Duration::ZERO,
            step_interval,
        }
    }

    /// Recorded instructions in execution order.
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Whether the program is currently being replayed.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Appends an instruction. Ignored while the program runs.
    pub fn record(&mut self, instruction: Instruction) {
        if self.running {
            debug!("ignoring {instruction:?} while the program runs");
            return;
        }
        self.instructions.push(instruction);
    }

    /// Forgets every recorded instruction and stops replaying.
    pub fn clear(&mut self) {
        self.instructions.clear();
        self.stop();
    }

    /// Starts replaying from the first instruction. Does nothing when memory is empty.
    pub fn start(&mut self) {
        if self.instructions.is_empty() {
            return;
        }
        info!("running program of {} instructions", self.instructions.len());
        self.cursor = 0;
        self.accumulator = Duration::ZERO;
        self.running = true;
    }

    /// Halts replay, keeping the recorded instructions.
    pub fn stop(&mut self) {
        if self.running {
            debug!("program stopped after {} instructions", self.cursor);
        }
        self.running = false;
        self.cursor = 0;
        self.accumulator = Duration::ZERO;
    }

    /// Consumes world events and emits at most one `Execute` command per call.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::TimeAdvanced { dt } if self.running => {
                    self.accumulator = self.accumulator.saturating_add(*dt);
                }
                Event::BeeBotCrashed { .. } | Event::LevelCompleted | Event::LevelReset => {
                    self.stop();
                }
                _ => {}
            }
        }

        if !self.running || self.accumulator < self.step_interval {
            return;
        }
        self.accumulator -= self.step_interval;

        let Some(&instruction) = self.instructions.get(self.cursor) else {
            self.stop();
            return;
        };
        out.push(Command::Execute { instruction });
        self.cursor += 1;
        if self.cursor == self.instructions.len() {
            self.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_without_instructions_does_not_run() {
        let mut program = Program::default();
        program.start();
        assert!(!program.is_running());
    }

    #[test]
    fn recording_is_ignored_while_running() {
        let mut program = Program::default();
        program.record(Instruction::Forward);
        program.start();
        program.record(Instruction::TurnLeft);

        assert_eq!(program.instructions(), &[Instruction::Forward]);
    }

    #[test]
    fn clear_forgets_instructions_and_stops() {
        let mut program = Program::default();
        program.record(Instruction::Forward);
        program.start();
        program.clear();

        assert!(program.instructions().is_empty());
        assert!(!program.is_running());
    }
}
