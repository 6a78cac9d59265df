//! The device's counter.
//!
//! A free-running counter that advances once per tick while running and
//! reacts to the five panel commands. After every change the value is
//! folded back into `0..limit`: overflowing past the top wraps to zero,
//! going below zero wraps to `limit - 1`.

use crate::ws::messages::Command;

/// Counter value plus run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    count: i64,
    running: bool,
    limit: i64,
}

impl Counter {
    /// Creates a running counter at zero wrapping at `limit`.
    ///
    /// A non-positive `limit` is treated as one.
    #[must_use]
    pub fn new(limit: i64) -> Self {
        Self {
            count: 0,
            running: true,
            limit: limit.max(1),
        }
    }

    /// Returns the current value.
    #[must_use]
    pub const fn count(&self) -> i64 {
        self.count
    }

    /// Returns `true` while ticks advance the counter.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Returns the wrap limit.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.limit
    }

    /// Advances by one if running. Returns `true` if the value changed.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.count += 1;
        self.normalize();
        true
    }

    /// Applies a panel command.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Reset => self.count = 0,
            Command::Increase => self.count += 1,
            Command::Decrease => self.count -= 1,
            Command::Stop => self.running = false,
            Command::Start => self.running = true,
        }
        self.normalize();
    }

    fn normalize(&mut self) {
        if self.count >= self.limit {
            self.count = 0;
        } else if self.count < 0 {
            self.count = self.limit - 1;
        }
    }
}
