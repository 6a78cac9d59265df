//! Counter service: owns the device counter and broadcasts its value.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;

use crate::domain::{Counter, EventBus};
use crate::ws::messages::{Command, StatusMessage};

/// Coordinator for the device counter.
///
/// Owns the [`Counter`] behind a lock and an [`EventBus`] of status
/// frames that every connected WebSocket client subscribes to.
#[derive(Debug)]
pub struct CounterService {
    counter: RwLock<Counter>,
    status_bus: EventBus<StatusMessage>,
}

impl CounterService {
    /// Creates a service around a fresh counter wrapping at `limit`.
    #[must_use]
    pub fn new(limit: i64, status_bus: EventBus<StatusMessage>) -> Self {
        Self {
            counter: RwLock::new(Counter::new(limit)),
            status_bus,
        }
    }

    /// Returns the status bus.
    #[must_use]
    pub fn status_bus(&self) -> &EventBus<StatusMessage> {
        &self.status_bus
    }

    /// Returns a copy of the counter.
    pub async fn snapshot(&self) -> Counter {
        *self.counter.read().await
    }

    /// Applies a panel command, returning the new count.
    pub async fn apply(&self, command: Command) -> i64 {
        let mut counter = self.counter.write().await;
        counter.apply(command);
        counter.count()
    }

    /// Advances the counter by one tick if it is running.
    pub async fn tick(&self) -> bool {
        self.counter.write().await.tick()
    }

    /// Publishes the current count to every connected client.
    ///
    /// Returns the number of clients the frame reached.
    pub async fn broadcast(&self) -> usize {
        let count = self.counter.read().await.count();
        self.status_bus.publish(StatusMessage::from_count(count))
    }
}

/// Spawns the free-running tick task.
pub fn spawn_ticker(
    service: Arc<CounterService>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // The first tick of an interval fires immediately.
        interval.tick().await;
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    service.tick().await;
                }
                _ = shutdown.changed() => break,
            }
        }
    })
}

/// Spawns the periodic status broadcast task.
pub fn spawn_broadcaster(
    service: Arc<CounterService>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    service.broadcast().await;
                }
                _ = shutdown.changed() => break,
            }
        }
    })
}
