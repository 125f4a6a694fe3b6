//! Poll cadence sources

use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, Interval, MissedTickBehavior};

/// Drives the monitor's polling. Returns `false` once no more ticks
/// will arrive.
#[async_trait]
pub trait TickSource: Send {
    async fn tick(&mut self) -> bool;
}

/// Fixed-interval ticks. The first tick completes immediately; ticks
/// missed while a poll is still in flight are skipped, not queued.
pub struct IntervalTicks {
    interval: Interval,
}

impl IntervalTicks {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }
}

#[async_trait]
impl TickSource for IntervalTicks {
    async fn tick(&mut self) -> bool {
        self.interval.tick().await;
        true
    }
}

/// Externally driven ticks, one per message; ends when all senders drop
#[async_trait]
impl TickSource for mpsc::Receiver<()> {
    async fn tick(&mut self) -> bool {
        self.recv().await.is_some()
    }
}
