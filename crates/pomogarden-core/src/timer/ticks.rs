//! Tick delivery.
//!
//! A [`TickSource`] is subscribed when the clock starts and cancelled when it
//! stops. Every subscription gets a new generation number, and a tick is only
//! accepted for the generation it was produced under, so ticks still queued
//! from a cancelled subscription are dropped instead of double-counting.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// One elapsed second, stamped with the subscription that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    generation: u64,
}

impl Tick {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Periodic one-second source driving a `SessionClock`.
pub trait TickSource {
    /// Begin delivering ticks. No-op while already subscribed.
    fn subscribe(&mut self);

    /// Stop delivering ticks. Idempotent.
    fn cancel(&mut self);

    fn is_subscribed(&self) -> bool;

    /// Current subscription generation.
    fn generation(&self) -> u64;

    /// Whether `tick` belongs to the live subscription.
    fn accepts(&self, tick: &Tick) -> bool {
        self.is_subscribed() && tick.generation == self.generation()
    }
}

/// Ticks produced on demand. Used by tests and the `simulate` command.
#[derive(Debug, Default)]
pub struct ManualTickSource {
    generation: u64,
    subscribed: bool,
}

impl ManualTickSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the next tick, or `None` while cancelled.
    pub fn next_tick(&self) -> Option<Tick> {
        self.subscribed.then_some(Tick {
            generation: self.generation,
        })
    }
}

impl TickSource for ManualTickSource {
    fn subscribe(&mut self) {
        if !self.subscribed {
            self.generation += 1;
            self.subscribed = true;
        }
    }

    fn cancel(&mut self) {
        self.subscribed = false;
    }

    fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}

/// Tokio interval that pushes ticks into an mpsc channel.
///
/// `subscribe()` spawns onto the current tokio runtime and must be called from
/// within one. The first tick arrives one full period after subscribing. Late
/// ticks are delayed, never delivered in a burst.
#[derive(Debug)]
pub struct IntervalTickSource {
    period: Duration,
    sender: mpsc::UnboundedSender<Tick>,
    task: Option<JoinHandle<()>>,
    generation: u64,
}

impl IntervalTickSource {
    /// Build a source and the receiver its ticks arrive on.
    pub fn channel(period: Duration) -> (Self, mpsc::UnboundedReceiver<Tick>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let source = Self {
            period,
            sender,
            task: None,
            generation: 0,
        };
        (source, receiver)
    }

    /// One tick per second.
    pub fn every_second() -> (Self, mpsc::UnboundedReceiver<Tick>) {
        Self::channel(Duration::from_secs(1))
    }
}

impl TickSource for IntervalTickSource {
    fn subscribe(&mut self) {
        if self.task.is_some() {
            return;
        }
        self.generation += 1;

        let generation = self.generation;
        let period = self.period;
        let sender = self.sender.clone();
        self.task = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if sender.send(Tick { generation }).is_err() {
                    break;
                }
            }
        }));
        tracing::debug!(generation, "tick source subscribed");
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!(generation = self.generation, "tick source cancelled");
        }
    }

    fn is_subscribed(&self) -> bool {
        self.task.is_some()
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for IntervalTickSource {
    fn drop(&mut self) {
        self.cancel();
    }
}
