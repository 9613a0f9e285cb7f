//! Session clock wired to a garden and a tick source.
//!
//! [`GardenTimer`] is the only place a completed work session turns into a
//! growth event. It also keeps the tick source subscribed exactly while the
//! clock runs.

use chrono::Utc;

use crate::events::Event;
use crate::garden::GardenStore;
use crate::storage::KvStore;
use crate::timer::{SessionClock, SessionType, Tick, TickSource};

pub struct GardenTimer<S: KvStore, T: TickSource> {
    clock: SessionClock,
    garden: GardenStore<S>,
    ticks: T,
}

impl<S: KvStore, T: TickSource> GardenTimer<S, T> {
    pub fn new(clock: SessionClock, garden: GardenStore<S>, ticks: T) -> Self {
        Self {
            clock,
            garden,
            ticks,
        }
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn garden(&self) -> &GardenStore<S> {
        &self.garden
    }

    pub fn ticks(&self) -> &T {
        &self.ticks
    }

    pub fn snapshot(&self) -> Event {
        self.clock.snapshot()
    }

    pub fn start(&mut self) -> Option<Event> {
        let event = self.clock.start()?;
        self.ticks.subscribe();
        Some(event)
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.ticks.cancel();
        self.clock.pause()
    }

    /// Start when stopped, pause when running.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.clock.is_running() {
            self.pause()
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) -> Event {
        self.ticks.cancel();
        self.clock.reset()
    }

    /// Feed one tick from the source. Ticks from a cancelled subscription are
    /// dropped.
    ///
    /// Returns the completion event, followed by the garden's response when a
    /// work session finished.
    pub fn deliver(&mut self, tick: Tick) -> Vec<Event> {
        if !self.ticks.accepts(&tick) {
            tracing::debug!(generation = tick.generation(), "stale tick dropped");
            return Vec::new();
        }

        let Some(completed) = self.clock.tick() else {
            return Vec::new();
        };
        self.ticks.cancel();

        let mut events = Vec::with_capacity(2);
        let work_done = matches!(
            completed,
            Event::SessionCompleted {
                completed: SessionType::Work,
                ..
            }
        );
        events.push(completed);

        if work_done {
            let at = Utc::now();
            events.push(match self.garden.record_growth() {
                Some(growth) => Event::GardenGrew { growth, at },
                None => Event::GardenFull { at },
            });
        }
        events
    }
}
