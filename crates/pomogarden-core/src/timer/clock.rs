//! Session clock implementation.
//!
//! The clock is a tick-driven state machine. It does not own a timer thread -
//! the caller delivers one `tick()` per elapsed second while it is running.
//!
//! ## State Transitions
//!
//! ```text
//! Work(running) --0s--> Break(stopped) --start--> Break(running) --0s--> Work(stopped)
//! ```
//!
//! A countdown shows `00:00` for one tick; the tick after that processes the
//! completion. The clock never continues into the next session on its own.
//!
//! ## Usage
//!
//! ```ignore
//! let mut clock = SessionClock::new(SessionDurations::new(5, 2));
//! clock.start();
//! // Once per second:
//! if let Some(Event::SessionCompleted { completed, .. }) = clock.tick() { /* ... */ }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::session::{SessionDurations, SessionType};
use crate::events::Event;

/// Countdown state and work/break alternation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClock {
    durations: SessionDurations,
    session_type: SessionType,
    remaining_secs: u64,
    running: bool,
}

impl SessionClock {
    /// Create a stopped clock primed for a work session.
    pub fn new(durations: SessionDurations) -> Self {
        Self {
            durations,
            session_type: SessionType::Work,
            remaining_secs: durations.work_secs,
            running: false,
        }
    }

    /// Rebuild a stopped clock at an arbitrary point of a session.
    pub fn at(durations: SessionDurations, session_type: SessionType, remaining_secs: u64) -> Self {
        Self {
            durations,
            session_type,
            remaining_secs,
            running: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn session_type(&self) -> SessionType {
        self.session_type
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn durations(&self) -> SessionDurations {
        self.durations
    }

    /// `MM:SS` rendering of the remaining time.
    pub fn display(&self) -> String {
        format_clock(self.remaining_secs)
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            session_type: self.session_type,
            running: self.running,
            remaining_secs: self.remaining_secs,
            display: self.display(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Returns `None` when the clock was already running.
    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        Some(Event::SessionStarted {
            session_type: self.session_type,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Returns `None` when the clock was already stopped.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::SessionPaused {
            session_type: self.session_type,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn reset(&mut self) -> Event {
        self.running = false;
        self.session_type = SessionType::Work;
        self.remaining_secs = self.durations.work_secs;
        Event::SessionReset { at: Utc::now() }
    }

    /// Advance one second. Returns `Some(Event::SessionCompleted)` on the tick
    /// that finds the countdown already at zero.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        if self.remaining_secs > 0 {
            self.remaining_secs -= 1;
            tracing::debug!(remaining_secs = self.remaining_secs, "tick");
            return None;
        }

        let completed = self.session_type;
        let next = completed.next();
        self.running = false;
        self.session_type = next;
        self.remaining_secs = self.durations.for_session(next);
        tracing::debug!(?completed, ?next, "session completed");
        Some(Event::SessionCompleted {
            completed,
            next,
            next_duration_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }
}

/// Format seconds as zero-padded `MM:SS`. Minutes are not wrapped into hours.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
