use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timer::SessionType;

/// Every state change in the system produces an Event.
/// Renderers print or forward them; nothing else observes clock state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        session_type: SessionType,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SessionPaused {
        session_type: SessionType,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SessionReset {
        at: DateTime<Utc>,
    },
    /// A countdown hit zero. The clock is stopped and primed for `next`.
    SessionCompleted {
        completed: SessionType,
        next: SessionType,
        next_duration_secs: u64,
        at: DateTime<Utc>,
    },
    GardenGrew {
        growth: Growth,
        at: DateTime<Utc>,
    },
    /// A work session completed but every plot is already fully grown.
    GardenFull {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        session_type: SessionType,
        running: bool,
        remaining_secs: u64,
        display: String,
        at: DateTime<Utc>,
    },
}

/// The single mutation applied to a garden by one growth event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Growth {
    Plot { index: usize, id: Uuid, stage: u32 },
    Count { count: u64 },
}
