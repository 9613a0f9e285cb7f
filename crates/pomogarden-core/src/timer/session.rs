use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Work,
    Break,
}

impl SessionType {
    /// The session that follows this one.
    pub fn next(self) -> Self {
        match self {
            SessionType::Work => SessionType::Break,
            SessionType::Break => SessionType::Work,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SessionType::Work => "Work Session",
            SessionType::Break => "Break",
        }
    }
}

/// Countdown lengths for each session type, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDurations {
    pub work_secs: u64,
    pub break_secs: u64,
}

impl SessionDurations {
    pub fn new(work_secs: u64, break_secs: u64) -> Self {
        Self {
            work_secs,
            break_secs,
        }
    }

    pub fn for_session(&self, session_type: SessionType) -> u64 {
        match session_type {
            SessionType::Work => self.work_secs,
            SessionType::Break => self.break_secs,
        }
    }
}

impl Default for SessionDurations {
    fn default() -> Self {
        Self::new(25 * 60, 5 * 60)
    }
}
