//! # Pomogarden Core Library
//!
//! Core logic for Pomogarden, a Pomodoro timer that grows a small garden each
//! time a work session completes. The CLI binary is a thin terminal skin over
//! this library.
//!
//! ## Architecture
//!
//! - **Session Clock**: a tick-driven work/break state machine. The caller
//!   delivers one tick per second through a [`TickSource`]
//! - **Garden**: staged plots or a flat plant count, grown once per completed
//!   work session and persisted after every growth event
//! - **Storage**: SQLite key-value store for the garden and TOML-based
//!   configuration
//!
//! ## Key Components
//!
//! - [`SessionClock`]: countdown state machine
//! - [`GardenStore`]: load-or-default garden persistence
//! - [`GardenTimer`]: routes completed work sessions into garden growth
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod garden;
pub mod garden_timer;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, DecodeError, StorageError};
pub use events::{Event, Growth};
pub use garden::{Garden, GardenPlot, GardenStore, GrowthPolicy, LoadOutcome, PlantStage};
pub use garden_timer::GardenTimer;
pub use storage::{Config, Database, GardenProfile, KvStore, MemoryStore};
pub use timer::{
    format_clock, IntervalTickSource, ManualTickSource, SessionClock, SessionDurations,
    SessionType, Tick, TickSource,
};
