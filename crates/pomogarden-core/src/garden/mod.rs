//! Persisted growth progress.
//!
//! A garden is either a fixed row of staged plots or a flat plant count,
//! selected by [`GrowthPolicy`]. [`GardenStore`] owns the loaded garden and
//! writes it back to a [`KvStore`](crate::storage::KvStore) after every growth
//! event.

mod codec;
mod model;
mod plot;
mod store;

pub use codec::{decode, encode};
pub use model::{Garden, GrowthPolicy};
pub use plot::{GardenPlot, PlantStage};
pub use store::{FallbackReason, GardenStore, LoadOutcome};
