//! Textual form of a garden as kept in the key-value store.
//!
//! Staged gardens are a JSON array of `{"id": "<uuid>", "stage": n}` records,
//! flat gardens are a bare JSON integer.

use super::model::{Garden, GrowthPolicy};
use super::plot::GardenPlot;
use crate::error::DecodeError;

pub fn encode(garden: &Garden) -> Result<String, serde_json::Error> {
    serde_json::to_string(garden)
}

/// Decode `raw` as the representation `policy` expects.
pub fn decode(raw: &str, policy: &GrowthPolicy) -> Result<Garden, DecodeError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DecodeError::Empty);
    }
    match policy {
        GrowthPolicy::Staged { .. } => {
            let plots: Vec<GardenPlot> = serde_json::from_str(raw)?;
            if plots.is_empty() {
                return Err(DecodeError::NoPlots);
            }
            Ok(Garden::Plots(plots))
        }
        GrowthPolicy::Flat => Ok(Garden::Count(serde_json::from_str(raw)?)),
    }
}
