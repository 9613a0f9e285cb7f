use serde::{Deserialize, Serialize};

use super::plot::GardenPlot;
use crate::events::Growth;

/// How a completed work session turns into progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "profile", rename_all = "lowercase")]
pub enum GrowthPolicy {
    /// Grow the first unfinished plot by one stage; stop once all are mature.
    Staged { garden_size: usize, max_stage: u32 },
    /// Add one to an unbounded plant count.
    Flat,
}

impl GrowthPolicy {
    /// Six plots growing soil -> seed -> sprout -> tree.
    pub fn staged() -> Self {
        GrowthPolicy::Staged {
            garden_size: 6,
            max_stage: 3,
        }
    }

    /// Durable key used when the configuration does not override it.
    pub fn default_storage_key(&self) -> &'static str {
        match self {
            GrowthPolicy::Staged { .. } => "farmData",
            GrowthPolicy::Flat => "plantCount",
        }
    }

    /// The garden used on first run or when stored data is unusable.
    pub fn default_garden(&self) -> Garden {
        match *self {
            GrowthPolicy::Staged { garden_size, .. } => {
                Garden::Plots((0..garden_size).map(|_| GardenPlot::seedbed()).collect())
            }
            GrowthPolicy::Flat => Garden::Count(0),
        }
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self::staged()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Garden {
    Plots(Vec<GardenPlot>),
    Count(u64),
}

impl Garden {
    /// Apply one growth event. Returns `None` when every plot is mature.
    ///
    /// `max_stage` only matters for plot gardens.
    pub fn grow(&mut self, max_stage: u32) -> Option<Growth> {
        match self {
            Garden::Plots(plots) => {
                let (index, plot) = plots
                    .iter_mut()
                    .enumerate()
                    .find(|(_, p)| !p.is_mature(max_stage))?;
                plot.stage += 1;
                Some(Growth::Plot {
                    index,
                    id: plot.id,
                    stage: plot.stage,
                })
            }
            Garden::Count(count) => {
                *count = count.saturating_add(1);
                Some(Growth::Count { count: *count })
            }
        }
    }

    /// Total growth events absorbed so far.
    pub fn progress(&self) -> u64 {
        match self {
            Garden::Plots(plots) => plots.iter().map(|p| u64::from(p.stage)).sum(),
            Garden::Count(count) => *count,
        }
    }

    pub fn is_full(&self, max_stage: u32) -> bool {
        match self {
            Garden::Plots(plots) => plots.iter().all(|p| p.is_mature(max_stage)),
            Garden::Count(_) => false,
        }
    }

    pub fn plots(&self) -> &[GardenPlot] {
        match self {
            Garden::Plots(plots) => plots,
            Garden::Count(_) => &[],
        }
    }
}
