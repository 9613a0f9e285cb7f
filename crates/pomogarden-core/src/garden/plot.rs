use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One cell of a staged garden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GardenPlot {
    pub id: Uuid,
    pub stage: u32,
}

impl GardenPlot {
    /// A bare plot with a fresh identifier.
    pub fn seedbed() -> Self {
        Self {
            id: Uuid::new_v4(),
            stage: 0,
        }
    }

    pub fn is_mature(&self, max_stage: u32) -> bool {
        self.stage >= max_stage
    }
}

/// Named growth stages of the default four-stage garden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantStage {
    Soil,
    Seed,
    Sprout,
    Tree,
}

impl PlantStage {
    pub const ALL: [PlantStage; 4] = [
        PlantStage::Soil,
        PlantStage::Seed,
        PlantStage::Sprout,
        PlantStage::Tree,
    ];

    /// Stages past the last name render as the last name.
    pub fn from_stage(stage: u32) -> Self {
        let idx = (stage as usize).min(Self::ALL.len() - 1);
        Self::ALL[idx]
    }

    pub fn name(self) -> &'static str {
        match self {
            PlantStage::Soil => "soil",
            PlantStage::Seed => "seed",
            PlantStage::Sprout => "sprout",
            PlantStage::Tree => "tree",
        }
    }

    /// Single-character glyph for terminal rendering.
    pub fn glyph(self) -> char {
        match self {
            PlantStage::Soil => '.',
            PlantStage::Seed => 'o',
            PlantStage::Sprout => 'v',
            PlantStage::Tree => 'Y',
        }
    }
}
