pub mod config;
pub mod garden;
pub mod run;
pub mod simulate;

use clap::Args;
use pomogarden_core::{Config, Database, GardenStore, SessionDurations};

/// Per-invocation overrides of the configured session lengths.
#[derive(Args, Debug, Clone, Default)]
pub struct DurationArgs {
    /// Work session length in seconds
    #[arg(long)]
    pub work_secs: Option<u64>,
    /// Break length in seconds
    #[arg(long)]
    pub break_secs: Option<u64>,
}

impl DurationArgs {
    pub fn resolve(&self, config: &Config) -> SessionDurations {
        let configured = config.durations();
        SessionDurations::new(
            self.work_secs.unwrap_or(configured.work_secs),
            self.break_secs.unwrap_or(configured.break_secs),
        )
    }
}

/// Load the garden the configuration points at.
pub fn open_garden(config: &Config) -> Result<GardenStore<Database>, Box<dyn std::error::Error>> {
    let db = Database::open()?;
    Ok(GardenStore::load(db, config.storage_key(), config.growth_policy()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_take_precedence() {
        let config = Config::default();
        let args = DurationArgs {
            work_secs: Some(5),
            break_secs: None,
        };
        assert_eq!(args.resolve(&config), SessionDurations::new(5, 300));
    }

    #[test]
    fn no_overrides_uses_config() {
        let config = Config::default();
        assert_eq!(DurationArgs::default().resolve(&config), config.durations());
    }
}
