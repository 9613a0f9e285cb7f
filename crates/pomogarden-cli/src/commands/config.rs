use clap::Subcommand;
use pomogarden_core::{Config, CoreError};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "timer.work_secs", "garden.profile")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

/// Everything except `reset` needs the file on disk to have loaded, so a
/// broken file is never overwritten with defaults plus one change.
pub fn run(
    action: ConfigAction,
    loaded: Result<Config, CoreError>,
) -> Result<(), Box<dyn std::error::Error>> {
    let with_config = |loaded: Result<Config, CoreError>| {
        loaded.map_err(|e| format!("{e}\nfix the file or run `pomogarden-cli config reset`"))
    };

    match action {
        ConfigAction::Get { key } => match with_config(loaded)?.get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(format!("unknown key: {key}").into()),
        },
        ConfigAction::Set { key, value } => {
            let mut config = with_config(loaded)?;
            config.set(&key, &value)?;
            println!("ok");
        }
        ConfigAction::List => {
            let json = serde_json::to_string_pretty(&with_config(loaded)?)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
