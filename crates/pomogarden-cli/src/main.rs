use clap::{CommandFactory, Parser, Subcommand};
use pomogarden_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "pomogarden-cli", version, about = "Pomogarden CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive timer session (s = start/pause, r = reset, g = garden, q = quit)
    Run(commands::run::RunArgs),
    /// Drive the timer with simulated ticks and print events as JSON lines
    Simulate(commands::simulate::SimulateArgs),
    /// Garden inspection
    Garden {
        #[command(subcommand)]
        action: commands::garden::GardenAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

/// `POMOGARDEN_LOG` wins over the configured level. Logs go to stderr.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_env("POMOGARDEN_LOG")
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let loaded = Config::load();
    let level = loaded
        .as_ref()
        .map(|c| c.log.level.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_tracing(&level);
    let or_default = |loaded: Result<Config, pomogarden_core::CoreError>| {
        loaded.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Config::default()
        })
    };

    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args, &or_default(loaded)),
        Commands::Simulate(args) => commands::simulate::run(args, &or_default(loaded)),
        Commands::Garden { action } => commands::garden::run(action, &or_default(loaded)),
        Commands::Config { action } => commands::config::run(action, loaded),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "pomogarden-cli",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
