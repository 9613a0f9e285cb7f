use clap::Args;
use pomogarden_core::{Config, Event, GardenTimer, ManualTickSource, SessionClock, TickSource};

use super::{open_garden, DurationArgs};

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of one-second ticks to deliver
    #[arg(long)]
    ticks: u64,
    #[command(flatten)]
    durations: DurationArgs,
    /// Start the next session after each completion instead of stopping
    #[arg(long)]
    auto_start: bool,
}

fn emit(event: &Event) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}

pub fn run(args: SimulateArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let garden = open_garden(config)?;
    let clock = SessionClock::new(args.durations.resolve(config));
    let mut timer = GardenTimer::new(clock, garden, ManualTickSource::new());

    if let Some(event) = timer.start() {
        emit(&event)?;
    }
    for _ in 0..args.ticks {
        if !timer.ticks().is_subscribed() {
            if !args.auto_start {
                break;
            }
            if let Some(event) = timer.start() {
                emit(&event)?;
            }
        }
        let Some(tick) = timer.ticks().next_tick() else {
            break;
        };
        for event in timer.deliver(tick) {
            emit(&event)?;
        }
    }

    emit(&timer.snapshot())?;
    Ok(())
}
