use clap::Args;
use pomogarden_core::{Config, Event, GardenTimer, IntervalTickSource, SessionClock};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{open_garden, DurationArgs};
use crate::render;

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    durations: DurationArgs,
}

pub fn run(args: RunArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(interactive(args, config))
}

async fn interactive(args: RunArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let garden = open_garden(config)?;
    let (ticks, mut tick_rx) = IntervalTickSource::every_second();
    let clock = SessionClock::new(args.durations.resolve(config));
    let mut timer = GardenTimer::new(clock, garden, ticks);

    print_garden(&timer);
    for line in render::help_lines() {
        println!("  {line}");
    }
    println!("{}", render::clock_line(timer.clock()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some(tick) = tick_rx.recv() => {
                let events = timer.deliver(tick);
                if events.is_empty() {
                    if timer.clock().is_running() {
                        println!("{}", render::clock_line(timer.clock()));
                    }
                    continue;
                }
                let grew = events
                    .iter()
                    .any(|e| matches!(e, Event::GardenGrew { .. } | Event::GardenFull { .. }));
                print_events(&events);
                if grew {
                    print_garden(&timer);
                }
                println!("{}", render::clock_line(timer.clock()));
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("stdin closed");
                    break;
                };
                match line.trim() {
                    "s" | "" => {
                        timer.toggle();
                        println!("{}", render::clock_line(timer.clock()));
                    }
                    "r" => {
                        let event = timer.reset();
                        print_events(&[event]);
                        println!("{}", render::clock_line(timer.clock()));
                    }
                    "g" => print_garden(&timer),
                    "q" => break,
                    "h" | "?" => {
                        for line in render::help_lines() {
                            println!("  {line}");
                        }
                    }
                    other => eprintln!("unknown command: {other} (h for help)"),
                }
            }
        }
    }
    Ok(())
}

fn print_events(events: &[Event]) {
    for line in events.iter().filter_map(render::event_line) {
        println!("{line}");
    }
}

fn print_garden(timer: &GardenTimer<pomogarden_core::Database, IntervalTickSource>) {
    let garden = timer.garden();
    for line in render::garden_lines(garden.garden(), garden.policy()) {
        println!("{line}");
    }
}
