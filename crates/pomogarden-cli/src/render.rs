//! Plain-text views of the clock and the garden.

use pomogarden_core::{Event, Garden, Growth, GrowthPolicy, PlantStage, SessionClock};

const GARDEN_COLUMNS: usize = 3;

pub fn clock_line(clock: &SessionClock) -> String {
    let state = if clock.is_running() { "running" } else { "stopped" };
    format!(
        "{:<12} {}  ({state})",
        clock.session_type().label(),
        clock.display()
    )
}

/// Staged gardens as a three-column grid of stage glyphs; flat gardens as a
/// count.
pub fn garden_lines(garden: &Garden, policy: GrowthPolicy) -> Vec<String> {
    let mut lines = vec!["Your Garden".to_string()];
    match garden {
        Garden::Plots(plots) => {
            for row in plots.chunks(GARDEN_COLUMNS) {
                let cells: Vec<String> = row
                    .iter()
                    .map(|p| format!("[{}]", PlantStage::from_stage(p.stage).glyph()))
                    .collect();
                lines.push(cells.join(" "));
            }
            if let GrowthPolicy::Staged { max_stage, .. } = policy {
                let mature = plots.iter().filter(|p| p.is_mature(max_stage)).count();
                lines.push(format!("{mature}/{} plots fully grown", plots.len()));
            }
        }
        Garden::Count(count) => lines.push(format!("Plants grown: {count}")),
    }
    lines
}

/// One-line description of an event for the interactive view.
pub fn event_line(event: &Event) -> Option<String> {
    match event {
        Event::SessionCompleted {
            completed, next, ..
        } => Some(format!(
            "{} complete. Next up: {} (press s to start)",
            completed.label(),
            next.label()
        )),
        Event::GardenGrew { growth, .. } => Some(match growth {
            Growth::Plot { index, stage, .. } => format!(
                "Plot {} grew into a {}",
                index + 1,
                PlantStage::from_stage(*stage).name()
            ),
            Growth::Count { count } => format!("A new plant! ({count} total)"),
        }),
        Event::GardenFull { .. } => Some("Every plot is fully grown".to_string()),
        Event::SessionReset { .. } => Some("Timer reset".to_string()),
        _ => None,
    }
}

pub fn help_lines() -> [&'static str; 4] {
    [
        "s  start / pause",
        "r  reset",
        "g  show garden",
        "q  quit",
    ]
}
