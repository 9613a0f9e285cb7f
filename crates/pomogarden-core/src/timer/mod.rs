mod clock;
mod session;
mod ticks;

pub use clock::{format_clock, SessionClock};
pub use session::{SessionDurations, SessionType};
pub use ticks::{IntervalTickSource, ManualTickSource, Tick, TickSource};
