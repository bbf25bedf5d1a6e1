//! Indicator sources
//!
//! The battery controller and the clock widget, plus the clock text
//! formatter they share with the host.

mod battery;
mod clock;
mod time_format;

pub use battery::{BatteryController, BatteryEvent};
pub use clock::{ClockEvent, ClockWidget};
pub use time_format::{find_am_pm_span, CompiledFormat, PatternError, TimeFormatter, AM_PM_MARKER};
