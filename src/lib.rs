//! statusbar-sync: status bar battery and clock indicators
//!
//! This library keeps status indicators in sync with their inputs:
//! - Battery broadcasts and the battery style setting fanned out to icon
//!   and label sinks
//! - A clock widget rendering locale time patterns with a configurable
//!   AM/PM designator
//! - A JSON settings store with change observers and hot reload

pub mod config;
pub mod core;
pub mod sources;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::{AppConfig, SettingsStore};
pub use core::{ConfigStore, IconSink, LabelSink};
pub use sources::{BatteryController, BatteryEvent, ClockEvent, ClockWidget, TimeFormatter};
