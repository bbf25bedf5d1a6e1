//! statusbar-core: Core traits and logic for the status bar indicators.
//!
//! This crate contains the sink traits, the settings store interface, the
//! event source abstraction, the style resolver and the sink registry.

mod config_store;
mod event;
mod registry;
mod resolver;
mod sink;
mod time_source;

pub use config_store::{read_battery_style, read_clock_config, ConfigStore};
pub use event::{Broadcaster, EventSource, Subscription};
pub use registry::SinkRegistry;
pub use resolver::{resolve_battery_setting, resolve_battery_style, resolve_clock_visibility};
pub use sink::{IconSink, LabelSink, SharedIconSink, SharedLabelSink, SinkError, SinkResult};
pub use time_source::{ClockZone, SystemTimeSource, TimeSource, ZonedTime};

// Re-export types used in trait signatures for convenience
pub use statusbar_types::{BatteryAppearance, BatteryIcon, DisplayText};
