//! Core traits and types for statusbar-sync

mod device_class;

pub use device_class::{device_class, device_class_or_init};
pub use statusbar_core::{
    read_battery_style, read_clock_config, resolve_battery_setting, resolve_battery_style,
    resolve_clock_visibility, Broadcaster, ClockZone, ConfigStore, EventSource, IconSink,
    LabelSink, SharedIconSink, SharedLabelSink, SinkError, SinkRegistry, SinkResult,
    Subscription, SystemTimeSource, TimeSource, ZonedTime,
};
