//! Integer settings store interface

use crate::event::Subscription;
use statusbar_types::settings::{
    DEFAULT_AM_PM_STYLE, DEFAULT_BATTERY_STYLE, DEFAULT_CLOCK_STYLE, DEFAULT_SHOW_CLOCK,
    DEFAULT_TIME_12_24, STATUS_BAR_AM_PM, STATUS_BAR_BATTERY, STATUS_BAR_CLOCK,
    STATUS_BAR_CLOCK_STYLE, TIME_12_24,
};
use statusbar_types::{AmPmStyle, BatteryStyle, ClockConfig, ClockStyle};

/// Persistent key/value store of integer settings
pub trait ConfigStore {
    /// Read `key`, or `default` when it was never written
    fn get_int(&self, key: &str, default: i32) -> i32;

    /// Write `key` and notify its observers
    fn put_int(&self, key: &str, value: i32);

    /// Observe writes to `key` until the returned handle is released
    fn subscribe(&self, key: &str, on_change: Box<dyn FnMut()>) -> Subscription;
}

/// Current battery style setting
pub fn read_battery_style(store: &dyn ConfigStore) -> BatteryStyle {
    BatteryStyle::from_setting(store.get_int(STATUS_BAR_BATTERY, DEFAULT_BATTERY_STYLE))
}

/// Current clock settings
pub fn read_clock_config(store: &dyn ConfigStore) -> ClockConfig {
    ClockConfig {
        am_pm_style: AmPmStyle::from_setting(store.get_int(STATUS_BAR_AM_PM, DEFAULT_AM_PM_STYLE)),
        clock_style: ClockStyle::from_setting(
            store.get_int(STATUS_BAR_CLOCK_STYLE, DEFAULT_CLOCK_STYLE),
        ),
        show_clock: store.get_int(STATUS_BAR_CLOCK, DEFAULT_SHOW_CLOCK) == 1,
        use_24_hour: store.get_int(TIME_12_24, DEFAULT_TIME_12_24) == 24,
    }
}
