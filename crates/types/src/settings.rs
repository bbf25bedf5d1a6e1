//! Integer settings keys and their defaults.

/// Battery indicator style (see `BatteryStyle`)
pub const STATUS_BAR_BATTERY: &str = "status_bar_battery";
/// AM/PM designator style (see `AmPmStyle`)
pub const STATUS_BAR_AM_PM: &str = "status_bar_am_pm";
/// Clock placement on phones and hybrids (see `ClockStyle`)
pub const STATUS_BAR_CLOCK_STYLE: &str = "status_bar_clock_style";
/// Clock on/off on tablets, 1 = shown
pub const STATUS_BAR_CLOCK: &str = "status_bar_clock";
/// 12 or 24 hour time
pub const TIME_12_24: &str = "time_12_24";

pub const DEFAULT_BATTERY_STYLE: i32 = 0;
pub const DEFAULT_AM_PM_STYLE: i32 = 2;
pub const DEFAULT_CLOCK_STYLE: i32 = 1;
pub const DEFAULT_SHOW_CLOCK: i32 = 1;
pub const DEFAULT_TIME_12_24: i32 = 12;

/// Every key the status bar reads
pub const ALL_KEYS: [&str; 5] = [
    STATUS_BAR_BATTERY,
    STATUS_BAR_AM_PM,
    STATUS_BAR_CLOCK_STYLE,
    STATUS_BAR_CLOCK,
    TIME_12_24,
];
