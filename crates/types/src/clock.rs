//! Clock widget configuration types.

use serde::{Deserialize, Serialize};

/// How the AM/PM designator is shown
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum AmPmStyle {
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "small")]
    Small,
    #[serde(rename = "gone")]
    #[default]
    Gone,
}

impl AmPmStyle {
    /// Normalize a stored setting value; unknown values hide the designator
    ///
    /// Out-of-range values (3 and up, or negative) become `Gone`, so the
    /// designator is cut rather than kept at full size as a lenient reader
    /// that only special-cases `Small` and `Gone` would do.
    pub fn from_setting(value: i32) -> Self {
        match value {
            0 => AmPmStyle::Normal,
            1 => AmPmStyle::Small,
            _ => AmPmStyle::Gone,
        }
    }

    pub fn to_setting(self) -> i32 {
        match self {
            AmPmStyle::Normal => 0,
            AmPmStyle::Small => 1,
            AmPmStyle::Gone => 2,
        }
    }
}

/// Where the status bar clock is placed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ClockStyle {
    #[serde(rename = "none")]
    NoClock,
    #[serde(rename = "right")]
    #[default]
    Right,
    #[serde(rename = "center")]
    Center,
}

impl ClockStyle {
    /// Normalize a stored setting value; unknown values hide the clock
    pub fn from_setting(value: i32) -> Self {
        match value {
            1 => ClockStyle::Right,
            2 => ClockStyle::Center,
            _ => ClockStyle::NoClock,
        }
    }

    pub fn to_setting(self) -> i32 {
        match self {
            ClockStyle::NoClock => 0,
            ClockStyle::Right => 1,
            ClockStyle::Center => 2,
        }
    }
}

/// Clock settings read from the config store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockConfig {
    pub am_pm_style: AmPmStyle,
    /// Placement on phone and hybrid devices
    pub clock_style: ClockStyle,
    /// Visibility switch on tablets
    pub show_clock: bool,
    pub use_24_hour: bool,
}

fn default_twelve_hour() -> String {
    "h:mm a".to_string()
}

fn default_twenty_four_hour() -> String {
    "H:mm".to_string()
}

/// Localized base time patterns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalePatterns {
    #[serde(default = "default_twelve_hour")]
    pub twelve_hour: String,
    #[serde(default = "default_twenty_four_hour")]
    pub twenty_four_hour: String,
}

impl Default for LocalePatterns {
    fn default() -> Self {
        Self {
            twelve_hour: default_twelve_hour(),
            twenty_four_hour: default_twenty_four_hour(),
        }
    }
}

impl LocalePatterns {
    pub fn pattern(&self, use_24_hour: bool) -> &str {
        if use_24_hour {
            &self.twenty_four_hour
        } else {
            &self.twelve_hour
        }
    }
}
