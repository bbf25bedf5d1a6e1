//! Battery indicator configuration types.

use serde::{Deserialize, Serialize};

/// Battery indicator style, stored as an integer setting
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum BatteryStyle {
    #[serde(rename = "normal")]
    #[default]
    Normal,
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "circle")]
    Circle,
    #[serde(rename = "bar")]
    Bar,
    #[serde(rename = "fatty")]
    Fatty,
    #[serde(rename = "digital")]
    Digital,
    #[serde(rename = "gone")]
    Gone,
}

impl BatteryStyle {
    pub const ALL: [BatteryStyle; 7] = [
        BatteryStyle::Normal,
        BatteryStyle::Text,
        BatteryStyle::Circle,
        BatteryStyle::Bar,
        BatteryStyle::Fatty,
        BatteryStyle::Digital,
        BatteryStyle::Gone,
    ];

    /// Normalize a stored setting value.
    ///
    /// Values without a matching style hide the indicator, the same as `Gone`.
    pub fn from_setting(value: i32) -> Self {
        match value {
            0 => BatteryStyle::Normal,
            1 => BatteryStyle::Text,
            2 => BatteryStyle::Circle,
            3 => BatteryStyle::Bar,
            4 => BatteryStyle::Fatty,
            5 => BatteryStyle::Digital,
            _ => BatteryStyle::Gone,
        }
    }

    pub fn to_setting(self) -> i32 {
        match self {
            BatteryStyle::Normal => 0,
            BatteryStyle::Text => 1,
            BatteryStyle::Circle => 2,
            BatteryStyle::Bar => 3,
            BatteryStyle::Fatty => 4,
            BatteryStyle::Digital => 5,
            BatteryStyle::Gone => 6,
        }
    }
}

/// Battery icon variants, one normal and one charging image per style
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum BatteryIcon {
    #[default]
    Normal,
    Charge,
    NormalMin,
    ChargeMin,
    NormalCircle,
    ChargeCircle,
    NormalBar,
    ChargeBar,
    NormalFatty,
    ChargeFatty,
    NormalDigital,
    ChargeDigital,
}

impl BatteryIcon {
    /// Resource name of the icon image
    pub fn resource_name(self) -> &'static str {
        match self {
            BatteryIcon::Normal => "stat_sys_battery",
            BatteryIcon::Charge => "stat_sys_battery_charge",
            BatteryIcon::NormalMin => "stat_sys_battery_min",
            BatteryIcon::ChargeMin => "stat_sys_battery_charge_min",
            BatteryIcon::NormalCircle => "stat_sys_battery_circle",
            BatteryIcon::ChargeCircle => "stat_sys_battery_charge_circle",
            BatteryIcon::NormalBar => "stat_sys_battery_bar",
            BatteryIcon::ChargeBar => "stat_sys_battery_charge_bar",
            BatteryIcon::NormalFatty => "stat_sys_battery_fatty",
            BatteryIcon::ChargeFatty => "stat_sys_battery_charge_fatty",
            BatteryIcon::NormalDigital => "stat_sys_battery_digital",
            BatteryIcon::ChargeDigital => "stat_sys_battery_charge_digital",
        }
    }
}

/// Last known battery state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatteryState {
    /// Charge level in percent (0-100)
    pub level: u8,
    pub plugged: bool,
}

impl BatteryState {
    /// Build a state from a raw broadcast level, clamping into 0-100
    pub fn from_raw(level: i32, plugged: bool) -> Self {
        Self {
            level: level.clamp(0, 100) as u8,
            plugged,
        }
    }
}

/// What the battery sinks should show for a style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryAppearance {
    pub icon_visible: bool,
    pub label_visible: bool,
    pub icon: BatteryIcon,
}

impl BatteryAppearance {
    /// Both sinks hidden
    pub const HIDDEN: BatteryAppearance = BatteryAppearance {
        icon_visible: false,
        label_visible: false,
        icon: BatteryIcon::Normal,
    };
}

fn default_label_format() -> String {
    "{level}".to_string()
}

fn default_accessibility_format() -> String {
    "Battery {level} percent.".to_string()
}

/// Localized battery level strings. `{level}` is replaced with the level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryStrings {
    #[serde(default = "default_label_format")]
    pub label_format: String,
    #[serde(default = "default_accessibility_format")]
    pub accessibility_format: String,
}

impl Default for BatteryStrings {
    fn default() -> Self {
        Self {
            label_format: default_label_format(),
            accessibility_format: default_accessibility_format(),
        }
    }
}

impl BatteryStrings {
    pub fn label(&self, level: u8) -> String {
        self.label_format.replace("{level}", &level.to_string())
    }

    pub fn accessibility(&self, level: u8) -> String {
        self.accessibility_format
            .replace("{level}", &level.to_string())
    }
}
