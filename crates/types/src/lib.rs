//! statusbar-types: Shared data types for the status bar indicators.
//!
//! This crate contains pure data types (style enums, settings keys, battery
//! state, device classes, display text) shared across the statusbar crates.

pub mod battery;
pub mod clock;
pub mod device;
pub mod settings;
pub mod text;

// Re-export commonly used types at the crate root for convenience
pub use battery::{BatteryAppearance, BatteryIcon, BatteryState, BatteryStrings, BatteryStyle};
pub use clock::{AmPmStyle, ClockConfig, ClockStyle, LocalePatterns};
pub use device::{DeviceClass, DisplayMetrics};
pub use text::{DisplayText, SMALL_RELATIVE_SIZE};
