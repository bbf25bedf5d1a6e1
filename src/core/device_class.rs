//! Process-wide device classification
//!
//! The class is computed from the display once and never recomputed.
//! Widgets take it as a constructor argument; this cell is only where the
//! host keeps the single computed value.

use log::info;
use once_cell::sync::OnceCell;
use statusbar_types::{DeviceClass, DisplayMetrics};

static DEVICE_CLASS: OnceCell<DeviceClass> = OnceCell::new();

/// Get the device class, classifying `metrics` on first use
pub fn device_class_or_init<F>(metrics: F) -> DeviceClass
where
    F: FnOnce() -> DisplayMetrics,
{
    *DEVICE_CLASS.get_or_init(|| {
        let metrics = metrics();
        let class = metrics.device_class();
        info!(
            "Device class {:?} ({}dp short side)",
            class,
            metrics.short_side_dp()
        );
        class
    })
}

/// The device class, if it has been computed
pub fn device_class() -> Option<DeviceClass> {
    DEVICE_CLASS.get().copied()
}
