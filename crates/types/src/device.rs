//! Device screen classification.

use serde::{Deserialize, Serialize};

/// Short side, in dp, from which a device gets hybrid treatment
pub const HYBRID_MIN_DP: u32 = 600;
/// Short side, in dp, from which a device is a tablet
pub const TABLET_MIN_DP: u32 = 720;
/// Baseline density that defines one density-independent pixel
pub const DENSITY_DEFAULT: u32 = 160;

/// Coarse screen-size category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    /// Separate status and navigation bars
    #[serde(rename = "phone")]
    Phone,
    /// Phone UI adjusted for larger screens
    #[serde(rename = "hybrid")]
    Hybrid,
    /// Single combined status and navigation bar
    #[serde(rename = "tablet")]
    Tablet,
}

impl DeviceClass {
    pub fn from_short_side_dp(dp: u32) -> Self {
        if dp < HYBRID_MIN_DP {
            DeviceClass::Phone
        } else if dp < TABLET_MIN_DP {
            DeviceClass::Hybrid
        } else {
            DeviceClass::Tablet
        }
    }

    pub fn is_tablet(self) -> bool {
        self == DeviceClass::Tablet
    }
}

fn default_width() -> u32 {
    720
}

fn default_height() -> u32 {
    1280
}

fn default_density() -> u32 {
    320
}

/// Raw display geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMetrics {
    #[serde(default = "default_width")]
    pub width_px: u32,
    #[serde(default = "default_height")]
    pub height_px: u32,
    #[serde(default = "default_density")]
    pub density_dpi: u32,
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self {
            width_px: default_width(),
            height_px: default_height(),
            density_dpi: default_density(),
        }
    }
}

impl DisplayMetrics {
    /// Shorter screen side in density-independent pixels
    pub fn short_side_dp(&self) -> u32 {
        let short = self.width_px.min(self.height_px) as u64;
        let density = self.density_dpi.max(1) as u64;
        (short * DENSITY_DEFAULT as u64 / density) as u32
    }

    pub fn device_class(&self) -> DeviceClass {
        DeviceClass::from_short_side_dp(self.short_side_dp())
    }
}
