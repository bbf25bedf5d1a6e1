//! Style resolution: settings in, what to show out

use statusbar_types::{
    BatteryAppearance, BatteryIcon, BatteryStyle, ClockConfig, ClockStyle, DeviceClass,
};

/// Map a battery style and charging state to sink appearance
pub fn resolve_battery_style(style: BatteryStyle, plugged: bool) -> BatteryAppearance {
    let pick = |charge: BatteryIcon, normal: BatteryIcon| if plugged { charge } else { normal };

    let icon_only = |icon: BatteryIcon| BatteryAppearance {
        icon_visible: true,
        label_visible: false,
        icon,
    };

    match style {
        BatteryStyle::Normal => icon_only(pick(BatteryIcon::Charge, BatteryIcon::Normal)),
        BatteryStyle::Text => BatteryAppearance {
            icon_visible: true,
            label_visible: true,
            icon: pick(BatteryIcon::ChargeMin, BatteryIcon::NormalMin),
        },
        BatteryStyle::Circle => {
            icon_only(pick(BatteryIcon::ChargeCircle, BatteryIcon::NormalCircle))
        }
        BatteryStyle::Bar => icon_only(pick(BatteryIcon::ChargeBar, BatteryIcon::NormalBar)),
        BatteryStyle::Fatty => icon_only(pick(BatteryIcon::ChargeFatty, BatteryIcon::NormalFatty)),
        BatteryStyle::Digital => {
            icon_only(pick(BatteryIcon::ChargeDigital, BatteryIcon::NormalDigital))
        }
        BatteryStyle::Gone => BatteryAppearance::HIDDEN,
    }
}

/// Resolve from a raw stored setting value
pub fn resolve_battery_setting(value: i32, plugged: bool) -> BatteryAppearance {
    resolve_battery_style(BatteryStyle::from_setting(value), plugged)
}

/// Whether the clock is shown
///
/// Tablets use the on/off switch; other devices show the clock only in the
/// right-hand slot. `Center` has no slot of its own here.
pub fn resolve_clock_visibility(device: DeviceClass, config: &ClockConfig) -> bool {
    if device.is_tablet() {
        config.show_clock
    } else {
        config.clock_style == ClockStyle::Right
    }
}
