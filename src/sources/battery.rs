//! Battery indicator controller
//!
//! Listens to battery broadcasts and the battery style setting and keeps
//! every registered icon and label sink in step.

use crate::core::{
    read_battery_style, resolve_battery_style, ConfigStore, EventSource, SharedIconSink,
    SharedLabelSink, SinkRegistry, Subscription,
};
use log::{debug, warn};
use statusbar_types::settings::STATUS_BAR_BATTERY;
use statusbar_types::{BatteryAppearance, BatteryState, BatteryStrings, BatteryStyle};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Battery broadcast payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryEvent {
    /// Raw level, clamped to 0-100 on receipt
    pub level: i32,
    pub plugged: bool,
}

/// Fans battery state out to registered sinks
pub struct BatteryController {
    store: Rc<dyn ConfigStore>,
    registry: SinkRegistry,
    strings: BatteryStrings,
    state: BatteryState,
    /// Whether a battery broadcast has been seen yet
    has_state: bool,
    style: BatteryStyle,
    _subscriptions: Vec<Subscription>,
}

impl BatteryController {
    /// Create a controller observing the battery style setting and
    /// `battery_events`
    pub fn new(
        store: Rc<dyn ConfigStore>,
        battery_events: &dyn EventSource<BatteryEvent>,
        strings: BatteryStrings,
    ) -> Rc<RefCell<Self>> {
        let style = read_battery_style(store.as_ref());
        let controller = Rc::new(RefCell::new(Self {
            store: Rc::clone(&store),
            registry: SinkRegistry::new(),
            strings,
            state: BatteryState::default(),
            has_state: false,
            style,
            _subscriptions: Vec::new(),
        }));

        let weak = Rc::downgrade(&controller);
        let settings_sub = store.subscribe(
            STATUS_BAR_BATTERY,
            Box::new(move || with_controller(&weak, |c| c.on_config_changed())),
        );

        let weak = Rc::downgrade(&controller);
        let battery_sub = battery_events.subscribe(Box::new(move |event: &BatteryEvent| {
            with_controller(&weak, |c| c.on_device_state_changed(event.level, event.plugged))
        }));

        controller.borrow_mut()._subscriptions = vec![settings_sub, battery_sub];
        debug!("Battery controller created with style {:?}", style);
        controller
    }

    pub fn register_icon_sink(&mut self, sink: SharedIconSink) {
        self.registry.register_icon_sink(sink);
    }

    pub fn register_label_sink(&mut self, sink: SharedLabelSink) {
        self.registry.register_label_sink(sink);
    }

    pub fn state(&self) -> BatteryState {
        self.state
    }

    pub fn style(&self) -> BatteryStyle {
        self.style
    }

    pub fn strings(&self) -> &BatteryStrings {
        &self.strings
    }

    /// Replace the localized level texts
    ///
    /// Once a level is known the new texts are pushed right away; before
    /// that they apply from the first broadcast.
    pub fn set_strings(&mut self, strings: BatteryStrings) {
        if strings == self.strings {
            return;
        }
        self.strings = strings;
        if self.has_state {
            self.push_level();
        }
    }

    /// What the sinks show for the current style and charging state
    pub fn appearance(&self) -> BatteryAppearance {
        resolve_battery_style(self.style, self.state.plugged)
    }

    /// Handle a battery broadcast
    ///
    /// Level text goes to every sink regardless of style; visibility comes
    /// from the style re-render that follows.
    pub fn on_device_state_changed(&mut self, level: i32, plugged: bool) {
        self.state = BatteryState::from_raw(level, plugged);
        self.has_state = true;
        self.push_level();
        self.render_style();
    }

    /// Re-read the style setting, re-rendering when it changed
    pub fn on_config_changed(&mut self) {
        let style = read_battery_style(self.store.as_ref());
        if style != self.style {
            debug!("Battery style {:?} -> {:?}", self.style, style);
            self.style = style;
            self.render_style();
        }
    }

    fn push_level(&self) {
        let level = self.state.level;
        self.registry.push_level(
            level,
            &self.strings.accessibility(level),
            &self.strings.label(level),
        );
    }

    /// Push the resolved appearance to every sink
    pub fn render_style(&self) {
        self.registry.push_appearance(&self.appearance());
    }
}

fn with_controller<F>(weak: &Weak<RefCell<BatteryController>>, f: F)
where
    F: FnOnce(&mut BatteryController),
{
    let Some(controller) = weak.upgrade() else {
        return;
    };
    match controller.try_borrow_mut() {
        Ok(mut controller) => f(&mut controller),
        Err(_) => warn!("Battery controller busy, dropping re-entrant update"),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SettingsStore;
    use crate::core::Broadcaster;
    use crate::testing::{journal, RecordingIcon, RecordingLabel};
    use statusbar_types::{BatteryIcon, DisplayText};

    struct Fixture {
        store: Rc<SettingsStore>,
        events: Broadcaster<BatteryEvent>,
        controller: Rc<RefCell<BatteryController>>,
    }

    fn fixture(style: i32) -> Fixture {
        let store = Rc::new(SettingsStore::new());
        store.put_int(STATUS_BAR_BATTERY, style);
        let events = Broadcaster::new();
        let controller = BatteryController::new(
            store.clone() as Rc<dyn ConfigStore>,
            &events,
            BatteryStrings::default(),
        );
        Fixture {
            store,
            events,
            controller,
        }
    }

    #[test]
    fn test_normal_unplugged_scenario() {
        let f = fixture(0);
        let log = journal();
        let icon = RecordingIcon::new("icon", &log);
        let label = RecordingLabel::new("label", &log);
        f.controller.borrow_mut().register_icon_sink(icon.clone());
        f.controller.borrow_mut().register_label_sink(label.clone());

        f.events.emit(&BatteryEvent {
            level: 42,
            plugged: false,
        });

        assert_eq!(icon.visible.get(), Some(true));
        assert_eq!(label.visible.get(), Some(false));
        assert_eq!(icon.icon.get(), Some(BatteryIcon::Normal));
        assert_eq!(icon.level.get(), Some(42));
        assert_eq!(
            icon.accessibility.borrow().as_deref(),
            Some("Battery 42 percent.")
        );
        // Label text is set even while hidden
        assert_eq!(label.last_text(), Some(DisplayText::plain("42")));
    }

    #[test]
    fn test_text_plugged_scenario() {
        let f = fixture(1);
        let log = journal();
        let icon = RecordingIcon::new("icon", &log);
        let label = RecordingLabel::new("label", &log);
        f.controller.borrow_mut().register_icon_sink(icon.clone());
        f.controller.borrow_mut().register_label_sink(label.clone());

        f.events.emit(&BatteryEvent {
            level: 5,
            plugged: true,
        });

        assert_eq!(icon.visible.get(), Some(true));
        assert_eq!(label.visible.get(), Some(true));
        assert_eq!(icon.icon.get(), Some(BatteryIcon::ChargeMin));
        assert_eq!(label.last_text(), Some(DisplayText::plain("5")));
    }

    #[test]
    fn test_level_push_precedes_style_push_in_registration_order() {
        let f = fixture(0);
        let log = journal();
        f.controller
            .borrow_mut()
            .register_icon_sink(RecordingIcon::new("i1", &log));
        f.controller
            .borrow_mut()
            .register_icon_sink(RecordingIcon::new("i2", &log));
        f.controller
            .borrow_mut()
            .register_label_sink(RecordingLabel::new("l1", &log));

        f.events.emit(&BatteryEvent {
            level: 70,
            plugged: false,
        });

        assert_eq!(
            *log.borrow(),
            vec![
                "i1.level", "i1.a11y", "i2.level", "i2.a11y", "l1.text", "i1.visible", "i1.icon",
                "i2.visible", "i2.icon", "l1.visible",
            ]
        );
    }

    #[test]
    fn test_config_change_rerenders_only_on_difference() {
        let f = fixture(0);
        let log = journal();
        let icon = RecordingIcon::new("icon", &log);
        f.controller.borrow_mut().register_icon_sink(icon.clone());

        f.store.put_int(STATUS_BAR_BATTERY, 0);
        assert!(log.borrow().is_empty());

        f.store.put_int(STATUS_BAR_BATTERY, 3);
        assert_eq!(f.controller.borrow().style(), BatteryStyle::Bar);
        assert_eq!(icon.icon.get(), Some(BatteryIcon::NormalBar));

        f.store.put_int(STATUS_BAR_BATTERY, 99);
        assert_eq!(icon.visible.get(), Some(false));
    }

    #[test]
    fn test_render_is_idempotent() {
        let f = fixture(2);
        let log = journal();
        let icon = RecordingIcon::new("icon", &log);
        let label = RecordingLabel::new("label", &log);
        f.controller.borrow_mut().register_icon_sink(icon.clone());
        f.controller.borrow_mut().register_label_sink(label.clone());

        f.controller.borrow().render_style();
        let once = (icon.visible.get(), icon.icon.get(), label.visible.get());
        f.controller.borrow().render_style();
        let twice = (icon.visible.get(), icon.icon.get(), label.visible.get());

        assert_eq!(once, twice);
        assert_eq!(once, (Some(true), Some(BatteryIcon::NormalCircle), Some(false)));
    }

    #[test]
    fn test_late_sink_gets_next_push_only() {
        let f = fixture(0);
        let log = journal();
        f.events.emit(&BatteryEvent {
            level: 10,
            plugged: false,
        });

        let icon = RecordingIcon::new("late", &log);
        f.controller.borrow_mut().register_icon_sink(icon.clone());
        assert_eq!(icon.level.get(), None);

        f.events.emit(&BatteryEvent {
            level: 11,
            plugged: true,
        });
        assert_eq!(icon.level.get(), Some(11));
        assert_eq!(icon.icon.get(), Some(BatteryIcon::Charge));
    }

    #[test]
    fn test_unavailable_sink_is_skipped() {
        let f = fixture(0);
        let log = journal();
        let dead = RecordingIcon::new("dead", &log);
        dead.available.set(false);
        let alive = RecordingIcon::new("alive", &log);
        f.controller.borrow_mut().register_icon_sink(dead);
        f.controller.borrow_mut().register_icon_sink(alive.clone());

        f.events.emit(&BatteryEvent {
            level: 64,
            plugged: false,
        });

        assert_eq!(alive.level.get(), Some(64));
        assert_eq!(alive.visible.get(), Some(true));
    }

    #[test]
    fn test_out_of_range_level_is_clamped() {
        let f = fixture(0);
        f.events.emit(&BatteryEvent {
            level: 250,
            plugged: false,
        });
        assert_eq!(f.controller.borrow().state().level, 100);
    }

    #[test]
    fn test_new_strings_pushed_for_known_level() {
        let f = fixture(1);
        let log = journal();
        let icon = RecordingIcon::new("icon", &log);
        let label = RecordingLabel::new("label", &log);
        f.controller.borrow_mut().register_icon_sink(icon.clone());
        f.controller.borrow_mut().register_label_sink(label.clone());

        f.events.emit(&BatteryEvent {
            level: 42,
            plugged: false,
        });
        f.controller.borrow_mut().set_strings(BatteryStrings {
            label_format: "{level}%".to_string(),
            accessibility_format: "Akku {level} Prozent.".to_string(),
        });

        assert_eq!(label.last_text(), Some(DisplayText::plain("42%")));
        assert_eq!(
            icon.accessibility.borrow().as_deref(),
            Some("Akku 42 Prozent.")
        );
    }

    #[test]
    fn test_new_strings_before_first_level_wait_for_broadcast() {
        let f = fixture(1);
        let log = journal();
        let label = RecordingLabel::new("label", &log);
        f.controller.borrow_mut().register_label_sink(label.clone());

        f.controller.borrow_mut().set_strings(BatteryStrings {
            label_format: "{level}%".to_string(),
            ..BatteryStrings::default()
        });
        assert_eq!(label.text_count(), 0);

        f.events.emit(&BatteryEvent {
            level: 7,
            plugged: true,
        });
        assert_eq!(label.last_text(), Some(DisplayText::plain("7%")));
    }

    #[test]
    fn test_dropping_controller_unsubscribes() {
        let f = fixture(0);
        assert_eq!(f.events.subscriber_count(), 1);
        drop(f.controller);
        assert_eq!(f.events.subscriber_count(), 0);
        f.store.put_int(STATUS_BAR_BATTERY, 1);
    }
}
