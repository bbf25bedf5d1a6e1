//! Status bar clock
//!
//! Drives the clock text and visibility. Settings are observed for the
//! widget's whole life; time events only while attached.

use super::time_format::TimeFormatter;
use crate::core::{
    read_clock_config, resolve_clock_visibility, ClockZone, ConfigStore, EventSource,
    SharedLabelSink, SinkRegistry, Subscription, TimeSource,
};
use log::{debug, trace, warn};
use statusbar_types::settings::{
    STATUS_BAR_AM_PM, STATUS_BAR_CLOCK, STATUS_BAR_CLOCK_STYLE, TIME_12_24,
};
use statusbar_types::{ClockConfig, DeviceClass, DisplayText, LocalePatterns};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Events the clock reacts to while attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockEvent {
    /// Minute tick
    TimeTick,
    /// Wall clock was set
    TimeChanged,
    /// Time zone changed; `None` means the system default zone
    TimezoneChanged(Option<String>),
    /// Locale or other configuration changed
    ConfigurationChanged,
}

/// Clock widget state machine (detached / attached)
pub struct ClockWidget {
    store: Rc<dyn ConfigStore>,
    time: Rc<dyn TimeSource>,
    patterns: LocalePatterns,
    device: DeviceClass,
    registry: SinkRegistry,
    formatter: TimeFormatter,
    config: ClockConfig,
    /// Host-side gate, ANDed with the settings-derived visibility
    shown: bool,
    visible: bool,
    /// Present while attached
    attachment: Option<Subscription>,
    _settings_subscriptions: Vec<Subscription>,
    self_ref: Weak<RefCell<ClockWidget>>,
}

impl ClockWidget {
    /// Create a detached clock observing the clock settings
    pub fn new(
        store: Rc<dyn ConfigStore>,
        time: Rc<dyn TimeSource>,
        patterns: LocalePatterns,
        device: DeviceClass,
    ) -> Rc<RefCell<Self>> {
        let config = read_clock_config(store.as_ref());
        let zone = time.default_zone();

        let widget = Rc::new_cyclic(|self_ref| {
            RefCell::new(Self {
                store: Rc::clone(&store),
                time,
                patterns,
                device,
                registry: SinkRegistry::new(),
                formatter: TimeFormatter::new(zone),
                config,
                shown: true,
                visible: resolve_clock_visibility(device, &config),
                attachment: None,
                _settings_subscriptions: Vec::new(),
                self_ref: self_ref.clone(),
            })
        });

        let keys = [STATUS_BAR_AM_PM, STATUS_BAR_CLOCK, STATUS_BAR_CLOCK_STYLE, TIME_12_24];
        let subscriptions: Vec<Subscription> = keys
            .into_iter()
            .map(|key| {
                let weak = Rc::downgrade(&widget);
                store.subscribe(
                    key,
                    Box::new(move || with_widget(&weak, |w| w.on_config_changed())),
                )
            })
            .collect();
        widget.borrow_mut()._settings_subscriptions = subscriptions;

        debug!("Clock created for {:?} with {:?}", device, config);
        widget
    }

    /// Add a text sink showing the clock
    pub fn register_label_sink(&mut self, sink: SharedLabelSink) {
        self.registry.register_label_sink(sink);
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn config(&self) -> ClockConfig {
        self.config
    }

    pub fn zone(&self) -> ClockZone {
        self.formatter.zone()
    }

    pub fn formatter(&self) -> &TimeFormatter {
        &self.formatter
    }

    pub fn patterns(&self) -> &LocalePatterns {
        &self.patterns
    }

    /// Replace the localized base patterns, re-rendering when attached
    ///
    /// The formatter recompiles on its own once the selected pattern text
    /// differs from the cached one.
    pub fn set_patterns(&mut self, patterns: LocalePatterns) {
        if patterns == self.patterns {
            return;
        }
        debug!("Clock patterns -> {:?}", patterns);
        self.patterns = patterns;
        if self.is_attached() {
            self.update_clock();
        }
    }

    /// Let the host hide the clock regardless of the clock settings
    pub fn set_shown(&mut self, shown: bool) {
        self.shown = shown;
        self.refresh_visibility();
    }

    /// Start listening to time events and render immediately
    ///
    /// The zone is re-read because it may have changed while detached.
    pub fn attach(&mut self, events: &dyn EventSource<ClockEvent>) {
        if self.attachment.is_none() {
            let weak = self.self_ref.clone();
            self.attachment = Some(events.subscribe(Box::new(move |event: &ClockEvent| {
                with_widget(&weak, |w| w.handle_event(event))
            })));
            debug!("Clock attached");
        }

        self.formatter.set_time_zone(self.time.default_zone());
        self.push_visibility();
        self.update_clock();
    }

    /// Stop listening; returns once the subscription is gone
    pub fn detach(&mut self) {
        if let Some(subscription) = self.attachment.take() {
            subscription.unsubscribe();
            debug!("Clock detached");
        }
    }

    fn handle_event(&mut self, event: &ClockEvent) {
        if !self.is_attached() {
            return;
        }
        trace!("Clock event {:?}", event);

        if let ClockEvent::TimezoneChanged(id) = event {
            let zone = match id {
                Some(id) => ClockZone::from_id(id),
                None => self.time.default_zone(),
            };
            debug!("Clock zone -> {}", zone);
            self.formatter.set_time_zone(zone);
        }
        self.update_clock();
    }

    /// Re-read the clock settings
    pub fn on_config_changed(&mut self) {
        let previous = self.config;
        let config = read_clock_config(self.store.as_ref());
        self.config = config;

        let am_pm_changed = config.am_pm_style != previous.am_pm_style;
        if am_pm_changed {
            debug!("AM/PM style {:?} -> {:?}", previous.am_pm_style, config.am_pm_style);
            self.formatter.invalidate();
        }

        self.refresh_visibility();

        if self.is_attached() && (am_pm_changed || config.use_24_hour != previous.use_24_hour) {
            self.update_clock();
        }
    }

    /// Render the current time
    pub fn current_text(&mut self) -> DisplayText {
        let pattern = self.patterns.pattern(self.config.use_24_hour);
        self.formatter
            .render(self.time.now(), pattern, self.config.am_pm_style)
    }

    /// Render and push the time to every sink
    pub fn update_clock(&mut self) {
        let text = self.current_text();
        self.registry.for_each_label(|sink| sink.set_text(&text));
    }

    fn refresh_visibility(&mut self) {
        let visible = self.shown && resolve_clock_visibility(self.device, &self.config);
        if visible != self.visible {
            self.visible = visible;
            self.push_visibility();
        }
    }

    fn push_visibility(&self) {
        let visible = self.visible;
        self.registry.for_each_label(|sink| sink.set_visible(visible));
    }
}

fn with_widget<F>(weak: &Weak<RefCell<ClockWidget>>, f: F)
where
    F: FnOnce(&mut ClockWidget),
{
    let Some(widget) = weak.upgrade() else {
        return;
    };
    match widget.try_borrow_mut() {
        Ok(mut widget) => f(&mut widget),
        Err(_) => warn!("Clock busy, dropping re-entrant update"),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SettingsStore;
    use crate::core::Broadcaster;
    use crate::testing::{journal, FixedTime, RecordingLabel};
    use chrono::{TimeZone, Utc};
    use statusbar_types::AmPmStyle;

    struct Fixture {
        store: Rc<SettingsStore>,
        time: Rc<FixedTime>,
        events: Broadcaster<ClockEvent>,
        widget: Rc<RefCell<ClockWidget>>,
        label: Rc<RecordingLabel>,
    }

    fn fixture(device: DeviceClass, settings: &[(&str, i32)]) -> Fixture {
        let store = Rc::new(SettingsStore::new());
        for (key, value) in settings {
            store.put_int(key, *value);
        }
        let time = FixedTime::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 15, 4, 0).unwrap(),
            ClockZone::Named(chrono_tz::UTC),
        );
        let widget = ClockWidget::new(
            store.clone() as Rc<dyn ConfigStore>,
            time.clone() as Rc<dyn TimeSource>,
            LocalePatterns::default(),
            device,
        );
        let label = RecordingLabel::new("clock", &journal());
        widget.borrow_mut().register_label_sink(label.clone());

        Fixture {
            store,
            time,
            events: Broadcaster::new(),
            widget,
            label,
        }
    }

    #[test]
    fn test_attach_renders_immediately() {
        let f = fixture(DeviceClass::Phone, &[]);
        f.widget.borrow_mut().attach(&f.events);

        assert!(f.widget.borrow().is_attached());
        assert_eq!(f.label.visible.get(), Some(true));
        // Default AM/PM style hides the designator
        assert_eq!(f.label.last_text(), Some(DisplayText::plain("3:04")));
    }

    #[test]
    fn test_tick_renders_while_attached_only() {
        let f = fixture(DeviceClass::Phone, &[]);
        f.widget.borrow_mut().attach(&f.events);

        f.time.now.set(Utc.with_ymd_and_hms(2024, 6, 1, 15, 5, 0).unwrap());
        f.events.emit(&ClockEvent::TimeTick);
        assert_eq!(f.label.last_text(), Some(DisplayText::plain("3:05")));
        let renders = f.label.text_count();

        f.widget.borrow_mut().detach();
        assert_eq!(f.events.subscriber_count(), 0);
        f.events.emit(&ClockEvent::TimeTick);
        f.events.emit(&ClockEvent::TimezoneChanged(Some("Asia/Tokyo".into())));
        assert_eq!(f.label.text_count(), renders);
    }

    #[test]
    fn test_reattach_resumes() {
        let f = fixture(DeviceClass::Phone, &[]);
        f.widget.borrow_mut().attach(&f.events);
        f.widget.borrow_mut().detach();

        f.time.zone.set(ClockZone::Named(chrono_tz::Europe::Berlin));
        f.widget.borrow_mut().attach(&f.events);

        // 15:04 UTC is 17:04 CEST
        assert_eq!(f.label.last_text(), Some(DisplayText::plain("5:04")));
        f.events.emit(&ClockEvent::TimeTick);
        assert_eq!(f.events.subscriber_count(), 1);
    }

    #[test]
    fn test_double_attach_keeps_one_subscription() {
        let f = fixture(DeviceClass::Phone, &[]);
        f.widget.borrow_mut().attach(&f.events);
        f.widget.borrow_mut().attach(&f.events);
        assert_eq!(f.events.subscriber_count(), 1);
    }

    #[test]
    fn test_timezone_change_updates_in_place() {
        let f = fixture(DeviceClass::Phone, &[(TIME_12_24, 24)]);
        f.widget.borrow_mut().attach(&f.events);
        assert_eq!(f.label.last_text(), Some(DisplayText::plain("15:04")));

        f.events.emit(&ClockEvent::TimezoneChanged(Some("Asia/Tokyo".into())));

        assert_eq!(f.label.last_text(), Some(DisplayText::plain("0:04")));
        assert_eq!(f.widget.borrow().formatter().compile_count(), 1);
        assert_eq!(f.widget.borrow().zone(), ClockZone::Named(chrono_tz::Asia::Tokyo));
    }

    #[test]
    fn test_timezone_without_id_uses_default() {
        let f = fixture(DeviceClass::Phone, &[]);
        f.widget.borrow_mut().attach(&f.events);
        f.events.emit(&ClockEvent::TimezoneChanged(Some("America/New_York".into())));
        f.events.emit(&ClockEvent::TimezoneChanged(None));
        assert_eq!(f.widget.borrow().zone(), ClockZone::Named(chrono_tz::UTC));
    }

    #[test]
    fn test_am_pm_change_invalidates_and_rerenders() {
        let f = fixture(DeviceClass::Phone, &[]);
        f.widget.borrow_mut().attach(&f.events);
        assert_eq!(f.widget.borrow().formatter().compile_count(), 1);

        f.store.put_int(STATUS_BAR_AM_PM, AmPmStyle::Small.to_setting());

        let text = f.label.last_text().unwrap();
        assert_eq!(text.as_str(), "3:04 PM");
        assert_eq!(text.styled_part(), Some(" PM"));
        assert_eq!(f.widget.borrow().formatter().compile_count(), 2);
    }

    #[test]
    fn test_config_change_while_detached_does_not_render() {
        let f = fixture(DeviceClass::Phone, &[]);
        f.store.put_int(STATUS_BAR_AM_PM, AmPmStyle::Normal.to_setting());
        assert_eq!(f.label.text_count(), 0);
        assert_eq!(f.widget.borrow().config().am_pm_style, AmPmStyle::Normal);

        f.widget.borrow_mut().attach(&f.events);
        assert_eq!(f.label.last_text(), Some(DisplayText::plain("3:04 PM")));
    }

    #[test]
    fn test_switch_to_24_hour_rerenders() {
        let f = fixture(DeviceClass::Phone, &[]);
        f.widget.borrow_mut().attach(&f.events);
        f.store.put_int(TIME_12_24, 24);
        assert_eq!(f.label.last_text(), Some(DisplayText::plain("15:04")));
    }

    #[test]
    fn test_tablet_ignores_clock_style() {
        let f = fixture(
            DeviceClass::Tablet,
            &[(STATUS_BAR_CLOCK, 0), (STATUS_BAR_CLOCK_STYLE, 1)],
        );
        f.widget.borrow_mut().attach(&f.events);
        assert_eq!(f.label.visible.get(), Some(false));

        f.store.put_int(STATUS_BAR_CLOCK_STYLE, 0);
        assert!(!f.widget.borrow().is_visible());

        f.store.put_int(STATUS_BAR_CLOCK, 1);
        assert_eq!(f.label.visible.get(), Some(true));
    }

    #[test]
    fn test_pattern_change_recompiles_and_rerenders() {
        let f = fixture(DeviceClass::Phone, &[]);
        f.widget.borrow_mut().attach(&f.events);
        assert_eq!(f.label.last_text(), Some(DisplayText::plain("3:04")));

        let patterns = LocalePatterns {
            twelve_hour: "hh:mm a".to_string(),
            ..LocalePatterns::default()
        };
        f.widget.borrow_mut().set_patterns(patterns.clone());

        assert_eq!(f.label.last_text(), Some(DisplayText::plain("03:04")));
        assert_eq!(f.widget.borrow().formatter().compile_count(), 2);

        // Same patterns again: nothing to do
        let renders = f.label.text_count();
        f.widget.borrow_mut().set_patterns(patterns);
        assert_eq!(f.label.text_count(), renders);
    }

    #[test]
    fn test_pattern_change_while_detached_waits_for_attach() {
        let f = fixture(DeviceClass::Phone, &[(TIME_12_24, 24)]);
        f.widget.borrow_mut().set_patterns(LocalePatterns {
            twenty_four_hour: "HH:mm:ss".to_string(),
            ..LocalePatterns::default()
        });
        assert_eq!(f.label.text_count(), 0);

        f.widget.borrow_mut().attach(&f.events);
        assert_eq!(f.label.last_text(), Some(DisplayText::plain("15:04:00")));
    }

    #[test]
    fn test_host_can_hide_clock_on_phone() {
        let f = fixture(DeviceClass::Phone, &[(STATUS_BAR_CLOCK_STYLE, 1)]);
        f.widget.borrow_mut().attach(&f.events);
        assert_eq!(f.label.visible.get(), Some(true));

        f.widget.borrow_mut().set_shown(false);
        assert_eq!(f.label.visible.get(), Some(false));
        assert_eq!(f.store.get_int(STATUS_BAR_CLOCK_STYLE, -1), 1);

        // Settings changes cannot override the host gate
        f.store.put_int(STATUS_BAR_CLOCK_STYLE, 0);
        f.store.put_int(STATUS_BAR_CLOCK_STYLE, 1);
        assert!(!f.widget.borrow().is_visible());

        f.widget.borrow_mut().set_shown(true);
        assert_eq!(f.label.visible.get(), Some(true));
    }

    #[test]
    fn test_host_can_hide_clock_on_tablet() {
        let f = fixture(DeviceClass::Tablet, &[(STATUS_BAR_CLOCK, 1)]);
        f.widget.borrow_mut().attach(&f.events);
        assert_eq!(f.label.visible.get(), Some(true));

        f.widget.borrow_mut().set_shown(false);
        assert_eq!(f.label.visible.get(), Some(false));

        f.store.put_int(STATUS_BAR_CLOCK, 0);
        f.widget.borrow_mut().set_shown(true);
        assert!(!f.widget.borrow().is_visible());

        f.store.put_int(STATUS_BAR_CLOCK, 1);
        assert_eq!(f.label.visible.get(), Some(true));
    }

    #[test]
    fn test_phone_follows_clock_style() {
        let f = fixture(DeviceClass::Phone, &[(STATUS_BAR_CLOCK_STYLE, 1)]);
        f.widget.borrow_mut().attach(&f.events);
        assert_eq!(f.label.visible.get(), Some(true));

        f.store.put_int(STATUS_BAR_CLOCK_STYLE, 0);
        assert_eq!(f.label.visible.get(), Some(false));

        f.store.put_int(STATUS_BAR_CLOCK_STYLE, 2);
        assert_eq!(f.label.visible.get(), Some(false));
    }
}
