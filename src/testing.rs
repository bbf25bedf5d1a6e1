//! Recording sinks and a fixed clock shared by the unit tests

use crate::core::{ClockZone, IconSink, LabelSink, SinkError, SinkResult, TimeSource};
use chrono::{DateTime, Utc};
use statusbar_types::{BatteryIcon, DisplayText};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub type Journal = Rc<RefCell<Vec<String>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

/// Icon sink remembering the last value of every property
pub struct RecordingIcon {
    pub name: &'static str,
    pub journal: Journal,
    pub available: Cell<bool>,
    pub visible: Cell<Option<bool>>,
    pub icon: Cell<Option<BatteryIcon>>,
    pub level: Cell<Option<u8>>,
    pub accessibility: RefCell<Option<String>>,
}

impl RecordingIcon {
    pub fn new(name: &'static str, journal: &Journal) -> Rc<Self> {
        Rc::new(Self {
            name,
            journal: Rc::clone(journal),
            available: Cell::new(true),
            visible: Cell::new(None),
            icon: Cell::new(None),
            level: Cell::new(None),
            accessibility: RefCell::new(None),
        })
    }

    fn record(&self, call: &str) -> SinkResult {
        if !self.available.get() {
            return Err(SinkError::Unavailable(self.name.to_string()));
        }
        self.journal
            .borrow_mut()
            .push(format!("{}.{}", self.name, call));
        Ok(())
    }
}

impl IconSink for RecordingIcon {
    fn set_visible(&self, visible: bool) -> SinkResult {
        self.record("visible")?;
        self.visible.set(Some(visible));
        Ok(())
    }

    fn set_icon(&self, icon: BatteryIcon) -> SinkResult {
        self.record("icon")?;
        self.icon.set(Some(icon));
        Ok(())
    }

    fn set_level(&self, level: u8) -> SinkResult {
        self.record("level")?;
        self.level.set(Some(level));
        Ok(())
    }

    fn set_accessibility_text(&self, text: &str) -> SinkResult {
        self.record("a11y")?;
        *self.accessibility.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}

/// Label sink remembering visibility and every text it was given
pub struct RecordingLabel {
    pub name: &'static str,
    pub journal: Journal,
    pub visible: Cell<Option<bool>>,
    pub texts: RefCell<Vec<DisplayText>>,
}

impl RecordingLabel {
    pub fn new(name: &'static str, journal: &Journal) -> Rc<Self> {
        Rc::new(Self {
            name,
            journal: Rc::clone(journal),
            visible: Cell::new(None),
            texts: RefCell::new(Vec::new()),
        })
    }

    pub fn last_text(&self) -> Option<DisplayText> {
        self.texts.borrow().last().cloned()
    }

    pub fn text_count(&self) -> usize {
        self.texts.borrow().len()
    }
}

impl LabelSink for RecordingLabel {
    fn set_visible(&self, visible: bool) -> SinkResult {
        self.journal
            .borrow_mut()
            .push(format!("{}.visible", self.name));
        self.visible.set(Some(visible));
        Ok(())
    }

    fn set_text(&self, text: &DisplayText) -> SinkResult {
        self.journal.borrow_mut().push(format!("{}.text", self.name));
        self.texts.borrow_mut().push(text.clone());
        Ok(())
    }
}

/// Time source frozen at a settable instant
pub struct FixedTime {
    pub now: Cell<DateTime<Utc>>,
    pub zone: Cell<ClockZone>,
}

impl FixedTime {
    pub fn new(now: DateTime<Utc>, zone: ClockZone) -> Rc<Self> {
        Rc::new(Self {
            now: Cell::new(now),
            zone: Cell::new(zone),
        })
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }

    fn default_zone(&self) -> ClockZone {
        self.zone.get()
    }
}
