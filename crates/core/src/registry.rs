//! Registry of sinks that receive indicator updates

use crate::sink::{SharedIconSink, SharedLabelSink, SinkResult};
use log::{debug, trace};
use statusbar_types::{BatteryAppearance, DisplayText};

/// Ordered, append-only lists of icon and label sinks
///
/// Every push visits all sinks of a kind in registration order. A sink that
/// reports an error is skipped for that call; the rest of the push goes on.
/// Registering the same sink twice is allowed and it then receives every
/// push twice.
#[derive(Default)]
pub struct SinkRegistry {
    icons: Vec<SharedIconSink>,
    labels: Vec<SharedLabelSink>,
}

impl SinkRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an icon sink
    pub fn register_icon_sink(&mut self, sink: SharedIconSink) {
        self.icons.push(sink);
        trace!("Registered icon sink #{}", self.icons.len());
    }

    /// Register a label sink
    pub fn register_label_sink(&mut self, sink: SharedLabelSink) {
        self.labels.push(sink);
        trace!("Registered label sink #{}", self.labels.len());
    }

    pub fn icon_count(&self) -> usize {
        self.icons.len()
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Push a battery level: image level and accessibility text to icons,
    /// label text to labels
    pub fn push_level(&self, level: u8, accessibility_text: &str, label_text: &str) {
        self.for_each_icon(|sink| {
            sink.set_level(level)?;
            sink.set_accessibility_text(accessibility_text)
        });
        let text = DisplayText::plain(label_text);
        self.for_each_label(|sink| sink.set_text(&text));
    }

    /// Push a resolved battery appearance
    pub fn push_appearance(&self, appearance: &BatteryAppearance) {
        self.for_each_icon(|sink| {
            sink.set_visible(appearance.icon_visible)?;
            sink.set_icon(appearance.icon)
        });
        self.for_each_label(|sink| sink.set_visible(appearance.label_visible));
    }

    /// Apply `update` to every icon sink in order
    pub fn for_each_icon<F>(&self, mut update: F)
    where
        F: FnMut(&SharedIconSink) -> SinkResult,
    {
        for (index, sink) in self.icons.iter().enumerate() {
            if let Err(e) = update(sink) {
                debug!("Icon sink #{} skipped: {}", index, e);
            }
        }
    }

    /// Apply `update` to every label sink in order
    pub fn for_each_label<F>(&self, mut update: F)
    where
        F: FnMut(&SharedLabelSink) -> SinkResult,
    {
        for (index, sink) in self.labels.iter().enumerate() {
            if let Err(e) = update(sink) {
                debug!("Label sink #{} skipped: {}", index, e);
            }
        }
    }
}
