//! Sink traits implemented by the views that show indicator state

use statusbar_types::{BatteryIcon, DisplayText};
use std::rc::Rc;
use thiserror::Error;

/// Why a sink could not take an update
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The view behind the sink is gone or not yet realized
    #[error("sink {0} is no longer available")]
    Unavailable(String),
}

pub type SinkResult = Result<(), SinkError>;

/// An image view showing the battery icon
///
/// Methods take `&self`; views are shared handles with their own interior
/// state, and the registry only ever holds references to them.
pub trait IconSink {
    fn set_visible(&self, visible: bool) -> SinkResult;

    fn set_icon(&self, icon: BatteryIcon) -> SinkResult;

    /// Image level, used by level-list drawables (0-100)
    fn set_level(&self, level: u8) -> SinkResult;

    fn set_accessibility_text(&self, text: &str) -> SinkResult;
}

/// A text view (battery percentage label or the clock)
pub trait LabelSink {
    fn set_visible(&self, visible: bool) -> SinkResult;

    fn set_text(&self, text: &DisplayText) -> SinkResult;
}

/// Shared icon sink handle
pub type SharedIconSink = Rc<dyn IconSink>;

/// Shared label sink handle
pub type SharedLabelSink = Rc<dyn LabelSink>;
