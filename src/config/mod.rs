//! Configuration management

mod settings;
mod store;
mod watch;

pub use settings::{AppConfig, CONFIG_VERSION};
pub use store::SettingsStore;
pub use watch::{watch_settings_file, SettingsWatcher};
