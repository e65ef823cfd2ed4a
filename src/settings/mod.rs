// Application settings stored as JSON in the app data directory

#[allow(clippy::module_inception)]
pub mod settings;

pub use settings::{AppSettings, LoggingSettings, MediaSettings};
