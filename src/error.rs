// Error types for the player and its settings
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    /// The page does not contain the seek bar control
    #[error("seek bar control `audioSeekBar` is not present on the page")]
    SeekBarMissing,

    #[error("media could not be opened: {0}")]
    MediaUnavailable(String),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
