// Media handle abstraction
// The controller only ever talks to playable media through these traits

use serde::{Deserialize, Serialize};

use super::source::SourceLocator;
use crate::error::PlayerError;

/// Identifies one playback session, i.e. one opened media handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Notifications a media handle emits while it plays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    /// Playback position advanced
    Progress,
    /// Playback reached the end of the clip
    Ended,
    /// Duration is now known
    MetadataReady,
}

/// A playable clip. Positions and durations are in seconds.
pub trait MediaHandle {
    fn play(&mut self);

    fn pause(&mut self);

    fn position(&self) -> f64;

    fn set_position(&mut self, seconds: f64);

    /// `None` until metadata has loaded
    fn duration(&self) -> Option<f64>;
}

/// Opens media handles for a source locator.
pub trait MediaBackend {
    type Handle: MediaHandle;

    fn open(&mut self, locator: &SourceLocator, session: SessionId) -> Result<Self::Handle, PlayerError>;
}

impl<H: MediaHandle + ?Sized> MediaHandle for Box<H> {
    fn play(&mut self) {
        (**self).play();
    }

    fn pause(&mut self) {
        (**self).pause();
    }

    fn position(&self) -> f64 {
        (**self).position()
    }

    fn set_position(&mut self, seconds: f64) {
        (**self).set_position(seconds);
    }

    fn duration(&self) -> Option<f64> {
        (**self).duration()
    }
}
