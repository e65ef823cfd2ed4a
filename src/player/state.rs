// Playback state and the button visibility derived from it
use serde::{Deserialize, Serialize};

use crate::surface::ControlId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl PlaybackState {
    pub fn is_playing(self) -> bool {
        self == Self::Playing
    }
}

/// Which transport buttons are shown.
///
/// Always computed from a [`PlaybackState`]; nothing else may influence it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlVisibility {
    pub start: bool,
    pub stop: bool,
    pub restart: bool,
}

impl ControlVisibility {
    pub fn for_state(state: PlaybackState) -> Self {
        let playing = state.is_playing();
        Self {
            start: !playing,
            stop: playing,
            restart: playing,
        }
    }

    pub fn is_visible(&self, id: ControlId) -> bool {
        match id {
            ControlId::StartButton => self.start,
            ControlId::StopButton => self.stop,
            ControlId::RestartButton => self.restart,
            // The seek bar is never toggled
            ControlId::SeekBar => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_and_paused_show_start_only() {
        for state in [PlaybackState::Stopped, PlaybackState::Paused] {
            let visibility = ControlVisibility::for_state(state);
            assert!(visibility.start);
            assert!(!visibility.stop);
            assert!(!visibility.restart);
        }
    }

    #[test]
    fn test_playing_shows_pause_and_restart() {
        let visibility = ControlVisibility::for_state(PlaybackState::Playing);
        assert!(!visibility.start);
        assert!(visibility.stop);
        assert!(visibility.restart);
        assert!(visibility.is_visible(ControlId::StopButton));
        assert!(!visibility.is_visible(ControlId::StartButton));
    }

    #[test]
    fn test_state_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&PlaybackState::Paused).unwrap(),
            "\"paused\""
        );
    }
}
