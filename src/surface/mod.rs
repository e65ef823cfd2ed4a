// Page controls the player drives
// The widget consumes four elements by id; everything it does to the page
// goes through the ControlSurface trait.

pub mod forwarding;
pub mod page;

pub use forwarding::{ControlUpdate, ForwardingSurface};
pub use page::{PageModel, SeekBar};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ControlId {
    #[serde(rename = "audioSeekBar")]
    SeekBar,
    #[serde(rename = "startAudioButton")]
    StartButton,
    #[serde(rename = "stopAudioButton")]
    StopButton,
    #[serde(rename = "restartAudioButton")]
    RestartButton,
}

impl ControlId {
    pub const ALL: [ControlId; 4] = [
        ControlId::SeekBar,
        ControlId::StartButton,
        ControlId::StopButton,
        ControlId::RestartButton,
    ];

    /// The buttons whose visibility follows the playback state
    pub const BUTTONS: [ControlId; 3] = [
        ControlId::StartButton,
        ControlId::StopButton,
        ControlId::RestartButton,
    ];

    /// Element id in the host page
    pub fn dom_id(self) -> &'static str {
        match self {
            ControlId::SeekBar => "audioSeekBar",
            ControlId::StartButton => "startAudioButton",
            ControlId::StopButton => "stopAudioButton",
            ControlId::RestartButton => "restartAudioButton",
        }
    }

    pub fn from_dom_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|control| control.dom_id() == id)
    }
}

impl std::fmt::Display for ControlId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dom_id())
    }
}

/// What the player can see of and do to the page.
///
/// Writes to a control the page does not contain are silently dropped.
pub trait ControlSurface {
    fn has_control(&self, id: ControlId) -> bool;

    fn set_visible(&mut self, id: ControlId, visible: bool);

    /// Current seek bar value, `None` if there is no seek bar
    fn seek_value(&self) -> Option<f64>;

    fn set_seek_value(&mut self, value: f64);

    fn set_seek_max(&mut self, max: f64);
}
