// Single-clip playback
// The controller drives a media handle and mirrors its state onto the page

pub mod bindings;
pub mod controller;
pub mod media;
pub mod source;
pub mod state;

pub use bindings::{Binding, Subscriptions};
pub use controller::{PlaybackController, PlayerSnapshot, UiEvent};
pub use media::{MediaBackend, MediaEvent, MediaHandle, SessionId};
pub use source::{MediaSource, SourceLocator};
pub use state::{ControlVisibility, PlaybackState};
