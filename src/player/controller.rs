// Playback controller
// Owns the current clip and keeps the page's transport buttons and seek bar
// in step with it.

use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::bindings::{Binding, Subscriptions};
use super::media::{MediaBackend, MediaEvent, MediaHandle, SessionId};
use super::source::{MediaSource, SourceLocator};
use super::state::{ControlVisibility, PlaybackState};
use crate::error::PlayerError;
use crate::surface::{ControlId, ControlSurface};

/// Seek bar interactions reported by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// The user grabbed the thumb
    SeekPressed,
    /// The user let go of the thumb
    SeekReleased,
    /// The seek bar value changed through user input
    SeekCommitted,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub state: PlaybackState,
    pub position: f64,
    pub duration: Option<f64>,
    pub session: Option<SessionId>,
    pub source: Option<SourceLocator>,
}

pub struct PlaybackController<B: MediaBackend, S> {
    backend: B,
    surface: S,
    source: MediaSource,
    media: Option<B::Handle>,
    session: Option<SessionId>,
    locator: Option<SourceLocator>,
    next_session: u64,
    state: PlaybackState,
    /// Last recorded position, restored by resume
    position: f64,
    subscriptions: Subscriptions,
}

impl<B: MediaBackend, S: ControlSurface> PlaybackController<B, S> {
    pub fn new(backend: B, surface: S, source: MediaSource) -> Self {
        Self {
            backend,
            surface,
            source,
            media: None,
            session: None,
            locator: None,
            next_session: 1,
            state: PlaybackState::Stopped,
            position: 0.0,
            subscriptions: Subscriptions::default(),
        }
    }

    /// Open a fresh copy of the clip and play it from the beginning.
    ///
    /// Any previous clip is discarded together with its bindings. Requires
    /// the seek bar to be present on the page.
    pub fn start(&mut self) -> Result<SessionId, PlayerError> {
        if !self.surface.has_control(ControlId::SeekBar) {
            error!(control = %ControlId::SeekBar, "Seek bar not found!");
            return Err(PlayerError::SeekBarMissing);
        }

        let session = SessionId(self.next_session);
        self.next_session += 1;

        let locator = self.source.locator();
        let mut media = self.backend.open(&locator, session).map_err(|e| {
            warn!(%session, %locator, "Failed to open media: {}", e);
            e
        })?;

        if let Some(previous) = self.session.replace(session) {
            debug!(%previous, "Discarding previous session");
        }
        self.media = None;

        media.set_position(0.0);
        media.play();
        self.media = Some(media);
        self.position = 0.0;

        self.subscriptions.clear();
        self.subscriptions.install_all();
        self.set_state(PlaybackState::Playing);

        info!(%session, %locator, "Started playback");
        self.locator = Some(locator);
        Ok(session)
    }

    pub fn pause(&mut self) {
        match self.media.as_mut() {
            Some(media) if self.state.is_playing() => {
                media.pause();
                self.position = media.position();
                self.set_state(PlaybackState::Paused);
            }
            _ => debug!(state = ?self.state, "Pause ignored"),
        }
    }

    pub fn resume(&mut self) {
        match self.media.as_mut() {
            Some(media) if !self.state.is_playing() => {
                media.set_position(self.position);
                media.play();
                self.set_state(PlaybackState::Playing);
            }
            _ => debug!(state = ?self.state, "Resume ignored"),
        }
    }

    /// What the start button does: a paused clip carries on, anything else
    /// fetches a fresh copy of the clip.
    pub fn start_or_resume(&mut self) -> Result<(), PlayerError> {
        if self.media.is_some() && self.state == PlaybackState::Paused {
            self.resume();
            Ok(())
        } else {
            self.start().map(|_| ())
        }
    }

    /// Play from the beginning, whatever the current state.
    pub fn restart(&mut self) {
        let Some(media) = self.media.as_mut() else {
            debug!("Restart ignored: nothing loaded");
            return;
        };
        media.set_position(0.0);
        media.play();
        self.position = 0.0;
        self.set_state(PlaybackState::Playing);
    }

    /// Drop the clip and all bindings, as when the page goes away.
    pub fn teardown(&mut self) {
        if let Some(session) = self.session.take() {
            info!(%session, "Tearing down playback session");
        }
        self.media = None;
        self.locator = None;
        self.subscriptions.clear();
        self.position = 0.0;
        self.set_state(PlaybackState::Stopped);
    }

    pub fn handle_media_event(&mut self, session: SessionId, event: MediaEvent) {
        if self.session != Some(session) {
            debug!(%session, ?event, "Ignoring event from a replaced session");
            return;
        }
        let Some(media) = self.media.as_ref() else {
            return;
        };

        match event {
            MediaEvent::Progress if self.subscriptions.is_active(Binding::Progress) => {
                let duration_known = media.duration().is_some_and(|d| !d.is_nan());
                if duration_known && self.surface.has_control(ControlId::SeekBar) {
                    let position = media.position();
                    self.surface.set_seek_value(position);
                    self.position = position;
                }
            }
            MediaEvent::Ended if self.subscriptions.is_active(Binding::Completion) => {
                self.surface.set_seek_value(0.0);
                self.position = 0.0;
                self.set_state(PlaybackState::Stopped);
            }
            MediaEvent::MetadataReady if self.subscriptions.is_active(Binding::MetadataReady) => {
                if let Some(duration) = media.duration() {
                    self.surface.set_seek_max(duration);
                }
                self.surface.set_seek_value(0.0);
            }
            _ => debug!(?event, "No binding installed"),
        }
    }

    pub fn handle_ui_event(&mut self, event: UiEvent) {
        if self.media.is_none() {
            debug!(?event, "Seek bar event ignored: nothing loaded");
            return;
        }

        match event {
            UiEvent::SeekPressed if self.subscriptions.is_active(Binding::SeekPress) => {
                self.subscriptions.unsubscribe(Binding::Progress);
            }
            UiEvent::SeekReleased if self.subscriptions.is_active(Binding::SeekRelease) => {
                self.subscriptions.subscribe(Binding::Progress);
            }
            UiEvent::SeekCommitted if self.subscriptions.is_active(Binding::SeekCommit) => {
                let Some(value) = self.surface.seek_value() else {
                    return;
                };
                if let Some(media) = self.media.as_mut() {
                    media.set_position(value);
                    self.position = value;
                    self.subscriptions.subscribe(Binding::Progress);
                    // Seeking may have paused the media underneath us
                    if self.state.is_playing() {
                        media.play();
                    }
                }
            }
            _ => debug!(?event, "No binding installed"),
        }
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            state: self.state,
            position: self.position,
            duration: self.media.as_ref().and_then(|media| media.duration()),
            session: self.session,
            source: self.locator.clone(),
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn session(&self) -> Option<SessionId> {
        self.session
    }

    pub fn has_media(&self) -> bool {
        self.media.is_some()
    }

    pub fn subscriptions(&self) -> &Subscriptions {
        &self.subscriptions
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn set_state(&mut self, state: PlaybackState) {
        self.state = state;
        let visibility = ControlVisibility::for_state(state);
        for id in ControlId::BUTTONS {
            self.surface.set_visible(id, visibility.is_visible(id));
        }
    }
}
