// Test support utilities for both unit and integration tests

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::PlayerError;
use crate::player::{MediaBackend, MediaHandle, SessionId, SourceLocator};

/// Observable state of one fake clip.
#[derive(Debug, Clone, Default)]
pub struct FakeMediaState {
    pub locator: String,
    pub session: Option<SessionId>,
    pub playing: bool,
    pub position: f64,
    pub duration: Option<f64>,
    pub play_calls: usize,
    pub dropped: bool,
    /// Mimic media elements that pause themselves when the position is set
    pub pause_on_seek: bool,
}

/// Test-side handle onto a clip the controller owns.
#[derive(Debug, Clone)]
pub struct FakeMediaProbe {
    state: Arc<Mutex<FakeMediaState>>,
}

impl FakeMediaProbe {
    pub fn state(&self) -> FakeMediaState {
        self.state.lock().clone()
    }

    /// Let playback run for `seconds`, capped at the known duration.
    pub fn advance(&self, seconds: f64) {
        let mut state = self.state.lock();
        if state.playing {
            let target = state.position + seconds;
            state.position = match state.duration {
                Some(duration) => target.min(duration),
                None => target,
            };
        }
    }

    pub fn load_metadata(&self, duration: f64) {
        self.state.lock().duration = Some(duration);
    }

    /// Run to the end of the clip.
    pub fn finish(&self) {
        let mut state = self.state.lock();
        if let Some(duration) = state.duration {
            state.position = duration;
        }
        state.playing = false;
    }
}

/// Media handle backed by shared in-memory state.
#[derive(Debug)]
pub struct FakeMedia {
    state: Arc<Mutex<FakeMediaState>>,
}

impl MediaHandle for FakeMedia {
    fn play(&mut self) {
        let mut state = self.state.lock();
        state.playing = true;
        state.play_calls += 1;
    }

    fn pause(&mut self) {
        self.state.lock().playing = false;
    }

    fn position(&self) -> f64 {
        self.state.lock().position
    }

    fn set_position(&mut self, seconds: f64) {
        let mut state = self.state.lock();
        state.position = seconds;
        if state.pause_on_seek {
            state.playing = false;
        }
    }

    fn duration(&self) -> Option<f64> {
        self.state.lock().duration
    }
}

impl Drop for FakeMedia {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        state.playing = false;
        state.dropped = true;
    }
}

#[derive(Debug, Default)]
struct FakeBackendState {
    opened: Vec<FakeMediaProbe>,
    fail_next: Option<String>,
    pause_on_seek: bool,
}

/// Backend handing out [`FakeMedia`]. Clones share the same record of
/// opened clips, so a test can keep one while the controller owns another.
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    inner: Arc<Mutex<FakeBackendState>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clips opened from now on pause themselves whenever they are seeked.
    pub fn pausing_on_seek(self) -> Self {
        self.inner.lock().pause_on_seek = true;
        self
    }

    pub fn fail_next_open(&self, reason: impl Into<String>) {
        self.inner.lock().fail_next = Some(reason.into());
    }

    pub fn opened(&self) -> Vec<FakeMediaProbe> {
        self.inner.lock().opened.clone()
    }

    pub fn last(&self) -> Option<FakeMediaProbe> {
        self.inner.lock().opened.last().cloned()
    }
}

impl MediaBackend for FakeBackend {
    type Handle = FakeMedia;

    fn open(&mut self, locator: &SourceLocator, session: SessionId) -> Result<FakeMedia, PlayerError> {
        let mut inner = self.inner.lock();
        if let Some(reason) = inner.fail_next.take() {
            return Err(PlayerError::MediaUnavailable(reason));
        }

        let state = Arc::new(Mutex::new(FakeMediaState {
            locator: locator.as_str().to_string(),
            session: Some(session),
            pause_on_seek: inner.pause_on_seek,
            ..Default::default()
        }));
        inner.opened.push(FakeMediaProbe { state: Arc::clone(&state) });
        Ok(FakeMedia { state })
    }
}
