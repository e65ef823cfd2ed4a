// Media handle proxied to the page's audio element
// Commands travel to the webview; the page reports progress back and the
// reports are mirrored here so the controller can query position/duration.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PlayerError;
use crate::outbox::Outbox;
use crate::player::{MediaBackend, MediaEvent, MediaHandle, SessionId, SourceLocator};

/// Instructions for the page's audio element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum MediaCommand {
    Load { session: SessionId, url: String },
    Play { session: SessionId },
    Pause { session: SessionId },
    Seek { session: SessionId, position: f64 },
    Unload { session: SessionId },
}

/// What the page's audio element observed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MediaReport {
    pub session: SessionId,
    #[serde(flatten)]
    pub kind: ReportKind,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReportKind {
    TimeUpdate { position: f64 },
    /// The page sends `null` for a NaN duration
    LoadedMetadata { duration: Option<f64> },
    Ended,
}

#[derive(Debug, Clone, Copy, Default)]
struct MediaMirror {
    position: f64,
    duration: Option<f64>,
}

/// Routes page reports to the mirror of the current session.
#[derive(Clone, Default)]
pub struct RemoteLink {
    current: Arc<Mutex<Option<(SessionId, Arc<Mutex<MediaMirror>>)>>>,
}

impl RemoteLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a report to the mirror and translate it into a media event.
    /// Reports for any session but the current one yield `None`.
    pub fn absorb(&self, report: &MediaReport) -> Option<MediaEvent> {
        let current = self.current.lock();
        let mirror = match current.as_ref() {
            Some((session, mirror)) if *session == report.session => mirror,
            _ => {
                debug!(session = %report.session, "Dropping report for a stale session");
                return None;
            }
        };

        let mut mirror = mirror.lock();
        let event = match report.kind {
            ReportKind::TimeUpdate { position } => {
                mirror.position = position;
                MediaEvent::Progress
            }
            ReportKind::LoadedMetadata { duration } => {
                mirror.duration = duration.filter(|d| d.is_finite());
                MediaEvent::MetadataReady
            }
            ReportKind::Ended => {
                if let Some(duration) = mirror.duration {
                    mirror.position = duration;
                }
                MediaEvent::Ended
            }
        };
        Some(event)
    }

    pub fn current_session(&self) -> Option<SessionId> {
        self.current.lock().as_ref().map(|(session, _)| *session)
    }

    fn attach(&self, session: SessionId, mirror: Arc<Mutex<MediaMirror>>) {
        *self.current.lock() = Some((session, mirror));
    }
}

pub struct RemoteBackend {
    link: RemoteLink,
    outbox: Arc<dyn Outbox<MediaCommand>>,
}

impl RemoteBackend {
    pub fn new(link: RemoteLink, outbox: Arc<dyn Outbox<MediaCommand>>) -> Self {
        Self { link, outbox }
    }
}

impl MediaBackend for RemoteBackend {
    type Handle = RemoteMedia;

    fn open(&mut self, locator: &SourceLocator, session: SessionId) -> Result<RemoteMedia, PlayerError> {
        let mirror = Arc::new(Mutex::new(MediaMirror::default()));
        self.link.attach(session, Arc::clone(&mirror));
        self.outbox.deliver(MediaCommand::Load {
            session,
            url: locator.as_str().to_string(),
        });
        Ok(RemoteMedia {
            session,
            mirror,
            outbox: Arc::clone(&self.outbox),
        })
    }
}

pub struct RemoteMedia {
    session: SessionId,
    mirror: Arc<Mutex<MediaMirror>>,
    outbox: Arc<dyn Outbox<MediaCommand>>,
}

impl MediaHandle for RemoteMedia {
    fn play(&mut self) {
        self.outbox.deliver(MediaCommand::Play { session: self.session });
    }

    fn pause(&mut self) {
        self.outbox.deliver(MediaCommand::Pause { session: self.session });
    }

    fn position(&self) -> f64 {
        self.mirror.lock().position
    }

    fn set_position(&mut self, seconds: f64) {
        self.mirror.lock().position = seconds;
        self.outbox.deliver(MediaCommand::Seek {
            session: self.session,
            position: seconds,
        });
    }

    fn duration(&self) -> Option<f64> {
        self.mirror.lock().duration
    }
}

impl Drop for RemoteMedia {
    fn drop(&mut self) {
        self.outbox.deliver(MediaCommand::Unload { session: self.session });
    }
}
