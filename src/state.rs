// Application state management
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::PlayerError;
use crate::outbox::Outbox;
use crate::player::{MediaSource, PlaybackController, PlayerSnapshot, SessionId, UiEvent};
use crate::remote::{MediaCommand, MediaReport, RemoteBackend, RemoteLink};
use crate::settings::AppSettings;
use crate::surface::{ControlId, ControlUpdate, ForwardingSurface};

pub type DeckController<O> = PlaybackController<RemoteBackend, ForwardingSurface<O>>;

/// Everything the page's commands operate on. One instance per window.
pub struct AppState<O> {
    pub controller: Mutex<DeckController<O>>,
    pub link: RemoteLink,
    pub settings: AppSettings,
    pub app_dir: PathBuf,
}

impl<O: Outbox<ControlUpdate>> AppState<O> {
    pub fn new(
        settings: AppSettings,
        app_dir: PathBuf,
        controls: O,
        media: Arc<dyn Outbox<MediaCommand>>,
    ) -> Self {
        let link = RemoteLink::new();
        let backend = RemoteBackend::new(link.clone(), media);
        let source = MediaSource::from_settings(&settings.media);
        let controller = PlaybackController::new(backend, ForwardingSurface::new(controls), source);
        Self {
            controller: Mutex::new(controller),
            link,
            settings,
            app_dir,
        }
    }

    /// The page (re)loaded and contains the given element ids.
    /// Anything left over from a previous page is torn down.
    pub fn register_controls(&self, ids: &[String]) {
        let controls: Vec<ControlId> = ids
            .iter()
            .filter_map(|id| {
                let control = ControlId::from_dom_id(id);
                if control.is_none() {
                    debug!(id = %id, "Ignoring unknown control");
                }
                control
            })
            .collect();

        let mut controller = self.controller.lock();
        controller.teardown();
        controller.surface_mut().register(controls);
    }

    pub fn start(&self) -> Result<SessionId, PlayerError> {
        self.controller.lock().start()
    }

    pub fn start_or_resume(&self) -> Result<(), PlayerError> {
        self.controller.lock().start_or_resume()
    }

    pub fn pause(&self) {
        self.controller.lock().pause();
    }

    pub fn resume(&self) {
        self.controller.lock().resume();
    }

    pub fn restart(&self) {
        self.controller.lock().restart();
    }

    pub fn seek_pressed(&self) {
        self.controller.lock().handle_ui_event(UiEvent::SeekPressed);
    }

    pub fn seek_released(&self) {
        self.controller.lock().handle_ui_event(UiEvent::SeekReleased);
    }

    /// The user let go of the seek bar at `value`.
    pub fn seek_committed(&self, value: f64) {
        let mut controller = self.controller.lock();
        controller.surface_mut().record_user_seek(value);
        controller.handle_ui_event(UiEvent::SeekCommitted);
    }

    pub fn media_report(&self, report: &MediaReport) {
        // Hold the controller lock while absorbing so a report never
        // interleaves with a command touching the same session
        let mut controller = self.controller.lock();
        match self.link.absorb(report) {
            Some(event) => controller.handle_media_event(report.session, event),
            None => {
                if controller.session().is_some_and(|current| current < report.session) {
                    warn!(session = %report.session, "Report for a session that was never opened");
                }
            }
        }
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        self.controller.lock().snapshot()
    }

    pub fn teardown(&self) {
        self.controller.lock().teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlaybackState;
    use crate::remote::ReportKind;
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

    struct Harness {
        state: AppState<tokio::sync::mpsc::UnboundedSender<ControlUpdate>>,
        controls: UnboundedReceiver<ControlUpdate>,
        media: UnboundedReceiver<MediaCommand>,
    }

    fn harness() -> Harness {
        let (controls_tx, controls) = unbounded_channel();
        let (media_tx, media) = unbounded_channel();
        let state = AppState::new(
            AppSettings::default(),
            PathBuf::from("/tmp/clipdeck-test"),
            controls_tx,
            Arc::new(media_tx),
        );
        Harness { state, controls, media }
    }

    fn all_ids() -> Vec<String> {
        ControlId::ALL.iter().map(|id| id.dom_id().to_string()).collect()
    }

    fn drain<T>(rx: &mut UnboundedReceiver<T>) -> Vec<T> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    fn report(session: SessionId, kind: ReportKind) -> MediaReport {
        MediaReport { session, kind }
    }

    #[test]
    fn test_start_requires_registered_seek_bar() {
        let mut h = harness();
        h.state.register_controls(&["startAudioButton".to_string()]);

        assert!(matches!(h.state.start(), Err(PlayerError::SeekBarMissing)));
        assert!(drain(&mut h.media).is_empty());
    }

    #[test]
    fn test_start_loads_and_plays_with_cache_busted_url() {
        let mut h = harness();
        h.state.register_controls(&all_ids());
        let session = h.state.start().unwrap();

        let commands = drain(&mut h.media);
        match &commands[0] {
            MediaCommand::Load { session: loaded, url } => {
                assert_eq!(*loaded, session);
                assert!(url.starts_with("output.wav?cache_bust="));
            }
            other => panic!("expected load, got {:?}", other),
        }
        assert!(commands.contains(&MediaCommand::Play { session }));

        let updates = drain(&mut h.controls);
        assert!(updates.contains(&ControlUpdate::Visibility { id: ControlId::StartButton, visible: false }));
        assert!(updates.contains(&ControlUpdate::Visibility { id: ControlId::StopButton, visible: true }));
    }

    #[test]
    fn test_reports_drive_seek_bar() {
        let mut h = harness();
        h.state.register_controls(&all_ids());
        let session = h.state.start().unwrap();
        drain(&mut h.controls);

        h.state.media_report(&report(session, ReportKind::LoadedMetadata { duration: Some(30.0) }));
        h.state.media_report(&report(session, ReportKind::TimeUpdate { position: 4.0 }));

        assert_eq!(
            drain(&mut h.controls),
            vec![
                ControlUpdate::SeekMax { max: 30.0 },
                ControlUpdate::SeekValue { value: 0.0 },
                ControlUpdate::SeekValue { value: 4.0 },
            ]
        );

        h.state.media_report(&report(session, ReportKind::Ended));
        assert_eq!(h.state.snapshot().state, PlaybackState::Stopped);
    }

    #[test]
    fn test_seek_commit_sends_seek_and_resumes() {
        let mut h = harness();
        h.state.register_controls(&all_ids());
        let session = h.state.start().unwrap();
        h.state.media_report(&report(session, ReportKind::LoadedMetadata { duration: Some(30.0) }));
        drain(&mut h.media);

        h.state.seek_pressed();
        h.state.seek_committed(12.0);
        h.state.seek_released();

        assert_eq!(
            drain(&mut h.media),
            vec![
                MediaCommand::Seek { session, position: 12.0 },
                MediaCommand::Play { session },
            ]
        );
        let snapshot = h.state.snapshot();
        assert_eq!(snapshot.position, 12.0);
        assert_eq!(snapshot.state, PlaybackState::Playing);
    }

    #[test]
    fn test_restart_unloads_previous_session() {
        let mut h = harness();
        h.state.register_controls(&all_ids());
        let first = h.state.start().unwrap();
        let second = h.state.start().unwrap();

        let commands = drain(&mut h.media);
        assert!(commands.contains(&MediaCommand::Unload { session: first }));
        assert_eq!(h.state.link.current_session(), Some(second));

        // Late reports from the first clip change nothing
        h.state.media_report(&report(first, ReportKind::Ended));
        assert_eq!(h.state.snapshot().state, PlaybackState::Playing);
    }

    #[test]
    fn test_start_button_after_completion_loads_new_url() {
        let mut h = harness();
        h.state.register_controls(&all_ids());
        h.state.start_or_resume().unwrap();
        let first = h.state.snapshot().session.unwrap();
        h.state.media_report(&report(first, ReportKind::Ended));
        drain(&mut h.media);

        h.state.start_or_resume().unwrap();

        let commands = drain(&mut h.media);
        let second = h.state.snapshot().session.unwrap();
        assert_ne!(first, second);
        assert!(matches!(&commands[0], MediaCommand::Load { session, .. } if *session == second));
        assert!(commands.contains(&MediaCommand::Unload { session: first }));
    }

    #[test]
    fn test_reregistering_tears_down() {
        let mut h = harness();
        h.state.register_controls(&all_ids());
        let session = h.state.start().unwrap();

        h.state.register_controls(&all_ids());

        assert!(drain(&mut h.media).contains(&MediaCommand::Unload { session }));
        let snapshot = h.state.snapshot();
        assert_eq!(snapshot.session, None);
        assert_eq!(snapshot.state, PlaybackState::Stopped);
    }
}
