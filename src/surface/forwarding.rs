// Control surface that mirrors the page and forwards every change to it
use serde::Serialize;

use super::{ControlId, ControlSurface, PageModel, SeekBar};
use crate::outbox::Outbox;

/// A single change the page script applies to its DOM.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ControlUpdate {
    Visibility { id: ControlId, visible: bool },
    SeekValue { value: f64 },
    SeekMax { max: f64 },
}

pub struct ForwardingSurface<O> {
    page: PageModel,
    outbox: O,
}

impl<O: Outbox<ControlUpdate>> ForwardingSurface<O> {
    /// Starts with no registered controls; the page announces them on load.
    pub fn new(outbox: O) -> Self {
        Self {
            page: PageModel::default(),
            outbox,
        }
    }

    pub fn register(&mut self, controls: impl IntoIterator<Item = ControlId>) {
        self.page.register(controls);
    }

    /// The page already shows this value, so it is mirrored but not echoed back.
    pub fn record_user_seek(&mut self, value: f64) {
        self.page.drag_seek_bar_to(value);
    }

    pub fn page(&self) -> &PageModel {
        &self.page
    }

    pub fn seek_bar(&self) -> Option<SeekBar> {
        self.page.seek_bar()
    }
}

impl<O: Outbox<ControlUpdate>> ControlSurface for ForwardingSurface<O> {
    fn has_control(&self, id: ControlId) -> bool {
        self.page.has_control(id)
    }

    fn set_visible(&mut self, id: ControlId, visible: bool) {
        if self.page.has_control(id) {
            self.page.set_visible(id, visible);
            self.outbox.deliver(ControlUpdate::Visibility { id, visible });
        }
    }

    fn seek_value(&self) -> Option<f64> {
        self.page.seek_value()
    }

    fn set_seek_value(&mut self, value: f64) {
        if self.page.has_control(ControlId::SeekBar) {
            self.page.set_seek_value(value);
            self.outbox.deliver(ControlUpdate::SeekValue { value });
        }
    }

    fn set_seek_max(&mut self, max: f64) {
        if self.page.has_control(ControlId::SeekBar) {
            self.page.set_seek_max(max);
            self.outbox.deliver(ControlUpdate::SeekMax { max });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn test_changes_are_mirrored_and_forwarded() {
        let (tx, mut rx) = unbounded_channel();
        let mut surface = ForwardingSurface::new(tx);
        surface.register(ControlId::ALL);

        surface.set_visible(ControlId::StopButton, true);
        surface.set_seek_max(42.0);
        surface.set_seek_value(1.5);

        assert_eq!(
            rx.try_recv().unwrap(),
            ControlUpdate::Visibility { id: ControlId::StopButton, visible: true }
        );
        assert_eq!(rx.try_recv().unwrap(), ControlUpdate::SeekMax { max: 42.0 });
        assert_eq!(rx.try_recv().unwrap(), ControlUpdate::SeekValue { value: 1.5 });
        assert_eq!(surface.seek_value(), Some(1.5));
    }

    #[test]
    fn test_user_seek_is_not_echoed() {
        let (tx, mut rx) = unbounded_channel();
        let mut surface = ForwardingSurface::new(tx);
        surface.register(ControlId::ALL);

        surface.record_user_seek(8.0);

        assert_eq!(surface.seek_value(), Some(8.0));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_unregistered_controls_forward_nothing() {
        let (tx, mut rx) = unbounded_channel();
        let mut surface = ForwardingSurface::new(tx);

        surface.set_seek_value(3.0);
        surface.set_visible(ControlId::StartButton, false);

        assert!(rx.try_recv().is_err());
        assert!(!surface.has_control(ControlId::SeekBar));
    }

    #[test]
    fn test_update_wire_format() {
        let update = ControlUpdate::Visibility { id: ControlId::StartButton, visible: false };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({ "kind": "visibility", "id": "startAudioButton", "visible": false })
        );
        assert_eq!(
            serde_json::to_value(ControlUpdate::SeekMax { max: 2.0 }).unwrap(),
            serde_json::json!({ "kind": "seekMax", "max": 2.0 })
        );
    }
}
