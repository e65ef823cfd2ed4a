// In-memory model of the widget's page
use std::collections::{BTreeMap, BTreeSet};

use super::{ControlId, ControlSurface};
use crate::player::{ControlVisibility, PlaybackState};

/// Range input state. `max` stays unset until the clip's duration is known.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SeekBar {
    pub value: f64,
    pub max: Option<f64>,
}

/// The controls a page contains and what they currently show.
#[derive(Debug, Clone, Default)]
pub struct PageModel {
    present: BTreeSet<ControlId>,
    visible: BTreeMap<ControlId, bool>,
    seek_bar: SeekBar,
}

impl PageModel {
    /// A page containing every control, buttons laid out for a stopped player.
    pub fn full() -> Self {
        Self::with_controls(ControlId::ALL)
    }

    pub fn with_controls(controls: impl IntoIterator<Item = ControlId>) -> Self {
        let mut page = Self::default();
        page.register(controls);
        page
    }

    /// Replace the set of present controls, e.g. after the page (re)loaded.
    pub fn register(&mut self, controls: impl IntoIterator<Item = ControlId>) {
        self.present = controls.into_iter().collect();
        let initial = ControlVisibility::for_state(PlaybackState::Stopped);
        self.visible = ControlId::BUTTONS
            .into_iter()
            .filter(|id| self.present.contains(id))
            .map(|id| (id, initial.is_visible(id)))
            .collect();
        self.seek_bar = SeekBar::default();
    }

    pub fn controls(&self) -> impl Iterator<Item = ControlId> + '_ {
        self.present.iter().copied()
    }

    /// `None` if the control is absent or never toggled
    pub fn is_visible(&self, id: ControlId) -> Option<bool> {
        self.visible.get(&id).copied()
    }

    pub fn seek_bar(&self) -> Option<SeekBar> {
        self.has_control(ControlId::SeekBar).then_some(self.seek_bar)
    }

    /// Simulate the user moving the seek bar thumb.
    pub fn drag_seek_bar_to(&mut self, value: f64) {
        if self.has_control(ControlId::SeekBar) {
            self.seek_bar.value = value;
        }
    }
}

impl ControlSurface for PageModel {
    fn has_control(&self, id: ControlId) -> bool {
        self.present.contains(&id)
    }

    fn set_visible(&mut self, id: ControlId, visible: bool) {
        if self.has_control(id) {
            self.visible.insert(id, visible);
        }
    }

    fn seek_value(&self) -> Option<f64> {
        self.seek_bar().map(|bar| bar.value)
    }

    fn set_seek_value(&mut self, value: f64) {
        if self.has_control(ControlId::SeekBar) {
            self.seek_bar.value = value;
        }
    }

    fn set_seek_max(&mut self, max: f64) {
        if self.has_control(ControlId::SeekBar) {
            self.seek_bar.max = Some(max);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_page_starts_with_start_button_only() {
        let page = PageModel::full();
        assert_eq!(page.is_visible(ControlId::StartButton), Some(true));
        assert_eq!(page.is_visible(ControlId::StopButton), Some(false));
        assert_eq!(page.is_visible(ControlId::RestartButton), Some(false));
        assert_eq!(page.seek_bar(), Some(SeekBar::default()));
    }

    #[test]
    fn test_writes_to_missing_controls_are_dropped() {
        let mut page = PageModel::with_controls([ControlId::StartButton]);
        page.set_seek_value(12.0);
        page.set_seek_max(30.0);
        page.set_visible(ControlId::StopButton, true);

        assert_eq!(page.seek_value(), None);
        assert_eq!(page.is_visible(ControlId::StopButton), None);
    }

    #[test]
    fn test_seek_bar_max_unset_until_written() {
        let mut page = PageModel::full();
        assert_eq!(page.seek_bar().unwrap().max, None);
        page.set_seek_max(4.5);
        assert_eq!(page.seek_bar().unwrap().max, Some(4.5));
    }

    #[test]
    fn test_register_resets_page() {
        let mut page = PageModel::full();
        page.set_seek_value(3.0);
        page.register([ControlId::SeekBar]);
        assert_eq!(page.seek_value(), Some(0.0));
        assert!(!page.has_control(ControlId::StartButton));
    }
}
