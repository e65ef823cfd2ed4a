// Reactive bindings installed by a playback session
use std::collections::BTreeSet;

/// Every reaction the controller can have to media or seek bar events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Binding {
    Progress,
    Completion,
    MetadataReady,
    SeekPress,
    SeekRelease,
    SeekCommit,
}

impl Binding {
    pub const ALL: [Binding; 6] = [
        Binding::Progress,
        Binding::Completion,
        Binding::MetadataReady,
        Binding::SeekPress,
        Binding::SeekRelease,
        Binding::SeekCommit,
    ];
}

/// The set of currently installed bindings.
///
/// An event whose binding is not installed is ignored by the controller.
#[derive(Debug, Clone, Default)]
pub struct Subscriptions {
    active: BTreeSet<Binding>,
}

impl Subscriptions {
    pub fn subscribe(&mut self, binding: Binding) {
        self.active.insert(binding);
    }

    pub fn unsubscribe(&mut self, binding: Binding) {
        self.active.remove(&binding);
    }

    pub fn is_active(&self, binding: Binding) -> bool {
        self.active.contains(&binding)
    }

    pub fn install_all(&mut self) {
        self.active.extend(Binding::ALL);
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn active(&self) -> impl Iterator<Item = Binding> + '_ {
        self.active.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_all_then_suspend_progress() {
        let mut subscriptions = Subscriptions::default();
        subscriptions.install_all();
        subscriptions.unsubscribe(Binding::Progress);

        assert!(!subscriptions.is_active(Binding::Progress));
        assert!(subscriptions.is_active(Binding::SeekCommit));
        assert_eq!(subscriptions.active().count(), 5);
    }

    #[test]
    fn test_subscribe_is_idempotent() {
        let mut subscriptions = Subscriptions::default();
        subscriptions.subscribe(Binding::Progress);
        subscriptions.subscribe(Binding::Progress);
        assert_eq!(subscriptions.active().count(), 1);

        subscriptions.clear();
        assert!(subscriptions.is_empty());
    }
}
