// One-way delivery of messages towards the page
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

/// Fire-and-forget sink. Delivery failures are logged, never returned,
/// since nobody on the sending side could act on them.
pub trait Outbox<T>: Send + Sync {
    fn deliver(&self, message: T);
}

impl<T: Send + std::fmt::Debug> Outbox<T> for UnboundedSender<T> {
    fn deliver(&self, message: T) {
        if let Err(err) = self.send(message) {
            warn!("Dropping {:?}: receiver closed", err.0);
        }
    }
}

/// Emits every message as a Tauri event to the page.
#[cfg(feature = "desktop")]
pub struct WebviewOutbox {
    app: tauri::AppHandle,
    event: &'static str,
}

#[cfg(feature = "desktop")]
impl WebviewOutbox {
    pub fn new(app: tauri::AppHandle, event: &'static str) -> Self {
        Self { app, event }
    }
}

#[cfg(feature = "desktop")]
impl<T: serde::Serialize + Clone + Send> Outbox<T> for WebviewOutbox {
    fn deliver(&self, message: T) {
        use tauri::Emitter;

        if let Err(err) = self.app.emit(self.event, message) {
            warn!(event = self.event, "Failed to emit to webview: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn test_channel_outbox_delivers_in_order() {
        let (tx, mut rx) = unbounded_channel();
        tx.deliver(1);
        tx.deliver(2);
        assert_eq!(rx.try_recv().unwrap(), 1);
        assert_eq!(rx.try_recv().unwrap(), 2);
    }

    #[test]
    fn test_closed_channel_is_not_an_error() {
        let (tx, rx) = unbounded_channel::<u8>();
        drop(rx);
        tx.deliver(3);
    }
}
