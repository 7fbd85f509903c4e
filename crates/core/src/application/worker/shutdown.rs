// Engine Shutdown Token

use std::sync::Arc;
use tokio::sync::watch;

/// Shutdown signal for cooperative termination
#[derive(Clone)]
pub struct ShutdownToken {
    rx: watch::Receiver<bool>,
}

impl ShutdownToken {
    /// Check if shutdown was requested
    pub fn is_shutdown(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait for shutdown signal (returns immediately if already signalled)
    pub async fn wait(&mut self) {
        let _ = self.rx.wait_for(|stopped| *stopped).await;
    }
}

/// Shutdown sender, shared by the serializer (Exit) and the daemon (Ctrl+C)
#[derive(Clone)]
pub struct ShutdownSender {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownSender {
    /// Signal shutdown to every token holder
    pub fn shutdown(&self) {
        self.tx.send_replace(true);
    }
}

/// Create a shutdown channel
pub fn shutdown_channel() -> (ShutdownSender, ShutdownToken) {
    let (tx, rx) = watch::channel(false);
    (ShutdownSender { tx: Arc::new(tx) }, ShutdownToken { rx })
}
