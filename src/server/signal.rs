// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use std::sync::Arc;
use tokio::sync::watch;

/// Signal handler state
///
/// Shutdown is broadcast on a watch channel: the accept loop and every open
/// connection hold a receiver.
pub struct SignalHandler {
    shutdown: watch::Sender<bool>,
}

impl SignalHandler {
    pub fn new() -> Self {
        let (shutdown, _) = watch::channel(false);
        Self { shutdown }
    }

    /// Request shutdown. Receivers subscribed later still observe it.
    pub fn trigger_shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve once shutdown has been requested.
///
/// A dropped sender never resolves this; shutdown is only ever explicit.
pub async fn wait_for_shutdown(shutdown: &mut watch::Receiver<bool>) {
    if shutdown.wait_for(|requested| *requested).await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Start signal handlers (Unix)
///
/// Registration happens before the listening task is spawned so a failure
/// surfaces to the caller.
///
/// | Signal  | Action        |
/// |---------|---------------|
/// | SIGTERM | Graceful stop |
/// | SIGINT  | Graceful stop |
#[cfg(unix)]
pub fn start_signal_handler(handler: Arc<SignalHandler>) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tracing::debug!(pid = std::process::id(), "signal handlers registered");

    tokio::spawn(async move {
        let name = tokio::select! {
            _ = sigterm.recv() => "SIGTERM",
            _ = sigint.recv() => "SIGINT",
        };
        tracing::info!(signal = name, "shutdown requested");
        handler.trigger_shutdown();
    });

    Ok(())
}

/// Start signal handlers (non-Unix: Ctrl+C only)
#[cfg(not(unix))]
pub fn start_signal_handler(handler: Arc<SignalHandler>) -> std::io::Result<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!(signal = "ctrl-c", "shutdown requested");
                handler.trigger_shutdown();
            }
            Err(err) => crate::logger::log_error(&format!("Failed to listen for Ctrl+C: {err}")),
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_before_subscribe_is_not_lost() {
        let handler = SignalHandler::new();
        let mut early = handler.subscribe();

        handler.trigger_shutdown();
        let mut late = handler.subscribe();

        for rx in [&mut early, &mut late] {
            tokio::time::timeout(Duration::from_secs(1), wait_for_shutdown(rx))
                .await
                .expect("shutdown should be observed");
        }
    }

    #[tokio::test]
    async fn test_pending_until_triggered() {
        let handler = SignalHandler::new();
        let mut rx = handler.subscribe();
        let waited = tokio::time::timeout(Duration::from_millis(30), wait_for_shutdown(&mut rx)).await;
        assert!(waited.is_err());
    }
}
