// Server loop module
// Accepts connections until a shutdown signal arrives, then drains

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::{wait_for_shutdown, SignalHandler};
use crate::config::AppState;
use crate::logger;

/// Interval between checks of the active connection counter while draining
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run the accept loop on the current `LocalSet`.
///
/// On shutdown the listener is closed first. Open connections see the same
/// signal and shut down gracefully; they get up to
/// `performance.request_timeout` seconds to finish.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    active_connections: Arc<AtomicUsize>,
    signals: Arc<SignalHandler>,
) {
    let mut shutdown = signals.subscribe();
    let conn_shutdown = signals.subscribe();

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections, &conn_shutdown);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = wait_for_shutdown(&mut shutdown) => {
                break;
            }
        }
    }

    drop(listener);
    logger::log_shutdown(active_connections.load(Ordering::SeqCst));

    let grace = Duration::from_secs(state.config.performance.request_timeout);
    if !wait_for_connections(&active_connections, grace).await {
        logger::log_warning(&format!(
            "Shutdown grace period elapsed with {} connection(s) still open",
            active_connections.load(Ordering::SeqCst)
        ));
    }
}

/// Wait until the counter reaches zero or `grace` elapses.
///
/// Returns `true` when every connection finished in time.
async fn wait_for_connections(counter: &AtomicUsize, grace: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + grace;
    loop {
        if counter.load(Ordering::SeqCst) == 0 {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}
