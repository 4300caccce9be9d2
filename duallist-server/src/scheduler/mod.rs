//! Background Schedulers
//!
//! ## Mutation flush loops
//! One periodic task per mutation queue (add every 10 s, update every 1 s by
//! default). Each loop waits for its own flush to finish before scheduling
//! the next tick. When the shutdown channel flips, each loop drains whatever
//! is still pending and exits; `main` awaits the returned handles so no
//! accepted mutation is lost on a clean stop.

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::state::AppState;

pub fn start_flush_loops(
    state: &AppState,
    shutdown: &watch::Receiver<bool>,
) -> Vec<JoinHandle<()>> {
    let handles = state.dispatcher().start(shutdown);
    tracing::debug!("[Scheduler] {} flush loops running", handles.len());
    handles
}

/// Await every flush loop, logging any that panicked.
pub async fn join_flush_loops(handles: Vec<JoinHandle<()>>) {
    for handle in handles {
        if let Err(e) = handle.await {
            tracing::error!("[Scheduler] Flush loop terminated abnormally: {}", e);
        }
    }
}
