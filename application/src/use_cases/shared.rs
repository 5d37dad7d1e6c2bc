//! Shared helpers for use cases

use tokio::task::JoinSet;
use tracing::warn;

/// Best-effort parallel collection.
///
/// Drains a [`JoinSet`], handing every task outcome to `on_result` in
/// completion order. A panicked or aborted task is logged and absorbed, so
/// one bad task never interrupts its siblings. Callers re-align results to
/// their own canonical order inside the handler (stages index by roster
/// position).
pub(crate) async fn join_all_settled<T: 'static>(
    mut join_set: JoinSet<T>,
    mut on_result: impl FnMut(T),
) {
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok(value) => on_result(value),
            Err(e) => warn!("Task join error: {}", e),
        }
    }
}
