//! Session invalidation bridge.
//!
//! The HTTP adapter publishes [`SessionInvalidated`] whenever a 401
//! invalidates the persisted session. This bridge forwards each signal into
//! the auth store as an explicit action, so a 401 on *any* request - a
//! todos fetch included - converges the auth store to anonymous without
//! relying on shared-storage side effects.

use crate::AuthStore;
use crate::actions::AuthAction;
use crate::providers::AuthGateway;
use donelist_api::SessionInvalidated;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Spawn the task forwarding adapter invalidation signals into the auth
/// store.
///
/// The task ends when the adapter side closes (the client was dropped) or
/// the store stops accepting actions (shutdown).
pub fn spawn_invalidation_bridge<A>(
    store: AuthStore<A>,
    mut invalidations: broadcast::Receiver<SessionInvalidated>,
) -> JoinHandle<()>
where
    A: AuthGateway + Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        loop {
            match invalidations.recv().await {
                Ok(SessionInvalidated) => {
                    if store.send(AuthAction::SessionInvalidated).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // Convergence is idempotent, a lost signal is covered by
                    // the next one
                    tracing::warn!(skipped, "invalidation bridge lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
