//! # Session Tasks
//!
//! Wallet connect / restore and forwarding of session snapshots.

use crate::app::events::AppEvent;
use crate::services::wallet::SessionManager;
use async_channel::Sender;
use std::sync::Arc;
use tokio::spawn;
use tracing::debug;

/// Connect the wallet. May open an approval prompt.
pub(crate) fn connect(session: Arc<SessionManager>, event_tx: Sender<AppEvent>) {
    spawn(async move {
        let result = session.connect().await;
        let _ = event_tx.send(AppEvent::ConnectResult(result)).await;
    });
}

/// Silent reconnect when the user stayed connected last time.
pub(crate) fn restore(session: Arc<SessionManager>, event_tx: Sender<AppEvent>) {
    spawn(async move {
        let result = session.restore().await;
        let _ = event_tx.send(AppEvent::RestoreResult(result)).await;
    });
}

/// Forward every session change to the command loop.
pub(crate) fn watch(session: &SessionManager, event_tx: Sender<AppEvent>) {
    let mut updates = session.subscribe();
    spawn(async move {
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            if event_tx.send(AppEvent::SessionChanged(snapshot)).await.is_err() {
                break;
            }
        }
        debug!("Session watcher stopped");
    });
}
