//! # Lobby Tasks
//!
//! Games and challenges lists plus challenge actions.

use crate::app::events::AppEvent;
use crate::app::lists;
use crate::app::state::AppState;
use crate::services::api::ChessContract;
use async_channel::Sender;
use chess_shared::CreateChallengeRequest;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::spawn;

/// Fetch live games. Skipped while a fetch is already running.
pub(crate) fn fetch_games(state: Arc<RwLock<AppState>>, contract: ChessContract, event_tx: Sender<AppEvent>) {
    {
        let mut state = state.write();
        if state.fetching_games {
            return;
        }
        state.fetching_games = true;
    }

    spawn(async move {
        let result = lists::load_games(&contract).await;
        state.write().fetching_games = false;
        let _ = event_tx.send(AppEvent::GamesResult(result)).await;
    });
}

/// Fetch open challenges. Skipped while a fetch is already running.
pub(crate) fn fetch_challenges(state: Arc<RwLock<AppState>>, contract: ChessContract, event_tx: Sender<AppEvent>) {
    {
        let mut state = state.write();
        if state.fetching_challenges {
            return;
        }
        state.fetching_challenges = true;
    }

    spawn(async move {
        let result = lists::load_challenges(&contract).await;
        state.write().fetching_challenges = false;
        let _ = event_tx.send(AppEvent::ChallengesResult(result)).await;
    });
}

pub(crate) fn create_challenge(contract: ChessContract, request: CreateChallengeRequest, event_tx: Sender<AppEvent>) {
    spawn(async move {
        let result = contract.create_challenge(request).await;
        let _ = event_tx
            .send(AppEvent::ChallengeActionResult {
                action: "create challenge",
                result,
            })
            .await;
    });
}

pub(crate) fn accept_challenge(contract: ChessContract, challenge_id: u64, event_tx: Sender<AppEvent>) {
    spawn(async move {
        let result = contract.accept_challenge(challenge_id).await;
        let _ = event_tx
            .send(AppEvent::ChallengeActionResult {
                action: "accept challenge",
                result,
            })
            .await;
    });
}

pub(crate) fn cancel_challenge(contract: ChessContract, challenge_id: u64, event_tx: Sender<AppEvent>) {
    spawn(async move {
        let result = contract.cancel_challenge(challenge_id).await;
        let _ = event_tx
            .send(AppEvent::ChallengeActionResult {
                action: "cancel challenge",
                result,
            })
            .await;
    });
}
