//! # Game Tasks
//!
//! Load and submit for the open game view.

use crate::app::events::AppEvent;
use crate::app::game_view::GameView;
use async_channel::Sender;
use std::sync::Arc;
use tokio::spawn;

/// Game actions that go through the wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Move,
    OfferDraw,
    AcceptDraw,
    Resign,
}

impl GameAction {
    pub fn label(self) -> &'static str {
        match self {
            GameAction::Move => "move",
            GameAction::OfferDraw => "draw offer",
            GameAction::AcceptDraw => "draw acceptance",
            GameAction::Resign => "resignation",
        }
    }
}

pub(crate) fn load(view: Arc<GameView>, event_tx: Sender<AppEvent>) {
    spawn(async move {
        let result = view.load_game().await;
        let _ = event_tx
            .send(AppEvent::GameLoaded {
                game_id: view.game_id(),
                result,
            })
            .await;
    });
}

pub(crate) fn submit(view: Arc<GameView>, action: GameAction, event_tx: Sender<AppEvent>) {
    spawn(async move {
        let result = match action {
            GameAction::Move => view.submit_move().await,
            GameAction::OfferDraw => view.submit_offer_draw().await,
            GameAction::AcceptDraw => view.submit_accept_draw().await,
            GameAction::Resign => view.submit_resign().await,
        };
        let _ = event_tx
            .send(AppEvent::GameActionResult {
                game_id: view.game_id(),
                action: action.label(),
                result,
            })
            .await;
    });
}
