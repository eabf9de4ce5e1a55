//! # Application Events
//!
//! Results of spawned tasks, delivered to the command loop.

use crate::core::error::AppError;
use crate::services::wallet::Session;
use chess_shared::{Challenge, ChessGameSummary, ExecuteResult};

/// Async task results sent to the command loop
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Session snapshot changed (connect, disconnect, account switch)
    SessionChanged(Session),
    /// Explicit connect finished
    ConnectResult(Result<String, AppError>),
    /// Startup reconnect finished; `None` when there was nothing to restore
    RestoreResult(Result<Option<String>, AppError>),
    /// Game list received
    GamesResult(Result<Vec<ChessGameSummary>, AppError>),
    /// Challenge list received
    ChallengesResult(Result<Vec<Challenge>, AppError>),
    /// Create / accept / cancel challenge finished
    ChallengeActionResult {
        action: &'static str,
        result: Result<ExecuteResult, AppError>,
    },
    /// Game (re)load finished
    GameLoaded {
        game_id: u64,
        result: Result<(), AppError>,
    },
    /// Move, draw or resign submission finished
    GameActionResult {
        game_id: u64,
        action: &'static str,
        result: Result<ExecuteResult, AppError>,
    },
}
