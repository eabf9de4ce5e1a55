//! # Application State Types
//!
//! Per-game view model and the terminal's top-level state.

use crate::app::fee::FeeTier;
use crate::app::game_view::GameView;
use crate::app::view_flags::ViewFlags;
use crate::core::error::AppError;
use crate::services::rules::LocalPosition;
use crate::services::wallet::Session;
use chess_shared::{Challenge, ChessGame, ChessGameSummary, ExecuteResult};
use std::sync::Arc;

/// Game view lifecycle.
///
/// ```text
/// Idle → Loading → Loaded | LoadError
/// Loaded ⇄ Staging
/// Loaded | Staging | SubmitError → Submitting → Loaded (reload) | SubmitError
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus {
    Idle,
    Loading,
    Loaded,
    LoadError,
    Staging,
    Submitting,
    SubmitError,
}

impl ViewStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ViewStatus::Idle => "idle",
            ViewStatus::Loading => "loading",
            ViewStatus::Loaded => "loaded",
            ViewStatus::LoadError => "load failed",
            ViewStatus::Staging => "move staged",
            ViewStatus::Submitting => "submitting",
            ViewStatus::SubmitError => "submit failed",
        }
    }
}

/// Candidate move held locally until submitted or cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedMove {
    /// SAN as accepted by the local rules engine (`O-O`, not `0-0`).
    pub san: String,
}

/// View model for one game id.
#[derive(Debug, Clone)]
pub struct GameViewState {
    pub game_id: u64,
    pub status: ViewStatus,
    /// Last successfully loaded remote game.
    pub game: Option<ChessGame>,
    /// Replay of `game`, plus the staged move when there is one.
    pub position: LocalPosition,
    pub staged: Option<StagedMove>,
    pub fee_tier: FeeTier,
    pub flags: ViewFlags,
    pub last_error: Option<AppError>,
    pub last_tx: Option<ExecuteResult>,
}

impl GameViewState {
    pub fn new(game_id: u64) -> Self {
        Self {
            game_id,
            status: ViewStatus::Idle,
            game: None,
            position: LocalPosition::new(),
            staged: None,
            fee_tier: FeeTier::Low,
            flags: ViewFlags::default(),
            last_error: None,
            last_tx: None,
        }
    }
}

/// Terminal-wide state shared between the command loop and spawned tasks.
pub struct AppState {
    pub session: Session,
    pub games: Vec<ChessGameSummary>,
    pub challenges: Vec<Challenge>,
    /// Game currently open with `open <id>`.
    pub current: Option<Arc<GameView>>,
    /// List fetches in flight (skip duplicate requests)
    pub fetching_games: bool,
    pub fetching_challenges: bool,
    pub running: bool,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            games: Vec::new(),
            challenges: Vec::new(),
            current: None,
            fetching_games: false,
            fetching_challenges: false,
            running: true,
        }
    }
}
