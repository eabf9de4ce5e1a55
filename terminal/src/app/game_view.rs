//! # Game View Synchronizer
//!
//! Keeps one consistent view model per game id, bridging the authoritative
//! remote game and a locally staged candidate move.
//!
//! - The local position is always rebuilt from the full remote log on load
//!   and on cancel.
//! - Only an explicit cancel or a successful submit clears the staged move.
//! - Flags are re-derived from a fresh snapshot (including the session's
//!   current address) before every decision.
//! - No request is cancelled; a late response overwrites a newer one.

use crate::app::fee::FeeTier;
use crate::app::state::{GameViewState, StagedMove, ViewStatus};
use crate::app::view_flags::{ViewFlags, ViewSnapshot};
use crate::core::error::{AppError, Result};
use crate::services::api::ChessContract;
use crate::services::rules::{to_contract_notation, LocalPosition};
use chess_shared::{ExecuteResult, MoveAction};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Submission {
    Move,
    OfferDraw,
    AcceptDraw,
    Resign,
}

pub struct GameView {
    contract: ChessContract,
    state: RwLock<GameViewState>,
}

impl GameView {
    pub fn new(contract: ChessContract, game_id: u64) -> Self {
        Self {
            contract,
            state: RwLock::new(GameViewState::new(game_id)),
        }
    }

    pub fn game_id(&self) -> u64 {
        self.state.read().game_id
    }

    pub fn snapshot(&self) -> GameViewState {
        self.state.read().clone()
    }

    /// Re-derive flags after a session change that kept the same address.
    pub fn recompute(&self) {
        let address = self.contract.session().address();
        let mut state = self.state.write();
        recompute_flags(&mut state, address.as_deref());
    }

    /// The wallet switched accounts: a move staged by the previous account
    /// is dropped and the loaded position restored. An in-flight submission
    /// keeps its staged move until it settles.
    pub fn account_changed(&self) {
        let address = self.contract.session().address();
        let mut state = self.state.write();
        if state.status != ViewStatus::Submitting {
            if let Some(staged) = state.staged.take() {
                info!(game_id = state.game_id, san = %staged.san, "Staged move dropped after account change");
                let rebuilt = state
                    .game
                    .as_ref()
                    .and_then(|game| LocalPosition::replay(&game.moves).ok());
                if let Some(position) = rebuilt {
                    state.position = position;
                }
                state.status = if state.game.is_some() {
                    ViewStatus::Loaded
                } else {
                    ViewStatus::Idle
                };
            }
        }
        recompute_flags(&mut state, address.as_deref());
    }

    /// Fetch the game and rebuild everything from its log.
    ///
    /// On failure the previously loaded game, position and staged move are
    /// kept. Refused while a submission is in flight so the staged move
    /// survives until that submission settles.
    pub async fn load_game(&self) -> Result<()> {
        let game_id = {
            let mut state = self.state.write();
            ensure_idle(&state)?;
            state.status = ViewStatus::Loading;
            state.game_id
        };
        debug!(game_id, "Loading game");

        let fetched = self
            .contract
            .get_game(game_id)
            .await
            .and_then(|game| LocalPosition::replay(&game.moves).map(|position| (game, position)));
        let address = self.contract.session().address();

        let mut state = self.state.write();
        match fetched {
            Ok((game, position)) => {
                let tier = FeeTier::for_move_count(game.moves.len());
                info!(game_id, moves = game.moves.len(), tier = %tier, status = ?game.status, "Game loaded");
                state.game = Some(game);
                state.position = position;
                state.staged = None;
                state.fee_tier = tier;
                state.status = ViewStatus::Loaded;
                state.last_error = None;
                recompute_flags(&mut state, address.as_deref());
                Ok(())
            }
            Err(e) => {
                warn!(game_id, error = %e, "Game load failed");
                state.status = ViewStatus::LoadError;
                state.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Apply a candidate move locally. Only allowed while interactive.
    pub fn stage_move(&self, candidate: &str) -> Result<()> {
        let address = self.contract.session().address();
        let mut state = self.state.write();
        ensure_idle(&state)?;

        recompute_flags(&mut state, address.as_deref());
        if !state.flags.interactive {
            return Err(AppError::Validation(blocked_reason(&state, address.as_deref())));
        }

        let mut position = state.position.clone();
        let san = position.apply(candidate)?;

        info!(game_id = state.game_id, san = %san, "Move staged");
        state.position = position;
        state.staged = Some(StagedMove { san });
        state.status = ViewStatus::Staging;
        state.last_error = None;
        recompute_flags(&mut state, address.as_deref());
        Ok(())
    }

    /// Drop the staged move and rebuild the position from the last loaded
    /// game.
    pub fn cancel_staged_move(&self) -> Result<()> {
        let address = self.contract.session().address();
        let mut state = self.state.write();
        ensure_idle(&state)?;

        let position = match &state.game {
            Some(game) => LocalPosition::replay(&game.moves)?,
            None => LocalPosition::new(),
        };
        if let Some(staged) = state.staged.take() {
            debug!(game_id = state.game_id, san = %staged.san, "Staged move cancelled");
        }
        state.position = position;
        state.status = if state.game.is_some() {
            ViewStatus::Loaded
        } else {
            ViewStatus::Idle
        };
        recompute_flags(&mut state, address.as_deref());
        Ok(())
    }

    /// Submit the staged move.
    pub async fn submit_move(&self) -> Result<ExecuteResult> {
        self.submit(Submission::Move).await
    }

    /// Submit the staged move together with a draw offer.
    pub async fn submit_offer_draw(&self) -> Result<ExecuteResult> {
        self.submit(Submission::OfferDraw).await
    }

    pub async fn submit_accept_draw(&self) -> Result<ExecuteResult> {
        self.submit(Submission::AcceptDraw).await
    }

    pub async fn submit_resign(&self) -> Result<ExecuteResult> {
        self.submit(Submission::Resign).await
    }

    async fn submit(&self, kind: Submission) -> Result<ExecuteResult> {
        let (game_id, action, tier) = {
            let address = self.contract.session().address();
            let mut state = self.state.write();
            ensure_idle(&state)?;
            recompute_flags(&mut state, address.as_deref());

            let action = prepare(&state, kind, address.as_deref())?;
            state.status = ViewStatus::Submitting;
            state.last_error = None;
            (state.game_id, action, state.fee_tier)
        };
        info!(game_id, action = ?action, tier = %tier, "Submitting game action");

        match self.contract.play(game_id, action, Some(tier.fee())).await {
            Ok(result) => {
                {
                    let mut state = self.state.write();
                    let rebuilt = state
                        .game
                        .as_ref()
                        .and_then(|game| LocalPosition::replay(&game.moves).ok());
                    if let Some(position) = rebuilt {
                        state.position = position;
                    }
                    state.staged = None;
                    state.status = ViewStatus::Loaded;
                    state.last_tx = Some(result.clone());
                }
                info!(game_id, tx_hash = %result.transaction_hash, "Game action confirmed");

                // Reload failures are recorded on the view
                if let Err(e) = self.load_game().await {
                    warn!(game_id, error = %e, "Reload after submit failed");
                }
                Ok(result)
            }
            Err(e) => {
                warn!(game_id, error = %e, "Game action failed");
                let mut state = self.state.write();
                state.status = ViewStatus::SubmitError;
                state.last_error = Some(e.clone());
                Err(e)
            }
        }
    }
}

fn recompute_flags(state: &mut GameViewState, address: Option<&str>) {
    state.flags = ViewFlags::derive(&ViewSnapshot {
        address,
        game: state.game.as_ref(),
        turn: state.position.turn(),
        staged: state.staged.is_some(),
    });
}

fn ensure_idle(state: &GameViewState) -> Result<()> {
    if state.status == ViewStatus::Submitting {
        return Err(AppError::State("A submission is already in progress".to_string()));
    }
    Ok(())
}

/// Check the precondition for `kind` and build the contract action.
fn prepare(state: &GameViewState, kind: Submission, address: Option<&str>) -> Result<MoveAction> {
    let game = state
        .game
        .as_ref()
        .ok_or_else(|| AppError::Validation("No game loaded".to_string()))?;
    if let Some(status) = &game.status {
        return Err(AppError::Validation(format!("Game is over ({})", status)));
    }

    let staged_san = || {
        state
            .staged
            .as_ref()
            .map(|staged| to_contract_notation(&staged.san))
            .ok_or_else(|| AppError::Validation("No move staged".to_string()))
    };

    match kind {
        Submission::Move => Ok(MoveAction::MakeMove(staged_san()?)),
        Submission::OfferDraw => {
            let san = staged_san()?;
            if state.flags.draw_offered {
                return Err(AppError::Validation("A draw offer is already pending".to_string()));
            }
            Ok(MoveAction::OfferDraw(san))
        }
        Submission::AcceptDraw => {
            if !state.flags.draw_offered {
                return Err(AppError::Validation("No draw has been offered".to_string()));
            }
            Ok(MoveAction::AcceptDraw)
        }
        Submission::Resign => {
            if !state.flags.interactive {
                return Err(AppError::Validation(blocked_reason(state, address)));
            }
            Ok(MoveAction::Resign)
        }
    }
}

fn blocked_reason(state: &GameViewState, address: Option<&str>) -> String {
    match (&state.game, address) {
        (None, _) => "No game loaded".to_string(),
        (Some(game), _) if game.is_over() => {
            format!("Game is over ({})", game.status.as_deref().unwrap_or_default())
        }
        (Some(_), _) if state.staged.is_some() => "A move is already staged".to_string(),
        (Some(_), None) => "Connect a wallet first".to_string(),
        (Some(game), Some(address)) if !game.involves(address) => {
            "You are not playing in this game".to_string()
        }
        (Some(_), Some(_)) => "Not your turn".to_string(),
    }
}
