//! # Chess Contract Client
//!
//! Typed wrappers over the contract's query and execute messages. Reads go
//! through [`SessionManager::query`] and never prompt the wallet; writes go
//! through [`SessionManager::execute`].

use crate::core::error::Result;
use crate::services::wallet::SessionManager;
use chess_shared::{
    Challenge, ChessGame, ChessGameSummary, CreateChallengeRequest, ExecuteMsg, ExecuteResult, Fee,
    MoveAction, QueryMsg,
};
use std::sync::Arc;

/// Client bound to one deployed chess contract.
#[derive(Clone)]
pub struct ChessContract {
    session: Arc<SessionManager>,
    address: String,
}

impl ChessContract {
    pub fn new(session: Arc<SessionManager>, address: impl Into<String>) -> Self {
        Self {
            session,
            address: address.into(),
        }
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Open challenges, optionally only those involving `player`.
    #[tracing::instrument(skip(self))]
    pub async fn get_challenges(&self, player: Option<&str>) -> Result<Vec<Challenge>> {
        let msg = QueryMsg::GetChallenges {
            player: player.map(str::to_string),
        };
        self.session.query_as(&self.address, &msg).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_game(&self, game_id: u64) -> Result<ChessGame> {
        self.session
            .query_as(&self.address, &QueryMsg::GetGame { game_id })
            .await
    }

    /// Game summaries. Filters are passed through as given.
    #[tracing::instrument(skip(self))]
    pub async fn get_games(&self, game_over: Option<bool>, player: Option<&str>) -> Result<Vec<ChessGameSummary>> {
        let msg = QueryMsg::GetGames {
            game_over,
            player: player.map(str::to_string),
        };
        self.session.query_as(&self.address, &msg).await
    }

    pub async fn create_challenge(&self, request: CreateChallengeRequest) -> Result<ExecuteResult> {
        tracing::info!(
            opponent = ?request.opponent,
            play_as = ?request.play_as,
            block_time_limit = ?request.block_time_limit,
            "Creating challenge"
        );
        self.execute(&ExecuteMsg::CreateChallenge(request), None).await
    }

    pub async fn accept_challenge(&self, challenge_id: u64) -> Result<ExecuteResult> {
        tracing::info!(challenge_id, "Accepting challenge");
        self.execute(&ExecuteMsg::AcceptChallenge { challenge_id }, None)
            .await
    }

    pub async fn cancel_challenge(&self, challenge_id: u64) -> Result<ExecuteResult> {
        tracing::info!(challenge_id, "Cancelling challenge");
        self.execute(&ExecuteMsg::CancelChallenge { challenge_id }, None)
            .await
    }

    /// `san` must already be in contract notation.
    pub async fn make_move(&self, game_id: u64, san: &str, fee: Option<Fee>) -> Result<ExecuteResult> {
        self.play(game_id, MoveAction::MakeMove(san.to_string()), fee)
            .await
    }

    /// Play `san` and offer a draw in the same action.
    pub async fn offer_draw(&self, game_id: u64, san: &str, fee: Option<Fee>) -> Result<ExecuteResult> {
        self.play(game_id, MoveAction::OfferDraw(san.to_string()), fee)
            .await
    }

    pub async fn accept_draw(&self, game_id: u64, fee: Option<Fee>) -> Result<ExecuteResult> {
        self.play(game_id, MoveAction::AcceptDraw, fee).await
    }

    pub async fn resign(&self, game_id: u64, fee: Option<Fee>) -> Result<ExecuteResult> {
        self.play(game_id, MoveAction::Resign, fee).await
    }

    /// Submit any game action.
    pub async fn play(&self, game_id: u64, action: MoveAction, fee: Option<Fee>) -> Result<ExecuteResult> {
        tracing::info!(game_id, action = ?action, "Submitting game action");
        self.execute(&ExecuteMsg::Move { game_id, action }, fee).await
    }

    async fn execute(&self, msg: &ExecuteMsg, fee: Option<Fee>) -> Result<ExecuteResult> {
        self.session.execute_msg(&self.address, msg, fee).await
    }
}
