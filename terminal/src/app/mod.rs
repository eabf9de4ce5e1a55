//! # Application Orchestrator
//!
//! [`App`] ties the command prompt to the session manager, the contract
//! client and the open game view.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Command loop (main)                      │
//! │  ┌──────────────────────────────────────────────────────┐   │
//! │  │  App                                                 │   │
//! │  │  - handle_command() - parsed user input              │   │
//! │  │  - handle_event() - async task results               │   │
//! │  └────────────┬─────────────────────────────────────────┘   │
//! │               │                                             │
//! │  ┌────────────▼─────────────────────────────────────────┐   │
//! │  │  State: Arc<RwLock<AppState>>                        │   │
//! │  │  - session snapshot, lists, open GameView            │   │
//! │  └──────────────────────────────────────────────────────┘   │
//! └───────────────────────┬─────────────────────────────────────┘
//!                         │ async_channel (unbounded)
//! ┌───────────────────────▼─────────────────────────────────────┐
//! │              Spawned tasks (Tokio)                          │
//! │  - tasks::session  connect, restore, session watcher        │
//! │  - tasks::lobby    games, challenges, challenge actions     │
//! │  - tasks::game     load, submit                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers never block: anything touching the network is spawned and
//! reports back as an [`AppEvent`]. Both handlers return the text to print.

pub mod commands;
pub mod events;
pub mod fee;
pub mod game_view;
pub mod lists;
pub mod state;
pub mod tasks;
pub mod view_flags;

pub use commands::Command;
pub use events::AppEvent;
pub use fee::FeeTier;
pub use game_view::GameView;
pub use state::*;
pub use view_flags::{ViewFlags, ViewSnapshot};

use crate::config::ClientConfig;
use crate::core::error::AppError;
use crate::services::api::ChessContract;
use crate::services::wallet::SessionManager;
use crate::ui::board;
use async_channel::{Receiver, Sender};
use parking_lot::RwLock;
use std::sync::Arc;
use tasks::game::GameAction;

pub struct App {
    pub state: Arc<RwLock<AppState>>,
    config: ClientConfig,
    session: Arc<SessionManager>,
    contract: ChessContract,
    event_tx: Sender<AppEvent>,
    event_rx: Receiver<AppEvent>,
}

impl App {
    pub fn new(config: ClientConfig, session: Arc<SessionManager>) -> Self {
        let (event_tx, event_rx) = async_channel::unbounded();
        let contract = ChessContract::new(session.clone(), config.contract.clone());
        let state = AppState::new(session.session());

        Self {
            state: Arc::new(RwLock::new(state)),
            config,
            session,
            contract,
            event_tx,
            event_rx,
        }
    }

    /// Watch the session and attempt a silent reconnect.
    pub fn start(&self) {
        tasks::session::watch(&self.session, self.event_tx.clone());
        tasks::session::restore(self.session.clone(), self.event_tx.clone());
    }

    /// Next task result. `None` once every sender is gone.
    pub async fn next_event(&self) -> Option<AppEvent> {
        self.event_rx.recv().await.ok()
    }

    pub fn is_running(&self) -> bool {
        self.state.read().running
    }

    fn prefix(&self) -> &str {
        self.config.bech32_prefix()
    }

    fn current_view(&self) -> Result<Arc<GameView>, String> {
        self.state
            .read()
            .current
            .clone()
            .ok_or_else(|| "No game open, use 'open <game_id>'".to_string())
    }

    fn render_view(&self, view: &GameView) -> String {
        let address = self.session.address();
        board::render_game(&view.snapshot(), address.as_deref(), self.prefix())
    }

    pub fn handle_command(&self, command: Command) -> String {
        tracing::debug!(command = ?command, "Handling command");
        match command {
            Command::Connect => {
                tasks::session::connect(self.session.clone(), self.event_tx.clone());
                "Connecting wallet, approve the request in your wallet...".to_string()
            }
            Command::Disconnect => {
                self.session.disconnect();
                "Wallet disconnected".to_string()
            }
            Command::Status => {
                let mut out = board::render_session(&self.session.session(), &self.config.chain.chain_id);
                if let Ok(view) = self.current_view() {
                    out.push_str(&self.render_view(&view));
                }
                out
            }
            Command::Games => {
                tasks::lobby::fetch_games(self.state.clone(), self.contract.clone(), self.event_tx.clone());
                "Loading games...".to_string()
            }
            Command::Challenges => {
                tasks::lobby::fetch_challenges(self.state.clone(), self.contract.clone(), self.event_tx.clone());
                "Loading challenges...".to_string()
            }
            Command::Challenge(request) => {
                tasks::lobby::create_challenge(self.contract.clone(), request, self.event_tx.clone());
                "Creating challenge, approve it in your wallet...".to_string()
            }
            Command::Accept(challenge_id) => {
                tasks::lobby::accept_challenge(self.contract.clone(), challenge_id, self.event_tx.clone());
                format!("Accepting challenge #{}...", challenge_id)
            }
            Command::CancelChallenge(challenge_id) => {
                tasks::lobby::cancel_challenge(self.contract.clone(), challenge_id, self.event_tx.clone());
                format!("Cancelling challenge #{}...", challenge_id)
            }
            Command::Open(game_id) => {
                let view = Arc::new(GameView::new(self.contract.clone(), game_id));
                self.state.write().current = Some(view.clone());
                tasks::game::load(view, self.event_tx.clone());
                format!("Loading game #{}...", game_id)
            }
            Command::Reload => match self.current_view() {
                Ok(view) => {
                    let game_id = view.game_id();
                    tasks::game::load(view, self.event_tx.clone());
                    format!("Reloading game #{}...", game_id)
                }
                Err(message) => message,
            },
            Command::Move(san) => self.with_view(|view| view.stage_move(&san)),
            Command::Cancel => self.with_view(|view| view.cancel_staged_move()),
            Command::Submit => self.submit(GameAction::Move),
            Command::OfferDraw => self.submit(GameAction::OfferDraw),
            Command::AcceptDraw => self.submit(GameAction::AcceptDraw),
            Command::Resign => self.submit(GameAction::Resign),
            Command::Help => commands::HELP.to_string(),
            Command::Quit => {
                self.state.write().running = false;
                "Bye".to_string()
            }
        }
    }

    /// Run a local view operation and render the result.
    fn with_view(&self, op: impl FnOnce(&GameView) -> crate::core::error::Result<()>) -> String {
        let view = match self.current_view() {
            Ok(view) => view,
            Err(message) => return message,
        };
        match op(&view) {
            Ok(()) => self.render_view(&view),
            Err(e) => e.to_string(),
        }
    }

    fn submit(&self, action: GameAction) -> String {
        match self.current_view() {
            Ok(view) => {
                let tier = view.snapshot().fee_tier;
                tasks::game::submit(view, action, self.event_tx.clone());
                format!("Submitting {} (fee {}), approve it in your wallet...", action.label(), tier)
            }
            Err(message) => message,
        }
    }

    /// Apply a task result. Returns text to print, if any.
    pub fn handle_event(&self, event: AppEvent) -> Option<String> {
        match event {
            AppEvent::SessionChanged(session) => {
                let (current, address_changed) = {
                    let mut state = self.state.write();
                    let address_changed = state.session.address != session.address;
                    state.session = session;
                    (state.current.clone(), address_changed)
                };
                match current {
                    Some(view) if address_changed => view.account_changed(),
                    Some(view) => view.recompute(),
                    None => {}
                }
                None
            }
            AppEvent::ConnectResult(Ok(address)) => Some(format!("Connected as {}", address)),
            AppEvent::ConnectResult(Err(e)) => Some(connect_failure(&e)),
            AppEvent::RestoreResult(Ok(Some(address))) => Some(format!("Session restored as {}", address)),
            AppEvent::RestoreResult(Ok(None)) => None,
            AppEvent::RestoreResult(Err(e)) => Some(format!("Could not restore session: {}", e)),
            AppEvent::GamesResult(Ok(games)) => {
                let address = self.session.address();
                let text = board::render_games(&games, address.as_deref(), self.prefix());
                self.state.write().games = games;
                Some(text)
            }
            AppEvent::GamesResult(Err(e)) => Some(format!("Could not load games: {}", e)),
            AppEvent::ChallengesResult(Ok(challenges)) => {
                let address = self.session.address();
                let text = board::render_challenges(&challenges, address.as_deref(), self.prefix());
                self.state.write().challenges = challenges;
                Some(text)
            }
            AppEvent::ChallengesResult(Err(e)) => Some(format!("Could not load challenges: {}", e)),
            AppEvent::ChallengeActionResult { action, result } => match result {
                Ok(tx) => {
                    tasks::lobby::fetch_challenges(self.state.clone(), self.contract.clone(), self.event_tx.clone());
                    Some(format!("{} confirmed at height {} (tx {})", capitalize(action), tx.height, tx.transaction_hash))
                }
                Err(e) => Some(format!("{} failed: {}", capitalize(action), e)),
            },
            AppEvent::GameLoaded { game_id, result } => {
                let view = self.current_view().ok().filter(|view| view.game_id() == game_id)?;
                Some(match result {
                    Ok(()) => self.render_view(&view),
                    Err(e) => format!("Could not load game #{}: {}", game_id, e),
                })
            }
            AppEvent::GameActionResult { game_id, action, result } => {
                let view = self.current_view().ok().filter(|view| view.game_id() == game_id);
                match (result, view) {
                    (Ok(tx), Some(view)) => Some(format!(
                        "{} confirmed (tx {})\n{}",
                        capitalize(action),
                        tx.transaction_hash,
                        self.render_view(&view)
                    )),
                    (Ok(tx), None) => Some(format!("{} confirmed (tx {})", capitalize(action), tx.transaction_hash)),
                    (Err(e @ AppError::Validation(_)), _) | (Err(e @ AppError::State(_)), _) => Some(e.to_string()),
                    (Err(e), _) => Some(format!(
                        "{} failed: {}\nAny staged move is kept; submit again or cancel",
                        capitalize(action),
                        e
                    )),
                }
            }
        }
    }

    pub fn shutdown(&self) {
        self.session.shutdown();
    }
}

fn connect_failure(err: &AppError) -> String {
    match err {
        AppError::ProviderUnavailable(_) => format!("{}\nStart the wallet bridge and retry 'connect'", err),
        AppError::ApprovalRejected(_) => format!("{}\nRun 'connect' to try again", err),
        _ if err.is_retryable() => format!("{}\nRetry with 'connect'", err),
        _ => err.to_string(),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
