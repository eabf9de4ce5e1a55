//! Scripted wallet, chain and store doubles for unit tests.

use crate::core::error::{AppError, Result};
use crate::core::service::{
    ClientFactory, OfflineSigner, QueryClient, SessionStore, SigningClient, WalletEvent,
    WalletProvider,
};
use async_trait::async_trait;
use chess_shared::{
    AccountData, ChainInfo, Challenge, ChessGame, ChessGameSummary, Coin, ExecuteMsg,
    ExecuteRequest, ExecuteResult, Fee, MoveAction, MoveRecord, PlayerColor, ProviderStatus,
    QueryMsg,
};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn account(address: &str) -> AccountData {
    AccountData {
        address: address.to_string(),
        algo: "secp256k1".to_string(),
        pubkey: String::new(),
    }
}

pub(crate) struct MockProvider {
    status: Mutex<Result<ProviderStatus>>,
    suggest: Mutex<Result<()>>,
    enable: Mutex<Result<()>>,
    accounts: Arc<Mutex<Vec<AccountData>>>,
    calls: Mutex<Vec<String>>,
    events: (async_channel::Sender<WalletEvent>, async_channel::Receiver<WalletEvent>),
}

impl MockProvider {
    pub fn new(address: &str) -> Self {
        Self {
            status: Mutex::new(Ok(ProviderStatus {
                version: "0.12.0".to_string(),
                suggest_chain: true,
            })),
            suggest: Mutex::new(Ok(())),
            enable: Mutex::new(Ok(())),
            accounts: Arc::new(Mutex::new(vec![account(address)])),
            calls: Mutex::new(Vec::new()),
            events: async_channel::unbounded(),
        }
    }

    pub fn set_status(&self, status: Result<ProviderStatus>) {
        *self.status.lock() = status;
    }

    pub fn set_suggest_supported(&self, supported: bool) {
        if let Ok(status) = self.status.lock().as_mut() {
            status.suggest_chain = supported;
        }
    }

    pub fn set_enable(&self, result: Result<()>) {
        *self.enable.lock() = result;
    }

    pub fn set_address(&self, address: &str) {
        *self.accounts.lock() = vec![account(address)];
    }

    pub fn emit(&self, event: WalletEvent) {
        let _ = self.events.0.try_send(event);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().push(call.to_string());
    }
}

#[async_trait]
impl WalletProvider for MockProvider {
    async fn status(&self) -> Result<ProviderStatus> {
        self.record("status");
        self.status.lock().clone()
    }

    async fn suggest_chain(&self, _chain: &ChainInfo) -> Result<()> {
        self.record("suggest_chain");
        self.suggest.lock().clone()
    }

    async fn enable(&self, _chain_id: &str) -> Result<()> {
        self.record("enable");
        self.enable.lock().clone()
    }

    async fn offline_signer(&self, _chain_id: &str) -> Result<Arc<dyn OfflineSigner>> {
        self.record("offline_signer");
        Ok(Arc::new(MockSigner {
            accounts: self.accounts.clone(),
        }))
    }

    async fn subscribe(&self) -> Result<async_channel::Receiver<WalletEvent>> {
        Ok(self.events.1.clone())
    }
}

struct MockSigner {
    accounts: Arc<Mutex<Vec<AccountData>>>,
}

#[async_trait]
impl OfflineSigner for MockSigner {
    async fn accounts(&self) -> Result<Vec<AccountData>> {
        Ok(self.accounts.lock().clone())
    }

    async fn sign_and_broadcast(&self, _request: &ExecuteRequest) -> Result<ExecuteResult> {
        Err(AppError::RemoteExecution("mock signer does not broadcast".to_string()))
    }
}

/// One recorded `execute` call.
#[derive(Debug, Clone)]
pub(crate) struct ExecutedCall {
    pub sender: String,
    pub contract: String,
    pub msg: Value,
    pub fee: Fee,
}

/// In-memory contract plus client factory.
///
/// Queries are answered from `games` and `challenges`; executed moves are
/// appended to the game's log so a reload sees them.
#[derive(Default)]
pub(crate) struct MockChain {
    games: Mutex<BTreeMap<u64, ChessGame>>,
    challenges: Mutex<Vec<Challenge>>,
    executed: Mutex<Vec<ExecutedCall>>,
    queries: Mutex<Vec<Value>>,
    execute_error: Mutex<Option<AppError>>,
    execute_delay: Mutex<Option<Duration>>,
    query_error: Mutex<Option<AppError>>,
    query_connect_error: Mutex<Option<AppError>>,
    signing_connect_error: Mutex<Option<AppError>>,
    query_connects: AtomicUsize,
    signing_connects: AtomicUsize,
    signing_disconnects: AtomicUsize,
    height: AtomicUsize,
}

impl MockChain {
    pub fn new() -> Self {
        Self {
            height: AtomicUsize::new(100),
            ..Default::default()
        }
    }

    pub fn factory(self: &Arc<Self>) -> Arc<dyn ClientFactory> {
        Arc::new(MockFactory(self.clone()))
    }

    pub fn insert_game(&self, game: ChessGame) {
        self.games.lock().insert(game.game_id, game);
    }

    pub fn game(&self, game_id: u64) -> Option<ChessGame> {
        self.games.lock().get(&game_id).cloned()
    }

    pub fn insert_challenge(&self, challenge: Challenge) {
        self.challenges.lock().push(challenge);
    }

    pub fn fail_execute(&self, error: Option<AppError>) {
        *self.execute_error.lock() = error;
    }

    /// Hold every `execute` for `delay` before it lands.
    pub fn delay_execute(&self, delay: Option<Duration>) {
        *self.execute_delay.lock() = delay;
    }

    pub fn fail_query(&self, error: Option<AppError>) {
        *self.query_error.lock() = error;
    }

    pub fn fail_query_connect(&self, error: Option<AppError>) {
        *self.query_connect_error.lock() = error;
    }

    pub fn fail_signing_connect(&self, error: Option<AppError>) {
        *self.signing_connect_error.lock() = error;
    }

    pub fn executed(&self) -> Vec<ExecutedCall> {
        self.executed.lock().clone()
    }

    pub fn queries(&self) -> Vec<Value> {
        self.queries.lock().clone()
    }

    pub fn query_connects(&self) -> usize {
        self.query_connects.load(Ordering::SeqCst)
    }

    pub fn signing_connects(&self) -> usize {
        self.signing_connects.load(Ordering::SeqCst)
    }

    pub fn signing_disconnects(&self) -> usize {
        self.signing_disconnects.load(Ordering::SeqCst)
    }

    fn answer(&self, msg: &Value) -> Result<Value> {
        self.queries.lock().push(msg.clone());
        if let Some(err) = self.query_error.lock().clone() {
            return Err(err);
        }

        let query: QueryMsg = serde_json::from_value(msg.clone())
            .map_err(|e| AppError::RemoteQuery(format!("unknown query: {}", e)))?;
        let value = match query {
            QueryMsg::GetGame { game_id } => {
                let game = self
                    .game(game_id)
                    .ok_or_else(|| AppError::RemoteQuery(format!("game {} not found", game_id)))?;
                serde_json::to_value(game)?
            }
            QueryMsg::GetGames { game_over, player } => {
                let summaries: Vec<ChessGameSummary> = self
                    .games
                    .lock()
                    .values()
                    .filter(|game| game_over.map_or(true, |over| game.is_over() == over))
                    .filter(|game| player.as_deref().map_or(true, |p| game.involves(p)))
                    .map(|game| ChessGameSummary {
                        game_id: game.game_id,
                        player1: game.player1.clone(),
                        player2: game.player2.clone(),
                        status: game.status.clone(),
                        start_height: game.start_height,
                        block_time_limit: game.block_time_limit,
                        turn_color: game.turn_color,
                    })
                    .collect();
                serde_json::to_value(summaries)?
            }
            QueryMsg::GetChallenges { player } => {
                let challenges: Vec<Challenge> = self
                    .challenges
                    .lock()
                    .iter()
                    .filter(|c| player.as_deref().map_or(true, |p| c.involves(p)))
                    .cloned()
                    .collect();
                serde_json::to_value(challenges)?
            }
        };
        Ok(value)
    }

    fn apply(&self, sender: &str, msg: &Value) -> Result<()> {
        let msg: ExecuteMsg = serde_json::from_value(msg.clone())
            .map_err(|e| AppError::RemoteExecution(format!("unknown message: {}", e)))?;
        let block = self.height.fetch_add(1, Ordering::SeqCst) as u64;

        match msg {
            ExecuteMsg::Move { game_id, action } => {
                let mut games = self.games.lock();
                let game = games
                    .get_mut(&game_id)
                    .ok_or_else(|| AppError::RemoteExecution(format!("game {} not found", game_id)))?;
                match &action {
                    MoveAction::AcceptDraw => game.status = Some("draw".to_string()),
                    MoveAction::Resign => {
                        let winner = if game.player1 == sender {
                            PlayerColor::Black
                        } else {
                            PlayerColor::White
                        };
                        game.status = Some(format!("{}_wins", winner));
                    }
                    MoveAction::MakeMove(_) | MoveAction::OfferDraw(_) => {}
                }
                game.moves.push(MoveRecord { action, block });
            }
            ExecuteMsg::CancelChallenge { challenge_id } => {
                self.challenges.lock().retain(|c| c.challenge_id != challenge_id);
            }
            ExecuteMsg::AcceptChallenge { challenge_id } => {
                let challenge = {
                    let mut challenges = self.challenges.lock();
                    let position = challenges
                        .iter()
                        .position(|c| c.challenge_id == challenge_id)
                        .ok_or_else(|| AppError::RemoteExecution("challenge not found".to_string()))?;
                    challenges.remove(position)
                };
                let (player1, player2) = match challenge.play_as {
                    Some(PlayerColor::Black) => (sender.to_string(), challenge.created_by),
                    _ => (challenge.created_by, sender.to_string()),
                };
                let game_id = self.games.lock().len() as u64 + 1;
                self.insert_game(ChessGame {
                    game_id,
                    player1,
                    player2,
                    moves: Vec::new(),
                    status: None,
                    start_height: block,
                    block_time_limit: challenge.block_time_limit,
                    turn_color: Some(PlayerColor::White),
                });
            }
            ExecuteMsg::CreateChallenge(request) => {
                let challenge_id = self.challenges.lock().len() as u64 + 1;
                self.insert_challenge(Challenge {
                    challenge_id,
                    created_by: sender.to_string(),
                    created_block: block,
                    opponent: request.opponent,
                    play_as: request.play_as,
                    block_time_limit: request.block_time_limit,
                });
            }
        }
        Ok(())
    }
}

struct MockFactory(Arc<MockChain>);

#[async_trait]
impl ClientFactory for MockFactory {
    async fn connect(&self, _chain: &ChainInfo) -> Result<Arc<dyn QueryClient>> {
        if let Some(err) = self.0.query_connect_error.lock().clone() {
            return Err(err);
        }
        self.0.query_connects.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MockClient {
            chain: self.0.clone(),
        }))
    }

    async fn connect_with_signer(
        &self,
        _chain: &ChainInfo,
        _signer: Arc<dyn OfflineSigner>,
    ) -> Result<Arc<dyn SigningClient>> {
        if let Some(err) = self.0.signing_connect_error.lock().clone() {
            return Err(err);
        }
        self.0.signing_connects.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MockClient {
            chain: self.0.clone(),
        }))
    }
}

struct MockClient {
    chain: Arc<MockChain>,
}

#[async_trait]
impl QueryClient for MockClient {
    async fn query_contract_smart(&self, _contract: &str, msg: &Value) -> Result<Value> {
        self.chain.answer(msg)
    }
}

#[async_trait]
impl SigningClient for MockClient {
    async fn execute(
        &self,
        sender: &str,
        contract: &str,
        msg: &Value,
        fee: &Fee,
        _memo: Option<&str>,
        _funds: &[Coin],
    ) -> Result<ExecuteResult> {
        let delay = *self.chain.execute_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.chain.executed.lock().push(ExecutedCall {
            sender: sender.to_string(),
            contract: contract.to_string(),
            msg: msg.clone(),
            fee: fee.clone(),
        });
        if let Some(err) = self.chain.execute_error.lock().clone() {
            return Err(err);
        }
        self.chain.apply(sender, msg)?;
        Ok(ExecuteResult {
            transaction_hash: format!("{:064X}", self.chain.executed.lock().len()),
            height: self.chain.height.load(Ordering::SeqCst) as u64,
            gas_used: 90_000,
            gas_wanted: 200_000,
        })
    }

    fn disconnect(&self) {
        self.chain.signing_disconnects.fetch_add(1, Ordering::SeqCst);
    }
}

/// In-memory [`SessionStore`].
#[derive(Default)]
pub(crate) struct MemoryStore {
    flags: Mutex<HashMap<String, bool>>,
}

impl MemoryStore {
    pub fn get(&self, chain_id: &str) -> bool {
        self.flags.lock().get(chain_id).copied().unwrap_or(false)
    }

    pub fn set(&self, chain_id: &str, connected: bool) {
        self.flags.lock().insert(chain_id.to_string(), connected);
    }
}

impl SessionStore for MemoryStore {
    fn load(&self, chain_id: &str) -> Result<bool> {
        Ok(self.get(chain_id))
    }

    fn save(&self, chain_id: &str, connected: bool) -> Result<()> {
        self.set(chain_id, connected);
        Ok(())
    }
}
