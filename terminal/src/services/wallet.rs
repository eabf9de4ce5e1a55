//! # Wallet Session Manager
//!
//! Single source of truth for "who is the local signer". Owns the signing
//! and read-only chain clients and routes authenticated vs unauthenticated
//! contract calls.
//!
//! ## Lifecycle
//!
//! ```text
//! Disconnected ──connect()──▶ Connecting ──ok──▶ Connected
//!      ▲                          │                 │
//!      │                          └──err──▶ Error ◀─┘ (account change, failed reconnect)
//!      └──────────── disconnect() ──────────────────┘
//! ```
//!
//! - `address` is `Some` exactly when the status is `Connected`.
//! - `connect()` persists a per-chain "stay connected" flag that
//!   [`SessionManager::restore`] honours on the next launch.
//! - Account changes reported by the wallet re-run the whole connect
//!   sequence. Entering `Connecting` clears the address, so callers never
//!   see the previous account's address as trusted while that runs.
//!
//! Locks are never held across `.await`; every network call works on
//! cloned `Arc` handles.

use crate::config::ClientConfig;
use crate::core::error::{AppError, Result};
use crate::core::service::{
    ClientFactory, QueryClient, SessionStore, SigningClient, WalletEvent, WalletProvider,
};
use chess_shared::{ChainInfo, Coin, ExecuteResult, Fee};
use parking_lot::{Mutex, RwLock};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, Weak};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Wallet connection status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Disconnected,
    Connecting,
    Connected,
    Error,
}

/// Snapshot of the wallet session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub status: SessionStatus,
    /// Connected account. Set iff `status == Connected`.
    pub address: Option<String>,
    pub last_error: Option<AppError>,
    /// Whether the "stay connected" flag is stored for this chain.
    pub persisted: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            status: SessionStatus::Disconnected,
            address: None,
            last_error: None,
            persisted: false,
        }
    }
}

impl Session {
    pub fn is_connected(&self) -> bool {
        self.status == SessionStatus::Connected
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}

#[derive(Default)]
struct Clients {
    signing: Option<Arc<dyn SigningClient>>,
    query: Option<Arc<dyn QueryClient>>,
}

/// Process-wide wallet session. Share it as `Arc<SessionManager>`.
pub struct SessionManager {
    chain: ChainInfo,
    default_fee: Fee,
    provider: Arc<dyn WalletProvider>,
    factory: Arc<dyn ClientFactory>,
    store: Arc<dyn SessionStore>,
    session: RwLock<Session>,
    clients: RwLock<Clients>,
    updates: watch::Sender<Session>,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl SessionManager {
    pub fn new(
        chain: ChainInfo,
        default_fee: Fee,
        provider: Arc<dyn WalletProvider>,
        factory: Arc<dyn ClientFactory>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        let (updates, _) = watch::channel(Session::default());
        Self {
            chain,
            default_fee,
            provider,
            factory,
            store,
            session: RwLock::new(Session::default()),
            clients: RwLock::new(Clients::default()),
            updates,
            listener: Mutex::new(None),
        }
    }

    pub fn from_config(
        config: &ClientConfig,
        provider: Arc<dyn WalletProvider>,
        factory: Arc<dyn ClientFactory>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self::new(
            config.chain.clone(),
            Fee::Std(config.default_fee.clone()),
            provider,
            factory,
            store,
        )
    }

    pub fn chain(&self) -> &ChainInfo {
        &self.chain
    }

    /// Current session snapshot.
    pub fn session(&self) -> Session {
        self.session.read().clone()
    }

    /// Connected address, re-read on every call.
    pub fn address(&self) -> Option<String> {
        self.session.read().address.clone()
    }

    /// Receive a fresh snapshot after every session change.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.updates.subscribe()
    }

    fn update(&self, mutate: impl FnOnce(&mut Session)) {
        let snapshot = {
            let mut session = self.session.write();
            mutate(&mut session);
            session.clone()
        };
        self.updates.send_replace(snapshot);
    }

    /// Subscribe to wallet events. Each account change re-runs `connect()`.
    pub async fn start(self: &Arc<Self>) -> Result<()> {
        let events = self.provider.subscribe().await?;
        let manager: Weak<Self> = Arc::downgrade(self);

        let handle = tokio::spawn(async move {
            while let Ok(event) = events.recv().await {
                let Some(manager) = manager.upgrade() else {
                    break;
                };
                manager.handle_wallet_event(event).await;
            }
            debug!("Wallet event listener stopped");
        });

        if let Some(previous) = self.listener.lock().replace(handle) {
            previous.abort();
        }
        info!(chain_id = %self.chain.chain_id, "Listening for wallet events");
        Ok(())
    }

    /// Stop listening for wallet events.
    pub fn shutdown(&self) {
        if let Some(handle) = self.listener.lock().take() {
            handle.abort();
            debug!(chain_id = %self.chain.chain_id, "Wallet event listener aborted");
        }
    }

    async fn handle_wallet_event(&self, event: WalletEvent) {
        match event {
            WalletEvent::AccountChanged => {
                let status = self.session.read().status;
                if status == SessionStatus::Disconnected {
                    debug!("Account change ignored while disconnected");
                    return;
                }
                info!(chain_id = %self.chain.chain_id, "Wallet account changed, reconnecting");
                if let Err(e) = self.connect().await {
                    warn!(error = %e, "Reconnect after account change failed");
                }
            }
        }
    }

    /// Reconnect silently if the user stayed connected last time.
    ///
    /// Returns the address when a reconnect happened, `None` when there was
    /// nothing to restore.
    pub async fn restore(&self) -> Result<Option<String>> {
        let wanted = match self.store.load(&self.chain.chain_id) {
            Ok(wanted) => wanted,
            Err(e) => {
                warn!(error = %e, "Could not read persisted session flag");
                false
            }
        };
        self.update(|session| session.persisted = wanted);

        if !wanted {
            return Ok(None);
        }
        info!(chain_id = %self.chain.chain_id, "Restoring wallet session");
        self.connect().await.map(Some)
    }

    /// Register the chain, request approval, and create a signing client.
    ///
    /// On failure the session lands in `Error` with no signing client and no
    /// address.
    pub async fn connect(&self) -> Result<String> {
        info!(chain_id = %self.chain.chain_id, "Connecting wallet");
        self.update(|session| {
            session.status = SessionStatus::Connecting;
            session.address = None;
            session.last_error = None;
        });

        match self.establish().await {
            Ok((address, signing)) => {
                let previous = self.clients.write().signing.replace(signing);
                if let Some(previous) = previous {
                    previous.disconnect();
                }

                let persisted = match self.store.save(&self.chain.chain_id, true) {
                    Ok(()) => true,
                    Err(e) => {
                        warn!(error = %e, "Could not persist session flag");
                        false
                    }
                };

                self.update(|session| {
                    session.status = SessionStatus::Connected;
                    session.address = Some(address.clone());
                    session.persisted = persisted;
                });
                info!(chain_id = %self.chain.chain_id, address = %address, "Wallet connected");
                Ok(address)
            }
            Err(err) => {
                let previous = self.clients.write().signing.take();
                if let Some(previous) = previous {
                    previous.disconnect();
                }

                self.update(|session| {
                    session.status = SessionStatus::Error;
                    session.address = None;
                    session.last_error = Some(err.clone());
                });
                warn!(chain_id = %self.chain.chain_id, error = %err, "Wallet connection failed");
                Err(err)
            }
        }
    }

    async fn establish(&self) -> Result<(String, Arc<dyn SigningClient>)> {
        let status = self.provider.status().await?;
        if !status.suggest_chain {
            return Err(AppError::ProviderUnavailable(format!(
                "Wallet version {} cannot register chains, please update it",
                status.version
            )));
        }

        self.provider.suggest_chain(&self.chain).await?;
        self.provider.enable(&self.chain.chain_id).await?;

        // Read-only client first; it survives a later signing failure
        self.ensure_query_client().await?;

        let signer = self.provider.offline_signer(&self.chain.chain_id).await?;
        let address = signer
            .accounts()
            .await?
            .into_iter()
            .next()
            .map(|account| account.address)
            .ok_or_else(|| AppError::ApprovalRejected("Wallet returned no accounts".to_string()))?;

        let signing = self
            .factory
            .connect_with_signer(&self.chain, signer)
            .await
            .map_err(into_connectivity)?;

        Ok((address, signing))
    }

    async fn ensure_query_client(&self) -> Result<Arc<dyn QueryClient>> {
        if let Some(client) = self.clients.read().query.clone() {
            return Ok(client);
        }

        debug!(rpc = %self.chain.rpc, "Creating read-only client");
        let created = self
            .factory
            .connect(&self.chain)
            .await
            .map_err(into_connectivity)?;
        Ok(self.clients.write().query.get_or_insert(created).clone())
    }

    /// Release the signing client and forget the "stay connected" flag.
    /// Idempotent.
    pub fn disconnect(&self) {
        let previous = self.clients.write().signing.take();
        if let Some(previous) = previous {
            previous.disconnect();
        }

        if let Err(e) = self.store.save(&self.chain.chain_id, false) {
            warn!(error = %e, "Could not clear persisted session flag");
        }

        self.update(|session| {
            session.status = SessionStatus::Disconnected;
            session.address = None;
            session.last_error = None;
            session.persisted = false;
        });
        info!(chain_id = %self.chain.chain_id, "Wallet disconnected");
    }

    fn signing_context(&self) -> Option<(Arc<dyn SigningClient>, String)> {
        let session = self.session.read();
        let clients = self.clients.read();
        match (&clients.signing, &session.address) {
            (Some(client), Some(address)) => Some((client.clone(), address.clone())),
            _ => None,
        }
    }

    /// Submit an authenticated contract execution.
    ///
    /// Connects first when there is no signing client; if that fails the
    /// result is a `Connectivity` error. `fee = None` uses the configured
    /// default fee.
    pub async fn execute(
        &self,
        contract: &str,
        msg: &Value,
        fee: Option<Fee>,
        memo: Option<&str>,
        funds: &[Coin],
    ) -> Result<ExecuteResult> {
        let (client, sender) = match self.signing_context() {
            Some(context) => context,
            None => {
                debug!("No signing client, connecting before execute");
                if let Err(e) = self.connect().await {
                    return Err(AppError::Connectivity(format!("unable to connect: {}", e)));
                }
                self.signing_context()
                    .ok_or_else(|| AppError::Connectivity("unable to connect".to_string()))?
            }
        };

        let fee = fee.unwrap_or_else(|| self.default_fee.clone());
        debug!(contract = %contract, sender = %sender, msg = %msg, "Executing contract message");

        match client.execute(&sender, contract, msg, &fee, memo, funds).await {
            Ok(result) => {
                info!(
                    contract = %contract,
                    tx_hash = %result.transaction_hash,
                    height = result.height,
                    gas_used = result.gas_used,
                    "Contract execution succeeded"
                );
                Ok(result)
            }
            Err(e) => {
                warn!(contract = %contract, error = %e, "Contract execution failed");
                Err(e)
            }
        }
    }

    /// Typed wrapper around [`SessionManager::execute`].
    pub async fn execute_msg<M: Serialize>(
        &self,
        contract: &str,
        msg: &M,
        fee: Option<Fee>,
    ) -> Result<ExecuteResult> {
        let msg = serde_json::to_value(msg)
            .map_err(|e| AppError::Validation(format!("Cannot encode message: {}", e)))?;
        self.execute(contract, &msg, fee, None, &[]).await
    }

    /// Read-only smart query. Never prompts the wallet.
    pub async fn query(&self, contract: &str, msg: &Value) -> Result<Value> {
        let existing = {
            let clients = self.clients.read();
            (clients.query.clone(), clients.signing.clone())
        };

        let result = match existing {
            (Some(query), _) => query.query_contract_smart(contract, msg).await,
            (None, Some(signing)) => signing.query_contract_smart(contract, msg).await,
            (None, None) => {
                let query = self.ensure_query_client().await?;
                query.query_contract_smart(contract, msg).await
            }
        };

        if let Err(e) = &result {
            warn!(contract = %contract, msg = %msg, error = %e, "Contract query failed");
        }
        result
    }

    /// Typed wrapper around [`SessionManager::query`].
    pub async fn query_as<M: Serialize, T: DeserializeOwned>(&self, contract: &str, msg: &M) -> Result<T> {
        let msg = serde_json::to_value(msg)
            .map_err(|e| AppError::Validation(format!("Cannot encode query: {}", e)))?;
        let value = self.query(contract, &msg).await?;
        Ok(serde_json::from_value(value)?)
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn into_connectivity(err: AppError) -> AppError {
    match err {
        AppError::Connectivity(_) => err,
        other => AppError::Connectivity(other.to_string()),
    }
}
