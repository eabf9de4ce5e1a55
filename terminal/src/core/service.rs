//! # Service Traits
//!
//! Seams between the session manager and the outside world: the wallet,
//! the chain clients, and persisted session state. Production
//! implementations live in [`crate::services`]; tests swap in scripted ones.

use crate::core::error::Result;
use async_trait::async_trait;
use chess_shared::{AccountData, ChainInfo, Coin, ExecuteRequest, ExecuteResult, Fee, ProviderStatus};
use serde_json::Value;
use std::sync::Arc;

/// Notification pushed by the wallet outside of any request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletEvent {
    /// The active account changed; address and signer must be re-derived.
    AccountChanged,
}

/// Read-only access to contract state.
#[async_trait]
pub trait QueryClient: Send + Sync {
    /// Run a smart query and return the raw JSON response.
    async fn query_contract_smart(&self, contract: &str, msg: &Value) -> Result<Value>;
}

/// Authenticated access: everything a [`QueryClient`] does plus execution.
#[async_trait]
pub trait SigningClient: QueryClient {
    async fn execute(
        &self,
        sender: &str,
        contract: &str,
        msg: &Value,
        fee: &Fee,
        memo: Option<&str>,
        funds: &[Coin],
    ) -> Result<ExecuteResult>;

    /// Release any held connection. Called before the client is dropped.
    fn disconnect(&self) {}
}

/// Signing capability handed out by the wallet for one chain.
#[async_trait]
pub trait OfflineSigner: Send + Sync {
    async fn accounts(&self) -> Result<Vec<AccountData>>;

    async fn sign_and_broadcast(&self, request: &ExecuteRequest) -> Result<ExecuteResult>;
}

/// External wallet the user approves requests in.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Check the wallet is reachable and report its capabilities.
    async fn status(&self) -> Result<ProviderStatus>;

    /// Ask the wallet to register the chain.
    async fn suggest_chain(&self, chain: &ChainInfo) -> Result<()>;

    /// Ask the user to grant this client access to the chain.
    async fn enable(&self, chain_id: &str) -> Result<()>;

    async fn offline_signer(&self, chain_id: &str) -> Result<Arc<dyn OfflineSigner>>;

    /// Subscribe to wallet events. Dropping the receiver unsubscribes.
    async fn subscribe(&self) -> Result<async_channel::Receiver<WalletEvent>>;
}

/// Creates chain clients.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    async fn connect(&self, chain: &ChainInfo) -> Result<Arc<dyn QueryClient>>;

    async fn connect_with_signer(
        &self,
        chain: &ChainInfo,
        signer: Arc<dyn OfflineSigner>,
    ) -> Result<Arc<dyn SigningClient>>;
}

/// Persisted "stay connected" intent, keyed by chain id.
pub trait SessionStore: Send + Sync {
    fn load(&self, chain_id: &str) -> Result<bool>;

    fn save(&self, chain_id: &str, connected: bool) -> Result<()>;
}
