//! Wallet bridge protocol.
//!
//! The terminal never holds keys. A local bridge page fronts the user's
//! browser wallet and exposes chain registration, approval, account listing,
//! sign-and-broadcast, and an event stream over HTTP/WebSocket.

use super::tx::{Coin, Fee};
use serde::{Deserialize, Serialize};

/// `GET /status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderStatus {
    pub version: String,
    /// Whether the wallet supports registering a chain it does not know yet.
    #[serde(default)]
    pub suggest_chain: bool,
}

/// Account exposed by the wallet's offline signer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountData {
    pub address: String,
    pub algo: String,
    /// Base64 public key.
    #[serde(default)]
    pub pubkey: String,
}

/// `POST /chains/{chain_id}/execute`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecuteRequest {
    pub sender: String,
    pub contract: String,
    pub msg: serde_json::Value,
    pub fee: Fee,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default)]
    pub funds: Vec<Coin>,
}

/// Message pushed on the `/events` WebSocket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BridgeEvent {
    /// The user switched accounts inside the wallet.
    AccountChanged,
    #[serde(other)]
    Unknown,
}

/// Error body returned by the bridge on non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
