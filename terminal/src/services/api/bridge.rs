//! # Wallet Bridge Client
//!
//! Talks to the local wallet bridge page that fronts the user's browser
//! wallet. Every request may open an approval prompt in the wallet, so the
//! bridge answers `403` when the user declines.
//!
//! ```text
//! GET  /status                  -> ProviderStatus
//! POST /chains/suggest          <- ChainInfo
//! POST /chains/{id}/enable
//! GET  /chains/{id}/accounts    -> [AccountData]
//! POST /chains/{id}/execute     <- ExecuteRequest -> ExecuteResult
//! WS   /events                  -> {"type": "account_changed"}
//! ```

use super::lcd::http_client;
use crate::core::error::{AppError, Result};
use crate::core::service::{OfflineSigner, WalletEvent, WalletProvider};
use async_trait::async_trait;
use chess_shared::{
    AccountData, BridgeEvent, ChainInfo, ErrorResponse, ExecuteRequest, ExecuteResult,
    ProviderStatus,
};
use futures_util::StreamExt;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};

/// Base URL of the bridge's event socket.
pub(crate) fn events_url(base_url: &str) -> String {
    base_url
        .trim_end_matches('/')
        .replacen("http://", "ws://", 1)
        .replacen("https://", "wss://", 1)
        + "/events"
}

/// Map a non-2xx bridge response to an error kind.
pub(crate) fn classify_status(status: StatusCode, message: String, fallback: fn(String) -> AppError) -> AppError {
    match status {
        StatusCode::FORBIDDEN => AppError::ApprovalRejected(message),
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::NOT_IMPLEMENTED => {
            AppError::ProviderUnavailable(message)
        }
        _ => fallback(message),
    }
}

struct Bridge {
    http: Client,
    base_url: String,
}

impl Bridge {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn send(&self, request: RequestBuilder, fallback: fn(String) -> AppError) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                AppError::ProviderUnavailable(format!(
                    "Wallet bridge not reachable at {}, is it running?",
                    self.base_url
                ))
            } else {
                AppError::Connectivity(format!("Wallet bridge error: {}", e))
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => status.to_string(),
        };
        warn!(status = status.as_u16(), message = %message, "Wallet bridge request failed");
        Err(classify_status(status, message, fallback))
    }

    async fn json<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Connectivity(format!("Failed to parse bridge response: {}", e)))
    }
}

/// [`WalletProvider`] backed by the local wallet bridge.
pub struct BridgeWalletProvider {
    bridge: Arc<Bridge>,
}

impl BridgeWalletProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            bridge: Arc::new(Bridge {
                http: http_client(),
                base_url: base_url.into(),
            }),
        }
    }
}

#[async_trait]
impl WalletProvider for BridgeWalletProvider {
    #[tracing::instrument(skip(self), fields(bridge = %self.bridge.base_url))]
    async fn status(&self) -> Result<ProviderStatus> {
        let request = self.bridge.http.get(self.bridge.url("/status"));
        let response = self.bridge.send(request, AppError::ProviderUnavailable).await?;
        let status: ProviderStatus = self.bridge.json(response).await?;
        debug!(version = %status.version, suggest_chain = status.suggest_chain, "Wallet bridge status");
        Ok(status)
    }

    async fn suggest_chain(&self, chain: &ChainInfo) -> Result<()> {
        info!(chain_id = %chain.chain_id, "Suggesting chain to wallet");
        let request = self.bridge.http.post(self.bridge.url("/chains/suggest")).json(chain);
        self.bridge.send(request, AppError::ApprovalRejected).await?;
        Ok(())
    }

    async fn enable(&self, chain_id: &str) -> Result<()> {
        info!(chain_id = %chain_id, "Requesting wallet approval");
        let request = self
            .bridge
            .http
            .post(self.bridge.url(&format!("/chains/{}/enable", chain_id)));
        self.bridge.send(request, AppError::ApprovalRejected).await?;
        Ok(())
    }

    async fn offline_signer(&self, chain_id: &str) -> Result<Arc<dyn OfflineSigner>> {
        Ok(Arc::new(BridgeSigner {
            bridge: self.bridge.clone(),
            chain_id: chain_id.to_string(),
        }))
    }

    async fn subscribe(&self) -> Result<async_channel::Receiver<WalletEvent>> {
        let url = events_url(&self.bridge.base_url);
        let (ws_stream, _) = connect_async(url.as_str()).await.map_err(|e| {
            warn!(url = %url, error = %e, "Wallet event socket unavailable");
            AppError::ProviderUnavailable(format!("Wallet event stream unavailable: {}", e))
        })?;
        info!(url = %url, "Wallet event stream connected");

        let (tx, rx) = async_channel::unbounded();
        let (_write, mut read) = ws_stream.split();

        tokio::spawn(async move {
            while let Some(message) = read.next().await {
                let text = match message {
                    Ok(Message::Text(text)) => text,
                    Ok(Message::Close(_)) => break,
                    Ok(_) => continue,
                    Err(e) => {
                        warn!(error = %e, "Wallet event stream error");
                        break;
                    }
                };

                match serde_json::from_str::<BridgeEvent>(&text) {
                    Ok(BridgeEvent::AccountChanged) => {
                        debug!("Wallet reported account change");
                        if tx.send(WalletEvent::AccountChanged).await.is_err() {
                            // Receiver dropped: unsubscribed
                            break;
                        }
                    }
                    Ok(BridgeEvent::Unknown) => debug!(message = %text, "Ignoring wallet event"),
                    Err(e) => warn!(error = %e, message = %text, "Malformed wallet event"),
                }
            }
            info!("Wallet event stream closed");
        });

        Ok(rx)
    }
}

/// [`OfflineSigner`] for one chain, signing through the bridge.
pub struct BridgeSigner {
    bridge: Arc<Bridge>,
    chain_id: String,
}

#[async_trait]
impl OfflineSigner for BridgeSigner {
    async fn accounts(&self) -> Result<Vec<AccountData>> {
        let request = self
            .bridge
            .http
            .get(self.bridge.url(&format!("/chains/{}/accounts", self.chain_id)));
        let response = self.bridge.send(request, AppError::ApprovalRejected).await?;
        self.bridge.json(response).await
    }

    #[tracing::instrument(skip(self, request), fields(chain_id = %self.chain_id, contract = %request.contract))]
    async fn sign_and_broadcast(&self, request: &ExecuteRequest) -> Result<ExecuteResult> {
        let http_request = self
            .bridge
            .http
            .post(self.bridge.url(&format!("/chains/{}/execute", self.chain_id)))
            .json(request);
        let response = self.bridge.send(http_request, AppError::RemoteExecution).await?;
        self.bridge
            .json(response)
            .await
            .map_err(|e| AppError::RemoteExecution(e.to_string()))
    }
}
