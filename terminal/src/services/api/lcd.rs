//! # CosmWasm Chain Clients
//!
//! Read-only smart queries go straight to the chain's LCD (REST) endpoint.
//! Executions are delegated to the wallet's offline signer, which signs and
//! broadcasts on our behalf.

use crate::core::error::{AppError, Result};
use crate::core::service::{ClientFactory, OfflineSigner, QueryClient, SigningClient};
use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use chess_shared::{ChainInfo, Coin, ExecuteRequest, ExecuteResult, Fee};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// `{"data": ...}` envelope of a smart query response.
#[derive(Debug, Deserialize)]
struct SmartQueryResponse {
    data: Value,
}

/// gRPC-gateway error body.
#[derive(Debug, Deserialize)]
struct LcdError {
    #[serde(default)]
    message: String,
}

pub(crate) fn http_client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Smart query URL. The message is URL-safe base64 so it fits in a path
/// segment.
pub(crate) fn smart_query_url(rest: &str, contract: &str, msg: &Value) -> String {
    let encoded = URL_SAFE.encode(msg.to_string());
    format!(
        "{}/cosmwasm/wasm/v1/contract/{}/smart/{}",
        rest.trim_end_matches('/'),
        contract,
        encoded
    )
}

/// Read-only client over the LCD endpoint.
#[derive(Clone)]
pub struct LcdQueryClient {
    http: Client,
    rest: String,
    rpc: String,
}

impl LcdQueryClient {
    pub fn with_client(http: Client, chain: &ChainInfo) -> Self {
        Self {
            http,
            rest: chain.rest.clone(),
            rpc: chain.rpc.clone(),
        }
    }

    /// Verify the RPC node answers.
    #[tracing::instrument(skip(self), fields(rpc = %self.rpc))]
    pub async fn ping(&self) -> Result<()> {
        let url = format!("{}/status", self.rpc.trim_end_matches('/'));
        let response = self.http.get(&url).send().await.map_err(|e| {
            tracing::warn!(error = %e, "RPC unreachable");
            AppError::Connectivity(format!("RPC {} unreachable: {}", self.rpc, e))
        })?;

        if !response.status().is_success() {
            return Err(AppError::Connectivity(format!(
                "RPC {} returned {}",
                self.rpc,
                response.status()
            )));
        }
        tracing::debug!("RPC reachable");
        Ok(())
    }
}

#[async_trait]
impl QueryClient for LcdQueryClient {
    async fn query_contract_smart(&self, contract: &str, msg: &Value) -> Result<Value> {
        let start = std::time::Instant::now();
        let url = smart_query_url(&self.rest, contract, msg);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::RemoteQuery(format!("Network error: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            let body = response
                .json::<SmartQueryResponse>()
                .await
                .map_err(|e| AppError::RemoteQuery(format!("Failed to parse response: {}", e)))?;
            tracing::debug!(
                contract = %contract,
                duration_ms = start.elapsed().as_millis(),
                "Smart query succeeded"
            );
            Ok(body.data)
        } else {
            let message = response
                .json::<LcdError>()
                .await
                .map(|e| e.message)
                .unwrap_or_default();
            tracing::warn!(
                contract = %contract,
                status = status.as_u16(),
                message = %message,
                "Smart query failed"
            );
            if message.is_empty() {
                Err(AppError::RemoteQuery(format!("LCD returned {}", status)))
            } else {
                Err(AppError::RemoteQuery(message))
            }
        }
    }
}

/// Signing client: LCD for reads, the wallet's offline signer for writes.
pub struct SignerClient {
    query: LcdQueryClient,
    signer: Arc<dyn OfflineSigner>,
}

#[async_trait]
impl QueryClient for SignerClient {
    async fn query_contract_smart(&self, contract: &str, msg: &Value) -> Result<Value> {
        self.query.query_contract_smart(contract, msg).await
    }
}

#[async_trait]
impl SigningClient for SignerClient {
    async fn execute(
        &self,
        sender: &str,
        contract: &str,
        msg: &Value,
        fee: &Fee,
        memo: Option<&str>,
        funds: &[Coin],
    ) -> Result<ExecuteResult> {
        let request = ExecuteRequest {
            sender: sender.to_string(),
            contract: contract.to_string(),
            msg: msg.clone(),
            fee: fee.clone(),
            memo: memo.map(str::to_string),
            funds: funds.to_vec(),
        };
        self.signer.sign_and_broadcast(&request).await
    }

    fn disconnect(&self) {
        tracing::debug!(rpc = %self.query.rpc, "Signing client released");
    }
}

/// Builds LCD-backed clients sharing one HTTP connection pool.
#[derive(Clone)]
pub struct CosmWasmClientFactory {
    http: Client,
}

impl CosmWasmClientFactory {
    pub fn new() -> Self {
        Self {
            http: http_client(),
        }
    }
}

impl Default for CosmWasmClientFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClientFactory for CosmWasmClientFactory {
    async fn connect(&self, chain: &ChainInfo) -> Result<Arc<dyn QueryClient>> {
        let client = LcdQueryClient::with_client(self.http.clone(), chain);
        client.ping().await?;
        Ok(Arc::new(client))
    }

    async fn connect_with_signer(
        &self,
        chain: &ChainInfo,
        signer: Arc<dyn OfflineSigner>,
    ) -> Result<Arc<dyn SigningClient>> {
        let query = LcdQueryClient::with_client(self.http.clone(), chain);
        query.ping().await?;
        Ok(Arc::new(SignerClient { query, signer }))
    }
}
