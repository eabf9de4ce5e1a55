//! Client configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `CHESS_NETWORK` | `juno` (`testing` for a local node) |
//! | `CHESS_CONTRACT` | required |
//! | `CHESS_WALLET_BRIDGE_URL` | `http://127.0.0.1:8787` |
//! | `CHESS_STATE_DIR` | `$HOME/.config/chess-terminal` |
//! | `CHESS_DEFAULT_GAS` | `200000` |

use crate::core::error::{AppError, Result};
use chess_shared::{Bech32Config, Bip44, ChainInfo, Currency, GasPriceStep, StdFee};
use std::path::PathBuf;

const DEFAULT_BRIDGE_URL: &str = "http://127.0.0.1:8787";
const DEFAULT_GAS: u64 = 200_000;

/// Average block time used for time-limit display.
pub const SECONDS_PER_BLOCK: u64 = 6;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub chain: ChainInfo,
    /// Chess contract address.
    pub contract: String,
    pub bridge_url: String,
    /// Directory holding the persisted session flag.
    pub state_dir: PathBuf,
    /// Fee used by `execute` when the caller passes none.
    pub default_fee: StdFee,
}

impl ClientConfig {
    pub fn new(chain: ChainInfo, contract: impl Into<String>) -> Self {
        Self {
            chain,
            contract: contract.into(),
            bridge_url: DEFAULT_BRIDGE_URL.to_string(),
            state_dir: default_state_dir(),
            default_fee: StdFee::gas(DEFAULT_GAS),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let chain = match std::env::var("CHESS_NETWORK").as_deref() {
            Ok("testing") => testing_chain(),
            Ok("juno") | Err(_) => juno_chain(),
            Ok(other) => {
                return Err(AppError::Config(format!(
                    "Unknown CHESS_NETWORK '{}', expected 'juno' or 'testing'",
                    other
                )))
            }
        };

        let contract = std::env::var("CHESS_CONTRACT")
            .map_err(|_| AppError::Config("CHESS_CONTRACT is not set".to_string()))?;
        if contract.trim().is_empty() {
            return Err(AppError::Config("CHESS_CONTRACT is empty".to_string()));
        }

        let default_gas = match std::env::var("CHESS_DEFAULT_GAS") {
            Ok(value) => value
                .parse()
                .map_err(|_| AppError::Config(format!("Invalid CHESS_DEFAULT_GAS '{}'", value)))?,
            Err(_) => DEFAULT_GAS,
        };

        Ok(Self {
            chain,
            contract: contract.trim().to_string(),
            bridge_url: std::env::var("CHESS_WALLET_BRIDGE_URL")
                .unwrap_or_else(|_| DEFAULT_BRIDGE_URL.to_string()),
            state_dir: std::env::var("CHESS_STATE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_state_dir()),
            default_fee: StdFee::gas(default_gas),
        })
    }

    pub fn bech32_prefix(&self) -> &str {
        &self.chain.bech32_config.bech32_prefix_acc_addr
    }
}

fn default_state_dir() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".config").join("chess-terminal")
}

fn juno_currency() -> Currency {
    Currency {
        coin_denom: "JUNO".to_string(),
        coin_minimal_denom: "ujuno".to_string(),
        coin_decimals: 6,
        coin_gecko_id: Some("juno-network".to_string()),
    }
}

/// Juno mainnet.
pub fn juno_chain() -> ChainInfo {
    ChainInfo {
        chain_id: "juno-1".to_string(),
        chain_name: "Juno".to_string(),
        rpc: "https://rpc.juno.omniflix.co".to_string(),
        rest: "https://api.juno.omniflix.co".to_string(),
        stake_currency: juno_currency(),
        bip44: Bip44 { coin_type: 118 },
        bech32_config: Bech32Config::from_prefix("juno"),
        currencies: vec![juno_currency()],
        fee_currencies: vec![juno_currency()],
        coin_type: 118,
        gas_price_step: Some(GasPriceStep {
            low: 0.01,
            average: 0.025,
            high: 0.04,
        }),
        beta: false,
    }
}

/// Local single-node chain (`junod` testing setup).
pub fn testing_chain() -> ChainInfo {
    let juno = Currency {
        coin_gecko_id: None,
        ..juno_currency()
    };
    let stake = Currency {
        coin_denom: "STAKE".to_string(),
        coin_minimal_denom: "ustake".to_string(),
        coin_decimals: 6,
        coin_gecko_id: None,
    };

    ChainInfo {
        chain_id: "testing".to_string(),
        chain_name: "Testing".to_string(),
        rpc: "http://127.0.0.1:26657".to_string(),
        rest: "http://127.0.0.1:1317".to_string(),
        stake_currency: juno.clone(),
        bip44: Bip44 { coin_type: 118 },
        bech32_config: Bech32Config::from_prefix("juno"),
        currencies: vec![juno.clone(), stake],
        fee_currencies: vec![juno],
        coin_type: 118,
        gas_price_step: Some(GasPriceStep {
            low: 0.01,
            average: 0.025,
            high: 0.04,
        }),
        beta: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let juno = juno_chain();
        assert_eq!(juno.chain_id, "juno-1");
        assert!(!juno.beta);

        let testing = testing_chain();
        assert_eq!(testing.chain_id, "testing");
        assert!(testing.beta);
        assert_eq!(testing.currencies.len(), 2);
    }

    #[test]
    fn test_new_uses_defaults() {
        let config = ClientConfig::new(testing_chain(), "juno1contract");
        assert_eq!(config.bridge_url, DEFAULT_BRIDGE_URL);
        assert_eq!(config.default_fee, StdFee::gas(DEFAULT_GAS));
        assert_eq!(config.bech32_prefix(), "juno");
    }
}
