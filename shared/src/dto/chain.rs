use serde::{Deserialize, Serialize};

/// Chain description sent to the wallet for registration.
///
/// Field names serialize in camelCase, the shape browser wallets accept for
/// chain suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    pub chain_id: String,
    pub chain_name: String,
    pub rpc: String,
    pub rest: String,
    pub stake_currency: Currency,
    pub bip44: Bip44,
    pub bech32_config: Bech32Config,
    pub currencies: Vec<Currency>,
    pub fee_currencies: Vec<Currency>,
    pub coin_type: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price_step: Option<GasPriceStep>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub beta: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub coin_denom: String,
    pub coin_minimal_denom: String,
    pub coin_decimals: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coin_gecko_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bip44 {
    pub coin_type: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bech32Config {
    pub bech32_prefix_acc_addr: String,
    pub bech32_prefix_acc_pub: String,
    pub bech32_prefix_val_addr: String,
    pub bech32_prefix_val_pub: String,
    pub bech32_prefix_cons_addr: String,
    pub bech32_prefix_cons_pub: String,
}

impl Bech32Config {
    /// Standard Cosmos SDK prefixes derived from the account prefix.
    pub fn from_prefix(prefix: &str) -> Self {
        Self {
            bech32_prefix_acc_addr: prefix.to_string(),
            bech32_prefix_acc_pub: format!("{}pub", prefix),
            bech32_prefix_val_addr: format!("{}valoper", prefix),
            bech32_prefix_val_pub: format!("{}valoperpub", prefix),
            bech32_prefix_cons_addr: format!("{}valcons", prefix),
            bech32_prefix_cons_pub: format!("{}valconspub", prefix),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasPriceStep {
    pub low: f64,
    pub average: f64,
    pub high: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bech32_config_serializes_camel_case() {
        let config = Bech32Config::from_prefix("juno");
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["bech32PrefixAccAddr"], "juno");
        assert_eq!(json["bech32PrefixValAddr"], "junovaloper");
        assert_eq!(json["bech32PrefixConsPub"], "junovalconspub");
    }
}
