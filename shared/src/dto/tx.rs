use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

/// Explicit fee: coin amount plus gas limit (both strings on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdFee {
    pub amount: Vec<Coin>,
    pub gas: String,
}

impl StdFee {
    /// Gas-only fee; the wallet fills in the coin amount.
    pub fn gas(gas: u64) -> Self {
        Self {
            amount: Vec::new(),
            gas: gas.to_string(),
        }
    }
}

/// Fee argument accepted by `execute`: `"auto"`, a simulation multiplier, or
/// an explicit [`StdFee`].
#[derive(Debug, Clone, PartialEq)]
pub enum Fee {
    Auto,
    Multiplier(f64),
    Std(StdFee),
}

impl Serialize for Fee {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Fee::Auto => serializer.serialize_str("auto"),
            Fee::Multiplier(multiplier) => serializer.serialize_f64(*multiplier),
            Fee::Std(fee) => fee.serialize(serializer),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FeeRepr {
    Keyword(String),
    Multiplier(f64),
    Std(StdFee),
}

impl<'de> Deserialize<'de> for Fee {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match FeeRepr::deserialize(deserializer)? {
            FeeRepr::Keyword(keyword) if keyword == "auto" => Ok(Fee::Auto),
            FeeRepr::Keyword(other) => Err(de::Error::custom(format!("unknown fee keyword: {}", other))),
            FeeRepr::Multiplier(multiplier) => Ok(Fee::Multiplier(multiplier)),
            FeeRepr::Std(fee) => Ok(Fee::Std(fee)),
        }
    }
}

impl From<StdFee> for Fee {
    fn from(fee: StdFee) -> Self {
        Fee::Std(fee)
    }
}

/// Result of a broadcast contract execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteResult {
    pub transaction_hash: String,
    pub height: u64,
    pub gas_used: u64,
    pub gas_wanted: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fee_serialization() {
        assert_eq!(serde_json::to_value(Fee::Auto).unwrap(), json!("auto"));
        assert_eq!(serde_json::to_value(Fee::Multiplier(1.3)).unwrap(), json!(1.3));
        assert_eq!(
            serde_json::to_value(Fee::Std(StdFee::gas(250_000))).unwrap(),
            json!({"amount": [], "gas": "250000"})
        );
    }

    #[test]
    fn test_fee_deserialization() {
        assert_eq!(serde_json::from_value::<Fee>(json!("auto")).unwrap(), Fee::Auto);
        assert_eq!(
            serde_json::from_value::<Fee>(json!({"amount": [], "gas": "10000"})).unwrap(),
            Fee::Std(StdFee::gas(10_000))
        );
        assert!(serde_json::from_value::<Fee>(json!("manual")).is_err());
    }
}
