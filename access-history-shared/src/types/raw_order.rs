use serde::{Deserialize, Serialize};

/// A timestamp as it arrives from upstream sources.
///
/// The subgraph reports seconds as integers, but fixtures and access logs
/// have been seen carrying floats and numeric strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RawTimestamp {
    /// Coerces the value to whole seconds since the epoch.
    ///
    /// Integral values are taken as-is, fractional values are truncated.
    /// Returns `None` for negative, non-finite or unparseable values.
    pub fn to_seconds(&self) -> Option<u64> {
        match self {
            Self::Integer(value) => u64::try_from(*value).ok(),
            Self::Float(value) => float_seconds(*value),
            Self::Text(text) => {
                let text = text.trim();
                text.parse::<u64>()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().and_then(float_seconds))
            }
        }
    }
}

fn float_seconds(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0 && value < u64::MAX as f64).then(|| value.trunc() as u64)
}

/// An account reference inside an order (`payer`, `consumer`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAccount {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl RawAccount {
    /// The account id, if present and not blank.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }
}

/// An on-chain order record as returned by the transaction history query.
///
/// Every field is optional so a partially corrupt row still deserialises;
/// validation happens at normalisation time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrder {
    #[serde(default)]
    pub tx: Option<String>,
    #[serde(default)]
    pub service_index: Option<u32>,
    #[serde(default)]
    pub created_timestamp: Option<RawTimestamp>,
    #[serde(default)]
    pub payer: Option<RawAccount>,
    #[serde(default)]
    pub consumer: Option<RawAccount>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default, rename = "estimatedUSDValue")]
    pub estimated_usd_value: Option<String>,
    #[serde(default)]
    pub last_price_token: Option<String>,
    #[serde(default)]
    pub last_price_value: Option<String>,
}

impl RawOrder {
    pub fn payer_id(&self) -> Option<&str> {
        self.payer.as_ref().and_then(RawAccount::id)
    }
}
