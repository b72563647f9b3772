use serde::{Deserialize, Serialize};

use crate::types::{AccessLog, RawOrder};

/// Token metadata attached to a dispenser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DispenserToken {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

/// A free-token dispenser attached to a datatoken.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dispenser {
    pub id: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub is_minter: bool,
    #[serde(default)]
    pub max_balance: Option<String>,
    #[serde(default)]
    pub token: Option<DispenserToken>,
}

/// A datatoken together with every order placed against it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenHistory {
    pub id: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub publish_market_fee_address: Option<String>,
    #[serde(default)]
    pub publish_market_fee_token: Option<String>,
    #[serde(default)]
    pub publish_market_fee_amount: Option<String>,
    #[serde(default)]
    pub orders: Vec<RawOrder>,
    #[serde(default)]
    pub dispensers: Vec<Dispenser>,
}

/// Everything the retrieval layer hands over for one asset view.
///
/// `token` is `None` when the subgraph has no record of the datatoken.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionHistory {
    #[serde(default)]
    pub token: Option<TokenHistory>,
    #[serde(default)]
    pub access_log: AccessLog,
}

impl TransactionHistory {
    pub fn orders(&self) -> &[RawOrder] {
        self.token.as_ref().map(|token| token.orders.as_slice()).unwrap_or_default()
    }

    pub fn asset_id(&self) -> Option<&str> {
        self.token.as_ref().map(|token| token.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_history_without_access_log() {
        let json = r#"{
            "token": {
                "id": "0xdatatoken",
                "symbol": "DT-1",
                "name": "Record Token",
                "orders": [
                    { "tx": "0x1", "createdTimestamp": 100, "payer": { "id": "0xa" }, "amount": "1" }
                ],
                "dispensers": [
                    { "id": "0xdisp", "active": true, "isMinter": false, "maxBalance": "10" }
                ]
            }
        }"#;

        let history: TransactionHistory = serde_json::from_str(json).unwrap();
        assert_eq!(history.asset_id(), Some("0xdatatoken"));
        assert_eq!(history.orders().len(), 1);
        assert!(history.access_log.is_empty());
        assert!(history.token.unwrap().dispensers[0].active);
    }

    #[test]
    fn test_missing_token_has_no_orders() {
        let history: TransactionHistory = serde_json::from_str(r#"{ "token": null }"#).unwrap();
        assert!(history.orders().is_empty());
        assert!(history.asset_id().is_none());
    }
}
