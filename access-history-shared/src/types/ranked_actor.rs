use serde::{Deserialize, Serialize};

use crate::types::truncate_address;

/// An actor and how many events it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedActor {
    /// Resolved name if one is known, otherwise the wallet address.
    pub key: String,
    pub wallet_address: String,
    pub count: usize,
}

impl RankedActor {
    /// Axis label: the key, shortened when it is the bare address.
    pub fn label(&self) -> String {
        if self.key == self.wallet_address {
            truncate_address(&self.key)
        } else {
            self.key.clone()
        }
    }
}
