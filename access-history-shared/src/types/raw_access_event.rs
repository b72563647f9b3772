use serde::{Deserialize, Serialize};

use crate::types::{RawAccount, RawTimestamp};

/// One row of an asset's access log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAccessEvent {
    #[serde(default)]
    pub timestamp: Option<RawTimestamp>,
    #[serde(default)]
    pub payer: Option<RawAccount>,
}

impl RawAccessEvent {
    pub fn payer_id(&self) -> Option<&str> {
        self.payer.as_ref().and_then(RawAccount::id)
    }
}

/// Access-log rows partitioned by their outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessLog {
    #[serde(default)]
    pub granted: Vec<RawAccessEvent>,
    #[serde(default)]
    pub denied: Vec<RawAccessEvent>,
}

impl AccessLog {
    pub fn len(&self) -> usize {
        self.granted.len() + self.denied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.granted.is_empty() && self.denied.is_empty()
    }
}
