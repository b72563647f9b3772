use serde::{Deserialize, Serialize};

use crate::types::{display_name, Amount, EventError};

/// How an access attempt ended.
///
/// Orders carry no explicit outcome and are `Unspecified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Granted,
    Denied,
    Unspecified,
}

/// One access or order occurrence, normalised from either source.
///
/// Events are immutable once built. Attaching a resolved name consumes the
/// event and returns a new one with only `actor_name` replaced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalEvent {
    actor_id: String,
    actor_name: Option<String>,
    timestamp: u64,
    amount: Amount,
    outcome: Outcome,
    tx_id: Option<String>,
}

impl CanonicalEvent {
    /// Builds an event derived from an on-chain order.
    pub fn order(
        actor_id: impl Into<String>,
        timestamp: u64,
        amount: Amount,
        tx_id: Option<String>,
    ) -> Result<Self, EventError> {
        Self::build(actor_id.into(), timestamp, amount, Outcome::Unspecified, tx_id)
    }

    /// Builds an event derived from an access-log row.
    pub fn access(
        actor_id: impl Into<String>,
        timestamp: u64,
        outcome: Outcome,
    ) -> Result<Self, EventError> {
        Self::build(actor_id.into(), timestamp, Amount::one(), outcome, None)
    }

    fn build(
        actor_id: String,
        timestamp: u64,
        amount: Amount,
        outcome: Outcome,
        tx_id: Option<String>,
    ) -> Result<Self, EventError> {
        if actor_id.trim().is_empty() {
            return Err(EventError::EmptyActor);
        }
        Ok(Self {
            actor_id,
            actor_name: None,
            timestamp,
            amount,
            outcome,
            tx_id,
        })
    }

    pub fn with_actor_name(self, actor_name: Option<String>) -> Self {
        Self { actor_name, ..self }
    }

    pub fn actor_id(&self) -> &str {
        &self.actor_id
    }

    pub fn actor_name(&self) -> Option<&str> {
        self.actor_name.as_deref()
    }

    /// Seconds since the epoch.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn amount(&self) -> &Amount {
        &self.amount
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn tx_id(&self) -> Option<&str> {
        self.tx_id.as_deref()
    }

    pub fn display_name(&self) -> String {
        display_name(&self.actor_id, self.actor_name())
    }
}
