use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::EventError;

/// A non-negative decimal amount kept in its original textual form.
///
/// Orders report amounts as decimal strings with arbitrary precision, so the
/// text is carried through verbatim, minus surrounding whitespace, and only
/// parsed when a magnitude is needed for sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(String);

impl Amount {
    /// Validates `raw` as a finite, non-negative decimal number. Leading and
    /// trailing whitespace is dropped; the digits are kept as written.
    pub fn parse(raw: &str) -> Result<Self, EventError> {
        let trimmed = raw.trim();
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Ok(Self(trimmed.to_string())),
            _ => Err(EventError::InvalidAmount(raw.to_string())),
        }
    }

    /// The amount assigned to events derived from access-log rows.
    pub fn one() -> Self {
        Self("1".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric magnitude, used for chart sizing only.
    pub fn value(&self) -> f64 {
        self.0.parse::<f64>().unwrap_or_default()
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::one()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Amount {
    type Error = EventError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}
