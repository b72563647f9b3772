use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::AccessError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Practitioner {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub gender: String,
    pub wallet_address: String,
}

impl Practitioner {
    pub fn display_name(&self) -> String {
        format!("Dr. {} {}", self.first_name, self.last_name)
    }

    pub(crate) fn matches_first_name(&self, query: &str) -> bool {
        self.first_name
            .to_lowercase()
            .starts_with(&query.trim().to_lowercase())
    }
}

/// Practitioners in listing order, indexed by wallet address.
///
/// Wallet lookups are case-insensitive. A wallet listed twice keeps its
/// first entry.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    practitioners: Vec<Practitioner>,
    by_wallet: HashMap<String, usize>,
}

impl Roster {
    pub fn new(practitioners: impl IntoIterator<Item = Practitioner>) -> Self {
        let mut roster = Self::default();
        for practitioner in practitioners {
            let wallet = practitioner.wallet_address.to_lowercase();
            if roster.by_wallet.contains_key(&wallet) {
                continue;
            }
            roster.by_wallet.insert(wallet, roster.practitioners.len());
            roster.practitioners.push(practitioner);
        }
        roster
    }

    /// Parses a JSON array of practitioner records.
    pub fn from_json(json: &str) -> Result<Self, AccessError> {
        let practitioners: Vec<Practitioner> = serde_json::from_str(json)?;
        Ok(Self::new(practitioners))
    }

    pub fn get(&self, wallet: &str) -> Option<&Practitioner> {
        self.by_wallet
            .get(&wallet.to_lowercase())
            .map(|&index| &self.practitioners[index])
    }

    pub fn contains(&self, wallet: &str) -> bool {
        self.by_wallet.contains_key(&wallet.to_lowercase())
    }

    pub fn first(&self) -> Option<&Practitioner> {
        self.practitioners.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Practitioner> {
        self.practitioners.iter()
    }

    pub fn len(&self) -> usize {
        self.practitioners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.practitioners.is_empty()
    }
}
