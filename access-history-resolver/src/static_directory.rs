//! In-memory directory for fixtures and tests.
//!
//! Addresses are matched case-insensitively, since the subgraph reports
//! lowercase addresses while fixtures usually carry checksummed ones.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

use crate::{Directory, Result};

/// Address → name table held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    names: HashMap<String, String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountAttributes {
    #[serde(default)]
    account_addresses: Vec<AccountEntry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountEntry {
    account_address: String,
    #[serde(default)]
    abac_attributes: Option<AbacAttributes>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AbacAttributes {
    #[serde(default)]
    subject_attributes: Option<SubjectAttributes>,
}

#[derive(Deserialize)]
struct SubjectAttributes {
    #[serde(default)]
    name: Option<String>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory pre-populated with the given address → name pairs.
    pub fn with_names<I, A, N>(entries: I) -> Self
    where
        I: IntoIterator<Item = (A, N)>,
        A: AsRef<str>,
        N: Into<String>,
    {
        let mut directory = Self::new();
        for (address, name) in entries {
            directory.insert(address.as_ref(), name);
        }
        directory
    }

    /// Parse an account-attributes document:
    ///
    /// ```json
    /// { "accountAddresses": [
    ///     { "accountAddress": "0x...",
    ///       "abacAttributes": { "subjectAttributes": { "name": "Dr. Ada Lovelace" } } }
    /// ] }
    /// ```
    ///
    /// Accounts without a subject name are skipped.
    pub fn from_account_attributes(json: &str) -> Result<Self> {
        let attributes: AccountAttributes = serde_json::from_str(json)?;
        let entries = attributes.account_addresses.into_iter().filter_map(|entry| {
            let name = entry.abac_attributes?.subject_attributes?.name?;
            (!name.trim().is_empty()).then_some((entry.account_address, name))
        });
        Ok(Self::with_names(entries))
    }

    pub fn insert(&mut self, address: &str, name: impl Into<String>) {
        self.names.insert(address.to_lowercase(), name.into());
    }

    pub fn get(&self, address: &str) -> Option<&str> {
        self.names.get(&address.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[async_trait]
impl Directory for StaticDirectory {
    async fn lookup(&self, address: &str) -> Result<Option<String>> {
        Ok(self.get(address).map(str::to_string))
    }
}
