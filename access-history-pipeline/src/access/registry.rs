use tracing::{debug, instrument};

use super::{Practitioner, Roster};
use crate::errors::AccessError;

/// Wallets granted access to one asset, most recent grant first.
///
/// Each view owns its own registry. Granting never touches the roster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessRegistry {
    granted: Vec<String>,
}

impl AccessRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry where the first listed practitioner already has access.
    pub fn seeded(roster: &Roster) -> Self {
        Self {
            granted: roster
                .first()
                .map(|practitioner| vec![practitioner.wallet_address.to_lowercase()])
                .unwrap_or_default(),
        }
    }

    #[instrument(skip(self, roster))]
    pub fn grant(&mut self, roster: &Roster, wallet: &str) -> Result<(), AccessError> {
        if !roster.contains(wallet) {
            return Err(AccessError::UnknownPractitioner(wallet.to_string()));
        }
        if self.is_granted(wallet) {
            return Err(AccessError::AlreadyGranted(wallet.to_string()));
        }
        self.granted.insert(0, wallet.to_lowercase());
        debug!(granted = self.granted.len(), "Access granted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn revoke(&mut self, wallet: &str) -> Result<(), AccessError> {
        let wallet_key = wallet.to_lowercase();
        let Some(index) = self.granted.iter().position(|granted| *granted == wallet_key) else {
            return Err(AccessError::NotGranted(wallet.to_string()));
        };
        self.granted.remove(index);
        debug!(granted = self.granted.len(), "Access revoked");
        Ok(())
    }

    pub fn is_granted(&self, wallet: &str) -> bool {
        let wallet = wallet.to_lowercase();
        self.granted.iter().any(|granted| *granted == wallet)
    }

    /// Practitioners with access, most recent grant first.
    pub fn granted<'r>(&self, roster: &'r Roster) -> Vec<&'r Practitioner> {
        self.granted
            .iter()
            .filter_map(|wallet| roster.get(wallet))
            .collect()
    }

    /// Practitioners without access whose first name starts with `query`,
    /// ignoring case. An empty query lists everyone without access.
    pub fn available<'r>(&self, roster: &'r Roster, query: &str) -> Vec<&'r Practitioner> {
        roster
            .iter()
            .filter(|practitioner| !self.is_granted(&practitioner.wallet_address))
            .filter(|practitioner| practitioner.matches_first_name(query))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.granted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }
}
