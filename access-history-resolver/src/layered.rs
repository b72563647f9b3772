use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::{Directory, DirectoryError, Result};

/// Consults each directory in order and returns the first name found.
///
/// A failing layer does not stop the search. If no layer has a name and at
/// least one failed, the last failure is returned so the caller can tell an
/// unreachable directory from a missing entry.
pub struct LayeredDirectory {
    layers: Vec<Arc<dyn Directory>>,
}

impl LayeredDirectory {
    pub fn new(layers: Vec<Arc<dyn Directory>>) -> Self {
        Self { layers }
    }
}

#[async_trait]
impl Directory for LayeredDirectory {
    async fn lookup(&self, address: &str) -> Result<Option<String>> {
        let mut failure: Option<DirectoryError> = None;

        for (layer, directory) in self.layers.iter().enumerate() {
            match directory.lookup(address).await {
                Ok(Some(name)) => return Ok(Some(name)),
                Ok(None) => {}
                Err(error) => {
                    debug!(address = %address, layer, error = %error, "Directory layer failed");
                    failure = Some(error);
                }
            }
        }

        match failure {
            Some(error) => Err(error),
            None => Ok(None),
        }
    }
}
