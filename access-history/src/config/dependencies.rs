use std::fs;
use std::path::Path;
use std::sync::Arc;

use access_history_pipeline::view::HistoryView;
use access_history_resolver::{DirectorySource, IdentityResolver, ResolverConfig, StaticDirectory};
use access_history_shared::types::TransactionHistory;
use tracing::info;

use super::Settings;
use crate::HistoryError;

/// `Dependencies` holds the settings and the history view wired from them.
pub struct Dependencies {
    pub settings: Settings,
    pub view: HistoryView,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// See [`Settings::from_env`] for the variables read.
    pub fn new() -> Result<Self, HistoryError> {
        Self::from_settings(Settings::from_env()?)
    }

    pub fn from_settings(settings: Settings) -> Result<Self, HistoryError> {
        let source = Self::directory_source(&settings)?;

        info!(
            history_path = %settings.history_path.display(),
            directory = ?settings.directory_path,
            name_service_url = ?settings.name_service_url,
            resolver_timeout_ms = settings.resolver_timeout.as_millis() as u64,
            log_format = ?settings.log_format,
            "Initializing dependencies"
        );

        let resolver = IdentityResolver::new(
            source.into_directory(),
            ResolverConfig {
                lookup_timeout: settings.resolver_timeout,
            },
        );
        let view = HistoryView::new(Arc::new(resolver));

        Ok(Self { settings, view })
    }

    /// Static fixture first, live name service second. With neither
    /// configured every actor falls back to its address.
    fn directory_source(settings: &Settings) -> Result<DirectorySource, HistoryError> {
        let mut sources = Vec::new();

        if let Some(path) = &settings.directory_path {
            let json = fs::read_to_string(path).map_err(|e| {
                HistoryError::config(format!("Failed to read {}: {}", path.display(), e))
            })?;
            let directory = StaticDirectory::from_account_attributes(&json)?;
            info!(entries = directory.len(), "Static directory loaded");
            sources.push(DirectorySource::fixed(directory));
        }
        if let Some(url) = &settings.name_service_url {
            sources.push(DirectorySource::name_service(url.as_str()));
        }

        Ok(match sources.len() {
            0 => DirectorySource::fixed(StaticDirectory::new()),
            1 => sources.remove(0),
            _ => DirectorySource::layered(sources),
        })
    }

    /// Read the transaction history named by the settings.
    pub fn load_history(&self) -> Result<TransactionHistory, HistoryError> {
        read_history(&self.settings.history_path)
    }
}

fn read_history(path: &Path) -> Result<TransactionHistory, HistoryError> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}
