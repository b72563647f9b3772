//! Actor name resolution for access history views.
//!
//! This crate provides:
//! - [`Directory`] trait abstracting an address → display name lookup
//! - [`StaticDirectory`] in-memory directory, loadable from an account-attributes fixture
//! - [`NameServiceClient`] client for a live HTTP name service
//! - [`LayeredDirectory`] that consults several directories in order
//! - [`DirectorySource`] config enum for choosing between them
//! - [`IdentityResolver`] memoised resolver that coalesces concurrent lookups
//!
//! ## Usage
//!
//! ```ignore
//! use access_history_resolver::{DirectorySource, IdentityResolver, ResolverConfig};
//!
//! let directory = DirectorySource::layered(vec![
//!     DirectorySource::fixed(static_directory),
//!     DirectorySource::name_service("https://names.example.org/v1/names"),
//! ])
//! .into_directory();
//!
//! let resolver = IdentityResolver::new(directory, ResolverConfig::default());
//! let name = resolver.resolve("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045").await;
//! ```

mod layered;
mod name_service;
mod resolver;
mod static_directory;

pub use layered::LayeredDirectory;
pub use name_service::NameServiceClient;
pub use resolver::{IdentityResolver, ResolverConfig};
pub use static_directory::StaticDirectory;

use std::sync::Arc;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected status: {0}")]
    Status(u16),
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Trait for looking up the display name registered for an address.
///
/// `Ok(None)` means the directory answered and has no entry. `Err` means
/// the directory could not answer at all.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn lookup(&self, address: &str) -> Result<Option<String>>;
}

/// Configuration for the directory backing an [`IdentityResolver`].
///
/// Follows the mock/live source pattern: a fixed in-memory directory for
/// development and tests, a live name service for production, or both in
/// order.
#[derive(Debug, Clone)]
pub enum DirectorySource {
    /// Use a fixed, in-memory address → name table.
    Fixed(StaticDirectory),

    /// Query a live name service.
    NameService {
        /// Base URL; lookups go to `{url}/{address}`.
        url: String,
    },

    /// Consult each source in order; the first name found wins.
    Layered(Vec<DirectorySource>),
}

impl DirectorySource {
    pub fn fixed(directory: StaticDirectory) -> Self {
        Self::Fixed(directory)
    }

    pub fn name_service(url: impl Into<String>) -> Self {
        Self::NameService { url: url.into() }
    }

    pub fn layered(sources: Vec<DirectorySource>) -> Self {
        Self::Layered(sources)
    }

    /// Create the matching [`Directory`] implementation.
    pub fn into_directory(self) -> Arc<dyn Directory> {
        match self {
            Self::Fixed(directory) => Arc::new(directory),
            Self::NameService { url } => Arc::new(NameServiceClient::new(&url)),
            Self::Layered(sources) => Arc::new(LayeredDirectory::new(
                sources.into_iter().map(DirectorySource::into_directory).collect(),
            )),
        }
    }
}
