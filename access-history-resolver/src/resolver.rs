//! Memoised actor name resolution.
//!
//! Results are cached for the lifetime of the resolver, which callers share
//! process-wide. At most one directory lookup per address is outstanding at a
//! time: concurrent callers for the same address await the same in-flight
//! lookup.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;

use futures::future::{join_all, BoxFuture, Shared};
use futures::FutureExt;
use tracing::{debug, warn};

use crate::Directory;

/// Default per-lookup timeout.
const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

/// Configuration for the identity resolver.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// How long a single directory lookup may take before it counts as failed.
    pub lookup_timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Lookup {
    Found(String),
    Missing,
    Failed,
}

impl Lookup {
    fn into_name(self) -> Option<String> {
        match self {
            Self::Found(name) => Some(name),
            Self::Missing | Self::Failed => None,
        }
    }
}

type SharedLookup = Shared<BoxFuture<'static, Lookup>>;

/// An outstanding lookup and the number of callers awaiting it.
///
/// The ticket identifies which lookup an entry belongs to so a late settler
/// never evicts a newer lookup.
struct InFlight {
    ticket: u64,
    lookup: SharedLookup,
    waiters: usize,
}

/// One caller's claim on an in-flight lookup.
///
/// Dropped when the caller finishes or is cancelled. The last claim to go
/// removes the entry, which drops the lookup with it.
struct Waiter<'a> {
    resolver: &'a IdentityResolver,
    actor_id: &'a str,
    ticket: u64,
}

impl Drop for Waiter<'_> {
    fn drop(&mut self) {
        let mut in_flight = self.resolver.lock_in_flight();
        let Some(entry) = in_flight.get_mut(self.actor_id) else {
            return;
        };
        if entry.ticket != self.ticket {
            return;
        }
        entry.waiters = entry.waiters.saturating_sub(1);
        if entry.waiters == 0 {
            debug!(actor_id = %self.actor_id, "Abandoned name lookup dropped");
            in_flight.remove(self.actor_id);
        }
    }
}

/// Resolves actor addresses to display names.
///
/// Lookup failures and timeouts degrade to `None` exactly like a missing
/// entry, but are logged separately and are not cached, so a later view can
/// try again.
///
/// Both maps sit behind blocking locks that are never held across an await,
/// so in-flight bookkeeping can also run from `Drop`.
pub struct IdentityResolver {
    directory: Arc<dyn Directory>,
    config: ResolverConfig,
    names: RwLock<HashMap<String, Option<String>>>,
    in_flight: Mutex<HashMap<String, InFlight>>,
    next_ticket: AtomicU64,
}

impl IdentityResolver {
    pub fn new(directory: Arc<dyn Directory>, config: ResolverConfig) -> Self {
        Self {
            directory,
            config,
            names: RwLock::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
            next_ticket: AtomicU64::new(0),
        }
    }

    /// Resolve a single address. Never fails; `None` means no name is known.
    pub async fn resolve(&self, actor_id: &str) -> Option<String> {
        if let Some(cached) = self.cached(actor_id) {
            return cached;
        }

        let (waiter, lookup) = {
            let mut in_flight = self.lock_in_flight();

            // A lookup may have settled between the cache read and taking the lock.
            if let Some(cached) = self.cached(actor_id) {
                return cached;
            }

            if in_flight.contains_key(actor_id) {
                debug!(actor_id = %actor_id, "Joining in-flight name lookup");
            }
            let entry = in_flight
                .entry(actor_id.to_string())
                .or_insert_with(|| InFlight {
                    ticket: self.next_ticket.fetch_add(1, Ordering::Relaxed),
                    lookup: self.start_lookup(actor_id),
                    waiters: 0,
                });
            entry.waiters += 1;

            let waiter = Waiter {
                resolver: self,
                actor_id,
                ticket: entry.ticket,
            };
            (waiter, entry.lookup.clone())
        };

        let outcome = lookup.await;
        self.settle(actor_id, waiter.ticket, &outcome);
        drop(waiter);
        outcome.into_name()
    }

    /// Resolve every distinct address concurrently.
    ///
    /// The returned map has one entry per distinct input address.
    pub async fn resolve_all<'a, I>(&self, actor_ids: I) -> HashMap<String, Option<String>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        let unique: Vec<&str> = actor_ids.into_iter().filter(|id| seen.insert(*id)).collect();

        let names = join_all(unique.iter().map(|actor_id| self.resolve(actor_id))).await;

        unique.into_iter().map(str::to_string).zip(names).collect()
    }

    /// The cached result for an address, if any. `Some(None)` records a
    /// confirmed absence of a name.
    pub fn cached(&self, actor_id: &str) -> Option<Option<String>> {
        self.names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(actor_id)
            .cloned()
    }

    pub fn cache_len(&self) -> usize {
        self.names.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Number of lookups currently outstanding.
    pub fn in_flight_len(&self) -> usize {
        self.lock_in_flight().len()
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, HashMap<String, InFlight>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn start_lookup(&self, actor_id: &str) -> SharedLookup {
        let directory = Arc::clone(&self.directory);
        let actor_id = actor_id.to_string();
        let timeout = self.config.lookup_timeout;

        async move {
            match tokio::time::timeout(timeout, directory.lookup(&actor_id)).await {
                Ok(Ok(Some(name))) => {
                    debug!(actor_id = %actor_id, name = %name, outcome = "found", "Resolved actor name");
                    Lookup::Found(name)
                }
                Ok(Ok(None)) => {
                    debug!(actor_id = %actor_id, outcome = "missing", "No directory entry for actor");
                    Lookup::Missing
                }
                Ok(Err(error)) => {
                    warn!(
                        actor_id = %actor_id,
                        error = %error,
                        outcome = "failed",
                        "Actor name lookup failed"
                    );
                    Lookup::Failed
                }
                Err(_) => {
                    warn!(
                        actor_id = %actor_id,
                        timeout_ms = timeout.as_millis() as u64,
                        outcome = "timeout",
                        "Actor name lookup timed out"
                    );
                    Lookup::Failed
                }
            }
        }
        .boxed()
        .shared()
    }

    /// Caches the outcome and retires the lookup under the in-flight lock, so
    /// a concurrent caller sees either the entry or the cached result.
    fn settle(&self, actor_id: &str, ticket: u64, outcome: &Lookup) {
        let mut in_flight = self.lock_in_flight();

        let cached = match outcome {
            Lookup::Found(name) => Some(Some(name.clone())),
            Lookup::Missing => Some(None),
            Lookup::Failed => None,
        };
        if let Some(cached) = cached {
            self.names
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(actor_id.to_string(), cached);
        }

        if in_flight.get(actor_id).is_some_and(|entry| entry.ticket == ticket) {
            in_flight.remove(actor_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DirectoryError, Result};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    struct CountingDirectory {
        names: HashMap<String, String>,
        delay: Duration,
        fail: bool,
        calls: AtomicUsize,
    }

    impl CountingDirectory {
        fn new(names: &[(&str, &str)]) -> Self {
            Self {
                names: names
                    .iter()
                    .map(|(address, name)| (address.to_string(), name.to_string()))
                    .collect(),
                delay: Duration::ZERO,
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn slow(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        fn failing(mut self) -> Self {
            self.fail = true;
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Directory for CountingDirectory {
        async fn lookup(&self, address: &str) -> Result<Option<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if self.fail {
                return Err(DirectoryError::Unavailable("name service down".to_string()));
            }
            Ok(self.names.get(address).cloned())
        }
    }

    fn resolver_with(directory: Arc<CountingDirectory>) -> IdentityResolver {
        IdentityResolver::new(directory, ResolverConfig::default())
    }

    #[tokio::test]
    async fn test_resolve_found_name_is_cached() {
        let directory = Arc::new(CountingDirectory::new(&[("0xA", "alice.eth")]));
        let resolver = resolver_with(directory.clone());

        assert_eq!(resolver.resolve("0xA").await.as_deref(), Some("alice.eth"));
        assert_eq!(resolver.resolve("0xA").await.as_deref(), Some("alice.eth"));
        assert_eq!(directory.calls(), 1);
        assert_eq!(resolver.cached("0xA"), Some(Some("alice.eth".to_string())));
    }

    #[tokio::test]
    async fn test_missing_name_is_cached_as_absent() {
        let directory = Arc::new(CountingDirectory::new(&[]));
        let resolver = resolver_with(directory.clone());

        assert!(resolver.resolve("0xB").await.is_none());
        assert!(resolver.resolve("0xB").await.is_none());
        assert_eq!(directory.calls(), 1);
        assert_eq!(resolver.cached("0xB"), Some(None));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_resolves_share_one_lookup() {
        let directory = Arc::new(
            CountingDirectory::new(&[("0xA", "alice.eth")]).slow(Duration::from_millis(200)),
        );
        let resolver = resolver_with(directory.clone());

        let (first, second) = tokio::join!(resolver.resolve("0xA"), resolver.resolve("0xA"));

        assert_eq!(first.as_deref(), Some("alice.eth"));
        assert_eq!(second.as_deref(), Some("alice.eth"));
        assert_eq!(directory.calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_degrades_to_none_and_is_not_cached() {
        let directory = Arc::new(CountingDirectory::new(&[("0xA", "alice.eth")]).failing());
        let resolver = resolver_with(directory.clone());

        assert!(resolver.resolve("0xA").await.is_none());
        assert!(resolver.cached("0xA").is_none());

        assert!(resolver.resolve("0xA").await.is_none());
        assert_eq!(directory.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_counts_as_failure() {
        let directory = Arc::new(
            CountingDirectory::new(&[("0xA", "alice.eth")]).slow(Duration::from_secs(30)),
        );
        let resolver = IdentityResolver::new(
            directory.clone(),
            ResolverConfig {
                lookup_timeout: Duration::from_millis(100),
            },
        );

        assert!(resolver.resolve("0xA").await.is_none());
        assert!(resolver.cached("0xA").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_all_dedupes_addresses() {
        let directory = Arc::new(
            CountingDirectory::new(&[("0xA", "alice.eth")]).slow(Duration::from_millis(50)),
        );
        let resolver = resolver_with(directory.clone());

        let names = resolver.resolve_all(["0xA", "0xB", "0xA", "0xA"]).await;

        assert_eq!(names.len(), 2);
        assert_eq!(names["0xA"].as_deref(), Some("alice.eth"));
        assert!(names["0xB"].is_none());
        assert_eq!(directory.calls(), 2);
        assert_eq!(resolver.cache_len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_lookup_leaves_no_in_flight_entry() {
        let directory = Arc::new(
            CountingDirectory::new(&[("0xA", "alice.eth")]).slow(Duration::from_secs(1)),
        );
        let resolver = resolver_with(directory.clone());

        let abandoned =
            tokio::time::timeout(Duration::from_millis(10), resolver.resolve("0xA")).await;
        assert!(abandoned.is_err());
        assert_eq!(resolver.in_flight_len(), 0);
        assert!(resolver.cached("0xA").is_none());

        // The next caller starts a fresh lookup instead of joining a dead one.
        assert_eq!(resolver.resolve("0xA").await.as_deref(), Some("alice.eth"));
        assert_eq!(directory.calls(), 2);
        assert_eq!(resolver.in_flight_len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoning_one_waiter_keeps_the_shared_lookup() {
        let directory = Arc::new(
            CountingDirectory::new(&[("0xA", "alice.eth")]).slow(Duration::from_millis(200)),
        );
        let resolver = resolver_with(directory.clone());

        let (abandoned, kept) = tokio::join!(
            tokio::time::timeout(Duration::from_millis(10), resolver.resolve("0xA")),
            resolver.resolve("0xA"),
        );

        assert!(abandoned.is_err());
        assert_eq!(kept.as_deref(), Some("alice.eth"));
        assert_eq!(directory.calls(), 1);
        assert_eq!(resolver.in_flight_len(), 0);
    }
}
