//! Single-flight coordination of update checks
//!
//! Every trigger (app launch, background wake, push) funnels through
//! [`UpdateCoordinator::check_now`]. The coordinator serializes checks so at
//! most one fetch-plus-decide is in flight at a time, caches the last verdict
//! for a configurable TTL, and fails open when no source can be reached.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::{
    AppStoreConfig, DEFAULT_VERDICT_TTL_MS, FETCH_TIMEOUT_MS, GateConfig, RemoteEndpointConfig,
};
use crate::gate::clock::{Clock, SystemClock};
use crate::gate::decision::{GateVerdict, decide};
use crate::gate::semver::SemanticVersion;
use crate::gate::source::MetadataSource;
use crate::gate::sources::app_store::AppStoreSource;
use crate::gate::sources::remote_config::RemoteConfigSource;
use crate::gate::types::UpdateMetadata;

/// Caching and timeout policy for the coordinator
#[derive(Debug, Clone)]
pub struct GatePolicy {
    /// How long a verdict stays fresh
    pub verdict_ttl: Duration,
    /// Upper bound on the combined fetch across all sources
    pub fetch_timeout: Duration,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            verdict_ttl: Duration::from_millis(DEFAULT_VERDICT_TTL_MS as u64),
            fetch_timeout: Duration::from_millis(FETCH_TIMEOUT_MS as u64),
        }
    }
}

struct CachedVerdict {
    verdict: GateVerdict,
    checked_at_ms: i64,
}

/// Long-lived check coordinator.
///
/// Constructed once at process start and handed by reference to every caller
/// that can trigger a check. Holds no global state; substituting mock sources
/// or a fixed clock is a constructor argument away.
pub struct UpdateCoordinator {
    installed: SemanticVersion,
    sources: Vec<Arc<dyn MetadataSource>>,
    fallback: Option<UpdateMetadata>,
    policy: GatePolicy,
    clock: Arc<dyn Clock>,
    // Serializes checks; holding the lock means a check is in flight.
    state: Mutex<Option<CachedVerdict>>,
}

impl UpdateCoordinator {
    pub fn new(
        installed: SemanticVersion,
        sources: Vec<Arc<dyn MetadataSource>>,
        policy: GatePolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            installed,
            sources,
            fallback: None,
            policy,
            clock,
            state: Mutex::new(None),
        }
    }

    /// Build a coordinator from configuration, with the system clock and the
    /// sources the configuration enables.
    pub fn from_config(config: &GateConfig) -> Self {
        let mut sources: Vec<Arc<dyn MetadataSource>> = Vec::new();

        if let Some(AppStoreConfig {
            base_url,
            bundle_id,
            app_id,
        }) = &config.sources.app_store
        {
            sources.push(Arc::new(AppStoreSource::new(base_url, bundle_id, *app_id)));
        }

        if let Some(RemoteEndpointConfig { endpoint }) = &config.sources.remote_config {
            sources.push(Arc::new(RemoteConfigSource::new(endpoint)));
        }

        // The running app's own version, resolved once per process.
        let installed = config
            .installed_version
            .as_deref()
            .map(SemanticVersion::parse)
            .unwrap_or_else(|| SemanticVersion::parse(env!("CARGO_PKG_VERSION")));

        let policy = GatePolicy {
            verdict_ttl: Duration::from_millis(config.cache.verdict_ttl.max(0) as u64),
            fetch_timeout: Duration::from_millis(config.cache.fetch_timeout.max(0) as u64),
        };

        let mut coordinator = Self::new(installed, sources, policy, Arc::new(SystemClock));

        if let Some(fallback) = &config.fallback {
            coordinator = coordinator.with_fallback(UpdateMetadata::new(
                SemanticVersion::parse(&fallback.latest_version),
                SemanticVersion::parse(&fallback.min_required_version),
            ));
        }

        coordinator
    }

    /// Set the policy to decide against when no source is reachable and no
    /// cached verdict exists.
    pub fn with_fallback(mut self, fallback: UpdateMetadata) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Run an update check, or reuse the cached verdict while it is fresh.
    ///
    /// Exactly one verdict is delivered per call, on an unspecified thread;
    /// marshaling to a UI thread is the caller's concern.
    ///
    /// `force` skips the TTL check but still shares an in-flight fetch: a
    /// check that completed while the caller was waiting for its turn
    /// satisfies even a forced request.
    pub async fn check_now(&self, force: bool) -> GateVerdict {
        let waited_since = self.clock.now_millis();
        let mut state = self.state.lock().await;

        if let Some(cached) = state.as_ref() {
            let satisfied_while_waiting = cached.checked_at_ms >= waited_since;
            if !self.expired(cached) && (!force || satisfied_while_waiting) {
                debug!(
                    "Reusing verdict checked {}ms ago",
                    self.clock.now_millis() - cached.checked_at_ms
                );
                return cached.verdict.clone();
            }
        }

        let verdict = self.fetch_and_decide(state.as_ref()).await;

        *state = Some(CachedVerdict {
            verdict: verdict.clone(),
            checked_at_ms: self.clock.now_millis(),
        });

        verdict
    }

    fn expired(&self, cached: &CachedVerdict) -> bool {
        let age = self.clock.now_millis().saturating_sub(cached.checked_at_ms);
        age >= self.policy.verdict_ttl.as_millis() as i64
    }

    async fn fetch_and_decide(&self, cached: Option<&CachedVerdict>) -> GateVerdict {
        match timeout(self.policy.fetch_timeout, self.fetch_metadata()).await {
            Ok(Some(metadata)) => {
                let verdict = decide(&self.installed, &metadata);
                info!(
                    "Update check complete: installed {} against latest {} / minimum {}",
                    self.installed, metadata.latest, metadata.min_required
                );
                verdict
            }
            Ok(None) => self.fail_open(cached, "no source returned update info"),
            Err(_) => self.fail_open(cached, "fetch timed out"),
        }
    }

    /// Fetch from every configured source concurrently and merge the results.
    ///
    /// Individual source failures are logged and tolerated; only all sources
    /// failing leaves nothing to decide against.
    async fn fetch_metadata(&self) -> Option<UpdateMetadata> {
        let fetches = self.sources.iter().map(|source| {
            let source = Arc::clone(source);
            async move {
                match source.fetch().await {
                    Ok(metadata) => Some(metadata),
                    Err(e) => {
                        warn!("Source {} failed: {}", source.name(), e);
                        None
                    }
                }
            }
        });

        let results = join_all(fetches).await;

        UpdateMetadata::merge(results.into_iter().flatten())
    }

    /// Failure policy: keep the unexpired cached verdict if there is one,
    /// otherwise decide against the fallback policy, otherwise proceed.
    /// The result is cached like any other verdict.
    fn fail_open(&self, cached: Option<&CachedVerdict>, reason: &str) -> GateVerdict {
        if let Some(cached) = cached {
            if !self.expired(cached) {
                warn!("{}; keeping cached verdict", reason);
                return cached.verdict.clone();
            }
        }

        match &self.fallback {
            Some(metadata) => {
                warn!("{}; deciding against fallback policy", reason);
                decide(&self.installed, metadata)
            }
            None => {
                warn!("{}; proceeding", reason);
                GateVerdict::Proceed
            }
        }
    }
}
