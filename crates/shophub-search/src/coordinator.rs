//! # Search Coordinator
//!
//! Owns the live query string, the debounce timer, the staleness guard, and
//! the cached catalog used for local fallback.
//!
//! ## Debounce + Staleness Guard
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │            Why a Generation Counter (not query comparison)              │
//! │                                                                         │
//! │  t=0    set_query("a")     generation 1, timer armed                   │
//! │  t=300  timer fires        lookup("a") in flight  [gen 1]              │
//! │  t=350  set_query("ab")    generation 2, timer armed                   │
//! │  t=650  timer fires        lookup("ab") in flight [gen 2]              │
//! │  t=660  lookup("ab") done  gen 2 == current 2 → install results        │
//! │  t=1300 lookup("a") done   gen 1 != current 2 → DISCARDED              │
//! │                                                                         │
//! │  Comparing query strings instead of generations would mishandle the    │
//! │  case where the user types "a", erases it, and types "a" again: two    │
//! │  distinct cycles with the same text. The counter has no such aliasing. │
//! │                                                                         │
//! │  The guard is exactly that - a guard. An in-flight lookup is never     │
//! │  torn down; its resolution is ignored. Only the debounce timer is      │
//! │  truly cancelled on each keystroke.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency Model
//! All state lives behind one `Mutex` with short critical sections and no
//! awaits while held. Suspension happens only at the catalog lookup. The
//! catalog is swapped as a whole collection on refresh, never mutated
//! incrementally, so fallback filtering can never observe a half-loaded
//! catalog.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use ts_rs::TS;

use shophub_core::ProductSummary;

use crate::filter::filter_catalog;
use crate::source::{CatalogSource, ListOptions};

// =============================================================================
// Configuration
// =============================================================================

/// Tuning knobs for the coordinator.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a lookup is issued.
    pub debounce: Duration,

    /// How many products `load_catalog` asks the source for.
    pub catalog_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            debounce: Duration::from_millis(300),
            catalog_limit: 100,
        }
    }
}

// =============================================================================
// Search State
// =============================================================================

/// The observable search state.
///
/// ## Invariant
/// `results` reflects either the most recently *completed* lookup for the
/// *current* query, or is empty when the query is empty. A superseded
/// lookup can never write here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SearchState {
    /// Current free-text query as typed.
    pub query: String,

    /// Results of the last completed lookup for the current query.
    pub results: Vec<ProductSummary>,

    /// True from the keystroke that started a cycle until its resolution.
    pub is_searching: bool,

    /// Locally cached products used as the fallback data source.
    pub catalog: Vec<ProductSummary>,
}

// =============================================================================
// Coordinator
// =============================================================================

struct Inner {
    source: Arc<dyn CatalogSource>,
    config: SearchConfig,

    /// All observable state; never held across an await.
    state: Mutex<SearchState>,

    /// Bumped (under the state lock) on every set_query. A lookup may only
    /// install results while its generation is still the latest.
    generation: AtomicU64,

    /// The debounce task armed by the most recent keystroke, if any.
    pending: Mutex<Option<JoinHandle<()>>>,

    /// State broadcast to subscribers.
    state_tx: watch::Sender<SearchState>,
}

/// Coordinates keystroke-driven queries into debounced catalog lookups.
///
/// Cheap to clone; clones share the same state, so one handle can live in
/// each UI callback.
///
/// ## Usage
/// ```rust,ignore
/// let coordinator = SearchCoordinator::new(Arc::new(catalog_client));
/// coordinator.load_catalog().await;
///
/// coordinator.set_query("head");   // on every keystroke
/// let state = coordinator.snapshot();
/// ```
///
/// `set_query` must be called from within a tokio runtime: it arms the
/// debounce timer as a spawned task.
#[derive(Clone)]
pub struct SearchCoordinator {
    inner: Arc<Inner>,
}

impl SearchCoordinator {
    /// Creates a coordinator with default tuning.
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self::with_config(source, SearchConfig::default())
    }

    /// Creates a coordinator with explicit tuning.
    pub fn with_config(source: Arc<dyn CatalogSource>, config: SearchConfig) -> Self {
        let (state_tx, _) = watch::channel(SearchState::default());

        SearchCoordinator {
            inner: Arc::new(Inner {
                source,
                config,
                state: Mutex::new(SearchState::default()),
                generation: AtomicU64::new(0),
                pending: Mutex::new(None),
                state_tx,
            }),
        }
    }

    /// Returns a copy of the current search state.
    pub fn snapshot(&self) -> SearchState {
        self.inner
            .state
            .lock()
            .expect("Search state mutex poisoned")
            .clone()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.inner.state_tx.subscribe()
    }

    /// Updates the query and restarts the debounce cycle.
    ///
    /// ## Behavior
    /// - Cancels the pending debounce timer from the previous keystroke
    /// - Empty (or blank) text resets to Idle synchronously: results are
    ///   cleared and `is_searching` drops, regardless of prior state
    /// - Non-empty text sets `is_searching` immediately (the spinner shows
    ///   during the quiet period, not only once the lookup starts) and arms
    ///   a fresh debounce timer
    pub fn set_query(&self, text: &str) {
        // Cancel the timer armed by the previous keystroke, if it has not
        // fired yet. In-flight lookups are left to the staleness guard.
        if let Some(task) = self
            .inner
            .pending
            .lock()
            .expect("Pending task mutex poisoned")
            .take()
        {
            task.abort();
        }

        let generation = {
            let mut state = self
                .inner
                .state
                .lock()
                .expect("Search state mutex poisoned");
            let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
            state.query = text.to_string();

            if text.trim().is_empty() {
                state.results.clear();
                state.is_searching = false;
                drop(state);
                self.inner.publish();
                debug!(generation, "query cleared, back to idle");
                return;
            }

            state.is_searching = true;
            generation
        };
        self.inner.publish();
        debug!(query = %text, generation, "debounce timer armed");

        let inner = Arc::clone(&self.inner);
        let query = text.to_string();
        let task = tokio::spawn(async move {
            tokio::time::sleep(inner.config.debounce).await;

            // Superseded while waiting out the quiet period
            if inner.generation.load(Ordering::SeqCst) != generation {
                return;
            }

            // This timer has fired; it is no longer cancellable.
            inner
                .pending
                .lock()
                .expect("Pending task mutex poisoned")
                .take();

            inner.resolve(generation, query).await;
        });

        *self
            .inner
            .pending
            .lock()
            .expect("Pending task mutex poisoned") = Some(task);
    }

    /// Repopulates the cached catalog from the source.
    ///
    /// Used once at startup and again to refresh. Failures are logged and
    /// leave the previous catalog untouched; callers never see an error.
    pub async fn load_catalog(&self) {
        let options = ListOptions {
            limit: Some(self.inner.config.catalog_limit),
            ..ListOptions::default()
        };

        match self.inner.source.list(&options).await {
            Ok(page) => {
                let loaded = page.products.len();
                {
                    let mut state = self
                        .inner
                        .state
                        .lock()
                        .expect("Search state mutex poisoned");
                    // Whole-collection swap: fallback filtering never sees a
                    // half-loaded catalog.
                    state.catalog = page.products;
                }
                self.inner.publish();
                info!(loaded, total = page.count, "catalog cache refreshed");
            }
            Err(err) => {
                warn!(error = %err, "catalog refresh failed, keeping previous catalog");
            }
        }
    }
}

impl Inner {
    /// Issues the lookup for a settled query and applies its outcome.
    async fn resolve(&self, generation: u64, query: String) {
        debug!(query = %query, generation, "dispatching catalog lookup");

        let outcome = self.source.search(&query).await;

        {
            let mut state = self.state.lock().expect("Search state mutex poisoned");

            // Staleness guard: only the most recently issued lookup may
            // install results. The newer cycle owns the outcome.
            if self.generation.load(Ordering::SeqCst) != generation {
                debug!(generation, "discarding superseded lookup result");
                return;
            }

            match outcome {
                Ok(results) => {
                    debug!(count = results.len(), query = %query, "lookup resolved");
                    state.results = results;
                }
                Err(err) => {
                    warn!(error = %err, query = %query, "lookup failed, filtering cached catalog");
                    state.results = filter_catalog(&state.catalog, &query);
                }
            }
            state.is_searching = false;
        }
        self.publish();
    }

    /// Broadcasts the current state to subscribers.
    fn publish(&self) {
        let snapshot = self
            .state
            .lock()
            .expect("Search state mutex poisoned")
            .clone();
        self.state_tx.send_replace(snapshot);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::atomic::AtomicBool;

    use crate::error::{CatalogError, CatalogResult};
    use crate::source::ProductPage;

    fn product(id: &str, name: &str, description: Option<&str>) -> ProductSummary {
        ProductSummary {
            id: id.to_string(),
            name: name.to_string(),
            price_cents: 999,
            compare_at_price_cents: None,
            images: vec![],
            category: None,
            description: description.map(str::to_string),
            is_featured: false,
            created_at: Utc::now(),
        }
    }

    /// Catalog source test double with scripted delays and failures.
    struct ScriptedSource {
        products: Vec<ProductSummary>,
        /// Per-query artificial lookup latency, in milliseconds.
        delays: HashMap<String, u64>,
        fail_search: AtomicBool,
        fail_list: AtomicBool,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedSource {
        fn new(products: Vec<ProductSummary>) -> Self {
            ScriptedSource {
                products,
                delays: HashMap::new(),
                fail_search: AtomicBool::new(false),
                fail_list: AtomicBool::new(false),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn with_delays(mut self, delays: &[(&str, u64)]) -> Self {
            self.delays = delays
                .iter()
                .map(|(q, ms)| (q.to_string(), *ms))
                .collect();
            self
        }

        fn failing_search(self) -> Self {
            self.fail_search.store(true, Ordering::SeqCst);
            self
        }

        fn recorded_calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CatalogSource for ScriptedSource {
        async fn search(&self, query: &str) -> CatalogResult<Vec<ProductSummary>> {
            self.calls.lock().unwrap().push(query.to_string());

            if let Some(ms) = self.delays.get(query) {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }

            if self.fail_search.load(Ordering::SeqCst) {
                return Err(CatalogError::Backend("scripted failure".to_string()));
            }

            let needle = query.to_lowercase();
            Ok(self
                .products
                .iter()
                .filter(|p| p.name.to_lowercase().contains(&needle))
                .cloned()
                .collect())
        }

        async fn list(&self, _options: &ListOptions) -> CatalogResult<ProductPage> {
            if self.fail_list.load(Ordering::SeqCst) {
                return Err(CatalogError::Unavailable("scripted outage".to_string()));
            }
            Ok(ProductPage {
                products: self.products.clone(),
                count: self.products.len(),
            })
        }
    }

    fn sample_products() -> Vec<ProductSummary> {
        vec![
            product("1", "Red Shoe", None),
            product("2", "Blue Hat", Some("red trim")),
            product("3", "Wireless Mouse", None),
        ]
    }

    /// Waits long enough (in paused time) for a debounce + lookup to settle.
    async fn settle() {
        tokio::time::sleep(Duration::from_millis(400)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_query_resets_to_idle() {
        let source = Arc::new(ScriptedSource::new(sample_products()));
        let coordinator = SearchCoordinator::new(source);

        coordinator.set_query("mouse");
        settle().await;
        assert!(!coordinator.snapshot().results.is_empty());

        coordinator.set_query("");
        let state = coordinator.snapshot();
        assert!(state.results.is_empty());
        assert!(!state.is_searching);

        // Blank-only queries count as empty too
        coordinator.set_query("   ");
        let state = coordinator.snapshot();
        assert!(state.results.is_empty());
        assert!(!state.is_searching);
    }

    #[tokio::test(start_paused = true)]
    async fn test_is_searching_set_before_debounce_elapses() {
        let source = Arc::new(ScriptedSource::new(sample_products()));
        let coordinator = SearchCoordinator::new(source);

        coordinator.set_query("mouse");
        // No time has passed: the spinner must already be on
        assert!(coordinator.snapshot().is_searching);

        settle().await;
        let state = coordinator.snapshot();
        assert!(!state.is_searching);
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results[0].name, "Wireless Mouse");
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_issues_single_lookup_for_last_query() {
        let source = Arc::new(ScriptedSource::new(sample_products()));
        let coordinator = SearchCoordinator::new(source.clone());

        // Three keystrokes inside one quiet period
        coordinator.set_query("m");
        tokio::time::sleep(Duration::from_millis(100)).await;
        coordinator.set_query("mo");
        tokio::time::sleep(Duration::from_millis(100)).await;
        coordinator.set_query("mouse");
        settle().await;

        assert_eq!(source.recorded_calls(), vec!["mouse".to_string()]);
        assert_eq!(coordinator.snapshot().results.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_lookup_never_overwrites_results() {
        // "shoe" is slow; "hat" is fast. The slow lookup for the old query
        // resolves long after the new one and must be discarded. The two
        // queries return different products so a stale overwrite would be
        // visible.
        let source = Arc::new(
            ScriptedSource::new(sample_products()).with_delays(&[("shoe", 1000), ("hat", 10)]),
        );
        let coordinator = SearchCoordinator::new(source.clone());

        coordinator.set_query("shoe");
        // Let the debounce fire so "shoe" is genuinely in flight
        tokio::time::sleep(Duration::from_millis(350)).await;

        coordinator.set_query("hat");
        tokio::time::sleep(Duration::from_millis(400)).await;

        let state = coordinator.snapshot();
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results[0].name, "Blue Hat");
        assert!(!state.is_searching);

        // Now the stale "shoe" lookup resolves - and must change nothing
        tokio::time::sleep(Duration::from_millis(700)).await;
        let state = coordinator.snapshot();
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results[0].name, "Blue Hat");
        assert!(!state.is_searching);

        assert_eq!(
            source.recorded_calls(),
            vec!["shoe".to_string(), "hat".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_lookup_falls_back_to_catalog_filter() {
        let source = Arc::new(ScriptedSource::new(sample_products()).failing_search());
        let coordinator = SearchCoordinator::new(source);

        coordinator.load_catalog().await;
        coordinator.set_query("red");
        settle().await;

        let state = coordinator.snapshot();
        // "Red Shoe" by name, "Blue Hat" by description - both, case-insensitively
        assert_eq!(state.results.len(), 2);
        let names: Vec<&str> = state.results.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Red Shoe", "Blue Hat"]);
        assert!(!state.is_searching);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fallback_with_empty_catalog_yields_empty_results() {
        let source = Arc::new(ScriptedSource::new(sample_products()).failing_search());
        let coordinator = SearchCoordinator::new(source);

        // No load_catalog: the cache is empty, the fallback has nothing
        coordinator.set_query("red");
        settle().await;

        let state = coordinator.snapshot();
        assert!(state.results.is_empty());
        assert!(!state.is_searching);
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_catalog_failure_keeps_previous_catalog() {
        let source = Arc::new(ScriptedSource::new(sample_products()));
        let coordinator = SearchCoordinator::new(source.clone());

        coordinator.load_catalog().await;
        assert_eq!(coordinator.snapshot().catalog.len(), 3);

        source.fail_list.store(true, Ordering::SeqCst);
        coordinator.load_catalog().await;
        assert_eq!(coordinator.snapshot().catalog.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_identical_query_reissues_lookup() {
        // Type "mouse", clear it, type "mouse" again: two distinct cycles
        // with identical text. The generation counter keeps them apart.
        let source = Arc::new(ScriptedSource::new(sample_products()));
        let coordinator = SearchCoordinator::new(source.clone());

        coordinator.set_query("mouse");
        settle().await;
        coordinator.set_query("");
        coordinator.set_query("mouse");
        settle().await;

        assert_eq!(
            source.recorded_calls(),
            vec!["mouse".to_string(), "mouse".to_string()]
        );
        assert_eq!(coordinator.snapshot().results.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_observe_resolution() {
        let source = Arc::new(ScriptedSource::new(sample_products()));
        let coordinator = SearchCoordinator::new(source);
        let rx = coordinator.subscribe();

        coordinator.set_query("mouse");
        settle().await;

        let observed = rx.borrow().clone();
        assert_eq!(observed.query, "mouse");
        assert_eq!(observed.results.len(), 1);
        assert!(!observed.is_searching);
    }
}
