#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Year selection session: the state machine between the UI and the
//! data-producing collaborators.
//!
//! Per year selection the session runs one of two paths:
//!
//! - **Cache hit**: the previously confirmed dataset is published
//!   synchronously; no network activity.
//! - **Cache miss**: a synthetic projection of the reference dataset is
//!   published immediately (the UI never blocks on network I/O), and a
//!   background fetch is scheduled behind a debounce window so rapid
//!   year scrubbing coalesces into a single outbound request for the
//!   last-settled year. Years in the locked range never fetch and stay
//!   provisional.
//!
//! A resolved fetch is always written to the cache, but only replaces
//! the displayed dataset if its year is still the selected one — a
//! stale response is a harmless discard, not an error.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use gdp_globe_economy_models::{
    CountryRecord, LOCKED_YEAR_START, REFERENCE_YEAR, reference::reference_dataset,
};
use tokio::sync::watch;

/// Quiet period after the last year change before a background fetch is
/// allowed to fire.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(1200);

/// Session configuration, injected at construction — no ambient state.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Debounce window for background fetches.
    pub debounce: Duration,
    /// First year of the locked range (inclusive). Selections at or
    /// beyond it never trigger a fetch.
    pub locked_from: i32,
    /// Base year of the reference dataset used for provisional
    /// projections.
    pub reference_year: i32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce: DEBOUNCE_WINDOW,
            locked_from: LOCKED_YEAR_START,
            reference_year: REFERENCE_YEAR,
        }
    }
}

/// Source of authoritative year datasets.
///
/// Infallible by contract: implementations substitute fallback data
/// rather than erroring (see `gdp_globe_ai`). Tests inject mocks to
/// observe scheduling behavior.
#[async_trait::async_trait]
pub trait DatasetProvider: Send + Sync {
    /// Produces the dataset for `year`.
    async fn dataset_for_year(&self, year: i32) -> Vec<CountryRecord>;
}

#[async_trait::async_trait]
impl DatasetProvider for gdp_globe_ai::AnalyticsClient {
    async fn dataset_for_year(&self, year: i32) -> Vec<CountryRecord> {
        self.fetch_dataset(year).await
    }
}

/// How the currently displayed dataset was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetOrigin {
    /// Synthetic projection shown while no authoritative data exists
    /// (pending fetch, or permanently for locked years).
    Provisional,
    /// Served from the year cache; no fetch was issued.
    Cached,
    /// An authoritative fetch for this year resolved while it was still
    /// selected.
    Confirmed,
}

/// The dataset currently backing the display, with its provenance.
#[derive(Debug, Clone)]
pub struct ActiveDataset {
    /// The year this dataset describes.
    pub year: i32,
    /// Provenance of the records.
    pub origin: DatasetOrigin,
    /// The records themselves. Shared, never mutated in place — every
    /// refresh publishes a new vector.
    pub records: Arc<Vec<CountryRecord>>,
}

struct Inner {
    config: SessionConfig,
    provider: Arc<dyn DatasetProvider>,
    reference: Vec<CountryRecord>,
    cache: Mutex<HashMap<i32, Arc<Vec<CountryRecord>>>>,
    selected_year: AtomicI32,
    /// Debounce cancellation token: each selection bumps this, and a
    /// sleeping timer task only proceeds if its generation is still
    /// current when it wakes.
    generation: AtomicU64,
    active_tx: watch::Sender<ActiveDataset>,
}

impl Inner {
    fn cache_get(&self, year: i32) -> Option<Arc<Vec<CountryRecord>>> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&year)
            .cloned()
    }

    fn cache_put(&self, year: i32, records: Arc<Vec<CountryRecord>>) {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(year, records);
    }
}

/// Owns the year-keyed dataset cache, the debounce timer, and the
/// currently active dataset.
///
/// Created once at startup and torn down at shutdown; all state is
/// explicit and per-instance.
pub struct YearSession {
    inner: Arc<Inner>,
}

impl YearSession {
    /// Creates a session seeded with the bundled reference dataset.
    #[must_use]
    pub fn new(provider: Arc<dyn DatasetProvider>, config: SessionConfig) -> Self {
        Self::with_reference(provider, config, reference_dataset())
    }

    /// Creates a session with an explicit reference dataset.
    ///
    /// The initial active dataset is the reference itself, provisional
    /// for the configured reference year.
    #[must_use]
    pub fn with_reference(
        provider: Arc<dyn DatasetProvider>,
        config: SessionConfig,
        reference: Vec<CountryRecord>,
    ) -> Self {
        let initial = ActiveDataset {
            year: config.reference_year,
            origin: DatasetOrigin::Provisional,
            records: Arc::new(reference.clone()),
        };
        let (active_tx, _) = watch::channel(initial);
        let selected_year = AtomicI32::new(config.reference_year);

        Self {
            inner: Arc::new(Inner {
                config,
                provider,
                reference,
                cache: Mutex::new(HashMap::new()),
                selected_year,
                generation: AtomicU64::new(0),
                active_tx,
            }),
        }
    }

    /// Selects a year and returns the dataset to display for it.
    ///
    /// Synchronous: the returned dataset is either the cached one or an
    /// immediately computed provisional projection. On a cache miss
    /// outside the locked range a background fetch is scheduled behind
    /// the debounce window; its resolution is published through
    /// [`subscribe`](Self::subscribe).
    ///
    /// Every call invalidates any previously scheduled, still-unfired
    /// fetch, so rapid successive selections coalesce into one request
    /// for the last-settled year.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn select_year(&self, year: i32) -> ActiveDataset {
        let inner = &self.inner;
        let generation = inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        inner.selected_year.store(year, Ordering::SeqCst);

        // Fast path: previously confirmed year, O(1), no network.
        if let Some(records) = inner.cache_get(year) {
            let active = ActiveDataset {
                year,
                origin: DatasetOrigin::Cached,
                records,
            };
            inner.active_tx.send_replace(active.clone());
            return active;
        }

        // Provisional answer is always available synchronously.
        let records = Arc::new(gdp_globe_projection::project(
            &inner.reference,
            inner.config.reference_year,
            year,
        ));
        let active = ActiveDataset {
            year,
            origin: DatasetOrigin::Provisional,
            records,
        };
        inner.active_tx.send_replace(active.clone());

        if year >= inner.config.locked_from {
            log::debug!("year {year} is in the locked range, staying synthetic");
            return active;
        }

        let task = Arc::clone(inner);
        tokio::spawn(async move {
            tokio::time::sleep(task.config.debounce).await;
            if task.generation.load(Ordering::SeqCst) != generation {
                // A newer selection rescheduled the debounce timer.
                return;
            }

            log::debug!("debounce elapsed, fetching dataset for {year}");
            let records = Arc::new(task.provider.dataset_for_year(year).await);

            // The cache write is unconditional; only the display update
            // checks for staleness.
            task.cache_put(year, Arc::clone(&records));

            if task.selected_year.load(Ordering::SeqCst) == year {
                task.active_tx.send_replace(ActiveDataset {
                    year,
                    origin: DatasetOrigin::Confirmed,
                    records,
                });
            } else {
                log::debug!("dataset for {year} arrived after the selection moved on; cached only");
            }
        });

        active
    }

    /// The currently active dataset.
    #[must_use]
    pub fn active(&self) -> ActiveDataset {
        self.inner.active_tx.borrow().clone()
    }

    /// Subscribes to active-dataset changes (confirmed fetches landing,
    /// new selections).
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ActiveDataset> {
        self.inner.active_tx.subscribe()
    }

    /// Returns the cached dataset for a year, if a fetch for it has
    /// resolved.
    #[must_use]
    pub fn cached_dataset(&self, year: i32) -> Option<Arc<Vec<CountryRecord>>> {
        self.inner.cache_get(year)
    }

    /// Cancels any pending debounce timer. Called automatically on
    /// drop; in-flight network requests are not aborted, their results
    /// land in the cache only.
    pub fn shutdown(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
    }
}

impl Drop for YearSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use gdp_globe_economy_models::MAX_YEAR;

    use super::*;

    /// Counts fetches and records the years they were issued for.
    struct MockProvider {
        calls: AtomicUsize,
        years: Mutex<Vec<i32>>,
        delay: Duration,
    }

    impl MockProvider {
        fn new() -> Arc<Self> {
            Self::with_delay(Duration::ZERO)
        }

        fn with_delay(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                years: Mutex::new(Vec::new()),
                delay,
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn fetched_years(&self) -> Vec<i32> {
            self.years.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl DatasetProvider for MockProvider {
        async fn dataset_for_year(&self, year: i32) -> Vec<CountryRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.years.lock().unwrap().push(year);
            if self.delay > Duration::ZERO {
                tokio::time::sleep(self.delay).await;
            }
            vec![CountryRecord {
                country: format!("Remoteland {year}"),
                code: "RMT".to_string(),
                lat: 0.0,
                lng: 0.0,
                gdp: 9999.0,
                growth_rate: 2.0,
                rank: 1,
                color: "#ef4444".to_string(),
            }]
        }
    }

    fn session_with(provider: Arc<MockProvider>) -> YearSession {
        YearSession::new(provider, SessionConfig::default())
    }

    /// Long enough for the debounce window plus the fetch to complete.
    async fn settle() {
        tokio::time::sleep(DEBOUNCE_WINDOW * 3).await;
    }

    #[tokio::test(start_paused = true)]
    async fn provisional_dataset_is_published_synchronously() {
        let provider = MockProvider::new();
        let session = session_with(Arc::clone(&provider));

        let active = session.select_year(2020);
        assert_eq!(active.year, 2020);
        assert_eq!(active.origin, DatasetOrigin::Provisional);
        assert_eq!(
            *active.records,
            gdp_globe_projection::project(&reference_dataset(), REFERENCE_YEAR, 2020)
        );
        // Nothing has fetched yet — the debounce window has not elapsed.
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_coalesces_rapid_selections() {
        let provider = MockProvider::new();
        let session = session_with(Arc::clone(&provider));

        session.select_year(2022);
        session.select_year(2021);
        session.select_year(2020);
        settle().await;

        assert_eq!(provider.call_count(), 1);
        assert_eq!(provider.fetched_years(), vec![2020]);
        assert_eq!(session.active().year, 2020);
        assert_eq!(session.active().origin, DatasetOrigin::Confirmed);
    }

    #[tokio::test(start_paused = true)]
    async fn selecting_the_same_year_twice_fetches_once() {
        let provider = MockProvider::new();
        let session = session_with(Arc::clone(&provider));

        session.select_year(2020);
        session.select_year(2020);
        settle().await;

        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cache_hit_is_synchronous_and_silent() {
        let provider = MockProvider::new();
        let session = session_with(Arc::clone(&provider));

        session.select_year(2020);
        settle().await;
        assert_eq!(provider.call_count(), 1);

        // Move away and come back: the confirmed dataset is served from
        // the cache with no provisional flash and no second fetch.
        session.select_year(2019);
        let active = session.select_year(2020);
        assert_eq!(active.origin, DatasetOrigin::Cached);
        assert_eq!(active.records[0].country, "Remoteland 2020");

        settle().await;
        // The abandoned 2019 timer was cancelled, 2020 was cached: one
        // fetch total.
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn locked_range_never_fetches() {
        let provider = MockProvider::new();
        let session = session_with(Arc::clone(&provider));

        // The whole tail of the selectable domain is locked.
        session.select_year(LOCKED_YEAR_START);
        session.select_year(MAX_YEAR);
        settle().await;

        assert_eq!(provider.call_count(), 0);
        assert_eq!(session.active().origin, DatasetOrigin::Provisional);
        assert!(session.cached_dataset(LOCKED_YEAR_START).is_none());
        assert!(session.cached_dataset(MAX_YEAR).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn lock_threshold_is_configurable() {
        let provider = MockProvider::new();
        let config = SessionConfig {
            locked_from: 2028,
            ..SessionConfig::default()
        };
        let session = YearSession::new(Arc::clone(&provider) as Arc<dyn DatasetProvider>, config);

        session.select_year(2027);
        settle().await;

        assert_eq!(provider.call_count(), 1);
        assert_eq!(session.active().origin, DatasetOrigin::Confirmed);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_response_is_cached_but_not_displayed() {
        // Fetch takes 1000ms, so a response can arrive after the
        // selection has moved on.
        let provider = MockProvider::with_delay(Duration::from_millis(1000));
        let session = session_with(Arc::clone(&provider));

        session.select_year(2020);
        // Debounce (1200ms) elapses and the 2020 fetch goes in flight.
        tokio::time::sleep(Duration::from_millis(1300)).await;
        session.select_year(2021);

        // The 2020 response resolves at t=2200 while 2021 is selected
        // and still inside its own debounce window.
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(session.cached_dataset(2020).is_some());
        assert_eq!(session.active().year, 2021);
        assert_eq!(session.active().origin, DatasetOrigin::Provisional);

        settle().await;
        assert_eq!(session.active().year, 2021);
        assert_eq!(session.active().origin, DatasetOrigin::Confirmed);
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_pending_timer() {
        let provider = MockProvider::new();
        let session = session_with(Arc::clone(&provider));

        session.select_year(2020);
        session.shutdown();
        settle().await;

        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn subscriber_sees_confirmation() {
        let provider = MockProvider::new();
        let session = session_with(Arc::clone(&provider));
        let mut rx = session.subscribe();

        session.select_year(2020);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().origin, DatasetOrigin::Provisional);

        rx.changed().await.unwrap();
        let confirmed = rx.borrow().clone();
        assert_eq!(confirmed.origin, DatasetOrigin::Confirmed);
        assert_eq!(confirmed.records[0].code, "RMT");
    }
}
