//! Search session controller
//!
//! Owns the live search state and reconciles its four sources of truth:
//! user-edited filters, the map viewport, the address bar, and the remote
//! paginated result set. Filter edits narrow the loaded page locally for
//! instant feedback and publish the URL through a debounced stream;
//! viewport changes refetch immediately. Fetches resolve out of order, so
//! every issued request carries a monotonically increasing token and only
//! the newest token's outcome is ever applied.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::models::Property;
use crate::search::analytics::AnalyticsEvent;
use crate::search::codec;
use crate::search::debounce::DebouncedPublisher;
use crate::search::sample::sample_listings;
use crate::search::traits::{AddressBar, AnalyticsEmitter, ResultFetcher};
use crate::search::types::{
    BoundingBox, FetchError, FilterEdit, FilterSet, ResultPage, SessionPhase, SortOrder, ViewMode,
};

/// What to show when a fetch fails before any page was loaded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Leave the result list empty
    Disabled,
    /// Install the built-in illustrative listings so the screen stays
    /// populated; the session still reports `Failed` with an error
    #[default]
    SampleListings,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Quiet interval for address-bar updates
    pub url_debounce: Duration,
    /// Page size passed to the result fetcher
    pub page_limit: u32,
    pub fallback: FallbackPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            url_debounce: Duration::from_millis(400),
            page_limit: 12,
            fallback: FallbackPolicy::default(),
        }
    }
}

/// Live session state. Mutated exclusively through
/// [`SearchSessionController`]; external components read snapshots.
#[derive(Debug, Clone)]
pub struct SearchSession {
    pub filters: FilterSet,
    pub view_mode: ViewMode,
    /// What the UI renders: the last authoritative page, narrowed by any
    /// filter edits made since it loaded
    pub results: Vec<Property>,
    /// Total matches reported by the remote query, across all pages
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub phase: SessionPhase,
    pub error: Option<String>,
}

impl SearchSession {
    fn new(limit: u32) -> Self {
        Self {
            filters: FilterSet::default(),
            view_mode: ViewMode::default(),
            results: Vec::new(),
            total: 0,
            page: 1,
            limit,
            phase: SessionPhase::Idle,
            error: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SessionPhase::Loading
    }
}

struct FetchCompletion {
    token: u64,
    outcome: Result<ResultPage, FetchError>,
}

/// The search screen's state machine, constructible without any rendering
/// surface. Requires a tokio runtime: fetches and analytics run as spawned
/// tasks and report back through an internal channel, applied on the
/// caller's task via [`settle`](Self::settle) or
/// [`poll_completions`](Self::poll_completions).
pub struct SearchSessionController {
    session: SearchSession,
    /// Last page the remote fetch returned, before local narrowing
    loaded: Vec<Property>,
    fetcher: Arc<dyn ResultFetcher>,
    analytics: Arc<dyn AnalyticsEmitter>,
    address_bar: Box<dyn AddressBar>,
    url_updates: DebouncedPublisher<String>,
    fetch_seq: u64,
    outstanding: u32,
    completions_tx: mpsc::UnboundedSender<FetchCompletion>,
    completions_rx: mpsc::UnboundedReceiver<FetchCompletion>,
    config: SessionConfig,
}

impl SearchSessionController {
    pub fn new(
        fetcher: Arc<dyn ResultFetcher>,
        analytics: Arc<dyn AnalyticsEmitter>,
        address_bar: Box<dyn AddressBar>,
        config: SessionConfig,
    ) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            session: SearchSession::new(config.page_limit),
            loaded: Vec::new(),
            fetcher,
            analytics,
            address_bar,
            url_updates: DebouncedPublisher::new(config.url_debounce),
            fetch_seq: 0,
            outstanding: 0,
            completions_tx,
            completions_rx,
            config,
        }
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Seed the session from persisted URL parameters and fetch the first
    /// page. Malformed parameters were already dropped by the codec.
    pub fn initialize_from_url(&mut self, query: &str) {
        self.session.filters = codec::decode(query);
        self.session.page = 1;
        self.issue_remote_query();
    }

    /// Apply a filter edit: new filter state, instant local narrowing,
    /// debounced URL update. Does not touch the network unless the edit
    /// replaces the bounding box, which takes the immediate path.
    pub fn edit_filter(&mut self, edit: FilterEdit, now: Instant) {
        if let FilterEdit::Bounds(bounds) = edit {
            self.replace_bounds(bounds, now);
            return;
        }

        self.session.filters = self.session.filters.with(edit);
        self.session.page = 1;
        self.apply_local_narrowing();
        self.schedule_url_update(now);
    }

    /// Replace the viewport after the map settles. Enters `Loading` and
    /// issues the fetch immediately; map interaction already implies
    /// intentional settling, so no debounce. The URL update is debounced
    /// like any other edit.
    pub fn set_bounding_box(&mut self, bounds: BoundingBox, now: Instant) {
        self.replace_bounds(Some(bounds), now);
    }

    fn replace_bounds(&mut self, bounds: Option<BoundingBox>, now: Instant) {
        self.session.filters = self.session.filters.with(FilterEdit::Bounds(bounds));
        self.session.page = 1;
        self.issue_remote_query();
        self.schedule_url_update(now);

        if let Some(bbox) = self.session.filters.bounds {
            self.emit(AnalyticsEvent::BoundsChanged {
                bbox,
                zoom: bbox.estimated_zoom(),
                result_count: self.session.results.len(),
            });
        }
    }

    /// Pure UI state change; never touches filters or the network.
    pub fn toggle_view_mode(&mut self, mode: ViewMode) {
        if self.session.view_mode == mode {
            return;
        }
        self.session.view_mode = mode;
        self.emit(AnalyticsEvent::ViewModeChanged { mode });
    }

    /// Record a marker or card click.
    pub fn select_property(&mut self, id: &str) {
        self.emit(AnalyticsEvent::PropertySelected { id: id.to_string() });
    }

    pub fn set_page(&mut self, page: u32) {
        self.session.page = page.max(1);
        self.issue_remote_query();
    }

    /// Re-issue the current filters after a failure.
    pub fn retry(&mut self) {
        self.issue_remote_query();
    }

    /// Back to the unfiltered first page.
    pub fn reset(&mut self, now: Instant) {
        self.session.filters = FilterSet::default();
        self.session.page = 1;
        self.issue_remote_query();
        self.schedule_url_update(now);
    }

    /// Drive the debounce clock: publish a due URL update, if any.
    pub fn tick(&mut self, now: Instant) {
        if let Some(query) = self.url_updates.take_due(now) {
            debug!("publishing search URL: ?{query}");
            self.address_bar.replace_query(&query);
        }
    }

    /// Apply completions until every issued fetch has reported back.
    pub async fn settle(&mut self) {
        while self.outstanding > 0 {
            let Some(completion) = self.completions_rx.recv().await else {
                break;
            };
            self.apply_completion(completion);
        }
    }

    /// Apply whatever has already resolved, without waiting.
    pub fn poll_completions(&mut self) {
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.apply_completion(completion);
        }
    }

    fn schedule_url_update(&mut self, now: Instant) {
        self.url_updates.schedule(codec::encode(&self.session.filters), now);
    }

    fn issue_remote_query(&mut self) {
        self.fetch_seq += 1;
        self.outstanding += 1;
        self.session.phase = SessionPhase::Loading;
        self.session.error = None;

        let token = self.fetch_seq;
        let fetcher = Arc::clone(&self.fetcher);
        let filters = self.session.filters.clone();
        let page = self.session.page;
        let limit = self.session.limit;
        let completions = self.completions_tx.clone();

        tokio::spawn(async move {
            let outcome = fetcher.fetch(&filters, page, limit).await;
            let _ = completions.send(FetchCompletion { token, outcome });
        });
    }

    /// Last-request-wins: a completion is authoritative only if it carries
    /// the newest token; older outcomes, success or failure, are dropped.
    fn apply_completion(&mut self, completion: FetchCompletion) {
        self.outstanding = self.outstanding.saturating_sub(1);

        if completion.token != self.fetch_seq {
            debug!(
                "discarding stale fetch completion (token {}, current {})",
                completion.token, self.fetch_seq
            );
            return;
        }

        match completion.outcome {
            Ok(page) => {
                self.loaded = page.items;
                self.session.total = page.total;
                self.session.phase = SessionPhase::Ready;
                self.session.error = None;
                self.apply_local_narrowing();
            }
            Err(err) => {
                warn!("listing fetch failed: {err}");
                self.session.phase = SessionPhase::Failed;
                self.session.error = Some(err.to_string());

                // Degraded mode: never blank the screen. Keep the last good
                // page; if there never was one, fall back per policy.
                if self.loaded.is_empty() && self.config.fallback == FallbackPolicy::SampleListings
                {
                    self.loaded = sample_listings();
                    self.session.total = self.loaded.len() as u64;
                    self.apply_local_narrowing();
                }
            }
        }
    }

    /// Narrow the loaded page in place for perceived responsiveness. An
    /// approximation only: it can hide items, never surface ones the last
    /// fetch did not return.
    fn apply_local_narrowing(&mut self) {
        let filters = &self.session.filters;
        let mut narrowed: Vec<Property> = self
            .loaded
            .iter()
            .filter(|property| filters.matches(property))
            .cloned()
            .collect();
        if let Some(sort) = filters.sort {
            sort_page(&mut narrowed, sort);
        }
        self.session.results = narrowed;
    }

    fn emit(&self, event: AnalyticsEvent) {
        let analytics = Arc::clone(&self.analytics);
        tokio::spawn(async move {
            analytics.emit(event).await;
        });
    }
}

fn sort_page(items: &mut [Property], sort: SortOrder) {
    match sort {
        SortOrder::Newest => items.sort_by(|a, b| b.listed_at.cmp(&a.listed_at)),
        SortOrder::PriceAsc => items.sort_by_key(|property| property.price),
        SortOrder::PriceDesc => items.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOrder::Featured => items.sort_by_key(|property| !property.featured),
    }
}
