//! End-to-end session flows against an in-memory data collaborator that
//! applies the same predicates the backend would, including viewport
//! containment and paging.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use listing_search::models::Property;
use listing_search::search::sample::sample_listings;
use listing_search::search::{
    AddressBar, BoundingBox, FetchError, FilterEdit, FilterSet, NullAnalyticsEmitter,
    ResultFetcher, ResultPage, SearchSessionController, SessionConfig, SessionPhase,
};

struct InMemoryFetcher {
    corpus: Vec<Property>,
}

fn in_bounds(bounds: Option<BoundingBox>, property: &Property) -> bool {
    match bounds {
        None => true,
        Some(bbox) => matches!(
            (property.location.longitude, property.location.latitude),
            (Some(lng), Some(lat)) if bbox.contains(lng, lat)
        ),
    }
}

#[async_trait]
impl ResultFetcher for InMemoryFetcher {
    async fn fetch(
        &self,
        filters: &FilterSet,
        page: u32,
        limit: u32,
    ) -> Result<ResultPage, FetchError> {
        let matching: Vec<Property> = self
            .corpus
            .iter()
            .filter(|property| filters.matches(property))
            .filter(|property| in_bounds(filters.bounds, property))
            .cloned()
            .collect();

        let total = matching.len() as u64;
        let offset = (page.max(1) - 1).saturating_mul(limit) as usize;
        let items = matching
            .into_iter()
            .skip(offset)
            .take(limit as usize)
            .collect();

        Ok(ResultPage { items, total })
    }
}

#[derive(Clone, Default)]
struct RecordingBar {
    writes: Arc<Mutex<Vec<String>>>,
}

impl AddressBar for RecordingBar {
    fn replace_query(&mut self, query: &str) {
        self.writes.lock().unwrap().push(query.to_string());
    }
}

fn misiones_session(config: SessionConfig) -> (SearchSessionController, RecordingBar) {
    let bar = RecordingBar::default();
    let controller = SearchSessionController::new(
        Arc::new(InMemoryFetcher {
            corpus: sample_listings(),
        }),
        Arc::new(NullAnalyticsEmitter),
        Box::new(bar.clone()),
        config,
    );
    (controller, bar)
}

#[tokio::test]
async fn search_journey_from_url_to_map_and_back() {
    let (mut session, bar) = misiones_session(SessionConfig::default());
    let start = Instant::now();

    // shared link: mid-range listings with at least two bedrooms
    session.initialize_from_url("?priceMin=50000&priceMax=150000&rooms=2");
    session.settle().await;

    assert_eq!(session.session().phase, SessionPhase::Ready);
    let cities: Vec<&str> = session
        .session()
        .results
        .iter()
        .map(|p| p.location.city.as_str())
        .collect();
    assert_eq!(cities, vec!["Posadas", "Oberá"]);
    assert_eq!(session.session().total, 2);

    // typing a city narrows the held page instantly
    session.edit_filter(FilterEdit::City(Some("posadas".into())), start);
    assert_eq!(session.session().results.len(), 1);
    assert_eq!(session.session().results[0].location.city, "Posadas");

    // panning the map to greater Posadas refetches with the viewport applied
    let posadas_area = BoundingBox::new(-56.2, -27.6, -55.6, -27.1).unwrap();
    session.set_bounding_box(posadas_area, start + Duration::from_millis(100));
    assert!(session.session().is_loading());
    session.settle().await;

    assert_eq!(session.session().phase, SessionPhase::Ready);
    assert_eq!(session.session().total, 1);
    assert_eq!(session.session().results[0].location.city, "Posadas");

    // one debounced URL write carries the whole shareable state
    session.tick(start + Duration::from_millis(500));
    let writes = bar.writes.lock().unwrap().clone();
    assert_eq!(writes.len(), 1);
    assert!(writes[0].contains("q=posadas"));
    assert!(writes[0].contains("priceMin=50000"));
    assert!(writes[0].contains("bbox=-56.2%2C-27.6%2C-55.6%2C-27.1"));

    // clearing filters restores the unfiltered first page
    session.reset(start + Duration::from_secs(1));
    session.settle().await;
    assert_eq!(session.session().total, sample_listings().len() as u64);
    assert!(session.session().filters.is_empty());
}

#[tokio::test]
async fn paging_walks_the_corpus() {
    let config = SessionConfig {
        page_limit: 2,
        ..SessionConfig::default()
    };
    let (mut session, _) = misiones_session(config);

    session.initialize_from_url("");
    session.settle().await;
    assert_eq!(session.session().results.len(), 2);
    assert_eq!(session.session().total, 4);

    session.set_page(2);
    session.settle().await;
    assert_eq!(session.session().results.len(), 2);
    assert_eq!(session.session().page, 2);

    session.set_page(3);
    session.settle().await;
    assert!(session.session().results.is_empty(), "past the last page");
    assert_eq!(session.session().total, 4);
}

#[tokio::test]
async fn shareable_url_reproduces_the_same_search() {
    let (mut first, bar) = misiones_session(SessionConfig::default());
    let start = Instant::now();

    first.initialize_from_url("");
    first.settle().await;
    first.edit_filter(FilterEdit::City(Some("Eldorado".into())), start);
    first.edit_filter(FilterEdit::PriceMax(Some(60_000)), start + Duration::from_millis(50));
    first.tick(start + Duration::from_millis(500));

    let shared = bar.writes.lock().unwrap().last().cloned().unwrap();

    // a second visitor opens the copied link
    let (mut second, _) = misiones_session(SessionConfig::default());
    second.initialize_from_url(&shared);
    second.settle().await;

    assert_eq!(second.session().filters, first.session().filters);
    assert_eq!(second.session().total, 1);
    assert_eq!(second.session().results[0].location.city, "Eldorado");
}
