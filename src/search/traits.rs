use crate::search::analytics::AnalyticsEvent;
use crate::search::types::{FetchError, FilterSet, ResultPage};
use async_trait::async_trait;

/// Read side of the data collaborator: one filtered, paginated query.
/// Stateless; the session controller owns all ordering concerns.
#[async_trait]
pub trait ResultFetcher: Send + Sync {
    async fn fetch(
        &self,
        filters: &FilterSet,
        page: u32,
        limit: u32,
    ) -> Result<ResultPage, FetchError>;
}

/// Fire-and-forget sink for product analytics. Implementations must
/// swallow their own failures; nothing downstream may rely on delivery
/// or ordering.
#[async_trait]
pub trait AnalyticsEmitter: Send + Sync {
    async fn emit(&self, event: AnalyticsEvent);
}

/// Where encoded filter state is published for shareable searches.
pub trait AddressBar: Send {
    /// Replace the current query string without adding a history entry,
    /// so navigating back does not replay every keystroke.
    fn replace_query(&mut self, query: &str);
}
