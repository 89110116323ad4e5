pub mod analytics;
pub mod codec;
pub mod debounce;
pub mod fetcher;
pub mod sample;
pub mod session;
pub mod traits;
pub mod types;

pub use analytics::{AnalyticsEvent, HttpAnalyticsEmitter, NullAnalyticsEmitter};
pub use debounce::DebouncedPublisher;
pub use fetcher::HttpResultFetcher;
pub use session::{FallbackPolicy, SearchSession, SearchSessionController, SessionConfig};
pub use traits::{AddressBar, AnalyticsEmitter, ResultFetcher};
pub use types::{
    BoundingBox, FetchError, FilterEdit, FilterSet, ResultPage, SessionPhase, SortOrder, ViewMode,
};
