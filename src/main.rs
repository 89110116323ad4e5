use std::env;
use std::sync::Arc;

use listing_search::search::{
    AddressBar, AnalyticsEmitter, HttpAnalyticsEmitter, HttpResultFetcher, NullAnalyticsEmitter,
    SearchSessionController, SessionConfig,
};
use tracing::{info, warn, Level};

/// Demo stand-in for a browser address bar: logs replaced queries.
struct LoggingAddressBar;

impl AddressBar for LoggingAddressBar {
    fn replace_query(&mut self, query: &str) {
        info!("address bar → ?{query}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("🏠 Listing Search - property search session");
    info!("===========================================");

    let base_url = env::var("LISTINGS_API_URL").unwrap_or_else(|_| {
        info!("LISTINGS_API_URL not set, using default: http://localhost:3000");
        "http://localhost:3000".to_string()
    });

    let analytics: Arc<dyn AnalyticsEmitter> = match env::var("ANALYTICS_INGEST_URL") {
        Ok(endpoint) => Arc::new(HttpAnalyticsEmitter::new(endpoint)?),
        Err(_) => {
            info!("ANALYTICS_INGEST_URL not set, analytics disabled");
            Arc::new(NullAnalyticsEmitter)
        }
    };

    let fetcher = Arc::new(HttpResultFetcher::new(base_url.clone())?);
    let mut session = SearchSessionController::new(
        fetcher,
        analytics,
        Box::new(LoggingAddressBar),
        SessionConfig::default(),
    );

    // Seed from a shareable query string, e.g. "priceMin=50000&rooms=2"
    let query = env::args().nth(1).unwrap_or_default();
    info!("Searching {base_url} with ?{query}");

    session.initialize_from_url(&query);
    session.settle().await;

    let state = session.session();
    if let Some(error) = &state.error {
        warn!("Search degraded: {error}");
    }

    info!("\n✅ Showing {} of {} matching listings\n", state.results.len(), state.total);

    for (i, property) in state.results.iter().enumerate() {
        println!("{}. {} ({} {})", i + 1, property.title, property.price, property.currency);
        println!(
            "   {} dorm, {} baños, {} m²",
            property.bedrooms, property.bathrooms, property.area_sqm
        );
        println!(
            "   {}{}",
            property.location.city,
            property
                .location
                .province
                .as_deref()
                .map(|p| format!(", {p}"))
                .unwrap_or_default()
        );
        println!("   ID: {}", property.id);
        println!();
    }

    // Save the page for inspection
    let json = serde_json::to_string_pretty(&state.results)?;
    tokio::fs::write("search_results.json", json).await?;
    info!("💾 Saved result page to search_results.json");

    Ok(())
}
