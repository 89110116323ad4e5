use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::models::Property;
use crate::search::codec;
use crate::search::traits::ResultFetcher;
use crate::search::types::{FetchError, FilterSet, ResultPage};

/// Read client for the marketplace's property listing endpoint
pub struct HttpResultFetcher {
    client: Client,
    base_url: String,
}

impl HttpResultFetcher {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[derive(Deserialize)]
struct ListingsResponse {
    properties: Vec<Property>,
    total: u64,
}

#[async_trait]
impl ResultFetcher for HttpResultFetcher {
    async fn fetch(
        &self,
        filters: &FilterSet,
        page: u32,
        limit: u32,
    ) -> Result<ResultPage, FetchError> {
        let mut query = codec::encode(filters);
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(&format!("page={page}&limit={limit}"));

        let url = format!("{}/api/properties?{}", self.base_url, query);
        debug!("Fetching listings: {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body: ListingsResponse = response
            .json()
            .await
            .map_err(|err| FetchError::Decode(err.to_string()))?;

        debug!("Received {} of {} listings", body.properties.len(), body.total);

        Ok(ResultPage {
            items: body.properties,
            total: body.total,
        })
    }
}
