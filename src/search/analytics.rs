//! Out-of-band notifications of user actions. Emission never blocks the
//! session controller and never throws into it; a lost event is logged
//! and forgotten.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use crate::search::traits::AnalyticsEmitter;
use crate::search::types::{BoundingBox, ViewMode};

/// Named user-action events with fixed payload shapes
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnalyticsEvent {
    BoundsChanged {
        bbox: BoundingBox,
        zoom: u8,
        result_count: usize,
    },
    PropertySelected {
        id: String,
    },
    ViewModeChanged {
        mode: ViewMode,
    },
}

/// Posts events as JSON to an ingest endpoint
pub struct HttpAnalyticsEmitter {
    client: Client,
    endpoint: String,
}

impl HttpAnalyticsEmitter {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .context("Failed to create analytics HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl AnalyticsEmitter for HttpAnalyticsEmitter {
    async fn emit(&self, event: AnalyticsEvent) {
        match self.client.post(&self.endpoint).json(&event).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("analytics event delivered: {event:?}");
            }
            Ok(response) => {
                warn!("analytics ingest returned {}, event dropped", response.status());
            }
            Err(err) => {
                warn!("analytics delivery failed, event dropped: {err}");
            }
        }
    }
}

/// Drops every event; for tests and headless runs
pub struct NullAnalyticsEmitter;

#[async_trait]
impl AnalyticsEmitter for NullAnalyticsEmitter {
    async fn emit(&self, _event: AnalyticsEvent) {}
}
