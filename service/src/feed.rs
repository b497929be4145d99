use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{error, info};
use reqwest::Client;

use crate::dto::espn::{ScoreboardResponse, UpstreamEvent};
use crate::error::SyncError;

pub type SharedFeed = Arc<dyn UpstreamFeed>;

/// Source of upstream events.
#[async_trait]
pub trait UpstreamFeed: Send + Sync {
    async fn fetch_events(&self) -> Result<Vec<UpstreamEvent>, SyncError>;
}

/// The ESPN scoreboard endpoint.
#[derive(Debug, Clone)]
pub struct EspnFeed {
    client: Client,
    url: String,
}

impl EspnFeed {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SyncError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("golf-leaderboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                error!("Unable to build HTTP client: {}", e);
                SyncError::Configuration("Unable to build HTTP client".to_string())
            })?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl UpstreamFeed for EspnFeed {
    async fn fetch_events(&self) -> Result<Vec<UpstreamEvent>, SyncError> {
        info!("Fetching scoreboard from {}", self.url);
        let resp = self.client.get(&self.url).send().await.map_err(|e| {
            error!("Unable to reach scoreboard feed: {}", e);
            SyncError::UpstreamUnavailable(e.to_string())
        })?;

        let status = resp.status();
        if !status.is_success() {
            error!("Scoreboard feed returned {}", status);
            return Err(SyncError::UpstreamUnavailable(format!(
                "Feed returned {status}"
            )));
        }

        let body: ScoreboardResponse = resp.json().await.map_err(|e| {
            error!("Scoreboard feed issue while converting to json: {:#?}", e);
            SyncError::UpstreamUnavailable("Feed returned an unreadable body".to_string())
        })?;
        Ok(body.events)
    }
}
