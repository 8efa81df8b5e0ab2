pub mod cleaner;
pub mod error;
pub mod http_client;
pub mod markup;
pub mod parsers;

use crate::config::ScraperConfig;
use async_trait::async_trait;
use tracing::info;

pub use self::error::{Result, ScrapeError};
use self::http_client::HttpClient;

// ── Source trait ──────────────────────────────────────────────────────────────

/// Swappable document loader: yields the raw schedule markup or fails.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch_document(&self) -> Result<String>;
}

// ── MyAnimeList schedule page ─────────────────────────────────────────────────

pub struct MalScheduleSource {
    client: HttpClient,
    schedule_url: String,
}

impl MalScheduleSource {
    pub fn new(config: &ScraperConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: HttpClient::new(config)?,
            schedule_url: config.schedule_url.clone(),
        })
    }
}

#[async_trait]
impl DocumentSource for MalScheduleSource {
    async fn fetch_document(&self) -> Result<String> {
        info!("Fetching schedule page ({})", self.schedule_url);
        let html = self.client.get_text(&self.schedule_url).await?;
        info!("Received {} bytes", html.len());
        Ok(html)
    }
}
