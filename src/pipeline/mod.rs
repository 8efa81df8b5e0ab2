//! Pipeline orchestrator: document source → extraction → aggregated schedule.
//!
//! Every `run()` fetches a fresh document; nothing is cached between runs.
//! A failed fetch fails the whole run, no partial schedule is returned.

use crate::config::ScraperConfig;
use crate::models::Schedule;
use crate::scraper::parsers::{extract_schedule, ExtractOptions};
use crate::scraper::{DocumentSource, MalScheduleSource, Result};
use crate::utils::StageTimer;
use std::sync::Arc;
use tracing::{debug, error, info};

pub struct Pipeline {
    source: Arc<dyn DocumentSource>,
    options: ExtractOptions,
}

impl Pipeline {
    pub fn new(source: Arc<dyn DocumentSource>, options: ExtractOptions) -> Self {
        Self { source, options }
    }

    /// Pipeline backed by the live schedule page.
    pub fn from_config(config: &ScraperConfig) -> anyhow::Result<Self> {
        let source = MalScheduleSource::new(config)?;
        Ok(Self::new(
            Arc::new(source),
            ExtractOptions::new(config.site_origin.clone()),
        ))
    }

    pub async fn run(&self) -> Result<Schedule> {
        let mut timer = StageTimer::start("Schedule extraction");

        let html = self.source.fetch_document().await.map_err(|e| {
            error!("Document fetch failed: {}", e);
            e
        })?;
        timer.lap("fetch");

        let schedule = extract_schedule(&html, &self.options);
        timer.lap("extract");
        for group in &schedule.groups {
            debug!("{}: {} entries", group.label, group.records.len());
        }
        info!(
            "Extracted {} entries across {} days",
            schedule.total,
            schedule.groups.len()
        );

        Ok(schedule)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::scraper::ScrapeError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub(crate) const FIXTURE: &str = include_str!("../scraper/fixtures/schedule.html");

    /// In-memory document source; counts fetches.
    pub(crate) struct StubSource {
        body: std::result::Result<String, u16>,
        pub calls: AtomicUsize,
    }

    impl StubSource {
        pub(crate) fn ok(body: &str) -> Self {
            Self {
                body: Ok(body.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn failing(status: u16) -> Self {
            Self {
                body: Err(status),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl DocumentSource for StubSource {
        async fn fetch_document(&self) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.body {
                Ok(body) => Ok(body.clone()),
                Err(status) => Err(ScrapeError::Status {
                    status: *status,
                    url: "https://example.test/schedule".to_string(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_run_extracts_schedule() {
        let pipeline = Pipeline::new(
            Arc::new(StubSource::ok(FIXTURE)),
            ExtractOptions::new("https://myanimelist.net"),
        );

        let schedule = pipeline.run().await.unwrap();
        assert_eq!(schedule.total, 4);
        assert_eq!(schedule.groups[0].label, "Monday");
    }

    #[test]
    fn test_failed_fetch_yields_no_groups() {
        let pipeline = Pipeline::new(
            Arc::new(StubSource::failing(503)),
            ExtractOptions::new("https://myanimelist.net"),
        );

        let err = tokio_test::block_on(pipeline.run()).unwrap_err();
        assert!(matches!(err, ScrapeError::Status { status: 503, .. }));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_every_run_refetches() {
        let source = Arc::new(StubSource::ok(FIXTURE));
        let pipeline = Pipeline::new(
            source.clone(),
            ExtractOptions::new("https://myanimelist.net"),
        );

        pipeline.run().await.unwrap();
        pipeline.run().await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }
}
