//! Polite scraper for the configured job boards
//!
//! Each source is checked against its robots.txt before anything else is
//! requested. Listing extraction itself is not implemented yet, so a run
//! only reports which sources would have been crawled.

use std::time::Duration;

use async_trait::async_trait;
use jobfinder_core::config::ScraperSection;
use reqwest::StatusCode;

use super::robots::RobotsTxt;
use super::{ScrapeBatch, Scraper};

/// One job board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeSource {
    pub name: String,
    /// Scheme and host, no trailing slash
    pub base_url: String,
    /// Path and query of the search page
    pub search_path: String,
}

impl ScrapeSource {
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        search_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            search_path: search_path.into(),
        }
    }

    pub fn robots_url(&self) -> String {
        format!("{}/robots.txt", self.base_url)
    }

    /// Australian boards searched for Sydney software internships
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(
                "GradConnection",
                "https://au.gradconnection.com",
                "/employers/search/?keywords=software+intern&location=Sydney",
            ),
            Self::new(
                "Seek",
                "https://www.seek.com.au",
                "/software-intern-jobs/in-All-Sydney-NSW",
            ),
            Self::new(
                "Indeed",
                "https://au.indeed.com",
                "/jobs?q=software+intern&l=Sydney+NSW",
            ),
        ]
    }
}

#[derive(Debug)]
enum RobotsVerdict {
    Allowed { crawl_delay: Option<Duration> },
    Disallowed,
    Unavailable(String),
}

/// Scraper that consults robots.txt and rate-limits between sources
#[derive(Debug, Clone)]
pub struct RobotsAwareScraper {
    client: reqwest::Client,
    user_agent: String,
    delay: Duration,
    sources: Vec<ScrapeSource>,
}

impl RobotsAwareScraper {
    pub fn new(settings: &ScraperSection, sources: Vec<ScrapeSource>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(Duration::from_secs(settings.robots_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            user_agent: settings.user_agent.clone(),
            delay: Duration::from_millis(settings.request_delay_ms),
            sources,
        })
    }

    /// Scraper over [`ScrapeSource::defaults`]
    pub fn with_default_sources(settings: &ScraperSection) -> Result<Self, reqwest::Error> {
        Self::new(settings, ScrapeSource::defaults())
    }

    pub fn sources(&self) -> &[ScrapeSource] {
        &self.sources
    }

    async fn check_robots(&self, source: &ScrapeSource) -> RobotsVerdict {
        let response = match self.client.get(source.robots_url()).send().await {
            Ok(response) => response,
            Err(e) => return RobotsVerdict::Unavailable(e.to_string()),
        };

        let status = response.status();
        // A missing robots.txt places no restrictions
        if status.is_client_error() && status != StatusCode::TOO_MANY_REQUESTS {
            return RobotsVerdict::Allowed { crawl_delay: None };
        }
        if !status.is_success() {
            return RobotsVerdict::Unavailable(format!("robots.txt returned {status}"));
        }

        match response.text().await {
            Ok(body) => {
                let robots = RobotsTxt::parse(&body);
                if !robots.sitemaps().is_empty() {
                    tracing::debug!(source = %source.name, sitemaps = ?robots.sitemaps(), "robots.txt lists sitemaps");
                }
                if robots.is_allowed(&self.user_agent, &source.search_path) {
                    RobotsVerdict::Allowed {
                        crawl_delay: robots.crawl_delay(&self.user_agent),
                    }
                } else {
                    RobotsVerdict::Disallowed
                }
            }
            Err(e) => RobotsVerdict::Unavailable(e.to_string()),
        }
    }
}

#[async_trait]
impl Scraper for RobotsAwareScraper {
    async fn scrape(&self) -> ScrapeBatch {
        let mut batch = ScrapeBatch::default();

        for (i, source) in self.sources.iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            tracing::info!(source = %source.name, "checking robots.txt");
            match self.check_robots(source).await {
                RobotsVerdict::Disallowed => {
                    tracing::warn!(source = %source.name, path = %source.search_path, "scraping disallowed by robots.txt");
                    batch
                        .errors
                        .push(format!("{}: Scraping disallowed by robots.txt", source.name));
                    continue;
                }
                RobotsVerdict::Unavailable(reason) => {
                    tracing::warn!(source = %source.name, %reason, "could not fetch robots.txt, proceeding with caution");
                }
                RobotsVerdict::Allowed { crawl_delay } => {
                    tracing::debug!(source = %source.name, ?crawl_delay, "robots.txt permits search page");
                }
            }

            tracing::info!(source = %source.name, "listing extraction not implemented, no postings fetched");
        }

        batch
    }
}
