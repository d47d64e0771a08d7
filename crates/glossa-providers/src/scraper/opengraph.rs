//! OpenGraph metadata scraper
//!
//! Fetches a page and reads its `og:` meta tags with regular expressions.
//! Good enough for the common media hosts; sites needing real DOM work get
//! their own plugin scraper, which outscores this one via URL patterns.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use parking_lot::RwLock;
use regex::Regex;
use reqwest::Client;

use glossa_domain::error::{Error, Result};
use glossa_domain::ports::{MetadataScraper, ProviderContext, ProviderLifecycle, ScrapeRequest};
use glossa_domain::value_objects::MediaMetadata;
use glossa_registry::{ScraperDescriptor, ScraperRegistration};

use crate::constants::USER_AGENT;

struct Extractors {
    client: Client,
    meta_tag: Regex,
    title_tag: Regex,
}

/// Scrapes `og:` tags and the `<title>` element from a fetched page
pub struct OpenGraphScraper {
    timeout: Duration,
    state: RwLock<Option<Arc<Extractors>>>,
}

impl OpenGraphScraper {
    /// Create a scraper with the given request timeout
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            state: RwLock::new(None),
        }
    }

    fn extractors(&self) -> Result<Arc<Extractors>> {
        self.state
            .read()
            .clone()
            .ok_or_else(|| Error::configuration("scraper used before initialization"))
    }

    fn parse(&self, extractors: &Extractors, html: &str) -> MediaMetadata {
        let mut metadata = MediaMetadata::default();
        for captures in extractors.meta_tag.captures_iter(html) {
            let (Some(property), Some(content)) = (captures.name("p"), captures.name("c")) else {
                continue;
            };
            let content = unescape(content.as_str());
            match property.as_str() {
                "og:title" => metadata.title = Some(content),
                "og:description" => metadata.description = Some(content),
                "og:image" => metadata.thumbnail_url = Some(content),
                "og:video:duration" | "video:duration" => {
                    metadata.duration_secs = content.parse().ok();
                }
                "og:video:tag" | "video:tag" => metadata.tags.push(content),
                "article:published_time" => {
                    metadata.published_at = DateTime::parse_from_rfc3339(&content)
                        .ok()
                        .map(|t| t.to_utc());
                }
                _ => {}
            }
        }
        if metadata.title.is_none() {
            metadata.title = extractors
                .title_tag
                .captures(html)
                .and_then(|c| c.get(1))
                .map(|m| unescape(m.as_str().trim()));
        }
        metadata
    }
}

#[async_trait]
impl ProviderLifecycle for OpenGraphScraper {
    async fn initialize(&self, _ctx: &ProviderContext) -> Result<()> {
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::network("failed to build HTTP client", e))?;
        let meta_tag = compile(
            r#"(?is)<meta\s[^>]*?(?:property|name)=["'](?<p>[a-z:_-]+)["'][^>]*?content=["'](?<c>[^"']*)["']"#,
        )?;
        let title_tag = compile(r"(?is)<title[^>]*>([^<]*)</title>")?;
        *self.state.write() = Some(Arc::new(Extractors {
            client,
            meta_tag,
            title_tag,
        }));
        Ok(())
    }
}

#[async_trait]
impl MetadataScraper for OpenGraphScraper {
    async fn scrape(
        &self,
        request: &ScrapeRequest,
        _ctx: &ProviderContext,
    ) -> Result<MediaMetadata> {
        let url = request
            .source
            .url()
            .ok_or_else(|| Error::invalid_input("opengraph scraper needs a URL"))?;
        let extractors = self.extractors()?;
        let response = extractors
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::network(format!("request to '{url}' failed"), e))?;
        if !response.status().is_success() {
            return Err(Error::Network {
                message: format!("'{url}' answered {}", response.status()),
                source: None,
            });
        }
        let html = response
            .text()
            .await
            .map_err(|e| Error::network(format!("failed to read body of '{url}'"), e))?;
        Ok(self.parse(&extractors, &html))
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::Configuration {
        message: "builtin scraper pattern failed to compile".to_string(),
        source: Some(Box::new(e)),
    })
}

fn unescape(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

/// Build the stateful OpenGraph registration
pub fn registration(timeout_secs: u64) -> ScraperRegistration {
    let descriptor = ScraperDescriptor::new("opengraph")
        .with_name("OpenGraph")
        .with_description("og: meta tags from any fetched page")
        .with_mime_type("text/html")
        .with_file_extension("html")
        .for_remote_urls();
    ScraperRegistration::factory(descriptor, move |_descriptor| {
        Ok(Arc::new(OpenGraphScraper::new(Duration::from_secs(
            timeout_secs,
        ))))
    })
}
