use crate::error::{CrawlError, Result};
use crate::extract::{Origin, extract_links};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::collections::{BTreeSet, HashSet, VecDeque};
use tracing::{debug, info, warn};
use url::Url;

/// Breadth-first discovery of same-site URLs from a seed, followed by a
/// bounded-concurrency liveness sweep that prunes anything no longer
/// reachable.
pub struct Crawler {
    client: Client,
    max_pages: usize,
    liveness_concurrency: usize,
}

impl Crawler {
    pub fn new() -> Self {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent("Pagepulse/0.1 (https://github.com/trapdoorsec/pagepulse)")
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .connect_timeout(std::time::Duration::from_secs(timeout_secs.div_ceil(2)))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            max_pages: 100,
            liveness_concurrency: 10,
        }
    }

    /// Cap on how many pages get fetched during discovery, so large sites
    /// cannot turn one crawl into an unbounded walk.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_liveness_concurrency(mut self, limit: usize) -> Self {
        self.liveness_concurrency = limit.max(1);
        self
    }

    /// Walks the frontier from `seed` until it is exhausted or the page cap
    /// is hit, then returns the liveness-pruned set of discovered URLs.
    pub async fn discover(&self, seed: &str) -> Result<BTreeSet<String>> {
        let seed_url = Url::parse(seed)
            .map_err(|e| CrawlError::InvalidUrl(format!("invalid seed URL: {}", e)))?;
        let origin = Origin::from_url(&seed_url)
            .ok_or_else(|| CrawlError::InvalidUrl("seed URL has no host".to_string()))?;

        info!("Starting discovery from {}", seed);

        let mut frontier: VecDeque<String> = VecDeque::new();
        let mut visited: HashSet<String> = HashSet::new();
        frontier.push_back(seed.to_string());
        visited.insert(seed.to_string());

        let mut fetched = 0usize;
        while let Some(url) = frontier.pop_front() {
            if fetched >= self.max_pages {
                info!("Reached page cap of {}, stopping discovery", self.max_pages);
                break;
            }
            fetched += 1;

            let body = match self.fetch_html(&url).await {
                Ok(Some(body)) => body,
                Ok(None) => {
                    debug!("Skipping non-HTML page {}", url);
                    continue;
                }
                Err(e) => {
                    // One dead page must not sink the whole crawl.
                    warn!("Failed to fetch {}: {}", url, e);
                    continue;
                }
            };

            for link in extract_links(&body, &url, &origin) {
                if visited.insert(link.clone()) {
                    debug!("Discovered {}", link);
                    frontier.push_back(link);
                }
            }
        }

        info!(
            "Discovery visited {} URLs, starting liveness sweep",
            visited.len()
        );
        Ok(self.prune_dead(visited).await)
    }

    async fn fetch_html(&self, url: &str) -> Result<Option<String>> {
        let response = self.client.get(url).send().await?;

        let is_html = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("text/html"))
            .unwrap_or(false);
        if !is_html {
            return Ok(None);
        }

        Ok(Some(response.text().await?))
    }

    /// Concurrent HEAD checks over the visited set, bounded to
    /// `liveness_concurrency` in flight. A failed request or non-success
    /// status means the URL is dead and gets pruned, never an error.
    async fn prune_dead(&self, urls: HashSet<String>) -> BTreeSet<String> {
        stream::iter(urls)
            .map(|url| {
                let client = self.client.clone();
                async move {
                    let alive = match client.head(&url).send().await {
                        Ok(response) => response.status().is_success(),
                        Err(e) => {
                            debug!("Liveness check failed for {}: {}", url, e);
                            false
                        }
                    };
                    (url, alive)
                }
            })
            .buffer_unordered(self.liveness_concurrency)
            .filter_map(|(url, alive)| async move { alive.then_some(url) })
            .collect()
            .await
    }
}

impl Default for Crawler {
    fn default() -> Self {
        Self::new()
    }
}
