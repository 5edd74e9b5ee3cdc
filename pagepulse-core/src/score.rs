use crate::error::{PulseError, Result};
use crate::model::{Category, Strategy};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Public v5 endpoint of the scoring service.
pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";

/// Client for the remote page-scoring service. The service is treated as an
/// opaque collaborator: one GET per measurement, scores come back as floats
/// in [0,1] or not at all.
pub struct ScoreClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl ScoreClient {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Point the client at a different endpoint (used by tests to target a
    /// mock server).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        let client = Client::builder()
            .user_agent("Pagepulse/0.1 (https://github.com/trapdoorsec/pagepulse)")
            // A real measurement takes the service well over a minute at
            // times; this only guards against a hung connection.
            .timeout(Duration::from_secs(180))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: endpoint.into(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Requests one measurement of `url` for the given categories.
    pub async fn run(
        &self,
        url: &str,
        strategy: Strategy,
        categories: &[Category],
    ) -> Result<ScoreReport> {
        let mut query: Vec<(&str, &str)> = vec![("url", url), ("strategy", strategy.as_str())];
        for category in categories {
            query.push(("category", category.as_str()));
        }
        if let Some(ref key) = self.api_key {
            query.push(("key", key));
        }

        debug!("Requesting {} categories for {}", categories.len(), url);
        let response = self.client.get(&self.endpoint).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PulseError::Api {
                status: status.as_u16(),
            });
        }

        Ok(response.json::<ScoreReport>().await?)
    }
}

impl Default for ScoreClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    #[serde(default)]
    lighthouse_result: Option<LighthouseResult>,
}

#[derive(Debug, Clone, Deserialize)]
struct LighthouseResult {
    #[serde(default)]
    categories: CategoryScores,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CategoryScores {
    #[serde(default)]
    performance: Option<CategoryScore>,
    #[serde(default)]
    accessibility: Option<CategoryScore>,
    #[serde(rename = "best-practices", default)]
    best_practices: Option<CategoryScore>,
    #[serde(default)]
    pwa: Option<CategoryScore>,
    #[serde(default)]
    seo: Option<CategoryScore>,
}

#[derive(Debug, Clone, Deserialize)]
struct CategoryScore {
    #[serde(default)]
    score: Option<f64>,
}

impl ScoreReport {
    /// Score for one category; `None` when the service omitted it or sent
    /// an explicit null.
    pub fn score(&self, category: Category) -> Option<f64> {
        let categories = &self.lighthouse_result.as_ref()?.categories;
        let slot = match category {
            Category::Performance => &categories.performance,
            Category::Accessibility => &categories.accessibility,
            Category::BestPractices => &categories.best_practices,
            Category::Pwa => &categories.pwa,
            Category::Seo => &categories.seo,
        };
        slot.as_ref()?.score
    }
}
