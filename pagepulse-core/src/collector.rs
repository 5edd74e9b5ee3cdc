use crate::error::{PulseError, Result};
use crate::model::{CategorySelection, MetricSample, Strategy};
use crate::score::ScoreClient;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Retry budget for one measurement iteration.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            backoff: Duration::from_secs(10),
        }
    }
}

/// Minimum wall-clock duration for a measurement to be trusted. The scoring
/// service sometimes short-circuits with cached, incomplete results that
/// come back in a couple of seconds; those get discarded and the iteration
/// retried.
pub const DEFAULT_MIN_DURATION: Duration = Duration::from_secs(5);

/// Issues repeated measurement requests for one URL at a time, retrying
/// until a response is trusted or the retry budget runs out.
pub struct SampleCollector {
    client: ScoreClient,
    strategy: Strategy,
    policy: RetryPolicy,
    min_duration: Duration,
}

impl SampleCollector {
    pub fn new(client: ScoreClient, strategy: Strategy) -> Self {
        Self {
            client,
            strategy,
            policy: RetryPolicy::default(),
            min_duration: DEFAULT_MIN_DURATION,
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_min_duration(mut self, min_duration: Duration) -> Self {
        self.min_duration = min_duration;
        self
    }

    /// Runs one measurement iteration for `url`. Iteration 0 requests every
    /// category; later iterations resample performance only.
    pub async fn collect(&self, url: &str, iteration: usize) -> Result<Vec<MetricSample>> {
        let selection = CategorySelection::for_iteration(iteration);
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            let start = Instant::now();

            let report = match self
                .client
                .run(url, self.strategy, selection.categories())
                .await
            {
                Ok(report) => report,
                Err(e) => {
                    warn!("Measurement attempt {} for {} failed: {}", attempts, url, e);
                    self.next_attempt(url, attempts).await?;
                    continue;
                }
            };

            let elapsed = start.elapsed();
            if elapsed < self.min_duration {
                warn!(
                    "Measurement for {} returned in {:.1}s, under the {:.0}s trust threshold; discarding",
                    url,
                    elapsed.as_secs_f64(),
                    self.min_duration.as_secs_f64()
                );
                self.next_attempt(url, attempts).await?;
                continue;
            }

            debug!(
                "Iteration {} for {} took {:.1}s",
                iteration,
                url,
                elapsed.as_secs_f64()
            );

            let samples = selection
                .categories()
                .iter()
                .map(|&category| MetricSample {
                    url: url.to_string(),
                    category,
                    iteration,
                    score: report.score(category),
                })
                .collect();
            return Ok(samples);
        }
    }

    /// Backs off before the next attempt, or fails once the budget is spent.
    async fn next_attempt(&self, url: &str, attempts: u32) -> Result<()> {
        if attempts >= self.policy.max_attempts {
            return Err(PulseError::RetriesExhausted {
                url: url.to_string(),
                attempts,
            });
        }
        tokio::time::sleep(self.policy.backoff).await;
        Ok(())
    }
}
