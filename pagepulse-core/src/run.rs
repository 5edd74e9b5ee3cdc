use crate::aggregate::summarize_url;
use crate::collector::SampleCollector;
use crate::error::PulseError;
use crate::model::{RunStats, SampleSet, Summary};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{info, warn};

/// Reports (url, completed iteration, total iterations) as collection
/// advances, so a frontend can keep a spinner honest without the core
/// knowing anything about rendering.
pub type ProgressCallback = Arc<dyn Fn(&str, usize, usize) + Send + Sync>;

/// Outcome of a multi-URL measurement run. Failures are per-URL; a partial
/// run still carries every summary that completed.
#[derive(Debug)]
pub struct RunReport {
    pub summaries: Vec<Summary>,
    pub failures: Vec<(String, PulseError)>,
    pub stats: RunStats,
}

/// Drives the collector across URLs strictly one after another. The scoring
/// service is the bottleneck, so there is nothing to gain from measuring
/// URLs concurrently, and responses stay correlated to their iteration.
pub struct Orchestrator {
    collector: SampleCollector,
    iterations: usize,
    url_timeout: Option<Duration>,
    progress_callback: Option<ProgressCallback>,
}

impl Orchestrator {
    pub fn new(collector: SampleCollector, iterations: usize) -> Self {
        Self {
            collector,
            iterations: iterations.max(1),
            url_timeout: None,
            progress_callback: None,
        }
    }

    /// Bounds worst-case runtime per URL so a hung scoring service cannot
    /// block the run forever.
    pub fn with_url_timeout(mut self, limit: Duration) -> Self {
        self.url_timeout = Some(limit);
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Measures every URL in order. A failing URL is recorded and the run
    /// moves on to the next one.
    pub async fn execute(&self, urls: &[String]) -> RunReport {
        let mut report = RunReport {
            summaries: Vec::new(),
            failures: Vec::new(),
            stats: RunStats::default(),
        };

        for url in urls {
            info!("Measuring {}", url);
            let started = Instant::now();

            let outcome = match self.url_timeout {
                Some(limit) => match timeout(limit, self.collect_url(url)).await {
                    Ok(result) => result,
                    Err(_) => Err(PulseError::Timeout {
                        url: url.clone(),
                        seconds: limit.as_secs(),
                    }),
                },
                None => self.collect_url(url).await,
            };

            report.stats.add_seconds(started.elapsed().as_secs());

            match outcome {
                Ok(samples) => report.summaries.push(summarize_url(url, &samples)),
                Err(e) => {
                    warn!("Collection failed for {}: {}", url, e);
                    report.failures.push((url.clone(), e));
                }
            }
        }

        report
    }

    async fn collect_url(&self, url: &str) -> Result<SampleSet, PulseError> {
        let mut set = SampleSet::new();
        for iteration in 0..self.iterations {
            if let Some(ref callback) = self.progress_callback {
                callback(url, iteration, self.iterations);
            }
            for sample in self.collector.collect(url, iteration).await? {
                set.record(&sample);
            }
        }
        Ok(set)
    }
}
