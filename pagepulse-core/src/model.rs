use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// One scored dimension of a measured page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Performance,
    Accessibility,
    BestPractices,
    Pwa,
    Seo,
}

impl Category {
    /// Every category, in the order the scoring service expects request
    /// parameters.
    pub const ALL: [Category; 5] = [
        Category::Accessibility,
        Category::BestPractices,
        Category::Performance,
        Category::Pwa,
        Category::Seo,
    ];

    /// Wire name used in scoring requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Performance => "performance",
            Category::Accessibility => "accessibility",
            Category::BestPractices => "best-practices",
            Category::Pwa => "pwa",
            Category::Seo => "seo",
        }
    }

    /// Human label used in summary blocks.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Performance => "Performance",
            Category::Accessibility => "Accessibility",
            Category::BestPractices => "Best Practices",
            Category::Pwa => "PWA",
            Category::Seo => "SEO",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Measurement strategy forwarded to the scoring service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    #[default]
    Mobile,
    Desktop,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Mobile => "mobile",
            Strategy::Desktop => "desktop",
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mobile" => Ok(Strategy::Mobile),
            "desktop" => Ok(Strategy::Desktop),
            other => Err(format!("unknown device strategy '{}'", other)),
        }
    }
}

/// Which categories a measurement iteration requests.
///
/// The four non-performance categories are assumed stable across repeated
/// runs, so they are sampled once on the first iteration and performance
/// alone is resampled afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySelection {
    Full,
    PerformanceOnly,
}

impl CategorySelection {
    pub fn for_iteration(iteration: usize) -> Self {
        if iteration == 0 {
            CategorySelection::Full
        } else {
            CategorySelection::PerformanceOnly
        }
    }

    pub fn categories(&self) -> &'static [Category] {
        match self {
            CategorySelection::Full => &Category::ALL,
            CategorySelection::PerformanceOnly => &[Category::Performance],
        }
    }
}

/// One scalar measurement for a (URL, category, iteration) triple.
/// `score` is `None` when the service omitted the value; unavailable is a
/// distinct state, never zero.
#[derive(Debug, Clone)]
pub struct MetricSample {
    pub url: String,
    pub category: Category,
    pub iteration: usize,
    pub score: Option<f64>,
}

/// Per-URL accumulation of samples into per-category series.
#[derive(Debug, Default)]
pub struct SampleSet {
    series: BTreeMap<Category, Vec<f64>>,
}

impl SampleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, sample: &MetricSample) {
        match sample.score {
            Some(score) => self.series.entry(sample.category).or_default().push(score),
            None => debug!(
                "No {} score for {} (iteration {})",
                sample.category, sample.url, sample.iteration
            ),
        }
    }

    pub fn series(&self, category: Category) -> &[f64] {
        self.series
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Min/mean/max over one category's raw [0,1] samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stat {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CategorySummary {
    /// Resampled every iteration.
    Sampled(Stat),
    /// Captured once on the first iteration.
    Single(f64),
    /// The service never returned a score.
    Unavailable,
}

/// Immutable per-URL reduction of all series, presentation-agnostic.
#[derive(Debug, Clone)]
pub struct Summary {
    pub url: String,
    categories: BTreeMap<Category, CategorySummary>,
    /// Raw performance samples, kept for the debug dump.
    pub performance_samples: Vec<f64>,
}

impl Summary {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            categories: BTreeMap::new(),
            performance_samples: Vec::new(),
        }
    }

    pub fn set(&mut self, category: Category, entry: CategorySummary) {
        self.categories.insert(category, entry);
    }

    pub fn category(&self, category: Category) -> CategorySummary {
        self.categories
            .get(&category)
            .copied()
            .unwrap_or(CategorySummary::Unavailable)
    }
}

/// Process-wide elapsed-time accumulator across all measured URLs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub total_seconds: u64,
}

impl RunStats {
    pub fn add_seconds(&mut self, seconds: u64) {
        self.total_seconds += seconds;
    }
}
