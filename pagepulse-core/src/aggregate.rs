use crate::error::{PulseError, Result};
use crate::model::{Category, CategorySummary, SampleSet, Stat, Summary};

/// Reduces a series of raw [0,1] scores to min/mean/max.
pub fn summarize(samples: &[f64], category: Category) -> Result<Stat> {
    if samples.is_empty() {
        return Err(PulseError::NoData(category));
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for &value in samples {
        min = min.min(value);
        max = max.max(value);
        sum += value;
    }

    Ok(Stat {
        min,
        mean: sum / samples.len() as f64,
        max,
    })
}

/// Score as displayed: scaled to 0-100 and rounded to the nearest integer.
pub fn display_score(value: f64) -> u32 {
    (value * 100.0).round() as u32
}

/// Three-bucket grading consumed only by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Good,
    Medium,
    Poor,
}

impl Grade {
    pub fn for_display_score(score: u32) -> Self {
        if score >= 90 {
            Grade::Good
        } else if score >= 60 {
            Grade::Medium
        } else {
            Grade::Poor
        }
    }
}

/// Builds the per-URL summary once every series is complete. Performance
/// gets the full min/mean/max treatment; the single-shot categories pass
/// their one sample through, or come out unavailable.
pub fn summarize_url(url: &str, samples: &SampleSet) -> Summary {
    let mut summary = Summary::new(url);

    for category in Category::ALL {
        let series = samples.series(category);
        let entry = match category {
            Category::Performance => match summarize(series, category) {
                Ok(stat) => CategorySummary::Sampled(stat),
                Err(_) => CategorySummary::Unavailable,
            },
            _ => match series.first() {
                Some(&value) => CategorySummary::Single(value),
                None => CategorySummary::Unavailable,
            },
        };
        summary.set(category, entry);
    }

    summary.performance_samples = samples.series(Category::Performance).to_vec();
    summary
}
