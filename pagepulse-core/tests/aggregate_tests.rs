// Tests for series aggregation and grading

use pagepulse_core::PulseError;
use pagepulse_core::aggregate::{Grade, display_score, summarize, summarize_url};
use pagepulse_core::model::{Category, CategorySummary, MetricSample, SampleSet};

fn sample(category: Category, iteration: usize, score: Option<f64>) -> MetricSample {
    MetricSample {
        url: "https://example.com/".to_string(),
        category,
        iteration,
        score,
    }
}

// ============================================================================
// Series Reduction Tests
// ============================================================================

#[test]
fn test_summarize_orders_min_mean_max() {
    let stat = summarize(&[0.3, 0.9, 0.5, 0.7], Category::Performance).unwrap();
    assert!(stat.min <= stat.mean);
    assert!(stat.mean <= stat.max);
    assert_eq!(stat.min, 0.3);
    assert_eq!(stat.max, 0.9);
}

#[test]
fn test_summarize_mean_is_exact_sum_over_len() {
    let samples = [0.72, 0.91, 0.85];
    let stat = summarize(&samples, Category::Performance).unwrap();
    assert_eq!(stat.mean, (0.72 + 0.91 + 0.85) / 3.0);
}

#[test]
fn test_summarize_single_sample() {
    let stat = summarize(&[0.42], Category::Performance).unwrap();
    assert_eq!(stat.min, 0.42);
    assert_eq!(stat.mean, 0.42);
    assert_eq!(stat.max, 0.42);
}

#[test]
fn test_empty_series_is_no_data_not_division_by_zero() {
    let result = summarize(&[], Category::Performance);
    assert!(matches!(result, Err(PulseError::NoData(Category::Performance))));
}

#[test]
fn test_reference_series_scales_and_rounds() {
    // 0.72/0.91/0.85 must display as 72, 83 (rounded from 82.67) and 91.
    let stat = summarize(&[0.72, 0.91, 0.85], Category::Performance).unwrap();
    assert_eq!(display_score(stat.min), 72);
    assert_eq!(display_score(stat.mean), 83);
    assert_eq!(display_score(stat.max), 91);
}

#[test]
fn test_display_score_rounds_to_nearest() {
    assert_eq!(display_score(0.894), 89);
    assert_eq!(display_score(0.895), 90);
    assert_eq!(display_score(1.0), 100);
    assert_eq!(display_score(0.0), 0);
}

// ============================================================================
// Grading Tests
// ============================================================================

#[test]
fn test_grade_buckets() {
    assert_eq!(Grade::for_display_score(100), Grade::Good);
    assert_eq!(Grade::for_display_score(90), Grade::Good);
    assert_eq!(Grade::for_display_score(89), Grade::Medium);
    assert_eq!(Grade::for_display_score(60), Grade::Medium);
    assert_eq!(Grade::for_display_score(59), Grade::Poor);
    assert_eq!(Grade::for_display_score(0), Grade::Poor);
}

// ============================================================================
// Per-URL Summary Tests
// ============================================================================

#[test]
fn test_summarize_url_maps_categories() {
    let mut set = SampleSet::new();
    for (i, score) in [0.72, 0.91, 0.85].into_iter().enumerate() {
        set.record(&sample(Category::Performance, i, Some(score)));
    }
    set.record(&sample(Category::Accessibility, 0, Some(0.98)));
    set.record(&sample(Category::Seo, 0, Some(0.8)));
    // PWA score came back null.
    set.record(&sample(Category::Pwa, 0, None));

    let summary = summarize_url("https://example.com/", &set);

    match summary.category(Category::Performance) {
        CategorySummary::Sampled(stat) => {
            assert_eq!(display_score(stat.min), 72);
            assert_eq!(display_score(stat.mean), 83);
            assert_eq!(display_score(stat.max), 91);
        }
        other => panic!("expected sampled performance, got {:?}", other),
    }
    assert_eq!(
        summary.category(Category::Accessibility),
        CategorySummary::Single(0.98)
    );
    assert_eq!(summary.category(Category::Pwa), CategorySummary::Unavailable);
    assert_eq!(
        summary.category(Category::BestPractices),
        CategorySummary::Unavailable
    );
    assert_eq!(summary.performance_samples, vec![0.72, 0.91, 0.85]);
}
