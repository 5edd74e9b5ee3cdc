// Tests for multi-URL orchestration

use pagepulse_core::collector::{RetryPolicy, SampleCollector};
use pagepulse_core::model::{Category, CategorySummary, Strategy};
use pagepulse_core::{Orchestrator, PulseError, ScoreClient};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn score_body(performance: f64) -> serde_json::Value {
    json!({
        "lighthouseResult": {
            "categories": {
                "performance": { "score": performance },
                "accessibility": { "score": 0.9 },
                "best-practices": { "score": 0.9 },
                "pwa": { "score": 0.5 },
                "seo": { "score": 0.9 }
            }
        }
    })
}

fn collector(server: &MockServer, max_attempts: u32) -> SampleCollector {
    let client = ScoreClient::with_endpoint(format!("{}/runPagespeed", server.uri()));
    SampleCollector::new(client, Strategy::Mobile)
        .with_retry_policy(RetryPolicy {
            max_attempts,
            backoff: Duration::ZERO,
        })
        .with_min_duration(Duration::ZERO)
}

#[tokio::test]
async fn test_run_summarizes_every_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(score_body(0.8)))
        .mount(&server)
        .await;

    let urls = vec![
        "https://one.example/".to_string(),
        "https://two.example/".to_string(),
    ];
    let report = Orchestrator::new(collector(&server, 3), 3)
        .execute(&urls)
        .await;

    assert_eq!(report.summaries.len(), 2);
    assert!(report.failures.is_empty());
    for summary in &report.summaries {
        assert_eq!(summary.performance_samples.len(), 3);
        assert!(matches!(
            summary.category(Category::Performance),
            CategorySummary::Sampled(_)
        ));
    }
}

#[tokio::test]
async fn test_one_failing_url_does_not_abort_the_run() {
    let server = MockServer::start().await;
    // The first URL always errors; the second one measures fine.
    Mock::given(method("GET"))
        .and(query_param("url", "https://bad.example/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(score_body(0.7)))
        .mount(&server)
        .await;

    let urls = vec![
        "https://bad.example/".to_string(),
        "https://good.example/".to_string(),
    ];
    let report = Orchestrator::new(collector(&server, 2), 2)
        .execute(&urls)
        .await;

    assert_eq!(report.summaries.len(), 1);
    assert_eq!(report.summaries[0].url, "https://good.example/");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, "https://bad.example/");
    assert!(matches!(
        report.failures[0].1,
        PulseError::RetriesExhausted { .. }
    ));
}

#[tokio::test]
async fn test_url_timeout_bounds_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(score_body(0.7))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let urls = vec!["https://slow.example/".to_string()];
    let report = Orchestrator::new(collector(&server, 3), 5)
        .with_url_timeout(Duration::from_millis(100))
        .execute(&urls)
        .await;

    assert!(report.summaries.is_empty());
    assert!(matches!(report.failures[0].1, PulseError::Timeout { .. }));
}

#[tokio::test]
async fn test_progress_callback_reports_each_iteration() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(score_body(0.8)))
        .mount(&server)
        .await;

    let ticks = Arc::new(AtomicUsize::new(0));
    let ticks_clone = ticks.clone();

    let urls = vec!["https://one.example/".to_string()];
    let report = Orchestrator::new(collector(&server, 3), 4)
        .with_progress_callback(Arc::new(move |_url: &str, _iteration: usize, total: usize| {
            assert_eq!(total, 4);
            ticks_clone.fetch_add(1, Ordering::Relaxed);
        }))
        .execute(&urls)
        .await;

    assert_eq!(report.summaries.len(), 1);
    assert_eq!(ticks.load(Ordering::Relaxed), 4);
}
