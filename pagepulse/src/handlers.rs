use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use pagepulse_core::collector::{RetryPolicy, SampleCollector};
use pagepulse_core::model::Strategy;
use pagepulse_core::report::{append_run_log, format_duration, render_summary};
use pagepulse_core::run::Orchestrator;
use pagepulse_core::score::ScoreClient;
use pagepulse_crawler::Crawler;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Parse a single target as a URL, trying to add https:// if needed
pub fn parse_url_line(line: &str) -> Option<String> {
    if Url::parse(line).is_ok() {
        return Some(line.to_string());
    }

    let with_scheme = format!("https://{}", line);
    if Url::parse(&with_scheme).is_ok() {
        return Some(with_scheme);
    }

    None
}

/// Batch mode is for CI pipelines: no spinner, no color, results appended to
/// the run log instead of printed.
pub fn is_batch_mode() -> bool {
    std::env::var_os("CI").is_some_and(|v| !v.is_empty())
}

fn measurement_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg} {elapsed_precise}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub async fn handle_measure(args: &ArgMatches, targets: &[String]) -> anyhow::Result<()> {
    let mut urls = Vec::new();
    for target in targets {
        match parse_url_line(target) {
            Some(url) => urls.push(url),
            None => anyhow::bail!("'{}' is not a valid URL", target),
        }
    }

    let count = *args.get_one::<usize>("count").unwrap();
    let strategy = Strategy::from_str(args.get_one::<String>("device").unwrap())
        .map_err(anyhow::Error::msg)?;
    let retries = *args.get_one::<u32>("retries").unwrap();
    let backoff = *args.get_one::<u64>("backoff").unwrap();
    let url_timeout = args.get_one::<u64>("timeout").copied();
    let run_hash = args.get_one::<String>("hash").cloned();
    let quiet = args.get_flag("quiet");
    let debug = args.get_flag("debug");
    let batch = is_batch_mode();

    let mut client = ScoreClient::new();
    if let Some(key) = args
        .get_one::<String>("api-key")
        .cloned()
        .or_else(|| std::env::var("PAGEPULSE_API_KEY").ok())
    {
        client = client.with_api_key(key);
    }

    let collector = SampleCollector::new(client, strategy).with_retry_policy(RetryPolicy {
        max_attempts: retries,
        backoff: Duration::from_secs(backoff),
    });

    let mut orchestrator = Orchestrator::new(collector, count);
    if let Some(seconds) = url_timeout {
        orchestrator = orchestrator.with_url_timeout(Duration::from_secs(seconds));
    }

    tracing::info!(
        "Measuring {} URL(s), {} iteration(s) each, strategy {}",
        urls.len(),
        count,
        strategy.as_str()
    );

    let spinner = if !batch && !quiet {
        Some(Arc::new(measurement_spinner()))
    } else {
        None
    };

    if let Some(ref pb) = spinner {
        let pb_clone = pb.clone();
        orchestrator = orchestrator.with_progress_callback(Arc::new(
            move |url: &str, iteration: usize, total: usize| {
                pb_clone.set_message(format!("[{}/{}] {}", iteration + 1, total, url));
            },
        ));
    }

    let report = orchestrator.execute(&urls).await;

    if let Some(ref pb) = spinner {
        pb.finish_and_clear();
    }

    if batch {
        let output = args.get_one::<String>("output").unwrap();
        let path = PathBuf::from(shellexpand::tilde(output).as_ref());
        append_run_log(&path, run_hash.as_deref(), &report.summaries, report.stats)?;
        for (url, error) in &report.failures {
            eprintln!("Collection failed for {}: {}", url, error);
        }
        println!(
            "Appended {} result(s) to {}",
            report.summaries.len(),
            path.display()
        );
    } else {
        println!();
        for summary in &report.summaries {
            println!(
                "URL: {}\n{}",
                summary.url.blue(),
                render_summary(summary, true, debug)
            );
        }
        for (url, error) in &report.failures {
            eprintln!("{} {}: {}", "✗".red(), url, error);
        }
        println!(
            "Total duration: {}",
            format_duration(report.stats.total_seconds)
        );
        println!();
    }

    // Per-URL failures were reported above; they never abort the run.
    Ok(())
}

pub async fn handle_index(args: &ArgMatches, seed: &str) -> anyhow::Result<()> {
    let seed_url = parse_url_line(seed)
        .ok_or_else(|| anyhow::anyhow!("'{}' is not a valid seed URL", seed))?;
    let max_pages = *args.get_one::<usize>("max-pages").unwrap();
    let concurrency = *args.get_one::<usize>("liveness-concurrency").unwrap();
    let quiet = args.get_flag("quiet");

    let spinner = if !quiet && !is_batch_mode() {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Discovering pages on {}", seed_url));
        Some(pb)
    } else {
        None
    };

    let crawler = Crawler::new()
        .with_max_pages(max_pages)
        .with_liveness_concurrency(concurrency);
    let discovered = crawler.discover(&seed_url).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let discovered = discovered?;
    println!("{} live page(s) found:", discovered.len());
    for url in &discovered {
        println!("{}", url);
    }

    Ok(())
}
