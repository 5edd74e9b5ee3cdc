use crate::aggregate::{Grade, display_score};
use crate::model::{Category, CategorySummary, RunStats, Summary};
use colored::Colorize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Placeholder rendered when a category score was unavailable. Rendering a
/// zero instead would look like a real (terrible) score.
pub const UNAVAILABLE: &str = "n/a";

/// Per-URL block rows, performance first like the scoring service's own UI.
const DISPLAY_ORDER: [Category; 5] = [
    Category::Performance,
    Category::Accessibility,
    Category::BestPractices,
    Category::Pwa,
    Category::Seo,
];

/// Formats whole seconds as zero-padded hh:mm:ss.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds / 60) % 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

fn score_cell(score: u32, use_color: bool) -> String {
    let text = format!("{:>3}", score);
    if !use_color {
        return text;
    }
    match Grade::for_display_score(score) {
        Grade::Good => text.green().to_string(),
        Grade::Medium => text.yellow().to_string(),
        Grade::Poor => text.red().to_string(),
    }
}

/// Renders one per-URL summary block. Color is off in batch mode; `debug`
/// additionally dumps every raw performance sample.
pub fn render_summary(summary: &Summary, use_color: bool, debug: bool) -> String {
    let mut out = String::new();

    if debug && !summary.performance_samples.is_empty() {
        let raw: Vec<String> = summary
            .performance_samples
            .iter()
            .map(|&v| display_score(v).to_string())
            .collect();
        out.push_str(&row("Samples", &raw.join(", "), use_color));
    }

    for category in DISPLAY_ORDER {
        let value = match summary.category(category) {
            CategorySummary::Sampled(stat) => format!(
                "{} {} {}",
                score_cell(display_score(stat.min), use_color),
                score_cell(display_score(stat.mean), use_color),
                score_cell(display_score(stat.max), use_color)
            ),
            CategorySummary::Single(value) => score_cell(display_score(value), use_color),
            CategorySummary::Unavailable => UNAVAILABLE.to_string(),
        };
        out.push_str(&row(category.label(), &value, use_color));
    }

    out
}

fn row(label: &str, value: &str, use_color: bool) -> String {
    let label = format!("{:<16}", format!("{}:", label));
    let label = if use_color {
        label.blue().to_string()
    } else {
        label
    };
    format!("{}{}\n", label, value)
}

/// Appends one finished run to the log at `path`. Existing content is kept
/// and runs are separated by a blank line; appends never overwrite.
pub fn append_run_log(
    path: &Path,
    run_id: Option<&str>,
    summaries: &[Summary],
    stats: RunStats,
) -> std::io::Result<()> {
    let mut text = match fs::read_to_string(path) {
        Ok(existing) if !existing.is_empty() => {
            let mut text = existing;
            text.push_str("\n\n");
            text
        }
        Ok(_) => String::new(),
        Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e),
    };

    match run_id {
        Some(hash) => text.push_str(&format!("Commit hash: {}\n", hash)),
        None => text.push_str(&format!(
            "Run date: {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )),
    }

    for summary in summaries {
        text.push_str(&format!("URL: {}\n", summary.url));
        text.push_str(&render_summary(summary, false, false));
        text.push('\n');
    }
    text.push_str(&format!(
        "Total duration: {}\n",
        format_duration(stats.total_seconds)
    ));

    fs::write(path, text)
}
