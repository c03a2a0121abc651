use std::fmt::Display;

use crate::args::OutputFormat;
use crate::error::AppResult;
use crate::metrics::Summary;

const HEADER: &str = "--- Load Test Results ---";
const NOT_AVAILABLE: &str = "N/A";
const LABEL_WIDTH: usize = 24;

/// Renders the summary in the requested format.
///
/// # Errors
///
/// Returns an error when JSON serialization fails.
pub(crate) fn render_summary(summary: &Summary, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Text => Ok(render_text(summary)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
    }
}

pub(crate) fn print_summary(summary: &Summary, format: OutputFormat) -> AppResult<()> {
    let rendered = render_summary(summary, format)?;
    println!("{}", rendered);
    Ok(())
}

#[must_use]
pub(crate) fn render_text(summary: &Summary) -> String {
    let lines = [
        line("Total Requests:", summary.total_requests),
        line("Successful Requests:", summary.successful_requests),
        line("Throttled Requests:", summary.throttled_requests),
        line("Other Failed Requests:", summary.other_failed_requests),
        line("Connection Failures:", summary.connection_failures),
        line("Requests Per Second:", rate(summary.requests_per_second)),
        String::new(),
        line("Total Time:", seconds(summary.total_time)),
        line("Min Response Time:", seconds(summary.min_response_time)),
        line(
            "Average Response Time:",
            seconds(summary.average_response_time),
        ),
        line("Max Response Time:", seconds(summary.max_response_time)),
    ];

    let mut out = String::from(HEADER);
    for text in lines {
        out.push('\n');
        out.push_str(&text);
    }
    out
}

fn line(label: &str, value: impl Display) -> String {
    format!("{:<width$}{}", label, value, width = LABEL_WIDTH)
}

fn rate(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_owned(), |rps| format!("{:.6}", rps))
}

fn seconds(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_owned(), |secs| format!("{:.6}s", secs))
}

#[cfg(test)]
mod tests;
