use std::net::IpAddr;

use crate::args::OutputFormat;
use crate::error::AppResult;
use crate::metrics::RunSummary;

/// Successful share of all attempts, in hundredths of a percent.
pub(crate) fn success_rate_x100(summary: &RunSummary) -> u64 {
    if summary.attempts == 0 {
        return 0;
    }
    let scaled = u128::from(summary.successes)
        .saturating_mul(10_000)
        .checked_div(u128::from(summary.attempts))
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

fn join_ips(ips: &[IpAddr]) -> String {
    if ips.is_empty() {
        return "none".to_owned();
    }
    ips.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn summary_lines(summary: &RunSummary) -> Vec<String> {
    let rate = success_rate_x100(summary);
    let mut lines = vec![
        format!("Target: {}", summary.target),
        format!("Resolved IPs: {}", join_ips(&summary.candidates)),
        format!("Duration: {}ms", summary.elapsed_ms),
        format!("Successful: {} of {} requested", summary.successes, summary.requested),
        format!("Attempts: {}", summary.attempts),
        format!("Server Errors: {}", summary.server_errors),
        format!("Transport Errors: {}", summary.transport_errors),
        format!(
            "Success Rate: {}.{:02}%",
            rate.checked_div(100).unwrap_or(0),
            rate.checked_rem(100).unwrap_or(0)
        ),
        format!(
            "Latency p50/p90/p99/max: {}ms / {}ms / {}ms / {}ms",
            summary.latency_p50_ms,
            summary.latency_p90_ms,
            summary.latency_p99_ms,
            summary.latency_max_ms
        ),
        "Per IP:".to_owned(),
    ];
    for entry in &summary.per_ip {
        lines.push(format!(
            "  {}: {} ok, {} server errors, {} transport errors",
            entry.ip, entry.stats.successes, entry.stats.server_errors, entry.stats.transport_errors
        ));
    }
    lines.push(format!("Quarantined: {}", join_ips(&summary.quarantined)));
    lines
}

/// Prints the run summary to stdout.
///
/// # Errors
///
/// Returns an error when JSON serialization fails.
pub(crate) fn print_summary(summary: &RunSummary, format: OutputFormat) -> AppResult<()> {
    match format {
        OutputFormat::Text => {
            for line in summary_lines(summary) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(summary)?);
        }
    }
    Ok(())
}
