use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use super::*;

fn ip(last: u8) -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
}

#[test]
fn histogram_percentiles_are_zero_when_empty() -> Result<(), String> {
    let histogram = LatencyHistogram::new()?;
    if histogram.percentiles() != (0, 0, 0) {
        return Err("Expected zero percentiles".to_owned());
    }
    Ok(())
}

#[test]
fn histogram_records_zero_as_one_ms() -> Result<(), String> {
    let mut histogram = LatencyHistogram::new()?;
    histogram.record(0)?;
    if histogram.count() != 1 || histogram.max() != 1 {
        return Err(format!("Unexpected histogram max: {}", histogram.max()));
    }
    Ok(())
}

#[test]
fn run_stats_breaks_down_by_ip() -> Result<(), String> {
    let mut stats = RunStats::new();
    stats.record_success(ip(1), Duration::from_millis(10));
    stats.record_success(ip(1), Duration::from_millis(30));
    stats.record_server_error(ip(2), Duration::from_millis(5));
    stats.record_transport_error(ip(2));

    let summary = stats.finish(
        "http://svc.example/".to_owned(),
        vec![ip(1), ip(2), ip(3)],
        2,
        Duration::from_millis(120),
        vec![ip(2)],
    );

    if summary.successes != 2 || summary.server_errors != 1 || summary.transport_errors != 1 {
        return Err(format!("Unexpected totals: {:?}", summary));
    }
    if summary.attempts != 4 {
        return Err(format!("Unexpected attempts: {}", summary.attempts));
    }
    let expected = vec![
        IpBreakdown {
            ip: ip(1),
            stats: IpStats {
                successes: 2,
                server_errors: 0,
                transport_errors: 0,
            },
        },
        IpBreakdown {
            ip: ip(2),
            stats: IpStats {
                successes: 0,
                server_errors: 1,
                transport_errors: 1,
            },
        },
        IpBreakdown {
            ip: ip(3),
            stats: IpStats::default(),
        },
    ];
    if summary.per_ip != expected {
        return Err(format!("Unexpected breakdown: {:?}", summary.per_ip));
    }
    if summary.latency_max_ms < 30 || summary.elapsed_ms != 120 {
        return Err(format!("Unexpected timings: {:?}", summary));
    }
    Ok(())
}

#[test]
fn summary_serializes_flat_ip_rows() -> Result<(), String> {
    let mut stats = RunStats::new();
    stats.record_success(ip(1), Duration::from_millis(1));
    let summary = stats.finish(
        "http://svc.example/".to_owned(),
        vec![ip(1)],
        1,
        Duration::from_millis(1),
        vec![],
    );
    let value = serde_json::to_value(&summary).map_err(|err| err.to_string())?;
    let row = value
        .get("per_ip")
        .and_then(|rows| rows.get(0))
        .ok_or_else(|| "Missing per_ip row".to_owned())?;
    if row.get("ip").and_then(|v| v.as_str()) != Some("10.0.0.1") {
        return Err(format!("Unexpected ip field: {}", row));
    }
    if row.get("successes").and_then(|v| v.as_u64()) != Some(1) {
        return Err(format!("Unexpected successes field: {}", row));
    }
    Ok(())
}
