use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use super::build_dispatch_config;
use super::summary::{success_rate_x100, summary_lines};
use crate::args::test_support::parse_test_args;
use crate::error::{AppError, ValidationError};
use crate::metrics::{IpBreakdown, IpStats, RunSummary};

fn sample_summary() -> RunSummary {
    let first = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
    let second = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));
    RunSummary {
        target: "http://lb.test/".to_owned(),
        candidates: vec![first, second],
        requested: 3,
        successes: 3,
        server_errors: 1,
        transport_errors: 0,
        attempts: 4,
        per_ip: vec![
            IpBreakdown {
                ip: first,
                stats: IpStats {
                    successes: 0,
                    server_errors: 1,
                    transport_errors: 0,
                },
            },
            IpBreakdown {
                ip: second,
                stats: IpStats {
                    successes: 3,
                    server_errors: 0,
                    transport_errors: 0,
                },
            },
        ],
        latency_p50_ms: 4,
        latency_p90_ms: 9,
        latency_p99_ms: 12,
        latency_max_ms: 12,
        elapsed_ms: 40,
        quarantined: vec![first],
    }
}

#[test]
fn dispatch_config_follows_cli_args() -> Result<(), String> {
    let args = parse_test_args([
        "lbcheck",
        "-u",
        "lb.test:8080/health",
        "--dns",
        "1.1.1.1,9.9.9.9:5353",
        "-n",
        "7",
        "-c",
        "3",
        "-i",
        "25ms",
        "--recovery-window",
        "2s",
        "--quiet-responses",
    ])
    .map_err(|err| err.to_string())?;
    let config = build_dispatch_config(&args).map_err(|err| err.to_string())?;

    if config.target.host() != "lb.test" || config.target.port() != 8080 {
        return Err(format!("Unexpected target: {}", config.target));
    }
    if config.target.scheme() != "http" {
        return Err("Expected http to be assumed".to_owned());
    }
    let servers: Vec<String> = config.dns_servers.iter().map(ToString::to_string).collect();
    if servers != vec!["1.1.1.1:53".to_owned(), "9.9.9.9:5353".to_owned()] {
        return Err(format!("Unexpected dns servers: {:?}", servers));
    }
    if config.requests.get() != 7 || config.concurrency.get() != 3 {
        return Err("Unexpected requests/concurrency".to_owned());
    }
    if config.interval != Duration::from_millis(25)
        || config.recovery_window != Duration::from_secs(2)
    {
        return Err("Unexpected interval/recovery window".to_owned());
    }
    if config.response_handler.is_some() {
        return Err("Expected --quiet-responses to drop the handler".to_owned());
    }
    Ok(())
}

#[test]
fn default_handler_is_installed() -> Result<(), String> {
    let args = parse_test_args(["lbcheck", "-u", "http://lb.test"]).map_err(|err| err.to_string())?;
    let config = build_dispatch_config(&args).map_err(|err| err.to_string())?;
    if config.response_handler.is_none() {
        return Err("Expected default response handler".to_owned());
    }
    if !config.dns_servers.is_empty() {
        return Err("Expected system resolution by default".to_owned());
    }
    Ok(())
}

#[test]
fn missing_url_is_rejected() -> Result<(), String> {
    let args = parse_test_args(["lbcheck"]).map_err(|err| err.to_string())?;
    match build_dispatch_config(&args) {
        Err(AppError::Validation(ValidationError::MissingUrl)) => Ok(()),
        Err(err) => Err(format!("Expected MissingUrl, got {}", err)),
        Ok(_) => Err("Expected MissingUrl, got a config".to_owned()),
    }
}

#[test]
fn unsupported_scheme_is_rejected() -> Result<(), String> {
    let args = parse_test_args(["lbcheck", "-u", "ftp://lb.test"]).map_err(|err| err.to_string())?;
    match build_dispatch_config(&args) {
        Err(AppError::Http(_)) => Ok(()),
        Err(err) => Err(format!("Expected HTTP error, got {}", err)),
        Ok(_) => Err("Expected HTTP error, got a config".to_owned()),
    }
}

#[test]
fn success_rate_uses_attempts() {
    assert_eq!(success_rate_x100(&sample_summary()), 7500);
}

#[test]
fn text_summary_lists_ips_and_quarantine() -> Result<(), String> {
    let lines = summary_lines(&sample_summary());
    let expected = [
        "Resolved IPs: 10.0.0.1, 10.0.0.2",
        "Successful: 3 of 3 requested",
        "Success Rate: 75.00%",
        "  10.0.0.1: 0 ok, 1 server errors, 0 transport errors",
        "  10.0.0.2: 3 ok, 0 server errors, 0 transport errors",
        "Quarantined: 10.0.0.1",
    ];
    for line in expected {
        if !lines.iter().any(|candidate| candidate == line) {
            return Err(format!("Missing line '{}' in {:?}", line, lines));
        }
    }
    Ok(())
}

#[test]
fn json_summary_flattens_per_ip_stats() -> Result<(), String> {
    let value = serde_json::to_value(sample_summary()).map_err(|err| err.to_string())?;
    let second = value
        .get("per_ip")
        .and_then(|per_ip| per_ip.get(1))
        .ok_or("Missing per_ip entry")?;
    if second.get("ip").and_then(|ip| ip.as_str()) != Some("10.0.0.2") {
        return Err(format!("Unexpected ip: {}", second));
    }
    if second.get("successes").and_then(serde_json::Value::as_u64) != Some(3) {
        return Err(format!("Unexpected successes: {}", second));
    }
    Ok(())
}
