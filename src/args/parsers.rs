use std::net::IpAddr;
use std::time::Duration;

use super::defaults::DEFAULT_DNS_PORT;
use super::types::{PositiveU64, PositiveUsize};
use crate::dns::NameServerAddr;
use crate::error::{AppError, AppResult, ValidationError};

pub(super) fn parse_positive_u64(s: &str) -> AppResult<PositiveU64> {
    s.parse::<PositiveU64>().map_err(AppError::from)
}

pub(super) fn parse_positive_usize(s: &str) -> AppResult<PositiveUsize> {
    s.parse::<PositiveUsize>().map_err(AppError::from)
}

pub(crate) fn parse_bool_env(s: &str) -> AppResult<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" | "" => Ok(false),
        _ => Err(AppError::validation(ValidationError::InvalidBoolean {
            value: s.to_owned(),
        })),
    }
}

/// Parses `host`, `host:port`, `ip`, `ip:port`, `[ipv6]:port` or a bare IPv6
/// address. The port defaults to 53.
pub(crate) fn parse_dns_server(s: &str) -> Result<NameServerAddr, ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::DnsServerEmpty);
    }

    if let Some(rest) = value.strip_prefix('[') {
        let (host, tail) = rest
            .split_once(']')
            .ok_or_else(|| ValidationError::InvalidDnsServer {
                value: value.to_owned(),
            })?;
        if host.parse::<IpAddr>().is_err() {
            return Err(ValidationError::InvalidDnsServer {
                value: value.to_owned(),
            });
        }
        let port = match tail.strip_prefix(':') {
            Some(port) => parse_port(value, port)?,
            None if tail.is_empty() => DEFAULT_DNS_PORT,
            None => {
                return Err(ValidationError::InvalidDnsServer {
                    value: value.to_owned(),
                });
            }
        };
        return Ok(NameServerAddr::new(host, port));
    }

    if value.parse::<IpAddr>().is_ok() {
        return Ok(NameServerAddr::new(value, DEFAULT_DNS_PORT));
    }

    match value.rsplit_once(':') {
        Some((host, port)) => {
            if host.is_empty() || host.contains(':') {
                return Err(ValidationError::InvalidDnsServer {
                    value: value.to_owned(),
                });
            }
            Ok(NameServerAddr::new(host, parse_port(value, port)?))
        }
        None => Ok(NameServerAddr::new(value, DEFAULT_DNS_PORT)),
    }
}

/// Parses a list of DNS server entries, skipping blank entries such as a
/// trailing comma.
pub(crate) fn parse_dns_servers(values: &[String]) -> Result<Vec<NameServerAddr>, ValidationError> {
    values
        .iter()
        .flat_map(|value| value.split(','))
        .filter(|entry| !entry.trim().is_empty())
        .map(parse_dns_server)
        .collect()
}

fn parse_port(value: &str, port: &str) -> Result<u16, ValidationError> {
    port.trim()
        .parse::<u16>()
        .map_err(|err| ValidationError::InvalidDnsServerPort {
            value: value.to_owned(),
            source: err,
        })
}

pub(crate) fn parse_duration_arg(s: &str) -> AppResult<Duration> {
    parse_duration_value(s).map_err(AppError::validation)
}

/// Parses `<digits><unit>` where unit is one of ms, s, m or h (bare digits mean seconds).
pub(crate) fn parse_duration_value(s: &str) -> Result<Duration, ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }

    let split = value
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(value.len());
    let (num_part, unit_part) = value.split_at(split);
    if num_part.is_empty() {
        return Err(ValidationError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }
    let number: u64 = num_part
        .parse()
        .map_err(|err| ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })?;

    let duration = match unit_part {
        "ms" => Duration::from_millis(number),
        "" | "s" => Duration::from_secs(number),
        "m" => Duration::from_secs(
            number
                .checked_mul(60)
                .ok_or(ValidationError::DurationOverflow)?,
        ),
        "h" => Duration::from_secs(
            number
                .checked_mul(3600)
                .ok_or(ValidationError::DurationOverflow)?,
        ),
        unit => {
            return Err(ValidationError::InvalidDurationUnit {
                unit: unit.to_owned(),
            });
        }
    };

    if duration.is_zero() {
        return Err(ValidationError::DurationZero);
    }
    Ok(duration)
}
