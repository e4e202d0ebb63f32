use std::time::Duration;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{CheckArgs, PositiveU64, PositiveUsize, parse_dns_servers};
use crate::error::ConfigError;

use super::types::{ConfigFile, DurationValue};

/// Applies configuration values to CLI arguments. Values given on the
/// command line win over the file.
///
/// # Errors
///
/// Returns an error when a config value is out of range or malformed.
pub fn apply_config(
    args: &mut CheckArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> Result<(), ConfigError> {
    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_cli(matches, "dns")
        && let Some(dns) = config.dns.as_ref()
    {
        parse_dns_servers(dns).map_err(|err| ConfigError::InvalidDnsServer { source: err })?;
        args.dns.clone_from(dns);
    }

    if !is_cli(matches, "requests")
        && let Some(requests) = config.requests
    {
        args.requests = PositiveU64::try_from(requests).map_err(|err| {
            ConfigError::FieldMustBePositive {
                field: "requests",
                source: err,
            }
        })?;
    }

    if !is_cli(matches, "concurrency")
        && let Some(concurrency) = config.concurrency
    {
        args.concurrency = PositiveUsize::try_from(concurrency).map_err(|err| {
            ConfigError::FieldMustBePositive {
                field: "concurrency",
                source: err,
            }
        })?;
    }

    apply_duration(
        matches,
        "request_timeout",
        "timeout",
        config.timeout.as_ref(),
        &mut args.request_timeout,
    )?;
    apply_duration(
        matches,
        "interval",
        "interval",
        config.interval.as_ref(),
        &mut args.interval,
    )?;
    apply_duration(
        matches,
        "recovery_window",
        "recovery_window",
        config.recovery_window.as_ref(),
        &mut args.recovery_window,
    )?;
    apply_duration(
        matches,
        "resolve_timeout",
        "resolve_timeout",
        config.resolve_timeout.as_ref(),
        &mut args.resolve_timeout,
    )?;

    if !is_cli(matches, "redirect_limit")
        && let Some(redirect) = config.redirect
    {
        args.redirect_limit = redirect;
    }

    if !is_cli(matches, "quiet_responses")
        && let Some(quiet) = config.quiet_responses
    {
        args.quiet_responses = quiet;
    }

    if !is_cli(matches, "output_format")
        && let Some(format) = config.output_format
    {
        args.output_format = format;
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    if !is_cli_or_env(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    Ok(())
}

fn apply_duration(
    matches: &ArgMatches,
    arg: &str,
    field: &'static str,
    value: Option<&DurationValue>,
    slot: &mut Duration,
) -> Result<(), ConfigError> {
    if is_cli(matches, arg) {
        return Ok(());
    }
    if let Some(value) = value {
        *slot = value
            .to_duration()
            .map_err(|err| ConfigError::InvalidDuration { field, source: err })?;
    }
    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn is_cli_or_env(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}
