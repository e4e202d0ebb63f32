use clap::Parser;
use std::time::Duration;

use super::parsers::{parse_bool_env, parse_duration_arg, parse_positive_u64, parse_positive_usize};
use super::types::{OutputFormat, PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Load-balancer-aware HTTP checker - resolves a host through racing DNS servers and drives paced requests across the resolved IPs with failure quarantine.",
    next_help_heading = "Advanced Options"
)]
pub struct CheckArgs {
    /// Target URL (http:// is assumed when no scheme is given)
    #[arg(long, short, help_heading = "Common Options")]
    pub url: Option<String>,

    /// DNS servers to race (host or host:port, comma-separated or repeatable). Empty uses the system resolver.
    #[arg(long = "dns", value_delimiter = ',', help_heading = "Common Options")]
    pub dns: Vec<String>,

    /// Successful responses to collect before stopping
    #[arg(
        long = "requests",
        short = 'n',
        default_value = "100",
        value_parser = parse_positive_u64,
        help_heading = "Common Options"
    )]
    pub requests: PositiveU64,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(
        long = "timeout",
        short = 't',
        default_value = "1s",
        value_parser = parse_duration_arg,
        help_heading = "Common Options"
    )]
    pub request_timeout: Duration,

    /// Maximum requests in flight
    #[arg(
        long = "concurrency",
        short = 'c',
        alias = "max-concurrent",
        default_value = "4",
        value_parser = parse_positive_usize,
        help_heading = "Common Options"
    )]
    pub concurrency: PositiveUsize,

    /// Minimum interval between request admissions (supports ms/s/m/h)
    #[arg(
        long = "interval",
        short = 'i',
        default_value = "10ms",
        value_parser = parse_duration_arg
    )]
    pub interval: Duration,

    /// How long a failing IP stays out of rotation (supports ms/s/m/h)
    #[arg(
        long = "recovery-window",
        default_value = "1s",
        value_parser = parse_duration_arg
    )]
    pub recovery_window: Duration,

    /// Overall deadline for resolving the target host (supports ms/s/m/h)
    #[arg(
        long = "resolve-timeout",
        default_value = "1s",
        value_parser = parse_duration_arg
    )]
    pub resolve_timeout: Duration,

    /// Limit the number of redirects to follow (0 disables redirects)
    #[arg(long = "redirect", default_value = "10")]
    pub redirect_limit: u32,

    /// Do not log each successful response
    #[arg(long = "quiet-responses")]
    pub quiet_responses: bool,

    /// Summary output format
    #[arg(long = "output-format", default_value = "text", value_enum)]
    pub output_format: OutputFormat,

    /// Enable verbose logging (sets log level to debug unless overridden by LBCHECK_LOG/RUST_LOG)
    #[arg(long, short = 'v', alias = "debug", help_heading = "Common Options")]
    pub verbose: bool,

    /// Path to config file (TOML/JSON). Defaults to ./lbcheck.toml or ./lbcheck.json if present.
    #[arg(long, help_heading = "Common Options")]
    pub config: Option<String>,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
