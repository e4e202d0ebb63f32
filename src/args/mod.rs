//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use cli::CheckArgs;
pub use types::{OutputFormat, PositiveU64, PositiveUsize};

pub(crate) use defaults::{
    DEFAULT_CONCURRENCY, DEFAULT_INTERVAL, DEFAULT_REDIRECT_LIMIT, DEFAULT_REQUEST_TIMEOUT,
    DEFAULT_RESOLVE_TIMEOUT, DEFAULT_USER_AGENT,
};
pub(crate) use parsers::{parse_dns_server, parse_dns_servers, parse_duration_arg, parse_duration_value};
