use tracing::error;

use crate::args::CheckArgs;
use crate::dispatch::{DispatchConfig, Dispatcher, default_response_handler};
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::Target;

use super::summary::print_summary;

/// Turns parsed CLI arguments into a dispatcher configuration.
///
/// # Errors
///
/// Returns an error when the URL is missing or invalid, or a DNS entry
/// cannot be parsed.
pub(crate) fn build_dispatch_config(args: &CheckArgs) -> AppResult<DispatchConfig> {
    let Some(raw_url) = args.url.as_deref() else {
        error!("Missing URL (set --url or provide in config).");
        return Err(AppError::validation(ValidationError::MissingUrl));
    };
    let target = Target::parse(raw_url).map_err(AppError::http)?;
    let dns_servers = crate::args::parse_dns_servers(&args.dns).map_err(AppError::validation)?;

    let mut config = DispatchConfig::new(target, args.requests);
    config.concurrency = args.concurrency;
    config.interval = args.interval;
    config.request_timeout = args.request_timeout;
    config.resolve_timeout = args.resolve_timeout;
    config.recovery_window = args.recovery_window;
    config.dns_servers = dns_servers;
    config.redirect_limit = args.redirect_limit;
    config.response_handler = if args.quiet_responses {
        None
    } else {
        Some(default_response_handler())
    };
    Ok(config)
}

/// Runs one check and prints its summary.
///
/// # Errors
///
/// Returns an error when configuration is invalid, resolution fails or the
/// run cannot reach its success target.
pub(crate) async fn run_check(args: &CheckArgs) -> AppResult<()> {
    let config = build_dispatch_config(args)?;
    let dispatcher = Dispatcher::new(config);
    let summary = dispatcher.run().await?;
    print_summary(&summary, args.output_format)
}
