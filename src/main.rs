mod app;
mod args;
mod config;
mod dispatch;
mod dns;
mod entry;
mod error;
mod http;
mod logger;
mod metrics;
mod selector;
mod shutdown;
mod util;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
