mod app;
mod config;
mod dispatch;
mod dns;
mod http;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use dispatch::DispatchError;
pub use dns::{LookupError, ResolveError};
pub use http::{HttpError, TransportError};
pub use validation::ValidationError;
