//! Target parsing and the per-request HTTP transport.
mod target;
mod transport;


pub use target::Target;
pub use transport::{FetchedResponse, ReqwestTransport, Transport};
