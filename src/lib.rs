//! Core library for the `lbcheck` CLI.
//!
//! `lbcheck` resolves a target host by racing several DNS servers, then
//! spreads paced GET requests across every resolved IP. IPs that answer with
//! a 5xx or fail at the transport level sit out of the rotation for a
//! recovery window. The run ends once the requested number of successful
//! responses has been collected.
//!
//! The building blocks are usable on their own: [`dns::Resolver`],
//! [`selector::RoundRobinSelector`] and [`dispatch::Dispatcher`].
pub mod args;
pub mod config;
pub mod dispatch;
pub mod dns;
pub mod error;
pub mod http;
pub mod metrics;
pub mod selector;
mod shutdown;
mod util;
