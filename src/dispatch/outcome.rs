use std::net::IpAddr;
use std::time::Duration;

use serde::Serialize;

use crate::error::TransportError;
use crate::http::FetchedResponse;

/// Classification of one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Any status below 500, redirects and client errors included.
    Success,
    ServerError,
    TransportError,
}

impl Verdict {
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        if status >= 500 {
            Verdict::ServerError
        } else {
            Verdict::Success
        }
    }
}

#[derive(Debug)]
pub enum OutcomeKind {
    Response { status: u16, elapsed: Duration },
    Failed { error: TransportError },
}

/// Result of one attempt, reported by a worker to the aggregation loop.
#[derive(Debug)]
pub struct Outcome {
    pub ip: IpAddr,
    pub kind: OutcomeKind,
    /// Present for completed exchanges, handed to the response handler.
    pub response: Option<FetchedResponse>,
}

impl Outcome {
    #[must_use]
    pub const fn verdict(&self) -> Verdict {
        match &self.kind {
            OutcomeKind::Response { status, .. } => Verdict::from_status(*status),
            OutcomeKind::Failed { .. } => Verdict::TransportError,
        }
    }
}

/// Progress notifications for embedders. Sent in order from the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    Resolved {
        host: String,
        ips: Vec<IpAddr>,
    },
    Success {
        ip: IpAddr,
        status: u16,
        elapsed: Duration,
        successes: u64,
    },
    ServerError {
        ip: IpAddr,
        status: u16,
        elapsed: Duration,
    },
    TransportError {
        ip: IpAddr,
        error: String,
        timed_out: bool,
    },
    Finished {
        successes: u64,
        attempts: u64,
    },
}
