//! Paced, bounded-concurrency request dispatch.
//!
//! A fixed pool of `concurrency` workers shares one pacer. Each worker waits
//! for admission, picks an IP, sends one GET and reports the outcome, so
//! request starts are at least one interval apart and never more than
//! `concurrency` requests are in flight.
//! The aggregation loop feeds failures back into the selector, hands each
//! counted success to the response handler and stops the run once the
//! requested number of successful responses has been counted. Outcomes that
//! arrive after that point are dropped unseen.
mod config;
mod outcome;
mod pacer;
mod worker;


use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{broadcast, mpsc};
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::dns::Resolver;
use crate::error::{AppError, AppResult, DispatchError, ResolveError};
use crate::http::{ReqwestTransport, Transport};
use crate::metrics::{RunStats, RunSummary};
use crate::selector::{CandidateSet, RoundRobinSelector, Selector};
use crate::shutdown::ShutdownSender;

pub use config::{DispatchConfig, ResponseHandler, default_response_handler};
pub use outcome::{Outcome, OutcomeKind, RunEvent, Verdict};

use pacer::Pacer;
use worker::{WorkerContext, run_worker};

/// Counters shared between the aggregation loop and workers.
#[derive(Debug, Default)]
pub struct RunState {
    successes: AtomicU64,
    in_flight: AtomicU64,
}

impl RunState {
    #[must_use]
    pub fn successes(&self) -> u64 {
        self.successes.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn in_flight(&self) -> u64 {
        self.in_flight.load(Ordering::Acquire)
    }
}

pub struct Dispatcher {
    config: DispatchConfig,
    resolver: Resolver,
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    /// Builds a dispatcher with the hickory resolver and reqwest transport.
    #[must_use]
    pub fn new(config: DispatchConfig) -> Self {
        let resolver = Resolver::new(&config.dns_servers);
        let transport = Arc::new(ReqwestTransport::new(config.redirect_limit));
        Self::with_parts(config, resolver, transport)
    }

    #[must_use]
    pub fn with_parts(
        config: DispatchConfig,
        resolver: Resolver,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config,
            resolver,
            transport,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Resolves the target host into the candidate set for a run.
    ///
    /// # Errors
    ///
    /// Returns a resolution error when no address could be obtained.
    pub async fn resolve(&self) -> AppResult<CandidateSet> {
        let target = &self.config.target;
        let host = target.host();
        let ips = self
            .resolver
            .lookup(self.config.resolve_timeout, host)
            .await
            .map_err(|err| {
                error!("url {} host {} error {}", target, host, err);
                AppError::resolve(err)
            })?;
        let candidates = CandidateSet::new(ips).ok_or_else(|| {
            AppError::resolve(ResolveError::NoAddresses {
                host: host.to_owned(),
            })
        })?;

        info!("url {} host {} ips {:?}", target, host, candidates.to_vec());
        self.emit(RunEvent::Resolved {
            host: host.to_owned(),
            ips: candidates.to_vec(),
        });
        Ok(candidates)
    }

    /// Resolves the target and runs until the success target is reached.
    ///
    /// # Errors
    ///
    /// Returns an error when resolution fails or the worker pool dies
    /// before the target count is reached.
    pub async fn run(&self) -> AppResult<RunSummary> {
        let candidates = self.resolve().await?;
        let selector = Arc::new(RoundRobinSelector::with_recovery_window(
            candidates.clone(),
            self.config.recovery_window,
        ));
        self.run_with_selector(&candidates, selector).await
    }

    /// Runs the dispatch loop over an already resolved candidate set.
    ///
    /// # Errors
    ///
    /// Returns an error when the worker pool dies before the target count is
    /// reached or a worker task panics.
    pub async fn run_with_selector(
        &self,
        candidates: &CandidateSet,
        selector: Arc<dyn Selector>,
    ) -> AppResult<RunSummary> {
        let started = Instant::now();
        let concurrency = self.config.concurrency.get();
        let target_count = self.config.requests.get();

        let (shutdown_tx, _): (ShutdownSender, _) = broadcast::channel(1);
        let (outcome_tx, mut outcome_rx) = mpsc::channel::<Outcome>(concurrency);
        let pacer = Arc::new(Pacer::new(self.config.interval));
        let state = Arc::new(RunState::default());

        let mut workers = Vec::with_capacity(concurrency);
        for id in 0..concurrency {
            workers.push(tokio::spawn(run_worker(WorkerContext {
                id,
                target: self.config.target.clone(),
                transport: Arc::clone(&self.transport),
                selector: Arc::clone(&selector),
                pacer: Arc::clone(&pacer),
                outcomes: outcome_tx.clone(),
                request_timeout: self.config.request_timeout,
                state: Arc::clone(&state),
                shutdown_rx: shutdown_tx.subscribe(),
            })));
        }
        drop(outcome_tx);

        let mut stats = RunStats::new();
        let mut reached = false;
        while let Some(outcome) = outcome_rx.recv().await {
            if self.aggregate(&outcome, selector.as_ref(), &state, &mut stats) >= target_count {
                reached = true;
                break;
            }
        }

        debug!("stopping with {} requests in flight", state.in_flight());
        drop(shutdown_tx.send(()));
        drop(outcome_rx);
        for handle in workers {
            handle
                .await
                .map_err(|source| AppError::dispatch(DispatchError::WorkerJoin { source }))?;
        }
        debug!("pacer admitted {} requests", pacer.issued());

        if !reached {
            return Err(AppError::dispatch(DispatchError::WorkersExited {
                successes: state.successes(),
                target: target_count,
            }));
        }

        let summary = stats.finish(
            self.config.target.to_string(),
            candidates.to_vec(),
            target_count,
            started.elapsed(),
            selector.quarantined(),
        );
        info!(
            "reached {} successful responses after {} attempts",
            summary.successes, summary.attempts
        );
        self.emit(RunEvent::Finished {
            successes: summary.successes,
            attempts: summary.attempts,
        });
        Ok(summary)
    }

    /// Applies one outcome and returns the running success count.
    fn aggregate(
        &self,
        outcome: &Outcome,
        selector: &dyn Selector,
        state: &RunState,
        stats: &mut RunStats,
    ) -> u64 {
        let ip = outcome.ip;
        match &outcome.kind {
            OutcomeKind::Response { status, elapsed } if outcome.verdict() == Verdict::Success => {
                stats.record_success(ip, *elapsed);
                let successes = state
                    .successes
                    .fetch_add(1, Ordering::AcqRel)
                    .saturating_add(1);
                info!("ip {} request {} success", ip, successes);
                self.emit(RunEvent::Success {
                    ip,
                    status: *status,
                    elapsed: *elapsed,
                    successes,
                });
                if let (Some(handler), Some(response)) =
                    (self.config.response_handler.as_ref(), outcome.response.as_ref())
                {
                    handler(response);
                }
                successes
            }
            OutcomeKind::Response { status, elapsed } => {
                stats.record_server_error(ip, *elapsed);
                warn!("ip {} failed, code {}", ip, status);
                selector.set_fail(ip);
                self.emit(RunEvent::ServerError {
                    ip,
                    status: *status,
                    elapsed: *elapsed,
                });
                state.successes()
            }
            OutcomeKind::Failed { error } => {
                stats.record_transport_error(ip);
                warn!("ip {} failed to get response: {}", ip, error);
                selector.set_fail(ip);
                self.emit(RunEvent::TransportError {
                    ip,
                    error: error.to_string(),
                    timed_out: error.is_timeout(),
                });
                state.successes()
            }
        }
    }

    fn emit(&self, event: RunEvent) {
        if let Some(events) = self.config.events.as_ref() {
            drop(events.send(event));
        }
    }
}
