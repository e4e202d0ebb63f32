use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::debug;

use crate::error::TransportError;
use crate::http::{Target, Transport};
use crate::selector::Selector;
use crate::shutdown::ShutdownReceiver;

use super::pacer::Pacer;
use super::{Outcome, OutcomeKind, RunState};

pub(super) struct WorkerContext {
    pub id: usize,
    pub target: Target,
    pub transport: Arc<dyn Transport>,
    pub selector: Arc<dyn Selector>,
    pub pacer: Arc<Pacer>,
    pub outcomes: mpsc::Sender<Outcome>,
    pub request_timeout: Duration,
    pub state: Arc<RunState>,
    pub shutdown_rx: ShutdownReceiver,
}

pub(super) async fn run_worker(mut ctx: WorkerContext) {
    loop {
        tokio::select! {
            _ = ctx.shutdown_rx.recv() => break,
            () = ctx.pacer.admit() => {}
        }

        let ip = ctx.selector.select_ip();
        ctx.state.in_flight.fetch_add(1, Ordering::AcqRel);
        let started = Instant::now();
        let request = tokio::time::timeout(
            ctx.request_timeout,
            ctx.transport.get(&ctx.target, ip, ctx.request_timeout),
        );
        let result = tokio::select! {
            _ = ctx.shutdown_rx.recv() => None,
            result = request => Some(result),
        };
        ctx.state.in_flight.fetch_sub(1, Ordering::AcqRel);
        let Some(result) = result else {
            debug!("worker {} abandoned request to {} on shutdown", ctx.id, ip);
            break;
        };

        let (kind, response) = match result {
            Ok(Ok(response)) => (
                OutcomeKind::Response {
                    status: response.status,
                    elapsed: started.elapsed(),
                },
                Some(response),
            ),
            Ok(Err(error)) => (OutcomeKind::Failed { error }, None),
            Err(_elapsed) => (
                OutcomeKind::Failed {
                    error: TransportError::Timeout {
                        after: ctx.request_timeout,
                    },
                },
                None,
            ),
        };
        if ctx
            .outcomes
            .send(Outcome { ip, kind, response })
            .await
            .is_err()
        {
            break;
        }
    }
    debug!("worker {} exited", ctx.id);
}
