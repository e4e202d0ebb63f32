use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("all workers exited after {successes} of {target} successful responses")]
    WorkersExited { successes: u64, target: u64 },
    #[error("worker task failed: {source}")]
    WorkerJoin {
        #[source]
        source: tokio::task::JoinError,
    },
}
