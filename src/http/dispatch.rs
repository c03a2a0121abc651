use std::sync::Arc;

use reqwest::Client;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, error};

use crate::args::{PositiveU64, PositiveUsize};
use crate::error::{AppError, AppResult, HttpError};
use crate::metrics::{self, OutcomeRecord, Summary};
use crate::shutdown::ShutdownSender;

use super::request::RequestSpec;
use super::worker::{WorkerContext, run_worker};

/// Splits `total` requests into `workers` shards. Shards differ by at most
/// one and the remainder goes to the lowest worker indices.
#[must_use]
pub fn partition(total: u64, workers: usize) -> Vec<u64> {
    let Ok(workers_u64) = u64::try_from(workers) else {
        return Vec::new();
    };
    let base = total.checked_div(workers_u64).unwrap_or(0);
    let remainder = total.checked_rem(workers_u64).unwrap_or(0);

    (0..workers_u64)
        .map(|index| {
            if index < remainder {
                base.saturating_add(1)
            } else {
                base
            }
        })
        .collect()
}

/// Number of worker tasks actually spawned. Workers beyond the request count
/// would only get empty shards, so they are never started.
#[must_use]
pub(crate) fn active_workers(workers: usize, requests: u64) -> usize {
    usize::try_from(requests).map_or(workers, |requests| workers.min(requests))
}

/// Runs the whole load test and returns the aggregated summary.
///
/// # Errors
///
/// Returns an error when a worker hits a fatal error (payload serialization
/// or request construction). Connection failures are never errors.
pub async fn run_load(
    client: &Client,
    spec: Arc<RequestSpec>,
    workers: PositiveUsize,
    requests: PositiveU64,
    shutdown_tx: &ShutdownSender,
) -> AppResult<Summary> {
    let (outcomes_rx, supervisor) = launch_workers(client, spec, workers, requests, shutdown_tx)?;
    let summary = metrics::aggregate(outcomes_rx).await;
    supervisor.await??;
    Ok(summary)
}

/// Spawns one worker per shard plus the supervisor that closes the sink.
pub(crate) fn launch_workers(
    client: &Client,
    spec: Arc<RequestSpec>,
    workers: PositiveUsize,
    requests: PositiveU64,
    shutdown_tx: &ShutdownSender,
) -> AppResult<(mpsc::Receiver<OutcomeRecord>, JoinHandle<AppResult<()>>)> {
    let capacity = usize::try_from(requests.get()).map_err(|err| {
        AppError::http(HttpError::RequestCountTooLarge {
            requests: requests.get(),
            source: err,
        })
    })?;
    let (outcomes_tx, outcomes_rx) = mpsc::channel(capacity.min(Semaphore::MAX_PERMITS));

    let spawned = active_workers(workers.get(), requests.get());
    if spawned < workers.get() {
        debug!(
            requested = workers.get(),
            spawned, "More workers than requests, idle workers not started"
        );
    }

    let mut worker_set = JoinSet::new();
    for (worker_id, shard) in partition(requests.get(), spawned)
        .into_iter()
        .enumerate()
    {
        let context = WorkerContext {
            worker_id,
            client: client.clone(),
            spec: Arc::clone(&spec),
            outcomes_tx: outcomes_tx.clone(),
            shutdown_rx: shutdown_tx.subscribe(),
        };
        worker_set.spawn(run_worker(context, shard));
    }

    let supervisor = tokio::spawn(supervise(worker_set, outcomes_tx));
    Ok((outcomes_rx, supervisor))
}

/// Waits for every worker, then drops the last sink sender so the aggregator
/// sees end-of-stream only after all outcomes were delivered. The first
/// fatal worker error aborts the remaining workers.
pub(super) async fn supervise(
    mut worker_set: JoinSet<AppResult<u64>>,
    outcomes_tx: mpsc::Sender<OutcomeRecord>,
) -> AppResult<()> {
    let mut first_error: Option<AppError> = None;
    let mut executed: u64 = 0;

    while let Some(joined) = worker_set.join_next().await {
        let failure = match joined {
            Ok(Ok(count)) => {
                executed = executed.saturating_add(count);
                continue;
            }
            Ok(Err(err)) => err,
            Err(join_err) if join_err.is_cancelled() && first_error.is_some() => continue,
            Err(join_err) => AppError::from(join_err),
        };
        if first_error.is_none() {
            error!("Aborting run: {}", failure);
            worker_set.abort_all();
            first_error = Some(failure);
        }
    }

    drop(outcomes_tx);
    debug!(executed, "All workers joined, outcome sink closed");
    first_error.map_or(Ok(()), Err)
}
