use std::sync::Arc;

use reqwest::{Client, Request};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::debug;

use crate::error::AppResult;
use crate::metrics::OutcomeRecord;
use crate::shutdown::{ShutdownReceiver, shutdown_requested};

use super::classify::classify;
use super::request::RequestSpec;
use super::stream::consume_event_stream;

pub(crate) struct WorkerContext {
    pub(crate) worker_id: usize,
    pub(crate) client: Client,
    pub(crate) spec: Arc<RequestSpec>,
    pub(crate) outcomes_tx: mpsc::Sender<OutcomeRecord>,
    pub(crate) shutdown_rx: ShutdownReceiver,
}

/// Issues `shard` requests one after another and reports every outcome.
///
/// Returns the number of requests executed. Only payload and request build
/// failures are returned as errors; transport failures are outcomes.
pub(crate) async fn run_worker(mut context: WorkerContext, shard: u64) -> AppResult<u64> {
    let worker_id = context.worker_id;
    let streams = context.spec.streams();
    debug!(worker_id, shard, streams, "Worker started");

    let mut executed: u64 = 0;
    for index in 0..shard {
        if shutdown_requested(&mut context.shutdown_rx) {
            debug!(worker_id, executed, "Worker stopping on shutdown");
            break;
        }

        let request = context
            .spec
            .build_request(&context.client, worker_id, index)?;
        let outcome = execute_request(
            &context.client,
            request,
            streams,
            worker_id,
            &mut context.shutdown_rx,
        )
        .await;
        executed = executed.saturating_add(1);

        if context.outcomes_tx.send(outcome.record).await.is_err() {
            debug!(worker_id, "Outcome sink closed, worker exiting");
            break;
        }
        if outcome.interrupted {
            debug!(worker_id, executed, "Worker stopping on shutdown");
            break;
        }
    }

    debug!(worker_id, executed, "Worker finished");
    Ok(executed)
}

struct ExecutedRequest {
    record: OutcomeRecord,
    interrupted: bool,
}

async fn execute_request(
    client: &Client,
    request: Request,
    streams: bool,
    worker_id: usize,
    shutdown_rx: &mut ShutdownReceiver,
) -> ExecutedRequest {
    let start = Instant::now();
    match client.execute(request).await {
        Ok(response) => {
            let kind = classify(Some(response.status().as_u16()));
            if streams {
                let end = consume_event_stream(response, shutdown_rx).await;
                return ExecutedRequest {
                    record: OutcomeRecord::new(kind, end.elapsed),
                    interrupted: end.interrupted,
                };
            }
            let round_trip = start.elapsed();
            drain_response_body(response, worker_id).await;
            ExecutedRequest {
                record: OutcomeRecord::new(kind, round_trip),
                interrupted: false,
            }
        }
        Err(err) => {
            let elapsed = start.elapsed();
            debug!(worker_id, timed_out = err.is_timeout(), "Request failed: {}", err);
            ExecutedRequest {
                record: OutcomeRecord::new(classify(None), elapsed),
                interrupted: false,
            }
        }
    }
}

/// Reads the rest of the body so the connection can go back to the pool.
async fn drain_response_body(response: reqwest::Response, worker_id: usize) {
    if let Err(err) = response.bytes().await {
        debug!(worker_id, "Failed to read response body: {}", err);
    }
}
