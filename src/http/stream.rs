use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Response;
use tokio::time::Instant;
use tracing::debug;

use crate::shutdown::{ShutdownReceiver, wait_for_shutdown};

#[derive(Debug, Clone, Copy)]
pub(crate) struct StreamEnd {
    pub(crate) elapsed: Duration,
    /// Set when shutdown, not the server or a read error, ended the stream.
    pub(crate) interrupted: bool,
}

/// Reads an event stream to its end and reports how long it stayed open.
///
/// Content is discarded; only line boundaries are counted for diagnostics.
/// The stream ends when the server closes it, when the body read fails (which
/// includes a client timeout), or when shutdown is broadcast.
pub(crate) async fn consume_event_stream(
    response: Response,
    shutdown_rx: &mut ShutdownReceiver,
) -> StreamEnd {
    let started = Instant::now();
    let mut body = response.bytes_stream();
    let mut lines: u64 = 0;
    let mut interrupted = false;

    loop {
        tokio::select! {
            chunk = body.next() => match chunk {
                Some(Ok(bytes)) => {
                    let newlines = bytes.iter().filter(|byte| **byte == b'\n').count();
                    lines = lines.saturating_add(u64::try_from(newlines).unwrap_or(u64::MAX));
                }
                Some(Err(err)) => {
                    debug!("Event stream read ended: {}", err);
                    break;
                }
                None => break,
            },
            () = wait_for_shutdown(shutdown_rx) => {
                debug!("Event stream cancelled by shutdown");
                interrupted = true;
                break;
            }
        }
    }

    let elapsed = started.elapsed();
    debug!(lines, elapsed_ms = elapsed.as_millis(), "Event stream closed");
    StreamEnd {
        elapsed,
        interrupted,
    }
}
