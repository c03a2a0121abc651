use std::sync::Arc;

use tokio::time::Instant;
use tracing::{info, warn};

use crate::{
    args::{HttpMethod, TesterArgs},
    config,
    error::{AppError, AppResult, ValidationError},
    http::{self, ClientSettings, RequestSpec},
    metrics::Summary,
    shutdown::{shutdown_channel, shutdown_requested},
    shutdown_handlers::setup_signal_shutdown_handler,
};

pub(crate) struct RunOutcome {
    pub(crate) summary: Summary,
    /// Set when Ctrl-C or SIGTERM cut the run short.
    pub(crate) interrupted: bool,
}

/// Validates the resolved arguments, runs the load test, and collects the
/// summary. Everything fatal is reported before the first request.
pub(crate) async fn run_local(args: &TesterArgs) -> AppResult<RunOutcome> {
    let method = args
        .method
        .ok_or_else(|| AppError::validation(ValidationError::MissingMethod))?;
    let url = http::parse_target_url(args.url.as_deref())?;

    if args.stream && !matches!(method, HttpMethod::Get) {
        warn!(
            "Stream mode only applies to GET; timing {} requests as round trips.",
            method.as_str()
        );
    }
    let payload = config::load_payload(method, args.payload_file.as_deref())?;

    let streams = args.streams();
    let client = http::build_client(ClientSettings {
        request_timeout: (!streams).then_some(args.request_timeout),
        insecure: args.insecure,
    })?;
    let spec = Arc::new(RequestSpec::new(url, method, payload, args.stream));

    info!(
        "Starting load test with {} workers making {} {} requests to {}",
        args.workers.get(),
        args.requests.get(),
        method.as_str(),
        spec.url
    );
    if streams {
        info!("Stream mode: each request is timed until the server closes the stream.");
    }

    let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let run_start = Instant::now();
    let result = http::run_load(&client, spec, args.workers, args.requests, &shutdown_tx).await;
    let interrupted = shutdown_requested(&mut shutdown_rx);

    if !interrupted {
        drop(shutdown_tx.send(()));
    }
    if let Err(err) = signal_handle.await {
        warn!("Signal handler task failed: {}", err);
    }

    let summary = result?;
    if interrupted {
        warn!(
            "Load test interrupted; reporting {} completed requests.",
            summary.total_requests
        );
    }
    info!(
        elapsed_ms = run_start.elapsed().as_millis(),
        "Load test finished"
    );

    Ok(RunOutcome {
        summary,
        interrupted,
    })
}
