use std::time::Duration;

use reqwest::Client;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::{AppError, AppResult, HttpError};

/// Transport settings shared by every worker through one client.
#[derive(Debug, Clone, Copy)]
pub struct ClientSettings {
    /// `None` disables the client timeout entirely (stream mode).
    pub request_timeout: Option<Duration>,
    pub insecure: bool,
}

/// Builds the single HTTP client all workers share.
///
/// # Errors
///
/// Returns an error when the TLS backend or client cannot be initialised.
pub fn build_client(settings: ClientSettings) -> AppResult<Client> {
    let mut client_builder = Client::builder().user_agent(DEFAULT_USER_AGENT);

    if let Some(timeout) = settings.request_timeout {
        client_builder = client_builder.timeout(timeout);
    }

    if settings.insecure {
        tracing::warn!("TLS certificate verification is disabled.");
        client_builder = client_builder
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true);
    }

    client_builder
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}
