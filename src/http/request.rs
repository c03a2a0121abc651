use reqwest::{
    Client, Request, Url,
    header::{ACCEPT, CACHE_CONTROL, CONNECTION, CONTENT_TYPE, HeaderValue},
};
use serde_json::Value;

use crate::args::HttpMethod;
use crate::error::{AppError, AppResult, HttpError, ValidationError};

const EVENT_STREAM: &str = "text/event-stream";
const NO_CACHE: &str = "no-cache";
const KEEP_ALIVE: &str = "keep-alive";
const APPLICATION_JSON: &str = "application/json";

/// What every worker sends. Shared read-only across workers.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub url: Url,
    pub method: HttpMethod,
    pub payload: Option<Value>,
    pub stream: bool,
}

impl RequestSpec {
    #[must_use]
    pub const fn new(url: Url, method: HttpMethod, payload: Option<Value>, stream: bool) -> Self {
        Self {
            url,
            method,
            payload,
            stream,
        }
    }

    /// Streaming only applies to GET; other methods are timed as round trips.
    #[must_use]
    pub const fn streams(&self) -> bool {
        self.stream && matches!(self.method, HttpMethod::Get)
    }

    pub(crate) fn build_request(
        &self,
        client: &Client,
        worker_id: usize,
        index: u64,
    ) -> AppResult<Request> {
        let mut builder = client.request(self.method.to_reqwest(), self.url.clone());

        if let Some(payload) = self.payload.as_ref() {
            let body = serde_json::to_vec(payload).map_err(|err| {
                AppError::http(HttpError::SerializePayload {
                    worker_id,
                    index,
                    source: err,
                })
            })?;
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON))
                .body(body);
        }

        if self.streams() {
            builder = builder
                .header(ACCEPT, HeaderValue::from_static(EVENT_STREAM))
                .header(CACHE_CONTROL, HeaderValue::from_static(NO_CACHE))
                .header(CONNECTION, HeaderValue::from_static(KEEP_ALIVE));
        }

        builder.build().map_err(|err| {
            AppError::http(HttpError::BuildRequestFailed {
                worker_id,
                index,
                source: err,
            })
        })
    }
}

/// Parses and checks the target URL before any worker starts.
///
/// # Errors
///
/// Returns an error when the URL is missing, malformed, or not http(s).
pub fn parse_target_url(url: Option<&str>) -> AppResult<Url> {
    let raw = url
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::validation(ValidationError::MissingUrl))?;
    let parsed = Url::parse(raw).map_err(|err| {
        AppError::validation(ValidationError::InvalidUrl {
            url: raw.to_owned(),
            source: err,
        })
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(AppError::validation(ValidationError::UnsupportedScheme {
            scheme: scheme.to_owned(),
        })),
    }
}
