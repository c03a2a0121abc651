use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Worker {worker_id} failed to serialize payload for request {index}: {source}")]
    SerializePayload {
        worker_id: usize,
        index: u64,
        #[source]
        source: serde_json::Error,
    },
    #[error("Worker {worker_id} failed to build request {index}: {source}")]
    BuildRequestFailed {
        worker_id: usize,
        index: u64,
        #[source]
        source: reqwest::Error,
    },
    #[error("Request count {requests} does not fit in memory on this platform: {source}")]
    RequestCountTooLarge {
        requests: u64,
        #[source]
        source: std::num::TryFromIntError,
    },
}
