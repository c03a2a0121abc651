use std::time::Duration;

use serde::Serialize;

/// Closed classification of a single request's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Success,
    Throttled,
    ConnectionFailure,
    OtherFailure,
}

/// One executed request as seen by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeRecord {
    pub kind: OutcomeKind,
    pub elapsed: Duration,
}

impl OutcomeRecord {
    #[must_use]
    pub const fn new(kind: OutcomeKind, elapsed: Duration) -> Self {
        Self { kind, elapsed }
    }
}

/// Final statistics of a run. Timing values are seconds; `None` marks a value
/// that is undefined because nothing was measured (no successes, or a zero
/// divisor).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub throttled_requests: u64,
    pub other_failed_requests: u64,
    pub connection_failures: u64,
    pub requests_per_second: Option<f64>,
    pub total_time: Option<f64>,
    pub min_response_time: Option<f64>,
    pub average_response_time: Option<f64>,
    pub max_response_time: Option<f64>,
}

/// Division that yields `None` instead of an infinity or NaN.
#[must_use]
pub fn safe_div(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator).filter(|value| value.is_finite())
}
