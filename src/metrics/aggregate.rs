use std::time::Duration;

use tokio::sync::mpsc;

use super::types::{OutcomeKind, OutcomeRecord, Summary, safe_div};

/// Running totals owned by the aggregator for the length of one fold.
#[derive(Debug, Default)]
pub(crate) struct SummaryAccumulator {
    total: u64,
    success: u64,
    throttled: u64,
    other_failed: u64,
    connection_failures: u64,
    success_time: Duration,
    min: Option<Duration>,
    max: Option<Duration>,
}

impl SummaryAccumulator {
    pub(crate) fn record(&mut self, record: OutcomeRecord) {
        self.total = self.total.saturating_add(1);
        match record.kind {
            OutcomeKind::ConnectionFailure => {
                self.connection_failures = self.connection_failures.saturating_add(1);
            }
            OutcomeKind::Success => {
                self.success = self.success.saturating_add(1);
                self.success_time = self.success_time.saturating_add(record.elapsed);
                self.min = Some(
                    self.min
                        .map_or(record.elapsed, |min| min.min(record.elapsed)),
                );
                self.max = Some(
                    self.max
                        .map_or(record.elapsed, |max| max.max(record.elapsed)),
                );
            }
            OutcomeKind::Throttled => {
                self.throttled = self.throttled.saturating_add(1);
            }
            OutcomeKind::OtherFailure => {
                self.other_failed = self.other_failed.saturating_add(1);
            }
        }
    }

    pub(crate) fn finish(self) -> Summary {
        let measured = self.success > 0;
        let total_secs = self.success_time.as_secs_f64();
        let success = self.success as f64;

        Summary {
            total_requests: self.total,
            successful_requests: self.success,
            throttled_requests: self.throttled,
            other_failed_requests: self.other_failed,
            connection_failures: self.connection_failures,
            requests_per_second: safe_div(success, total_secs),
            total_time: measured.then_some(total_secs),
            min_response_time: self.min.map(|min| min.as_secs_f64()),
            average_response_time: safe_div(total_secs, success),
            max_response_time: self.max.map(|max| max.as_secs_f64()),
        }
    }
}

/// Folds a finite sequence of outcomes into a [`Summary`].
#[cfg(test)]
#[must_use]
pub(crate) fn summarise<I>(records: I) -> Summary
where
    I: IntoIterator<Item = OutcomeRecord>,
{
    let mut accumulator = SummaryAccumulator::default();
    for record in records {
        accumulator.record(record);
    }
    accumulator.finish()
}

/// Drains the outcome sink until every sender is gone, then summarises.
pub async fn aggregate(mut outcomes_rx: mpsc::Receiver<OutcomeRecord>) -> Summary {
    let mut accumulator = SummaryAccumulator::default();
    while let Some(record) = outcomes_rx.recv().await {
        accumulator.record(record);
    }
    tracing::debug!("Outcome sink drained after {} records", accumulator.total);
    accumulator.finish()
}
