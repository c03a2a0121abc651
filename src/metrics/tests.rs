use super::*;
use std::time::Duration;
use tokio::sync::mpsc;

const EPSILON: f64 = 1e-9;

fn secs(value: u64) -> Duration {
    Duration::from_secs(value)
}

fn approx(actual: Option<f64>, expected: f64) -> bool {
    actual.is_some_and(|value| (value - expected).abs() < EPSILON)
}

fn check_counts(summary: &Summary) -> Result<(), String> {
    let sum = summary
        .successful_requests
        .saturating_add(summary.throttled_requests)
        .saturating_add(summary.other_failed_requests)
        .saturating_add(summary.connection_failures);
    if sum != summary.total_requests {
        return Err(format!(
            "Counter mismatch: total {} vs per-kind sum {}",
            summary.total_requests, sum
        ));
    }
    Ok(())
}

#[test]
fn all_successes_single_worker() -> Result<(), String> {
    let records = [1, 2, 3, 4].map(|value| OutcomeRecord::new(OutcomeKind::Success, secs(value)));

    let summary = summarise(records);

    check_counts(&summary)?;
    if summary.total_requests != 4 || summary.successful_requests != 4 {
        return Err(format!("Unexpected counts: {:?}", summary));
    }
    if !approx(summary.min_response_time, 1.0) || !approx(summary.max_response_time, 4.0) {
        return Err(format!("Unexpected min/max: {:?}", summary));
    }
    if !approx(summary.average_response_time, 2.5) {
        return Err(format!("Unexpected average: {:?}", summary));
    }
    if !approx(summary.total_time, 10.0) || !approx(summary.requests_per_second, 0.4) {
        return Err(format!("Unexpected totals: {:?}", summary));
    }
    Ok(())
}

#[test]
fn all_connection_failures_leave_timing_undefined() -> Result<(), String> {
    let records = (0..5).map(|_| OutcomeRecord::new(OutcomeKind::ConnectionFailure, secs(2)));

    let summary = summarise(records);

    check_counts(&summary)?;
    if summary.connection_failures != summary.total_requests || summary.successful_requests != 0 {
        return Err(format!("Unexpected counts: {:?}", summary));
    }
    let timing = [
        summary.total_time,
        summary.min_response_time,
        summary.average_response_time,
        summary.max_response_time,
        summary.requests_per_second,
    ];
    if timing.iter().any(Option::is_some) {
        return Err(format!("Expected undefined timing: {:?}", summary));
    }
    Ok(())
}

#[test]
fn mixed_outcomes() -> Result<(), String> {
    let records = [
        OutcomeRecord::new(OutcomeKind::Success, secs(1)),
        OutcomeRecord::new(OutcomeKind::Throttled, secs(7)),
        OutcomeRecord::new(OutcomeKind::Success, secs(3)),
        OutcomeRecord::new(OutcomeKind::OtherFailure, secs(9)),
    ];

    let summary = summarise(records);

    check_counts(&summary)?;
    let counts = (
        summary.total_requests,
        summary.successful_requests,
        summary.throttled_requests,
        summary.other_failed_requests,
        summary.connection_failures,
    );
    if counts != (4, 2, 1, 1, 0) {
        return Err(format!("Unexpected counts: {:?}", counts));
    }
    if !approx(summary.min_response_time, 1.0) || !approx(summary.max_response_time, 3.0) {
        return Err(format!("Throttled/failed durations leaked: {:?}", summary));
    }
    if !approx(summary.average_response_time, 2.0) {
        return Err(format!("Unexpected average: {:?}", summary));
    }
    if !approx(summary.requests_per_second, 0.5) {
        return Err(format!("Unexpected rps: {:?}", summary));
    }
    Ok(())
}

#[test]
fn only_non_success_responses_leave_timing_undefined() -> Result<(), String> {
    let records = [
        OutcomeRecord::new(OutcomeKind::Throttled, secs(1)),
        OutcomeRecord::new(OutcomeKind::OtherFailure, secs(1)),
    ];
    let summary = summarise(records);
    check_counts(&summary)?;
    if summary.min_response_time.is_some()
        || summary.max_response_time.is_some()
        || summary.total_time.is_some()
    {
        return Err(format!("Expected undefined timing: {:?}", summary));
    }
    Ok(())
}

#[test]
fn empty_sequence_is_all_zero_and_undefined() -> Result<(), String> {
    let summary = summarise(std::iter::empty());
    check_counts(&summary)?;
    if summary.total_requests != 0 || summary.requests_per_second.is_some() {
        return Err(format!("Unexpected empty summary: {:?}", summary));
    }
    Ok(())
}

#[test]
fn zero_duration_successes_never_produce_infinity() -> Result<(), String> {
    let records = (0..3).map(|_| OutcomeRecord::new(OutcomeKind::Success, Duration::ZERO));
    let summary = summarise(records);
    if summary.requests_per_second.is_some() {
        return Err(format!("Expected undefined rps: {:?}", summary));
    }
    if !approx(summary.average_response_time, 0.0) {
        return Err(format!("Expected zero average: {:?}", summary));
    }
    Ok(())
}

#[test]
fn counters_hold_for_every_kind_mix() -> Result<(), String> {
    let kinds = [
        OutcomeKind::Success,
        OutcomeKind::Throttled,
        OutcomeKind::ConnectionFailure,
        OutcomeKind::OtherFailure,
    ];
    for len in 0..24_u64 {
        let records = (0..len).zip(kinds.iter().cycle()).map(|(index, kind)| {
            OutcomeRecord::new(*kind, Duration::from_millis(index.saturating_add(1)))
        });
        let summary = summarise(records);
        check_counts(&summary)?;
        if summary.total_requests != len {
            return Err(format!("Dropped records at len {}", len));
        }
    }
    Ok(())
}

#[test]
fn fold_is_order_independent() -> Result<(), String> {
    let forward = [
        OutcomeRecord::new(OutcomeKind::Success, secs(5)),
        OutcomeRecord::new(OutcomeKind::ConnectionFailure, secs(1)),
        OutcomeRecord::new(OutcomeKind::Success, secs(2)),
    ];
    let mut reversed = forward;
    reversed.reverse();
    if summarise(forward) != summarise(reversed) {
        return Err("Summary depends on arrival order".to_owned());
    }
    Ok(())
}

#[test]
fn safe_div_policy() -> Result<(), String> {
    if safe_div(1.0, 0.0).is_some() || safe_div(0.0, 0.0).is_some() {
        return Err("Zero divisor must be undefined".to_owned());
    }
    if safe_div(f64::MAX, f64::MIN_POSITIVE).is_some() {
        return Err("Overflow must be undefined".to_owned());
    }
    if !approx(safe_div(3.0, 2.0), 1.5) {
        return Err("Unexpected quotient".to_owned());
    }
    Ok(())
}

#[test]
fn aggregate_drains_channel_until_closed() -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(async {
        let (tx, rx) = mpsc::channel::<OutcomeRecord>(4);
        let producer = tokio::spawn(async move {
            for value in 1..=4 {
                let record = OutcomeRecord::new(OutcomeKind::Success, secs(value));
                if tx.send(record).await.is_err() {
                    return;
                }
            }
        });

        let summary = aggregate(rx).await;
        producer
            .await
            .map_err(|err| format!("producer failed: {}", err))?;

        if summary.successful_requests != 4 || !approx(summary.average_response_time, 2.5) {
            return Err(format!("Unexpected summary: {:?}", summary));
        }
        Ok(())
    })
}
