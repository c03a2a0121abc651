use crate::metrics::OutcomeKind;

pub const STATUS_SUCCESS: u16 = 200;
pub const STATUS_THROTTLED: u16 = 429;

/// Maps a transport result to an outcome. `None` means no response was
/// obtained at all (refused connection, DNS failure, timeout).
#[must_use]
pub const fn classify(status: Option<u16>) -> OutcomeKind {
    match status {
        None => OutcomeKind::ConnectionFailure,
        Some(STATUS_SUCCESS) => OutcomeKind::Success,
        Some(STATUS_THROTTLED) => OutcomeKind::Throttled,
        Some(_) => OutcomeKind::OtherFailure,
    }
}
