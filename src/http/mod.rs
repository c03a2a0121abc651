//! HTTP request execution: request construction, outcome classification,
//! stream timing, and the worker pool.
mod classify;
mod client;
mod dispatch;
mod request;
mod stream;
mod worker;

#[cfg(test)]
mod test_server;

pub use classify::{STATUS_SUCCESS, STATUS_THROTTLED, classify};
pub use client::{ClientSettings, build_client};
pub use dispatch::{partition, run_load};
pub use request::{RequestSpec, parse_target_url};
