//! Outcome records and their aggregation into run statistics.
mod aggregate;
mod types;

#[cfg(test)]
mod tests;

pub use aggregate::aggregate;
#[cfg(test)]
pub(crate) use aggregate::summarise;
pub use types::{OutcomeKind, OutcomeRecord, Summary, safe_div};
