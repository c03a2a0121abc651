//! Core library for the `burst` CLI.
//!
//! This crate provides the building blocks used by the binary: CLI argument
//! types, configuration parsing, the request workers and dispatcher, outcome
//! classification, and summary aggregation. The primary user-facing interface
//! is the `burst` command-line application; library APIs may evolve as the CLI
//! grows.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod shutdown;

#[cfg(feature = "fuzzing")]
pub mod fuzzing;
