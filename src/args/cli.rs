use clap::Parser;
use std::time::Duration;

use super::parsers::{
    parse_bool_env, parse_duration_arg, parse_positive_u64, parse_positive_usize,
};
use super::types::{HttpMethod, OutputFormat, PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Async HTTP load tester: shards a fixed request count across concurrent workers and reports latency and throughput, with full-lifetime timing for SSE streams.",
    next_help_heading = "Advanced Options"
)]
pub struct TesterArgs {
    /// HTTP method to use
    #[arg(
        long,
        short = 'X',
        env = "BURST_METHOD",
        ignore_case = true,
        value_enum,
        help_heading = "Common Options"
    )]
    pub method: Option<HttpMethod>,

    /// Target URL for the load test
    #[arg(long, short, env = "BURST_URL", help_heading = "Common Options")]
    pub url: Option<String>,

    /// Number of concurrent workers
    #[arg(
        long,
        short = 'w',
        env = "BURST_WORKERS",
        default_value = "1",
        value_parser = parse_positive_usize,
        help_heading = "Common Options"
    )]
    pub workers: PositiveUsize,

    /// Total number of requests, split evenly across workers
    #[arg(
        long,
        short = 'n',
        env = "BURST_REQUESTS",
        default_value = "1",
        value_parser = parse_positive_u64,
        help_heading = "Common Options"
    )]
    pub requests: PositiveU64,

    /// Request timeout (supports ms/s/m/h, ignored in stream mode)
    #[arg(
        long = "timeout",
        short = 't',
        env = "BURST_TIMEOUT",
        default_value = "3s",
        value_parser = parse_duration_arg,
        help_heading = "Common Options"
    )]
    pub request_timeout: Duration,

    /// (TLS) Accept invalid certs
    #[arg(long, short = 'k', env = "BURST_INSECURE", value_parser = parse_bool_env)]
    pub insecure: bool,

    /// Treat GET responses as server-sent event streams and time the whole stream
    #[arg(long, short = 'S', env = "BURST_STREAM", value_parser = parse_bool_env)]
    pub stream: bool,

    /// JSON file sent as the request body (POST/PUT/PATCH only)
    #[arg(long = "payload-file", short = 'f', env = "BURST_PAYLOAD_FILE")]
    pub payload_file: Option<String>,

    /// Summary output format
    #[arg(long = "output-format", value_enum, help_heading = "Common Options")]
    pub output_format: Option<OutputFormat>,

    /// Path to config file (TOML/JSON). Defaults to ./burst.toml or ./burst.json if present.
    #[arg(long, short = 'c', help_heading = "Common Options")]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by BURST_LOG/RUST_LOG)
    #[arg(long, short = 'v', alias = "debug")]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}

impl TesterArgs {
    /// Streaming only applies to GET, the only method an event source issues.
    #[must_use]
    pub const fn streams(&self) -> bool {
        self.stream && matches!(self.method, Some(HttpMethod::Get))
    }
}
