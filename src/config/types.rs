use std::time::Duration;

use serde::Deserialize;

use crate::args::{HttpMethod, OutputFormat, parsers::parse_duration_value};
use crate::error::ValidationError;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub method: Option<HttpMethod>,
    pub url: Option<String>,
    #[serde(alias = "concurrency")]
    pub workers: Option<usize>,
    pub requests: Option<u64>,
    pub timeout: Option<DurationValue>,
    pub insecure: Option<bool>,
    pub stream: Option<bool>,
    pub payload_file: Option<String>,
    pub output_format: Option<OutputFormat>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(0) => Err(ValidationError::DurationZero),
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration_value(text),
        }
    }
}
