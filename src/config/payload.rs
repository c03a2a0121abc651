use std::path::Path;

use serde_json::Value;

use crate::args::HttpMethod;
use crate::error::{AppError, AppResult, ConfigError};

/// Reads and parses a JSON payload file.
///
/// # Errors
///
/// Returns an error when the file cannot be read or is not valid JSON.
pub fn read_json_file(path: &Path) -> AppResult<Value> {
    let contents = std::fs::read(path).map_err(|err| {
        AppError::config(ConfigError::ReadPayload {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    serde_json::from_slice(&contents).map_err(|err| {
        AppError::config(ConfigError::ParsePayload {
            path: path.to_path_buf(),
            source: err,
        })
    })
}

/// Resolves the request payload for a run. Only write methods carry one; a
/// payload file configured for any other method is ignored.
///
/// # Errors
///
/// Returns an error when the configured payload file cannot be loaded.
pub fn load_payload(method: HttpMethod, payload_file: Option<&str>) -> AppResult<Option<Value>> {
    let Some(path) = payload_file.filter(|path| !path.is_empty()) else {
        return Ok(None);
    };
    if !method.accepts_body() {
        tracing::warn!(
            "Ignoring payload file {} for {} requests.",
            path,
            method.as_str()
        );
        return Ok(None);
    }

    let payload = read_json_file(Path::new(path))?;
    tracing::info!("Loaded payload from file {}", path);
    Ok(Some(payload))
}
