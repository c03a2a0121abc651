//! Configuration loading and application.
mod apply;
mod loader;
mod payload;
pub mod types;


pub use apply::apply_config;
pub use loader::load_config;
pub use payload::{load_payload, read_json_file};

pub(crate) use loader::load_config_file;
