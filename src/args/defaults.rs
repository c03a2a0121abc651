pub(crate) const DEFAULT_USER_AGENT: &str = concat!("burst-loadtest/", env!("CARGO_PKG_VERSION"));

/// Config files checked in the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["burst.toml", "burst.json"];
