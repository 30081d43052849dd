use std::env;

use tracing_subscriber::EnvFilter;

use super::commands::CliError;

pub(crate) const HEADER_ENV_VAR: &str = "SCENE_EXPORT_HEADER";

pub(crate) fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

/// Header index used when `--header` is not given.
pub(crate) fn default_header_index() -> Result<u32, CliError> {
    match env::var(HEADER_ENV_VAR) {
        Ok(raw) => parse_header_index(&raw),
        Err(_) => Ok(0),
    }
}

fn parse_header_index(raw: &str) -> Result<u32, CliError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| CliError::InvalidHeaderEnv {
            var: HEADER_ENV_VAR,
            value: raw.to_string(),
        })
}
