// src/config/validation.rs

use super::ConfigBuilder;
use crate::errors::{Error, Result};
use url::Url;

/// Validates combinations of options on the `ConfigBuilder` that clap cannot express
/// (or that library callers may get wrong).
pub(super) fn validate_builder_options(builder: &ConfigBuilder) -> Result<()> {
    match (&builder.repo_url, &builder.api_url) {
        (None, None) => {
            return Err(Error::Config(
                "either a repository URL or an API URL is required".to_string(),
            ))
        }
        (Some(_), Some(_)) => {
            return Err(Error::Config(
                "a repository URL and --api-url cannot be used together".to_string(),
            ))
        }
        _ => {}
    }

    if let Some(api_url) = &builder.api_url {
        let parsed = Url::parse(api_url)
            .map_err(|e| Error::Config(format!("invalid API URL '{}': {}", api_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "API URL '{}' must use http or https",
                api_url
            )));
        }
    }

    if builder.request_timeout.is_some_and(|t| t.is_zero()) {
        return Err(Error::Config("--timeout must be greater than 0".to_string()));
    }

    Ok(())
}
