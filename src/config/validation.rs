use crate::config::types::Settings;
use crate::ConfigError;
use regex::Regex;
use url::Url;

/// Validates the entire settings object
///
/// Runs before any worker starts; a crawl never begins with settings that
/// fail any of these checks.
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    validate_root_url(&settings.root_url)?;
    validate_limits(settings)?;
    validate_scope(settings)?;
    Ok(())
}

/// Validates the root URL: non-empty, parseable, absolute http(s)
fn validate_root_url(root_url: &str) -> Result<(), ConfigError> {
    if root_url.is_empty() {
        return Err(ConfigError::Validation(
            "root_url cannot be empty".to_string(),
        ));
    }

    let url = Url::parse(root_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid root_url '{}': {}", root_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "root_url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "root_url '{}' has no host",
            root_url
        )));
    }

    Ok(())
}

/// Validates quota, worker count, and delay
fn validate_limits(settings: &Settings) -> Result<(), ConfigError> {
    if settings.max_links == 0 {
        return Err(ConfigError::Validation(
            "max_links must be greater than 0".to_string(),
        ));
    }

    if settings.max_workers == 0 {
        return Err(ConfigError::Validation(
            "max_workers must be greater than 0".to_string(),
        ));
    }

    if !settings.delay.is_finite() || settings.delay < 0.0 {
        return Err(ConfigError::Validation(format!(
            "delay must be a non-negative number, got {}",
            settings.delay
        )));
    }

    Ok(())
}

/// Validates link scope settings
fn validate_scope(settings: &Settings) -> Result<(), ConfigError> {
    if settings.internal_links_only && settings.external_links_only {
        return Err(ConfigError::Validation(
            "only one of internal_links_only and external_links_only can be set".to_string(),
        ));
    }

    // Compile the pattern once here so a bad regex fails fast, not mid-crawl
    if let Some(pattern) = &settings.url_regex {
        Regex::new(pattern)?;
    }

    Ok(())
}
