use crate::error::{PachcaError, Result};
use regex::Regex;
use std::sync::OnceLock;

fn env_ref_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env reference pattern"))
}

/// Expand `${VAR_NAME}` references through `lookup`. Unknown variables are left as written.
pub fn expand_with(value: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    env_ref_pattern()
        .replace_all(value, |caps: &regex::Captures<'_>| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

pub fn validate_base_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    let parsed = reqwest::Url::parse(trimmed)
        .map_err(|e| PachcaError::ConfigError(format!("invalid base URL '{}': {}", url, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(PachcaError::ConfigError(format!(
            "base URL must be http(s): {}",
            url
        )));
    }
    Ok(trimmed.to_string())
}

pub fn validate_timeout(secs: u64) -> Result<u64> {
    if secs == 0 {
        return Err(PachcaError::ConfigError(
            "request timeout must be at least 1 second".to_string(),
        ));
    }
    Ok(secs)
}
