use std::time::Duration;

use crate::submission::RetryPolicy;

/// Test endpoint used until a real lead webhook is configured.
pub const DEFAULT_SUBMISSION_ENDPOINT: &str = "https://httpbin.org/post";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub submission_endpoint: String,
    pub submission_timeout_ms: u64,
    pub submission_max_attempts: u32,
    pub submission_backoff_ms: u64,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            submission_endpoint: DEFAULT_SUBMISSION_ENDPOINT.to_string(),
            submission_timeout_ms: 10_000,
            submission_max_attempts: 3,
            submission_backoff_ms: 1_000,
            rate_limit_per_second: 10,
            rate_limit_burst: 20,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let config = Self {
            port: parse_var("PORT", defaults.port)
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))
                .and_then(validate_port)?,
            submission_endpoint: validate_endpoint(
                std::env::var("SUBMISSION_ENDPOINT")
                    .ok()
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| defaults.submission_endpoint.clone()),
            )?,
            submission_timeout_ms: parse_var(
                "SUBMISSION_TIMEOUT_MS",
                defaults.submission_timeout_ms,
            )
            .and_then(|ms| {
                if ms == 0 {
                    anyhow::bail!("SUBMISSION_TIMEOUT_MS must be greater than 0");
                }
                Ok(ms)
            })?,
            submission_max_attempts: parse_var(
                "SUBMISSION_MAX_ATTEMPTS",
                defaults.submission_max_attempts,
            )
            .and_then(|attempts| {
                if attempts == 0 {
                    anyhow::bail!("SUBMISSION_MAX_ATTEMPTS must be at least 1");
                }
                Ok(attempts)
            })?,
            submission_backoff_ms: parse_var(
                "SUBMISSION_BACKOFF_MS",
                defaults.submission_backoff_ms,
            )?,
            rate_limit_per_second: parse_var(
                "RATE_LIMIT_PER_SECOND",
                defaults.rate_limit_per_second,
            )?,
            rate_limit_burst: parse_var("RATE_LIMIT_BURST", defaults.rate_limit_burst)?,
        };

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Submission endpoint: {}", config.submission_endpoint);
        tracing::debug!(
            "Submission policy: timeout={}ms attempts={} backoff={}ms",
            config.submission_timeout_ms,
            config.submission_max_attempts,
            config.submission_backoff_ms
        );
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            timeout: Duration::from_millis(self.submission_timeout_ms),
            max_attempts: self.submission_max_attempts,
            base_delay: Duration::from_millis(self.submission_backoff_ms),
        }
    }
}

fn parse_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} has an invalid value: {}", key, raw)),
        _ => Ok(default),
    }
}

/// Port 0 would bind an ephemeral port the landing pages cannot know.
pub fn validate_port(port: u16) -> anyhow::Result<u16> {
    if port == 0 {
        anyhow::bail!("PORT must be a valid number between 1-65535");
    }
    Ok(port)
}

/// Endpoint must be an absolute http(s) URL.
pub fn validate_endpoint(raw: String) -> anyhow::Result<String> {
    let parsed = url::Url::parse(raw.trim())
        .map_err(|e| anyhow::anyhow!("SUBMISSION_ENDPOINT is not a valid URL: {}", e))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        anyhow::bail!("SUBMISSION_ENDPOINT must start with http:// or https://");
    }
    Ok(raw.trim().to_string())
}
