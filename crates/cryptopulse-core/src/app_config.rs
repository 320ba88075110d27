use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Twitter API v2 app-only bearer token. Only required for fetching.
    pub twitter_bearer_token: Option<String>,
    /// Optional YAML file overriding the built-in account list.
    pub accounts_path: Option<PathBuf>,
    /// Optional VADER-format lexicon file replacing the built-in lexicon.
    pub lexicon_path: Option<PathBuf>,
    pub output_path: PathBuf,
    pub max_results: u32,
    pub min_text_length: usize,
    pub request_timeout_secs: u64,
    pub lookup_delay_ms: u64,
    pub fetch_delay_ms: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}

impl AppConfig {
    /// Return the bearer token or a [`crate::ConfigError::MissingEnvVar`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` when `TWITTER_BEARER_TOKEN` was not set.
    pub fn require_bearer_token(&self) -> Result<&str, crate::ConfigError> {
        self.twitter_bearer_token
            .as_deref()
            .ok_or_else(|| crate::ConfigError::MissingEnvVar("TWITTER_BEARER_TOKEN".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field(
                "twitter_bearer_token",
                &self.twitter_bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .field("accounts_path", &self.accounts_path)
            .field("lexicon_path", &self.lexicon_path)
            .field("output_path", &self.output_path)
            .field("max_results", &self.max_results)
            .field("min_text_length", &self.min_text_length)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("lookup_delay_ms", &self.lookup_delay_ms)
            .field("fetch_delay_ms", &self.fetch_delay_ms)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .finish()
    }
}
