use std::time::Duration;

/// Public ModelScope inference endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api-inference.modelscope.cn/v1";

/// Model used when a request does not name one.
pub const DEFAULT_MODEL: &str = "Tongyi-MAI/Z-Image-Turbo";

pub const DEFAULT_STEPS: u32 = 9;
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 35;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3000);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn normalize(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Immutable configuration for a [`ModelScopeClient`](crate::ModelScopeClient).
///
/// Use [`ModelScopeConfig::builder()`] for ergonomic construction,
/// [`ModelScopeConfig::from_env()`] to pick up overrides from the
/// environment, or [`ModelScopeConfig::default()`] for the public endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelScopeConfig {
    /// API base URL, without a trailing slash.
    pub base_url: String,

    /// Maximum number of status queries before giving up.
    pub max_poll_attempts: u32,

    /// Fixed delay between status queries.
    pub poll_interval: Duration,

    /// Per-request timeout applied by the default transport.
    pub request_timeout: Duration,

    /// Model identifier used when a request leaves it unset.
    pub default_model: String,

    /// Step count used when a request leaves it unset.
    pub default_steps: u32,
}

impl Default for ModelScopeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_poll_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            default_model: DEFAULT_MODEL.to_string(),
            default_steps: DEFAULT_STEPS,
        }
    }
}

impl ModelScopeConfig {
    /// Start building a config with the builder pattern.
    pub fn builder() -> ModelScopeConfigBuilder {
        ModelScopeConfigBuilder::default()
    }

    /// Defaults overridden by any of these environment variables:
    ///
    /// | Variable | Field |
    /// |---|---|
    /// | `MODELSCOPE_BASE_URL` | `base_url` |
    /// | `MODELSCOPE_MAX_POLL_ATTEMPTS` | `max_poll_attempts` |
    /// | `MODELSCOPE_POLL_INTERVAL_MS` | `poll_interval` |
    /// | `MODELSCOPE_REQUEST_TIMEOUT_SECS` | `request_timeout` |
    /// | `MODELSCOPE_DEFAULT_MODEL` | `default_model` |
    ///
    /// Unset, empty, or unparseable values keep the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut builder = Self::builder();

        if let Some(url) = get("MODELSCOPE_BASE_URL") {
            builder = builder.with_base_url(url);
        }
        if let Some(attempts) = get("MODELSCOPE_MAX_POLL_ATTEMPTS").and_then(|v| v.parse().ok()) {
            builder = builder.with_max_poll_attempts(attempts);
        }
        if let Some(ms) = get("MODELSCOPE_POLL_INTERVAL_MS").and_then(|v| v.parse().ok()) {
            builder = builder.with_poll_interval(Duration::from_millis(ms));
        }
        if let Some(secs) = get("MODELSCOPE_REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            builder = builder.with_request_timeout(Duration::from_secs(secs));
        }
        if let Some(model) = get("MODELSCOPE_DEFAULT_MODEL") {
            builder = builder.with_default_model(model);
        }

        builder.build()
    }
}

/// Builder for [`ModelScopeConfig`].
#[derive(Default)]
pub struct ModelScopeConfigBuilder {
    config: ModelScopeConfig,
}

impl ModelScopeConfigBuilder {
    /// Set the API base URL. Trailing slashes are stripped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = normalize(url.into());
        self
    }

    /// Set the maximum number of status queries.
    pub fn with_max_poll_attempts(mut self, attempts: u32) -> Self {
        self.config.max_poll_attempts = attempts;
        self
    }

    /// Set the fixed delay between status queries.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    /// Set the per-request timeout used by the default transport.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Set the model used when a request leaves it unset or empty.
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.config.default_model = model.into();
        self
    }

    /// Set the step count used when a request leaves it unset.
    pub fn with_default_steps(mut self, steps: u32) -> Self {
        self.config.default_steps = steps;
        self
    }

    /// Build the final [`ModelScopeConfig`].
    pub fn build(self) -> ModelScopeConfig {
        self.config
    }
}
