use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, info};

use crate::clock::{Sleeper, TokioSleeper};
use crate::config::ModelScopeConfig;
use crate::error::{ModelScopeError, Result};
use crate::poll::poll_for_result;
use crate::provider::{ImageProvider, PROVIDER_ID, PROVIDER_NAME};
use crate::request::GenerationRequest;
use crate::seed::{RandomSeed, SeedSource};
use crate::submit::submit_task;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{GenerationResult, SubmitBody, TaskHandle};

/// Shortest token accepted before any network call is made.
pub const MIN_TOKEN_LEN: usize = 8;

/// Trim and check a caller-supplied token.
///
/// Absent or empty → `AuthRequired`. Shorter than [`MIN_TOKEN_LEN`] after
/// trimming → `AuthInvalid`.
pub fn validate_token(token: Option<&str>) -> Result<&str> {
    let token = match token {
        Some(t) if !t.is_empty() => t.trim(),
        _ => return Err(ModelScopeError::auth_required(PROVIDER_NAME)),
    };
    if token.chars().count() < MIN_TOKEN_LEN {
        return Err(ModelScopeError::auth_invalid(PROVIDER_NAME, "Token is too short"));
    }
    Ok(token)
}

/// Async client for the ModelScope image-generation API.
///
/// Holds only immutable configuration and stateless capabilities, so one
/// instance can be cloned and shared across concurrent calls.
///
/// # Example
/// ```no_run
/// use modelscope_rs::{GenerationRequest, ModelScopeClient};
///
/// # async fn example() -> modelscope_rs::Result<()> {
/// let client = ModelScopeClient::default();
/// let request = GenerationRequest::new("a red panda in the snow")
///     .size(1024, 1024)
///     .token("ms-your-token-here");
/// let result = client.generate(&request).await?;
/// println!("{} (seed {})", result.url, result.seed);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ModelScopeClient {
    config: Arc<ModelScopeConfig>,
    transport: Arc<dyn Transport>,
    sleeper: Arc<dyn Sleeper>,
    seeds: Arc<dyn SeedSource>,
}

impl std::fmt::Debug for ModelScopeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelScopeClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for ModelScopeClient {
    fn default() -> Self {
        Self::new(ModelScopeConfig::default())
    }
}

impl ModelScopeClient {
    /// Create a client with the reqwest transport, tokio sleep, and random seeds.
    pub fn new(config: ModelScopeConfig) -> Self {
        Self {
            transport: Arc::new(ReqwestTransport::new(config.request_timeout)),
            config: Arc::new(config),
            sleeper: Arc::new(TokioSleeper),
            seeds: Arc::new(RandomSeed),
        }
    }

    /// Create a client configured from `MODELSCOPE_*` environment variables.
    pub fn from_env() -> Self {
        Self::new(ModelScopeConfig::from_env())
    }

    /// Use a custom `reqwest::Client` (for connection pooling, proxies, TLS).
    ///
    /// This installs a new [`ReqwestTransport`] and so replaces any
    /// transport set earlier with [`with_transport`](Self::with_transport).
    /// Whichever of the two is called last is the one used.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.transport = Arc::new(
            ReqwestTransport::new(self.config.request_timeout).with_http_client(client),
        );
        self
    }

    /// Replace the HTTP transport, including one installed by
    /// [`with_http_client`](Self::with_http_client).
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Arc::new(transport);
        self
    }

    /// Replace the clock used between status queries.
    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.sleeper = Arc::new(sleeper);
        self
    }

    /// Replace the source of generated seeds.
    pub fn with_seed_source(mut self, seeds: impl SeedSource + 'static) -> Self {
        self.seeds = Arc::new(seeds);
        self
    }

    /// Configuration this client was built with.
    pub fn config(&self) -> &ModelScopeConfig {
        &self.config
    }

    // ── Generation ──────────────────────────────────────────────────

    /// Submit `request`, poll until it resolves, and return the image URL
    /// together with the seed that produced it.
    ///
    /// Token problems are reported before any network activity.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let token = validate_token(request.auth_token.as_deref())?;
        let seed = self.resolve_seed(request);
        let body = self.build_body(request, seed);

        let handle = self.submit_task(token, &body).await?;
        let url = self.poll_task(token, &handle).await?;

        info!(task_id = %handle, seed, "generation complete");
        Ok(GenerationResult { url, seed })
    }

    /// The caller's seed, or a fresh one from the seed source.
    pub fn resolve_seed(&self, request: &GenerationRequest) -> u32 {
        match request.seed {
            Some(seed) => seed,
            None => {
                let seed = self.seeds.next_seed();
                debug!(seed, "generated seed");
                seed
            }
        }
    }

    /// Assemble the submit body using this client's defaults.
    pub fn build_body(&self, request: &GenerationRequest, seed: u32) -> SubmitBody {
        request.to_body(&self.config, seed)
    }

    // ── Lower-level steps ───────────────────────────────────────────

    /// Create a task. `token` must already be validated.
    pub async fn submit_task(&self, token: &str, body: &SubmitBody) -> Result<TaskHandle> {
        submit_task(self.transport.as_ref(), &self.config.base_url, token, body).await
    }

    /// Poll an existing task to completion.
    pub async fn poll_task(&self, token: &str, handle: &TaskHandle) -> Result<String> {
        poll_for_result(
            self.transport.as_ref(),
            self.sleeper.as_ref(),
            &self.config,
            token,
            handle,
        )
        .await
    }
}

#[async_trait]
impl ImageProvider for ModelScopeClient {
    fn id(&self) -> &str {
        PROVIDER_ID
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        ModelScopeClient::generate(self, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::seed::MAX_SEED;

    struct FixedSeed(u32);

    impl SeedSource for FixedSeed {
        fn next_seed(&self) -> u32 {
            self.0
        }
    }

    #[test]
    fn test_validate_token_missing() {
        assert_eq!(validate_token(None).unwrap_err().code(), ErrorCode::AuthRequired);
        assert_eq!(validate_token(Some("")).unwrap_err().code(), ErrorCode::AuthRequired);
    }

    #[test]
    fn test_validate_token_too_short() {
        for token in ["short", "       ", "  1234567  "] {
            let err = validate_token(Some(token)).unwrap_err();
            assert_eq!(err.code(), ErrorCode::AuthInvalid);
            assert_eq!(err.message(), Some("Token is too short"));
        }
    }

    #[test]
    fn test_validate_token_trims() {
        assert_eq!(validate_token(Some("  12345678\n")).unwrap(), "12345678");
    }

    #[test]
    fn test_resolve_seed() {
        let client = ModelScopeClient::default().with_seed_source(FixedSeed(1234));
        assert_eq!(client.resolve_seed(&GenerationRequest::new("x")), 1234);
        assert_eq!(client.resolve_seed(&GenerationRequest::new("x").seed(99)), 99);

        let client = ModelScopeClient::default();
        assert!(client.resolve_seed(&GenerationRequest::new("x")) < MAX_SEED);
    }

    #[test]
    fn test_provider_identity() {
        let provider: Arc<dyn ImageProvider> = Arc::new(ModelScopeClient::default());
        assert_eq!(provider.id(), "modelscope");
        assert_eq!(provider.name(), "ModelScope");
    }

    #[test]
    fn test_debug_shows_config() {
        let client = ModelScopeClient::new(
            ModelScopeConfig::builder().with_base_url("http://local/").build(),
        );
        let debug = format!("{:?}", client);
        assert!(debug.contains("http://local"));
        assert_eq!(client.config().base_url, "http://local");
    }

    #[test]
    fn test_client_is_shareable() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<ModelScopeClient>();
    }
}
