use thiserror::Error;

use crate::transport::TransportError;

/// Errors returned by ModelScope operations.
///
/// The first eight variants are the classified taxonomy the calling
/// application branches on. Every one of them carries the provider name
/// and a human-readable message. `Network` and `Json` cover local failures
/// that never reached classification.
#[derive(Error, Debug)]
pub enum ModelScopeError {
    /// No authentication token was supplied.
    #[error("{provider}: {message}")]
    AuthRequired { provider: String, message: String },

    /// The token is malformed or was rejected by the service.
    #[error("{provider}: {message}")]
    AuthInvalid { provider: String, message: String },

    /// The service recognised the token as expired.
    #[error("{provider}: {message}")]
    AuthExpired { provider: String, message: String },

    /// Burst rate limit hit.
    #[error("{provider}: {message}")]
    RateLimited { provider: String, message: String },

    /// Account-level usage quota exhausted.
    #[error("{provider}: {message}")]
    QuotaExceeded { provider: String, message: String },

    /// The remote task failed, or succeeded without usable output.
    #[error("{provider}: generation failed: {message}")]
    GenerationFailed { provider: String, message: String },

    /// Polling budget exhausted before the task reached a terminal state.
    #[error("{provider}: {message}")]
    Timeout { provider: String, message: String },

    /// Uncategorised remote failure carrying the service's own message.
    #[error("{provider}: {message}")]
    ProviderError { provider: String, message: String },

    /// The transport could not complete a round trip.
    #[error("{context}: {source}")]
    Network {
        context: String,
        source: TransportError,
    },

    /// A success response body could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Stable, program-checkable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    AuthRequired,
    AuthInvalid,
    AuthExpired,
    RateLimited,
    QuotaExceeded,
    GenerationFailed,
    Timeout,
    ProviderError,
    Network,
    InvalidResponse,
}

impl ErrorCode {
    /// Wire-friendly code string, e.g. `AUTH_INVALID`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AuthRequired => "AUTH_REQUIRED",
            Self::AuthInvalid => "AUTH_INVALID",
            Self::AuthExpired => "AUTH_EXPIRED",
            Self::RateLimited => "RATE_LIMITED",
            Self::QuotaExceeded => "QUOTA_EXCEEDED",
            Self::GenerationFailed => "GENERATION_FAILED",
            Self::Timeout => "TIMEOUT",
            Self::ProviderError => "PROVIDER_ERROR",
            Self::Network => "NETWORK_ERROR",
            Self::InvalidResponse => "INVALID_RESPONSE",
        }
    }

    /// HTTP status a calling API should surface for this category.
    pub fn http_status(self) -> u16 {
        match self {
            Self::AuthRequired | Self::AuthInvalid | Self::AuthExpired => 401,
            Self::RateLimited | Self::QuotaExceeded => 429,
            Self::GenerationFailed => 500,
            Self::ProviderError | Self::Network | Self::InvalidResponse => 502,
            Self::Timeout => 504,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ModelScopeError {
    /// `AuthRequired` with the fixed message "API token is required".
    pub fn auth_required(provider: &str) -> Self {
        Self::AuthRequired {
            provider: provider.to_string(),
            message: "API token is required".to_string(),
        }
    }

    /// `AuthInvalid`: token malformed, too short, or rejected.
    pub fn auth_invalid(provider: &str, message: impl Into<String>) -> Self {
        Self::AuthInvalid {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    /// `AuthExpired`: the service reported the token as expired.
    pub fn auth_expired(provider: &str, message: impl Into<String>) -> Self {
        Self::AuthExpired {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    /// `RateLimited`: burst limit hit, retry later.
    pub fn rate_limited(provider: &str, message: impl Into<String>) -> Self {
        Self::RateLimited {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    /// `QuotaExceeded`: account usage exhausted.
    pub fn quota_exceeded(provider: &str, message: impl Into<String>) -> Self {
        Self::QuotaExceeded {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    /// `GenerationFailed`: the task failed or produced no usable output.
    pub fn generation_failed(provider: &str, message: impl Into<String>) -> Self {
        Self::GenerationFailed {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    /// `Timeout`: the polling budget ran out.
    pub fn timeout(provider: &str, message: impl Into<String>) -> Self {
        Self::Timeout {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    /// `ProviderError`: any other remote failure.
    pub fn provider_error(provider: &str, message: impl Into<String>) -> Self {
        Self::ProviderError {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    /// The category of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::AuthRequired { .. } => ErrorCode::AuthRequired,
            Self::AuthInvalid { .. } => ErrorCode::AuthInvalid,
            Self::AuthExpired { .. } => ErrorCode::AuthExpired,
            Self::RateLimited { .. } => ErrorCode::RateLimited,
            Self::QuotaExceeded { .. } => ErrorCode::QuotaExceeded,
            Self::GenerationFailed { .. } => ErrorCode::GenerationFailed,
            Self::Timeout { .. } => ErrorCode::Timeout,
            Self::ProviderError { .. } => ErrorCode::ProviderError,
            Self::Network { .. } => ErrorCode::Network,
            Self::Json(_) => ErrorCode::InvalidResponse,
        }
    }

    /// Originating provider name, for classified errors.
    pub fn provider(&self) -> Option<&str> {
        match self {
            Self::AuthRequired { provider, .. }
            | Self::AuthInvalid { provider, .. }
            | Self::AuthExpired { provider, .. }
            | Self::RateLimited { provider, .. }
            | Self::QuotaExceeded { provider, .. }
            | Self::GenerationFailed { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::ProviderError { provider, .. } => Some(provider),
            Self::Network { .. } | Self::Json(_) => None,
        }
    }

    /// Human-readable message, for classified errors.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::AuthRequired { message, .. }
            | Self::AuthInvalid { message, .. }
            | Self::AuthExpired { message, .. }
            | Self::RateLimited { message, .. }
            | Self::QuotaExceeded { message, .. }
            | Self::GenerationFailed { message, .. }
            | Self::Timeout { message, .. }
            | Self::ProviderError { message, .. } => Some(message),
            Self::Network { .. } | Self::Json(_) => None,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ModelScopeError>;
