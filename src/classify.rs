//! Maps ModelScope error responses onto [`ModelScopeError`].

use serde_json::Value;
use tracing::debug;

use crate::error::ModelScopeError;

/// Best-effort view of a non-success response body.
///
/// Every field is optional. Bodies that are not JSON objects, and fields
/// of the wrong type, are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorPayload {
    /// `errors.message`
    pub nested_message: Option<String>,
    /// Top-level `error` string.
    pub error: Option<String>,
    /// Top-level `message` string.
    pub message: Option<String>,
    /// Top-level `code` string.
    pub code: Option<String>,
}

impl ErrorPayload {
    /// Parse a raw response body. Never fails.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(json) => Self::from_value(&json),
            Err(_) => Self::default(),
        }
    }

    /// Extract the known fields from an already-parsed body.
    pub fn from_value(json: &Value) -> Self {
        Self {
            nested_message: non_empty_str(json.pointer("/errors/message")),
            error: non_empty_str(json.get("error")),
            message: non_empty_str(json.get("message")),
            code: non_empty_str(json.get("code")),
        }
    }

    /// Message text in resolution order, or `HTTP {status}`.
    pub fn resolve_message(&self, status: u16) -> String {
        self.nested_message
            .as_deref()
            .or(self.error.as_deref())
            .or(self.message.as_deref())
            .map(String::from)
            .unwrap_or_else(|| format!("HTTP {}", status))
    }
}

pub(crate) fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Classify a non-success response into exactly one error.
///
/// First match wins:
/// 1. 401/403, "unauthorized", "invalid token" → `AuthInvalid`
/// 2. 429, "rate limit", "too many" → `RateLimited`
/// 3. "quota", "exceeded", "insufficient" → `QuotaExceeded`
/// 4. "expired" → `AuthExpired`
/// 5. anything else → `ProviderError`
pub fn classify(provider: &str, status: u16, payload: &ErrorPayload) -> ModelScopeError {
    let message = payload.resolve_message(status);
    let lower = message.to_lowercase();
    let mentions = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

    if status == 401 || status == 403 || mentions(&["unauthorized", "invalid token"]) {
        ModelScopeError::auth_invalid(provider, message)
    } else if status == 429 || mentions(&["rate limit", "too many"]) {
        ModelScopeError::rate_limited(provider, message)
    } else if mentions(&["quota", "exceeded", "insufficient"]) {
        ModelScopeError::quota_exceeded(provider, message)
    } else if mentions(&["expired"]) {
        ModelScopeError::auth_expired(provider, message)
    } else {
        ModelScopeError::provider_error(provider, message)
    }
}

/// Parse `body` leniently and classify it.
///
/// The service's own `code` never affects the outcome; it is only logged.
pub fn classify_response(provider: &str, status: u16, body: &[u8]) -> ModelScopeError {
    let payload = ErrorPayload::from_body(body);
    if let Some(code) = &payload.code {
        debug!(status, remote_code = %code, "service returned an error code");
    }
    classify(provider, status, &payload)
}
