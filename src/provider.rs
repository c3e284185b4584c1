use async_trait::async_trait;

use crate::error::Result;
use crate::request::GenerationRequest;
use crate::types::GenerationResult;

/// Stable identifier used for routing.
pub const PROVIDER_ID: &str = "modelscope";

/// Display name carried in every classified error.
pub const PROVIDER_NAME: &str = "ModelScope";

/// An image-generation backend the calling application can route to.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Routing identifier, e.g. `"modelscope"`.
    fn id(&self) -> &str;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Run one generation to completion.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult>;
}
