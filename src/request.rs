use serde_json::Value;

use crate::config::ModelScopeConfig;
use crate::types::SubmitBody;

/// A text-to-image generation request.
///
/// # Example
/// ```
/// use modelscope_rs::GenerationRequest;
///
/// let request = GenerationRequest::new("a lighthouse at dusk")
///     .negative("lowres, blurry")
///     .size(1024, 768)
///     .steps(12)
///     .guidance(3.5)
///     .token("ms-0123456789abcdef");
///
/// assert_eq!(request.size_string(), "1024x768");
/// assert!(request.seed.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub negative_prompt: Option<String>,
    pub width: u32,
    pub height: u32,
    /// Falls back to the client's default model.
    pub model: Option<String>,
    /// Generated when `None`.
    pub seed: Option<u32>,
    /// Falls back to the client's default step count.
    pub steps: Option<u32>,
    pub guidance_scale: Option<f64>,
    /// Style adapters, passed through untouched.
    pub loras: Option<Value>,
    pub auth_token: Option<String>,
}

impl GenerationRequest {
    /// Create a request for `prompt` at 1024x1024 with everything else unset.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            negative_prompt: None,
            width: 1024,
            height: 1024,
            model: None,
            seed: None,
            steps: None,
            guidance_scale: None,
            loras: None,
            auth_token: None,
        }
    }

    /// Set the negative prompt.
    pub fn negative(mut self, prompt: impl Into<String>) -> Self {
        self.negative_prompt = Some(prompt.into());
        self
    }

    /// Set output dimensions.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the model identifier, e.g. `"Tongyi-MAI/Z-Image-Turbo"`.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Pin the seed instead of generating one.
    ///
    /// Any `u32` is accepted and sent as given, including values at or
    /// above [`MAX_SEED`](crate::seed::MAX_SEED); that bound only applies
    /// to generated seeds. Whether the service accepts them is up to it.
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of sampling steps.
    pub fn steps(mut self, steps: u32) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Set the guidance scale.
    pub fn guidance(mut self, scale: f64) -> Self {
        self.guidance_scale = Some(scale);
        self
    }

    /// Attach style adapters (LoRA repo ids or `{repo: weight}` maps).
    pub fn loras(mut self, loras: Value) -> Self {
        self.loras = Some(loras);
        self
    }

    /// Set the API token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// The `"{width}x{height}"` size string the API expects.
    pub fn size_string(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    /// Assemble the submit body with `seed` already resolved.
    ///
    /// An empty negative prompt counts as unset.
    pub fn to_body(&self, config: &ModelScopeConfig, seed: u32) -> SubmitBody {
        SubmitBody {
            prompt: self.prompt.clone(),
            model: self
                .model
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| config.default_model.clone()),
            size: self.size_string(),
            seed,
            steps: self.steps.unwrap_or(config.default_steps),
            negative_prompt: self.negative_prompt.clone().filter(|p| !p.is_empty()),
            guidance: self.guidance_scale,
            loras: self.loras.clone(),
        }
    }
}
