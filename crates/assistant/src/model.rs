use async_trait::async_trait;
use caloriewise_shared::{Error, Result};

/// One structured generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Flow name, used for logging.
    pub flow: &'static str,
    pub prompt: String,
    /// Shape the model is asked to answer with.
    pub output_schema: serde_json::Value,
}

/// External text generation service.
///
/// Implementations return the JSON payload the model produced; conformance
/// to `output_schema` is checked by the caller.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<serde_json::Value>;
}

/// Used when no API key is configured. Every call fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredModel;

#[async_trait]
impl GenerativeModel for UnconfiguredModel {
    async fn generate(&self, request: GenerationRequest) -> Result<serde_json::Value> {
        tracing::warn!(flow = request.flow, "generative model is not configured");

        Err(Error::generation("generative model API key is not configured"))
    }
}
