//! Port for the external text-generation service.

use async_trait::async_trait;

/// A single text-generation backend, identified by its model name.
///
/// Generation is opaque: a prompt string goes in, a plan text comes out.
/// No output schema is negotiated beyond the format line embedded in the
/// prompt.
#[async_trait]
pub trait Generator: Send + Sync {
    fn model(&self) -> &str;
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

/// Total source of plan texts.
///
/// Implementations try one or more [`Generator`]s and hand back
/// `fallback` when all of them fail, so providing a plan never fails.
#[allow(async_fn_in_trait)]
pub trait PlanProvider {
    async fn provide(&self, prompt: &str, fallback: String) -> GeneratedPlan;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPlan {
    pub text: String,
    pub source: PlanSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanSource {
    Generated { model: String },
    Fallback,
}

#[derive(thiserror::Error, Debug)]
pub enum GenerateError {
    #[error("request timed out")]
    Timeout,
    #[error("transport: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("empty response")]
    EmptyResponse,
}
