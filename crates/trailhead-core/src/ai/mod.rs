pub mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TrailQueryError;

/// One-shot text generation constrained by a response schema.
///
/// `Ok(None)` means the backend answered successfully but produced no text.
#[async_trait]
pub trait TrailBackend: Send + Sync {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        schema: &Value,
    ) -> Result<Option<String>, TrailQueryError>;
}
