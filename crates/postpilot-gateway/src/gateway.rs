use async_trait::async_trait;

use crate::error::GatewayError;
use crate::types::{InlineData, SearchResult};

/// Stateless request/response access to a generative model.
///
/// Implementations must not hold state between calls; the pipeline assumes
/// any call can be retried or abandoned independently.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Generate structured JSON conforming to `schema`.
    ///
    /// `attachments` are sent as inline parts ahead of the prompt (e.g. a PDF).
    async fn generate_text(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
        attachments: &[InlineData],
    ) -> Result<serde_json::Value, GatewayError>;

    /// Render one image. `Ok(None)` means the model answered without image data.
    async fn generate_image(
        &self,
        prompt: &str,
        reference: Option<&InlineData>,
    ) -> Result<Option<InlineData>, GatewayError>;

    /// Run a grounded web search and summarise the results.
    async fn search(&self, query: &str) -> Result<SearchResult, GatewayError>;
}
