//! HTTP client for the Gemini `generateContent` REST API.
//!
//! Wraps `reqwest` with API key handling, typed request/response bodies and
//! transient-error retries. All three gateway operations go through the same
//! endpoint; they differ only in request shape and which part of the answer
//! is read back.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::{Client, Url};

use crate::error::GatewayError;
use crate::gateway::ModelGateway;
use crate::retry::retry_with_backoff;
use crate::types::{
    Content, ErrorEnvelope, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    ImageConfig, InlineData, RequestPart, SearchResult, Tool, WireBlob,
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";

/// Connection and model settings for [`GeminiClient`].
#[derive(Clone)]
pub struct GeminiOptions {
    pub api_key: String,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub image_aspect_ratio: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}

impl GeminiOptions {
    /// Production defaults for everything except the key.
    #[must_use]
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            text_model: "gemini-3-flash-preview".to_owned(),
            image_model: "gemini-3-pro-image-preview".to_owned(),
            image_aspect_ratio: "16:9".to_owned(),
            timeout_secs: 60,
            max_retries: 2,
            retry_backoff_base_ms: 1_000,
        }
    }
}

impl std::fmt::Debug for GeminiOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiOptions")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("image_aspect_ratio", &self.image_aspect_ratio)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .finish()
    }
}

/// [`ModelGateway`] backed by the Gemini REST API.
///
/// Point `base_url` at a mock server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: Url,
    text_model: String,
    image_model: String,
    image_aspect_ratio: String,
    max_retries: u32,
    retry_backoff_base_ms: u64,
}

impl GeminiClient {
    /// Creates a new client from `options`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GatewayError::InvalidUrl`] if `base_url`
    /// is not a valid URL.
    pub fn new(options: GeminiOptions) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("postpilot/0.1 (content-studio)")
            .build()?;

        // Normalise: exactly one trailing slash so `join` appends rather than
        // replacing the last path segment.
        let normalised = format!("{}/", options.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| {
            GatewayError::InvalidUrl(format!("invalid base URL '{}': {e}", options.base_url))
        })?;

        Ok(Self {
            client,
            api_key: options.api_key,
            base_url,
            text_model: options.text_model,
            image_model: options.image_model,
            image_aspect_ratio: options.image_aspect_ratio,
            max_retries: options.max_retries,
            retry_backoff_base_ms: options.retry_backoff_base_ms,
        })
    }

    /// `{base}/v1beta/models/{model}:generateContent`
    fn endpoint(&self, model: &str) -> Result<Url, GatewayError> {
        self.base_url
            .join(&format!("v1beta/models/{model}:generateContent"))
            .map_err(|e| GatewayError::InvalidUrl(format!("model '{model}': {e}")))
    }

    /// Sends `request` to `model`, retrying transient failures.
    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest<'_>,
    ) -> Result<GenerateContentResponse, GatewayError> {
        let url = self.endpoint(model)?;
        let url = &url;
        retry_with_backoff(self.max_retries, self.retry_backoff_base_ms, move || {
            self.send_once(model, url, request)
        })
        .await
    }

    /// One POST: asserts a 2xx status and parses the response envelope.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Api`] for non-2xx statuses (with the API's
    /// error message when present), [`GatewayError::Http`] on network failure,
    /// and [`GatewayError::Deserialize`] if the body is not a response envelope.
    async fn send_once(
        &self,
        model: &str,
        url: &Url,
        request: &GenerateContentRequest<'_>,
    ) -> Result<GenerateContentResponse, GatewayError> {
        let response = self
            .client
            .post(url.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| body.chars().take(200).collect());
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| GatewayError::Deserialize {
            context: format!("generateContent({model})"),
            source: e,
        })
    }
}

fn to_wire(blob: &InlineData) -> WireBlob {
    WireBlob {
        mime_type: blob.mime_type.clone(),
        data: BASE64.encode(&blob.data),
    }
}

#[async_trait]
impl ModelGateway for GeminiClient {
    async fn generate_text(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
        attachments: &[InlineData],
    ) -> Result<serde_json::Value, GatewayError> {
        let mut parts: Vec<RequestPart<'_>> = attachments
            .iter()
            .map(|a| RequestPart::Inline {
                inline_data: to_wire(a),
            })
            .collect();
        parts.push(RequestPart::Text { text: prompt });

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts,
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json"),
                response_schema: Some(schema),
                ..GenerationConfig::default()
            }),
            tools: Vec::new(),
        };

        let response = self.generate(&self.text_model, &request).await?;
        let text = response.text();
        if text.trim().is_empty() {
            return Err(GatewayError::EmptyResponse("structured text".to_owned()));
        }

        serde_json::from_str(&text).map_err(|e| GatewayError::Deserialize {
            context: "structured text".to_owned(),
            source: e,
        })
    }

    async fn generate_image(
        &self,
        prompt: &str,
        reference: Option<&InlineData>,
    ) -> Result<Option<InlineData>, GatewayError> {
        let mut parts = Vec::with_capacity(2);
        if let Some(reference) = reference {
            parts.push(RequestPart::Inline {
                inline_data: to_wire(reference),
            });
        }
        parts.push(RequestPart::Text { text: prompt });

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts,
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["TEXT", "IMAGE"]),
                image_config: Some(ImageConfig {
                    aspect_ratio: &self.image_aspect_ratio,
                }),
                ..GenerationConfig::default()
            }),
            tools: Vec::new(),
        };

        let response = self.generate(&self.image_model, &request).await?;
        let Some(blob) = response.into_first_blob() else {
            return Ok(None);
        };

        let data = BASE64
            .decode(blob.data.as_bytes())
            .map_err(|e| GatewayError::InvalidImage(e.to_string()))?;
        Ok(Some(InlineData {
            mime_type: blob.mime_type,
            data,
        }))
    }

    async fn search(&self, query: &str) -> Result<SearchResult, GatewayError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart::Text { text: query }],
            }],
            generation_config: None,
            tools: vec![Tool {
                google_search: serde_json::Map::new(),
            }],
        };

        let response = self.generate(&self.text_model, &request).await?;
        Ok(SearchResult {
            summary_text: response.text(),
            source_urls: response.source_urls(),
        })
    }
}
