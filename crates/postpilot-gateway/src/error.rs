use thiserror::Error;

/// Errors returned by a [`crate::ModelGateway`].
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("model API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The model answered but produced no usable text.
    #[error("empty model response for {0}")]
    EmptyResponse(String),

    /// Inline image data was not valid base64.
    #[error("invalid inline image data: {0}")]
    InvalidImage(String),

    /// The base URL or request URL could not be built.
    #[error("invalid gateway URL: {0}")]
    InvalidUrl(String),
}

impl GatewayError {
    /// Whether the failure is about the payload rather than reaching the model.
    #[must_use]
    pub fn is_malformed_payload(&self) -> bool {
        matches!(
            self,
            GatewayError::Deserialize { .. }
                | GatewayError::EmptyResponse(_)
                | GatewayError::InvalidImage(_)
        )
    }
}
