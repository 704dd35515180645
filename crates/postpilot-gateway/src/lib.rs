//! Model gateway: the request/response boundary to the generative model.
//!
//! [`ModelGateway`] is the seam the content pipeline depends on. [`GeminiClient`]
//! implements it against the Gemini `generateContent` REST endpoint, with
//! retries on transient failures.

pub mod client;
pub mod error;
pub mod gateway;
pub mod schema;
pub mod types;

mod retry;

pub use client::{GeminiClient, GeminiOptions};
pub use error::GatewayError;
pub use gateway::ModelGateway;
pub use types::{InlineData, SearchResult};
