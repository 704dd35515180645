//! Scripted in-memory gateway for stage tests.

use std::sync::Mutex;

use async_trait::async_trait;
use postpilot_core::{Language, Profile, Tone};
use postpilot_gateway::{GatewayError, InlineData, ModelGateway, SearchResult};
use serde_json::Value;

type TextFn = dyn Fn(&str) -> Result<Value, GatewayError> + Send + Sync;
type ImageFn = dyn Fn(&str, Option<&InlineData>) -> Result<Option<InlineData>, GatewayError>
    + Send
    + Sync;
type SearchFn = dyn Fn(&str) -> Result<SearchResult, GatewayError> + Send + Sync;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Text { prompt: String, attachments: usize },
    Image { prompt: String, with_reference: bool },
    Search { query: String },
}

/// Gateway whose answers come from closures keyed on the prompt.
///
/// Unscripted operations fail the way an unreachable service would.
pub(crate) struct ScriptedGateway {
    text: Box<TextFn>,
    image: Box<ImageFn>,
    search: Box<SearchFn>,
    calls: Mutex<Vec<Call>>,
}

pub(crate) fn unavailable() -> GatewayError {
    GatewayError::Api {
        status: 503,
        message: "scripted outage".to_owned(),
    }
}

impl ScriptedGateway {
    pub(crate) fn new() -> Self {
        Self {
            text: Box::new(|_| Err(unavailable())),
            image: Box::new(|_, _| Err(unavailable())),
            search: Box::new(|_| Err(unavailable())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn on_text(
        mut self,
        f: impl Fn(&str) -> Result<Value, GatewayError> + Send + Sync + 'static,
    ) -> Self {
        self.text = Box::new(f);
        self
    }

    pub(crate) fn on_image(
        mut self,
        f: impl Fn(&str, Option<&InlineData>) -> Result<Option<InlineData>, GatewayError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.image = Box::new(f);
        self
    }

    pub(crate) fn on_search(
        mut self,
        f: impl Fn(&str) -> Result<SearchResult, GatewayError> + Send + Sync + 'static,
    ) -> Self {
        self.search = Box::new(f);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ModelGateway for ScriptedGateway {
    async fn generate_text(
        &self,
        prompt: &str,
        _schema: &Value,
        attachments: &[InlineData],
    ) -> Result<Value, GatewayError> {
        self.record(Call::Text {
            prompt: prompt.to_owned(),
            attachments: attachments.len(),
        });
        (self.text)(prompt)
    }

    async fn generate_image(
        &self,
        prompt: &str,
        reference: Option<&InlineData>,
    ) -> Result<Option<InlineData>, GatewayError> {
        self.record(Call::Image {
            prompt: prompt.to_owned(),
            with_reference: reference.is_some(),
        });
        (self.image)(prompt, reference)
    }

    async fn search(&self, query: &str) -> Result<SearchResult, GatewayError> {
        self.record(Call::Search {
            query: query.to_owned(),
        });
        (self.search)(query)
    }
}

pub(crate) fn profile(language: Language) -> Profile {
    Profile {
        name: "Lucía Ortega".to_owned(),
        role: "VP of Product".to_owned(),
        selected_topics: vec![
            "Product Management".to_owned(),
            "SaaS".to_owned(),
            "Artificial Intelligence".to_owned(),
            "Growth Marketing".to_owned(),
            "Remote Work".to_owned(),
        ],
        tone: Tone::Professional,
        language,
        headshot: None,
        resume_path: None,
        website: None,
        social_links: Vec::new(),
    }
}

pub(crate) fn content_json(headline: &str) -> Value {
    serde_json::json!({
        "headline": headline,
        "body": "Short paragraphs with one insight each.",
        "hashtags": ["#product", "#saas"],
        "cta": "What would you add?"
    })
}
