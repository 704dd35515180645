//! Trend research: grounded search followed by structured idea extraction.

use postpilot_core::ResearchIdea;
use postpilot_gateway::schema;
use serde::Deserialize;

use crate::error::StudioError;
use crate::studio::{or_fallback, Studio};

/// Trend context used when the lookup fails or finds nothing.
pub const NO_TRENDS: &str = "No specific trends found.";

#[derive(Debug, Deserialize)]
struct ExtractedIdea {
    title: String,
    #[serde(default)]
    description: String,
}

fn search_query(topic: &str) -> String {
    format!("Find 5 trending news headlines or viral discussions about: \"{topic}\".")
}

fn extraction_prompt(summary: &str) -> String {
    format!(
        "From the following text, extract 5 distinct content ideas for a LinkedIn post.\n\
         Text: {summary}\n\
         Return them as JSON."
    )
}

fn trend_query(topics: &[String]) -> String {
    format!(
        "Find the top 3 trending business news stories or viral discussions right now \
         related to these industries: {}.",
        topics.join(", ")
    )
}

fn fallback_ideas(topic: &str) -> Vec<ResearchIdea> {
    vec![ResearchIdea {
        title: format!("Trends about {topic}"),
        description: "search error".to_owned(),
        source_url: None,
    }]
}

impl Studio {
    /// Turn a topic into a handful of current content ideas.
    ///
    /// Idea *i* is paired with the *i*-th cited source URL; ideas beyond the
    /// number of sources get none. Any gateway or parse failure yields a single
    /// placeholder idea instead of an error.
    ///
    /// # Errors
    ///
    /// [`StudioError::EmptyInput`] for a blank topic and
    /// [`StudioError::Cancelled`] if the studio is cancelled mid-call.
    pub async fn research(&self, topic: &str) -> Result<Vec<ResearchIdea>, StudioError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(StudioError::EmptyInput("topic"));
        }
        let result = self.try_research(topic).await;
        or_fallback("research", result, || fallback_ideas(topic))
    }

    async fn try_research(&self, topic: &str) -> Result<Vec<ResearchIdea>, StudioError> {
        let search = self
            .call("research search", self.gateway().search(&search_query(topic)))
            .await?;

        let value = self
            .call(
                "research ideas",
                self.gateway().generate_text(
                    &extraction_prompt(&search.summary_text),
                    &schema::idea_list(),
                    &[],
                ),
            )
            .await?;
        let extracted: Vec<ExtractedIdea> =
            serde_json::from_value(value).map_err(|e| StudioError::malformed("research ideas", e))?;

        tracing::debug!(
            topic,
            ideas = extracted.len(),
            sources = search.source_urls.len(),
            "research complete"
        );

        Ok(extracted
            .into_iter()
            .enumerate()
            .map(|(i, idea)| ResearchIdea {
                title: idea.title,
                description: idea.description,
                source_url: search.source_urls.get(i).cloned(),
            })
            .collect())
    }

    /// Free-text summary of what is trending across `topics`.
    ///
    /// Returns [`NO_TRENDS`] when there are no topics, the search fails or it
    /// comes back empty.
    ///
    /// # Errors
    ///
    /// Only [`StudioError::Cancelled`].
    pub async fn trend_summary(&self, topics: &[String]) -> Result<String, StudioError> {
        if topics.is_empty() {
            return Ok(NO_TRENDS.to_owned());
        }
        let result = self
            .call("trend search", self.gateway().search(&trend_query(topics)))
            .await
            .map(|search| {
                let text = search.summary_text.trim();
                if text.is_empty() {
                    NO_TRENDS.to_owned()
                } else {
                    text.to_owned()
                }
            });
        or_fallback("trends", result, || NO_TRENDS.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use postpilot_gateway::SearchResult;
    use serde_json::json;

    use super::*;
    use crate::test_support::{Call, ScriptedGateway};

    fn search_with_sources(n: usize) -> SearchResult {
        SearchResult {
            summary_text: "Several stories about pricing.".to_owned(),
            source_urls: (0..n).map(|i| format!("https://news.example/{i}")).collect(),
        }
    }

    fn three_ideas() -> serde_json::Value {
        json!([
            { "title": "Usage pricing", "description": "Seat-based is fading." },
            { "title": "AI copilots", "description": "Every tool ships one." },
            { "title": "Churn", "description": "Retention beats acquisition." }
        ])
    }

    #[tokio::test]
    async fn ideas_are_paired_with_sources_by_position() {
        let gateway = ScriptedGateway::new()
            .on_search(|_| Ok(search_with_sources(2)))
            .on_text(|_| Ok(three_ideas()));
        let studio = Studio::new(Arc::new(gateway));

        let ideas = studio.research("SaaS pricing").await.unwrap();

        assert_eq!(ideas.len(), 3);
        assert_eq!(ideas[0].source_url.as_deref(), Some("https://news.example/0"));
        assert_eq!(ideas[1].source_url.as_deref(), Some("https://news.example/1"));
        assert_eq!(ideas[2].source_url, None);
    }

    #[tokio::test]
    async fn extraction_prompt_carries_search_summary() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .on_search(|_| Ok(search_with_sources(0)))
                .on_text(|_| Ok(json!([]))),
        );
        let studio = Studio::new(gateway.clone());

        let ideas = studio.research("pricing").await.unwrap();
        assert!(ideas.is_empty());

        let calls = gateway.calls();
        assert!(matches!(&calls[0], Call::Search { query } if query.contains("\"pricing\"")));
        assert!(
            matches!(&calls[1], Call::Text { prompt, .. } if prompt.contains("Several stories about pricing."))
        );
    }

    #[tokio::test]
    async fn search_failure_yields_placeholder_idea() {
        let studio = Studio::new(Arc::new(ScriptedGateway::new()));

        let ideas = studio.research("Remote Work").await.unwrap();

        assert_eq!(
            ideas,
            vec![ResearchIdea {
                title: "Trends about Remote Work".to_owned(),
                description: "search error".to_owned(),
                source_url: None,
            }]
        );
    }

    #[tokio::test]
    async fn unparseable_ideas_yield_placeholder_idea() {
        let gateway = ScriptedGateway::new()
            .on_search(|_| Ok(search_with_sources(1)))
            .on_text(|_| Ok(json!({ "ideas": "not a list" })));
        let studio = Studio::new(Arc::new(gateway));

        let ideas = studio.research("AI").await.unwrap();

        assert_eq!(ideas.len(), 1);
        assert_eq!(ideas[0].title, "Trends about AI");
    }

    #[tokio::test]
    async fn blank_topic_is_rejected() {
        let studio = Studio::new(Arc::new(ScriptedGateway::new()));
        assert!(matches!(
            studio.research("   ").await,
            Err(StudioError::EmptyInput("topic"))
        ));
    }

    #[tokio::test]
    async fn cancelled_studio_does_not_fall_back() {
        let studio = Studio::new(Arc::new(ScriptedGateway::new()));
        studio.cancellation().cancel();
        assert!(matches!(
            studio.research("AI").await,
            Err(StudioError::Cancelled)
        ));
    }

    #[tokio::test]
    async fn trend_summary_falls_back_on_failure() {
        let studio = Studio::new(Arc::new(ScriptedGateway::new()));
        let summary = studio.trend_summary(&["SaaS".to_owned()]).await.unwrap();
        assert_eq!(summary, NO_TRENDS);
    }

    #[tokio::test]
    async fn trend_summary_joins_topics_into_query() {
        let gateway = Arc::new(ScriptedGateway::new().on_search(|_| {
            Ok(SearchResult {
                summary_text: "  AI agents everywhere. ".to_owned(),
                source_urls: Vec::new(),
            })
        }));
        let studio = Studio::new(gateway.clone());

        let topics = vec!["SaaS".to_owned(), "AI".to_owned()];
        let summary = studio.trend_summary(&topics).await.unwrap();

        assert_eq!(summary, "AI agents everywhere.");
        assert!(matches!(&gateway.calls()[0], Call::Search { query } if query.contains("SaaS, AI")));
    }

    #[tokio::test]
    async fn trend_summary_without_topics_skips_the_gateway() {
        let gateway = Arc::new(ScriptedGateway::new());
        let studio = Studio::new(gateway.clone());
        assert_eq!(studio.trend_summary(&[]).await.unwrap(), NO_TRENDS);
        assert!(gateway.calls().is_empty());
    }
}
