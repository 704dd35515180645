use serde::{Deserialize, Serialize};

use crate::types::{ContentFormat, PostLanguage, Tone};

/// Structured post text as returned by the model.
///
/// Every field is required when deserializing; a payload missing any of them
/// is not a valid draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    /// Opening hook. Never a generic greeting.
    pub headline: String,
    pub body: String,
    /// Exactly the tags the model returned, in order.
    pub hashtags: Vec<String>,
    /// Closing call to action, phrased as a question.
    pub cta: String,
}

impl GeneratedContent {
    /// Render the post as the plain text a user would paste into the network.
    #[must_use]
    pub fn share_text(&self) -> String {
        let mut sections = vec![
            self.headline.as_str(),
            self.body.as_str(),
            self.cta.as_str(),
        ];
        let tags = self.hashtags.join(" ");
        if !tags.is_empty() {
            sections.push(&tags);
        }
        sections.join("\n\n")
    }
}

/// A candidate angle for a topic, extracted from trending discussion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchIdea {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// One day of a weekly content plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStrategyItem {
    pub day: String,
    pub topic: String,
    pub tone: Tone,
    pub format: ContentFormat,
    pub rationale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news_context: Option<String>,
    pub language: PostLanguage,
}
