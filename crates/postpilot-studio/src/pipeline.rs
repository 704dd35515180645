//! Single-post assembly: copy and image, combined into a draft.

use chrono::Utc;
use postpilot_core::{ContentFormat, Post, PostLanguage, Profile, Tone, WeeklyStrategyItem};

use crate::error::StudioError;
use crate::studio::Studio;

/// Everything needed to produce one post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostBrief {
    pub topic: String,
    pub tone: Tone,
    pub format: ContentFormat,
    pub news_context: Option<String>,
    /// Overrides the profile's language when set.
    pub language: Option<PostLanguage>,
}

impl From<&WeeklyStrategyItem> for PostBrief {
    fn from(item: &WeeklyStrategyItem) -> Self {
        Self {
            topic: item.topic.clone(),
            tone: item.tone,
            format: item.format,
            news_context: item.news_context.clone(),
            language: Some(item.language),
        }
    }
}

impl Studio {
    /// Draft the copy, then render the image, and assemble a draft [`Post`]
    /// with zeroed stats. A failed draft skips the image entirely.
    ///
    /// The id is a fresh `post-<uuid>` and the scheduled date is now; batch
    /// callers overwrite both.
    ///
    /// # Errors
    ///
    /// Whatever [`Studio::draft`] returns. Image failures never fail the post.
    pub async fn build_post(&self, brief: &PostBrief, profile: &Profile) -> Result<Post, StudioError> {
        let topic = brief.topic.trim();
        if topic.is_empty() {
            return Err(StudioError::EmptyInput("topic"));
        }

        let content = self
            .draft(
                topic,
                brief.tone,
                profile,
                brief.news_context.as_deref(),
                brief.language,
            )
            .await?;
        let image_url = self.render_asset(topic, brief.format, profile).await?;

        Ok(Post::draft(
            format!("post-{}", uuid::Uuid::new_v4()),
            topic.to_owned(),
            content,
            Some(image_url),
            brief.format,
            Utc::now(),
        ))
    }
}
