//! Post copywriting.

use postpilot_core::{resolve_language, GeneratedContent, PostLanguage, Profile, Tone};
use postpilot_gateway::schema;

use crate::error::StudioError;
use crate::studio::Studio;

/// Build the copywriting prompt. The language instruction is strict: the
/// model is told to write in exactly one language.
pub(crate) fn draft_prompt(
    topic: &str,
    tone: Tone,
    profile: &Profile,
    news_context: Option<&str>,
    language: PostLanguage,
) -> String {
    let mut prompt = format!(
        "Write a high-impact LinkedIn post about \"{topic}\".\n\
         Author: {name} ({role}).\n\
         Tone: {tone}.\n\
         Language: write ONLY in {language}. DO NOT MIX LANGUAGES.\n",
        name = profile.name,
        role = profile.role,
        tone = tone.label(),
        language = language.name(),
    );
    if let Some(news) = news_context.map(str::trim).filter(|n| !n.is_empty()) {
        prompt.push_str(&format!("Weave in this real news item: \"{news}\".\n"));
    }
    prompt.push_str(
        "\nStructure:\n\
         - A hook that delivers value in the first line (no \"Hello connections\").\n\
         - Body: short paragraphs, concrete insights.\n\
         - CTA: close with a question.\n\
         \nReturn JSON.",
    );
    prompt
}

impl Studio {
    /// Write the copy for one post.
    ///
    /// The language is `target` when given; otherwise `MIX` profiles write in
    /// Spanish and single-language profiles in their own language. Hashtags are
    /// whatever the model returned, possibly none.
    ///
    /// # Errors
    ///
    /// - [`StudioError::EmptyInput`] for a blank topic.
    /// - [`StudioError::GatewayUnavailable`] when the model cannot be reached.
    /// - [`StudioError::MalformedResponse`] when the answer is not a complete
    ///   `{headline, body, hashtags, cta}` object or has a blank headline or body.
    /// - [`StudioError::Cancelled`].
    pub async fn draft(
        &self,
        topic: &str,
        tone: Tone,
        profile: &Profile,
        news_context: Option<&str>,
        target: Option<PostLanguage>,
    ) -> Result<GeneratedContent, StudioError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(StudioError::EmptyInput("topic"));
        }
        let language = resolve_language(target, profile.language);
        let prompt = draft_prompt(topic, tone, profile, news_context, language);

        let value = self
            .call(
                "draft",
                self.gateway()
                    .generate_text(&prompt, &schema::generated_content(), &[]),
            )
            .await?;
        let content: GeneratedContent =
            serde_json::from_value(value).map_err(|e| StudioError::malformed("draft", e))?;

        if content.headline.trim().is_empty() {
            return Err(StudioError::malformed("draft", "blank headline"));
        }
        if content.body.trim().is_empty() {
            return Err(StudioError::malformed("draft", "blank body"));
        }

        tracing::debug!(topic, language = %language, hashtags = content.hashtags.len(), "draft written");
        Ok(content)
    }
}
