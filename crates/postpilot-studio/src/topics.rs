//! Topic suggestion from a resume and website.

use postpilot_gateway::{schema, InlineData};
use serde::Deserialize;

use crate::error::StudioError;
use crate::studio::{or_fallback, Studio};

/// Pillars offered when the profile cannot be analysed.
pub const FALLBACK_TOPICS: [&str; 5] = [
    "Management",
    "Tech Trends",
    "Digital Strategy",
    "Innovation",
    "Remote Work",
];

#[derive(Debug, Deserialize)]
struct TopicList {
    #[serde(default)]
    topics: Vec<String>,
}

fn topics_prompt(website: Option<&str>) -> String {
    let website = website.map(str::trim).unwrap_or_default();
    format!(
        "Analyze the attached resume (if any) and the website context: \"{website}\".\n\
         Extract 15 to 20 high-level industry pillars or domains.\n\
         No sentences and no how-to titles: broad categories only.\n\
         Return strictly JSON."
    )
}

/// Trim, drop blanks and drop case-insensitive duplicates, keeping order.
fn clean(topics: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    topics
        .into_iter()
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty() && seen.insert(t.to_lowercase()))
        .collect()
}

fn fallback_topics() -> Vec<String> {
    FALLBACK_TOPICS.iter().map(|&t| t.to_owned()).collect()
}

impl Studio {
    /// Suggest content pillars from an optional PDF resume and website.
    ///
    /// Failures and empty answers yield [`FALLBACK_TOPICS`].
    ///
    /// # Errors
    ///
    /// Only [`StudioError::Cancelled`].
    pub async fn suggest_topics(
        &self,
        resume: Option<&InlineData>,
        website: Option<&str>,
    ) -> Result<Vec<String>, StudioError> {
        let attachments: Vec<InlineData> = resume.cloned().into_iter().collect();
        let result = self
            .call(
                "topics",
                self.gateway().generate_text(
                    &topics_prompt(website),
                    &schema::topic_list(),
                    &attachments,
                ),
            )
            .await
            .and_then(|value| {
                serde_json::from_value::<TopicList>(value)
                    .map_err(|e| StudioError::malformed("topics", e))
            })
            .and_then(|list| {
                let topics = clean(list.topics);
                if topics.is_empty() {
                    Err(StudioError::malformed("topics", "no topics in answer"))
                } else {
                    Ok(topics)
                }
            });
        or_fallback("topics", result, fallback_topics)
    }
}
