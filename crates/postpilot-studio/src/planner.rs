//! Weekly content planning.
//!
//! The week follows a fixed five-day rotation of themes and visual formats.
//! The model fills in topics, tones and rationale; the rotation format and the
//! language policy are enforced on whatever comes back.

use postpilot_core::{
    ContentFormat, Language, PostLanguage, Profile, Tone, WeeklyStrategyItem,
};
use postpilot_gateway::schema;
use serde::Deserialize;

use crate::error::StudioError;
use crate::studio::{or_fallback, Studio};

/// Number of topics fed to the trend lookup.
const TREND_TOPICS: usize = 4;

/// One day of the weekly rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySlot {
    pub weekday: &'static str,
    pub theme: &'static str,
    pub format: ContentFormat,
}

pub const WEEKLY_ROTATION: [DaySlot; 5] = [
    DaySlot {
        weekday: "Monday",
        theme: "News/Trend: tie a pillar to a real news event",
        format: ContentFormat::RealisticOffice,
    },
    DaySlot {
        weekday: "Tuesday",
        theme: "Deep Dive: a technical or strategic breakdown",
        format: ContentFormat::DataVisualization,
    },
    DaySlot {
        weekday: "Wednesday",
        theme: "Personal Authority: a lesson from the author's own experience",
        format: ContentFormat::PersonalPhoto,
    },
    DaySlot {
        weekday: "Thursday",
        theme: "Contrarian: challenge a popular belief",
        format: ContentFormat::CarouselDesign,
    },
    DaySlot {
        weekday: "Friday",
        theme: "Lifestyle/Reflective: leadership or culture",
        format: ContentFormat::CinematicPhoto,
    },
];

/// Language of the plan item at `index`.
///
/// `MIX` alternates Spanish and English starting with Spanish; single-language
/// profiles use their language every day.
#[must_use]
pub fn planned_language(profile: Language, index: usize) -> PostLanguage {
    match profile {
        Language::Es => PostLanguage::Es,
        Language::En => PostLanguage::En,
        Language::Mix if index % 2 == 0 => PostLanguage::Es,
        Language::Mix => PostLanguage::En,
    }
}

fn language_instruction(profile: Language) -> String {
    match profile {
        Language::Mix => {
            let days: Vec<String> = WEEKLY_ROTATION
                .iter()
                .enumerate()
                .map(|(i, slot)| format!("{} = {}", slot.weekday, planned_language(profile, i)))
                .collect();
            format!(
                "The author is bilingual. Alternate languages strictly: {}. \
                 Set each item's language field accordingly.",
                days.join(", ")
            )
        }
        Language::Es | Language::En => {
            let lang = planned_language(profile, 0);
            format!(
                "Every post must be written in {}. Set every item's language field to \"{}\".",
                lang.name(),
                lang.as_str()
            )
        }
    }
}

pub(crate) fn plan_prompt(profile: &Profile, trends: &str) -> String {
    let rotation: Vec<String> = WEEKLY_ROTATION
        .iter()
        .map(|slot| format!("- {}: {} (format {})", slot.weekday, slot.theme, slot.format.as_str()))
        .collect();
    format!(
        "Act as a LinkedIn content strategist for {name}, {role}.\n\
         Content pillars: {pillars}.\n\
         Default tone: {tone}.\n\
         Trend context: {trends}\n\n\
         Build a 5-day plan (Monday to Friday) following this rotation:\n\
         {rotation}\n\n\
         {language}\n\
         For days tied to the news, put the headline in newsContext.\n\
         Return a JSON array of 5 items.",
        name = profile.name,
        role = profile.role,
        pillars = profile.selected_topics.join(", "),
        tone = profile.tone.as_str(),
        rotation = rotation.join("\n"),
        language = language_instruction(profile.language),
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPlanItem {
    #[serde(default)]
    day: String,
    topic: String,
    #[serde(default)]
    tone: String,
    #[serde(default)]
    format: String,
    #[serde(default)]
    rationale: String,
    #[serde(default)]
    news_context: Option<String>,
    #[serde(default)]
    language: String,
}

/// Bring one model item in line with the rotation and language policy.
fn normalize(raw: RawPlanItem, index: usize, profile: &Profile) -> Option<WeeklyStrategyItem> {
    let slot = WEEKLY_ROTATION.get(index)?;
    let topic = raw.topic.trim();
    if topic.is_empty() {
        tracing::debug!(index, "plan item has no topic; dropping");
        return None;
    }

    if raw.format.parse::<ContentFormat>().ok() != Some(slot.format) {
        tracing::debug!(index, returned = %raw.format, forced = %slot.format, "plan format overridden");
    }
    let language = planned_language(profile.language, index);
    if raw.language.parse::<PostLanguage>().ok() != Some(language) {
        tracing::debug!(index, returned = %raw.language, forced = %language, "plan language overridden");
    }
    let tone = raw.tone.parse::<Tone>().unwrap_or(profile.tone);
    let day = match raw.day.trim() {
        "" => slot.weekday.to_owned(),
        day => day.to_owned(),
    };
    let news_context = raw
        .news_context
        .map(|n| n.trim().to_owned())
        .filter(|n| !n.is_empty());

    Some(WeeklyStrategyItem {
        day,
        topic: topic.to_owned(),
        tone,
        format: slot.format,
        rationale: raw.rationale.trim().to_owned(),
        news_context,
        language,
    })
}

/// Parse the model's plan, keeping at most one item per rotation slot.
///
/// Items that fail to deserialize are skipped without shifting the slots of
/// the ones after them.
fn parse_plan(value: serde_json::Value, profile: &Profile) -> Result<Vec<WeeklyStrategyItem>, StudioError> {
    let serde_json::Value::Array(items) = value else {
        return Err(StudioError::malformed("plan", "expected a JSON array"));
    };
    if items.len() > WEEKLY_ROTATION.len() {
        tracing::debug!(returned = items.len(), "plan longer than a week; truncating");
    }

    let plan: Vec<WeeklyStrategyItem> = items
        .into_iter()
        .take(WEEKLY_ROTATION.len())
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<RawPlanItem>(item) {
            Ok(raw) => normalize(raw, index, profile),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed plan item");
                None
            }
        })
        .collect();

    if plan.len() < WEEKLY_ROTATION.len() {
        tracing::warn!(items = plan.len(), "plan is shorter than a full week");
    }
    Ok(plan)
}

impl Studio {
    /// Plan a week of posts for `profile`.
    ///
    /// Looks up current trends for the profile's top topics, asks the model
    /// for a plan and normalizes it. If the planning call fails outright the
    /// plan is empty.
    ///
    /// # Errors
    ///
    /// Only [`StudioError::Cancelled`].
    pub async fn plan_week(&self, profile: &Profile) -> Result<Vec<WeeklyStrategyItem>, StudioError> {
        let trends = self.trend_summary(profile.top_topics(TREND_TOPICS)).await?;
        let prompt = plan_prompt(profile, &trends);

        let result = self
            .call(
                "plan",
                self.gateway()
                    .generate_text(&prompt, &schema::strategy_list(), &[]),
            )
            .await
            .and_then(|value| parse_plan(value, profile));
        let plan = or_fallback("planner", result, Vec::new)?;

        tracing::info!(items = plan.len(), language = %profile.language, "weekly plan ready");
        Ok(plan)
    }
}
