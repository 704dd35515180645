use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a string does not name a known variant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Normalises a user or model supplied label for lenient matching:
/// lowercase, with everything except ASCII alphanumerics removed.
fn fold(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tone {
    Professional,
    Casual,
    Controversial,
    Educational,
    Inspirational,
    Humorous,
}

impl Tone {
    pub const ALL: [Tone; 6] = [
        Tone::Professional,
        Tone::Casual,
        Tone::Controversial,
        Tone::Educational,
        Tone::Inspirational,
        Tone::Humorous,
    ];

    /// Wire name, as used in serialized profiles and plan items.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Professional => "PROFESSIONAL",
            Tone::Casual => "CASUAL",
            Tone::Controversial => "CONTROVERSIAL",
            Tone::Educational => "EDUCATIONAL",
            Tone::Inspirational => "INSPIRATIONAL",
            Tone::Humorous => "HUMOROUS",
        }
    }

    /// Human label passed to the model in prompts.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Casual => "Casual",
            Tone::Controversial => "Controversial/Debate",
            Tone::Educational => "Educational",
            Tone::Inspirational => "Inspirational",
            Tone::Humorous => "Humorous",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = ParseEnumError;

    /// Accepts the wire name or the human label, ignoring case and punctuation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = fold(s);
        Tone::ALL
            .into_iter()
            .find(|t| fold(t.as_str()) == folded || fold(t.label()) == folded)
            .ok_or_else(|| ParseEnumError {
                kind: "tone",
                value: s.to_string(),
            })
    }
}

/// Language mode configured on a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "ES")]
    Es,
    #[serde(rename = "EN")]
    En,
    /// Alternate between Spanish and English across posts.
    #[serde(rename = "MIX")]
    Mix,
}

impl Language {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Es => "ES",
            Language::En => "EN",
            Language::Mix => "MIX",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).as_str() {
            "es" | "spanish" => Ok(Language::Es),
            "en" | "english" => Ok(Language::En),
            "mix" => Ok(Language::Mix),
            _ => Err(ParseEnumError {
                kind: "language",
                value: s.to_string(),
            }),
        }
    }
}

/// The concrete language a single post is written in. Never "mixed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostLanguage {
    #[serde(rename = "ES")]
    Es,
    #[serde(rename = "EN")]
    En,
}

impl PostLanguage {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PostLanguage::Es => "ES",
            PostLanguage::En => "EN",
        }
    }

    /// English name of the language, for prompt instructions.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PostLanguage::Es => "Spanish",
            PostLanguage::En => "English",
        }
    }
}

impl fmt::Display for PostLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostLanguage {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Language::from_str(s) {
            Ok(Language::Es) => Ok(PostLanguage::Es),
            Ok(Language::En) => Ok(PostLanguage::En),
            _ => Err(ParseEnumError {
                kind: "post language",
                value: s.to_string(),
            }),
        }
    }
}

/// Resolve the language a post is written in.
///
/// An explicit target wins. Otherwise a `MIX` profile defaults to Spanish and a
/// single-language profile uses its own language.
#[must_use]
pub fn resolve_language(target: Option<PostLanguage>, profile: Language) -> PostLanguage {
    match (target, profile) {
        (Some(lang), _) => lang,
        (None, Language::Mix | Language::Es) => PostLanguage::Es,
        (None, Language::En) => PostLanguage::En,
    }
}

/// Visual style of the image attached to a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentFormat {
    CinematicPhoto,
    /// Abstract 3D tech art. Never literal charts.
    DataVisualization,
    /// Photo of the author, using the profile headshot as reference when present.
    PersonalPhoto,
    /// Minimalist background texture.
    CarouselDesign,
    RealisticOffice,
}

impl ContentFormat {
    pub const ALL: [ContentFormat; 5] = [
        ContentFormat::CinematicPhoto,
        ContentFormat::DataVisualization,
        ContentFormat::PersonalPhoto,
        ContentFormat::CarouselDesign,
        ContentFormat::RealisticOffice,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ContentFormat::CinematicPhoto => "CINEMATIC_PHOTO",
            ContentFormat::DataVisualization => "DATA_VISUALIZATION",
            ContentFormat::PersonalPhoto => "PERSONAL_PHOTO",
            ContentFormat::CarouselDesign => "CAROUSEL_DESIGN",
            ContentFormat::RealisticOffice => "REALISTIC_OFFICE",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ContentFormat::CinematicPhoto => "Cinematic Photo",
            ContentFormat::DataVisualization => "Abstract 3D Art (Tech)",
            ContentFormat::PersonalPhoto => "Personal Photo (AI Ref)",
            ContentFormat::CarouselDesign => "Minimalist Background",
            ContentFormat::RealisticOffice => "Professional Environment",
        }
    }
}

impl fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentFormat {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = fold(s);
        ContentFormat::ALL
            .into_iter()
            .find(|f| fold(f.as_str()) == folded || fold(f.label()) == folded)
            .ok_or_else(|| ParseEnumError {
                kind: "content format",
                value: s.to_string(),
            })
    }
}
