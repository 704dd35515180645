use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::{Language, Tone};
use crate::ConfigError;

/// The author every post is written for. Loaded once, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub role: String,
    /// User-curated content pillars, most important first.
    pub selected_topics: Vec<String>,
    pub tone: Tone,
    pub language: Language,
    /// Reference photo as a `data:` URL or bare base64 JPEG.
    #[serde(default)]
    pub headshot: Option<String>,
    /// Resume PDF used for topic suggestion.
    #[serde(default)]
    pub resume_path: Option<PathBuf>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub social_links: Vec<String>,
}

impl Profile {
    /// The first `n` selected topics.
    #[must_use]
    pub fn top_topics(&self, n: usize) -> &[String] {
        &self.selected_topics[..self.selected_topics.len().min(n)]
    }
}

/// Load and validate a profile from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_profile(path: &Path) -> Result<Profile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ProfileFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let profile: Profile =
        serde_yaml::from_str(&content).map_err(ConfigError::ProfileFileParse)?;

    validate_profile(&profile)?;

    Ok(profile)
}

fn validate_profile(profile: &Profile) -> Result<(), ConfigError> {
    if profile.name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "profile name must be non-empty".to_string(),
        ));
    }

    if profile.role.trim().is_empty() {
        return Err(ConfigError::Validation(
            "profile role must be non-empty".to_string(),
        ));
    }

    if profile.selected_topics.is_empty() {
        return Err(ConfigError::Validation(
            "profile must select at least one topic".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for topic in &profile.selected_topics {
        if topic.trim().is_empty() {
            return Err(ConfigError::Validation(
                "selected topics must be non-empty".to_string(),
            ));
        }
        if !seen.insert(topic.trim().to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate selected topic: '{topic}'"
            )));
        }
    }

    Ok(())
}
