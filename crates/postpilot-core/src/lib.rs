//! Shared data model and configuration for postpilot.
//!
//! Everything here is plain data: profiles, generated content, plan items and
//! posts, plus the env-driven [`AppConfig`] loader. No I/O beyond reading the
//! profile file and the process environment.

pub mod app_config;
pub mod config;
pub mod content;
pub mod error;
pub mod post;
pub mod profile;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use content::{GeneratedContent, ResearchIdea, WeeklyStrategyItem};
pub use error::{ConfigError, PostError};
pub use post::{schedule_all, schedule_for_tomorrow, Post, PostStats, PostStatus};
pub use profile::{load_profile, Profile};
pub use types::{resolve_language, ContentFormat, Language, ParseEnumError, PostLanguage, Tone};
