//! Content studio for PostPilot.
//!
//! Turns a topic and a [`postpilot_core::Profile`] into a finished post
//! (research, draft, image), plans a week of posts, runs that plan as an
//! autopilot batch and simulates publishing. All model access goes through a
//! [`postpilot_gateway::ModelGateway`] held by [`Studio`].

pub mod asset;
pub mod autopilot;
pub mod draft;
pub mod error;
pub mod pipeline;
pub mod planner;
pub mod publish;
pub mod research;
pub mod studio;
pub mod topics;

#[cfg(test)]
mod test_support;

pub use asset::{template_for, VisualTemplate, PLACEHOLDER_PREFIX};
pub use autopilot::{Autopilot, BatchPhase, BatchSnapshot};
pub use error::{PublishError, StudioError};
pub use pipeline::PostBrief;
pub use planner::{planned_language, WEEKLY_ROTATION};
pub use publish::{PublishEvent, PublishSimulator, PublishState};
pub use research::NO_TRENDS;
pub use studio::Studio;
pub use topics::FALLBACK_TOPICS;
