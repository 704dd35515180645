use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::content::GeneratedContent;
use crate::error::PostError;
use crate::types::ContentFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Scheduled,
    Published,
}

impl PostStatus {
    /// Whether a post may move from `self` to `next`.
    ///
    /// Status only ever moves forward: draft, scheduled, published.
    #[must_use]
    pub fn can_transition_to(self, next: PostStatus) -> bool {
        matches!(
            (self, next),
            (PostStatus::Draft, PostStatus::Scheduled | PostStatus::Published)
                | (PostStatus::Scheduled, PostStatus::Published)
        )
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostStatus::Draft => write!(f, "draft"),
            PostStatus::Scheduled => write!(f, "scheduled"),
            PostStatus::Published => write!(f, "published"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostStats {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub topic: String,
    pub content: GeneratedContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub format: ContentFormat,
    pub scheduled_date: DateTime<Utc>,
    pub status: PostStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<PostStats>,
}

impl Post {
    /// Build a new draft with zeroed stats.
    #[must_use]
    pub fn draft(
        id: String,
        topic: String,
        content: GeneratedContent,
        image_url: Option<String>,
        format: ContentFormat,
        scheduled_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            topic,
            content,
            image_url,
            format,
            scheduled_date,
            status: PostStatus::Draft,
            stats: Some(PostStats::default()),
        }
    }

    /// Move the post to `scheduled`.
    ///
    /// # Errors
    ///
    /// Returns [`PostError::InvalidTransition`] unless the post is a draft.
    pub fn schedule(self) -> Result<Self, PostError> {
        self.transition(PostStatus::Scheduled)
    }

    /// Move the post to `published`.
    ///
    /// # Errors
    ///
    /// Returns [`PostError::InvalidTransition`] if the post is already published.
    pub fn publish(self) -> Result<Self, PostError> {
        self.transition(PostStatus::Published)
    }

    fn transition(mut self, next: PostStatus) -> Result<Self, PostError> {
        if !self.status.can_transition_to(next) {
            return Err(PostError::InvalidTransition {
                id: self.id,
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(self)
    }
}

/// Confirm a generated batch: every draft becomes scheduled, keeping its date.
/// Posts in any other status pass through untouched.
#[must_use]
pub fn schedule_all(posts: Vec<Post>) -> Vec<Post> {
    posts
        .into_iter()
        .map(|mut post| {
            if post.status == PostStatus::Draft {
                post.status = PostStatus::Scheduled;
            }
            post
        })
        .collect()
}

/// Schedule a manually created draft for 24 hours after `now`.
///
/// # Errors
///
/// Returns [`PostError::InvalidTransition`] unless the post is a draft.
pub fn schedule_for_tomorrow(mut post: Post, now: DateTime<Utc>) -> Result<Post, PostError> {
    post.scheduled_date = now + Duration::days(1);
    post.schedule()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample(status: PostStatus) -> Post {
        let mut post = Post::draft(
            "post-1".to_string(),
            "AI".to_string(),
            GeneratedContent {
                headline: "h".to_string(),
                body: "b".to_string(),
                hashtags: vec!["#ai".to_string()],
                cta: "c?".to_string(),
            },
            None,
            ContentFormat::CinematicPhoto,
            Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap(),
        );
        post.status = status;
        post
    }

    #[test]
    fn draft_has_zeroed_stats() {
        let post = sample(PostStatus::Draft);
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.stats, Some(PostStats::default()));
    }

    #[test]
    fn schedule_moves_draft_forward() {
        let post = sample(PostStatus::Draft).schedule().unwrap();
        assert_eq!(post.status, PostStatus::Scheduled);
    }

    #[test]
    fn publish_rejects_already_published() {
        let err = sample(PostStatus::Published).publish().unwrap_err();
        assert_eq!(
            err,
            PostError::InvalidTransition {
                id: "post-1".to_string(),
                from: PostStatus::Published,
                to: PostStatus::Published,
            }
        );
    }

    #[test]
    fn schedule_rejects_backwards_move() {
        assert!(sample(PostStatus::Published).schedule().is_err());
        assert!(sample(PostStatus::Scheduled).schedule().is_err());
    }

    #[test]
    fn schedule_all_only_touches_drafts() {
        let posts = vec![
            sample(PostStatus::Draft),
            sample(PostStatus::Published),
            sample(PostStatus::Draft),
        ];
        let dates: Vec<_> = posts.iter().map(|p| p.scheduled_date).collect();
        let confirmed = schedule_all(posts);
        let statuses: Vec<_> = confirmed.iter().map(|p| p.status).collect();
        assert_eq!(
            statuses,
            vec![
                PostStatus::Scheduled,
                PostStatus::Published,
                PostStatus::Scheduled
            ]
        );
        let after: Vec<_> = confirmed.iter().map(|p| p.scheduled_date).collect();
        assert_eq!(dates, after);
    }

    #[test]
    fn schedule_for_tomorrow_sets_date_and_status() {
        let now = Utc.with_ymd_and_hms(2026, 5, 1, 8, 30, 0).unwrap();
        let post = schedule_for_tomorrow(sample(PostStatus::Draft), now).unwrap();
        assert_eq!(
            post.scheduled_date,
            Utc.with_ymd_and_hms(2026, 5, 2, 8, 30, 0).unwrap()
        );
        assert_eq!(post.status, PostStatus::Scheduled);
    }

    #[test]
    fn post_serializes_camel_case_and_lowercase_status() {
        let value = serde_json::to_value(sample(PostStatus::Draft)).unwrap();
        assert_eq!(value["status"], "draft");
        assert_eq!(value["format"], "CINEMATIC_PHOTO");
        assert!(value.get("scheduledDate").is_some());
        assert!(value.get("imageUrl").is_none());
    }
}
