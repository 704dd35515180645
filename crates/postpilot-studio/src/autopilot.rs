//! Autopilot: run the post pipeline over a weekly plan.
//!
//! Items run strictly one after another. A failing item is logged and
//! skipped; the batch itself never fails. Progress and partial results are
//! published on a [`watch`] channel while the batch runs.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use postpilot_core::{Post, PostStatus, Profile, WeeklyStrategyItem};
use tokio::sync::watch;

use crate::error::StudioError;
use crate::pipeline::PostBrief;
use crate::studio::Studio;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatchPhase {
    #[default]
    Idle,
    Running,
    Completed,
}

/// Observable state of the current (or last) batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSnapshot {
    pub phase: BatchPhase,
    /// Plan items in the batch.
    pub total: usize,
    /// Items attempted so far, successful or not.
    pub processed: usize,
    pub failed: usize,
    /// Set when the batch stopped early on cancellation.
    pub cancelled: bool,
    /// Posts produced so far, in plan order.
    pub posts: Vec<Post>,
}

impl BatchSnapshot {
    fn running(total: usize) -> Self {
        Self {
            phase: BatchPhase::Running,
            total,
            ..Self::default()
        }
    }

    /// Share of items processed, 0 to 100.
    #[must_use]
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            return 100;
        }
        self.processed * 100 / self.total
    }
}

/// Publish date for the plan item at `index`: `index + 1` days after `today`.
#[must_use]
pub fn scheduled_date_for(today: NaiveDate, index: usize, publish_time: NaiveTime) -> DateTime<Utc> {
    (today + Days::new(index as u64 + 1))
        .and_time(publish_time)
        .and_utc()
}

pub struct Autopilot {
    studio: Studio,
    publish_time: NaiveTime,
    state: watch::Sender<BatchSnapshot>,
}

impl Autopilot {
    /// `publish_hour` is the UTC hour every generated post is dated at; values
    /// above 23 are clamped.
    #[must_use]
    pub fn new(studio: Studio, publish_hour: u32) -> Self {
        let publish_time =
            NaiveTime::from_hms_opt(publish_hour.min(23), 0, 0).unwrap_or(NaiveTime::MIN);
        let (state, _) = watch::channel(BatchSnapshot::default());
        Self {
            studio,
            publish_time,
            state,
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<BatchSnapshot> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> BatchSnapshot {
        self.state.borrow().clone()
    }

    /// Run the batch with dates counted from today (UTC).
    pub async fn run_batch(&self, plan: &[WeeklyStrategyItem], profile: &Profile) -> Vec<Post> {
        self.run_batch_from(plan, profile, Utc::now().date_naive()).await
    }

    /// Run the pipeline for every plan item and return the posts that succeeded.
    ///
    /// Post *i* of the plan is dated `today + (i + 1)` days at the publish hour
    /// and gets the id `auto-<batch millis>-<i>`; skipped items leave gaps in
    /// both. All returned posts are drafts. A second batch started while one is
    /// running returns nothing.
    pub async fn run_batch_from(
        &self,
        plan: &[WeeklyStrategyItem],
        profile: &Profile,
        today: NaiveDate,
    ) -> Vec<Post> {
        let started = self.state.send_if_modified(|snapshot| {
            if snapshot.phase == BatchPhase::Running {
                return false;
            }
            *snapshot = BatchSnapshot::running(plan.len());
            true
        });
        if !started {
            tracing::warn!("autopilot batch already running; ignoring new batch");
            return Vec::new();
        }

        let batch_id = Utc::now().timestamp_millis();
        tracing::info!(batch_id, items = plan.len(), "autopilot batch started");

        let mut posts = Vec::with_capacity(plan.len());
        let mut cancelled = false;

        for (index, item) in plan.iter().enumerate() {
            if self.studio.is_cancelled() {
                cancelled = true;
                break;
            }

            match self.studio.build_post(&PostBrief::from(item), profile).await {
                Ok(mut post) => {
                    post.id = format!("auto-{batch_id}-{index}");
                    post.scheduled_date = scheduled_date_for(today, index, self.publish_time);
                    post.status = PostStatus::Draft;
                    tracing::info!(index, day = %item.day, topic = %item.topic, "autopilot item ready");
                    posts.push(post.clone());
                    self.state.send_modify(|snapshot| {
                        snapshot.processed += 1;
                        snapshot.posts.push(post);
                    });
                }
                Err(StudioError::Cancelled) => {
                    cancelled = true;
                    break;
                }
                Err(e) => {
                    tracing::error!(index, topic = %item.topic, error = %e, "autopilot item failed; skipping");
                    self.state.send_modify(|snapshot| {
                        snapshot.processed += 1;
                        snapshot.failed += 1;
                    });
                }
            }
        }

        self.state.send_modify(|snapshot| {
            snapshot.phase = BatchPhase::Completed;
            snapshot.cancelled = cancelled;
        });
        tracing::info!(
            batch_id,
            posts = posts.len(),
            skipped = plan.len() - posts.len(),
            cancelled,
            "autopilot batch finished"
        );
        posts
    }
}
