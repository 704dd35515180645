//! Simulated publishing.
//!
//! Walks a fixed sequence of connection states on a timer, emitting one log
//! line per state, then marks the post published. Nothing leaves the process.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::Utc;
use postpilot_core::{Post, PostError, PostStatus};
use tokio::sync::watch;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::error::PublishError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PublishState {
    #[default]
    Idle,
    Connecting,
    Authenticating,
    PreparingPayload,
    Sending,
    AwaitingResponse,
    Success,
}

impl PublishState {
    /// The state after `self`, or `None` once the sequence has succeeded.
    #[must_use]
    pub fn next(self) -> Option<PublishState> {
        match self {
            PublishState::Idle => Some(PublishState::Connecting),
            PublishState::Connecting => Some(PublishState::Authenticating),
            PublishState::Authenticating => Some(PublishState::PreparingPayload),
            PublishState::PreparingPayload => Some(PublishState::Sending),
            PublishState::Sending => Some(PublishState::AwaitingResponse),
            PublishState::AwaitingResponse => Some(PublishState::Success),
            PublishState::Success => None,
        }
    }

    /// Console line shown on entering the state.
    #[must_use]
    pub fn log_line(self) -> &'static str {
        match self {
            PublishState::Idle => "",
            PublishState::Connecting => "> Opening secure connection to the LinkedIn API...",
            PublishState::Authenticating => {
                "> Authenticating OAuth 2.0 bearer token (openid profile w_member_social) [OK]"
            }
            PublishState::PreparingPayload => "> Preparing JSON payload...",
            PublishState::Sending => "> POST https://api.linkedin.com/v2/ugcPosts (header + body)",
            PublishState::AwaitingResponse => "> Server response: 201 Created",
            PublishState::Success => "Published successfully to the profile.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishEvent {
    pub state: PublishState,
    pub message: &'static str,
}

/// Timer-driven publish sequence. One sequence may run at a time.
pub struct PublishSimulator {
    step_delay: Duration,
    settle_delay: Duration,
    state: watch::Sender<PublishState>,
    busy: AtomicBool,
}

/// Releases the simulator when a sequence ends, even if its future is dropped.
struct RunGuard<'a>(&'a PublishSimulator);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.state.send_replace(PublishState::Idle);
        self.0.busy.store(false, Ordering::Release);
    }
}

impl PublishSimulator {
    /// `step_delay` gates every transition; `settle_delay` runs between
    /// `Success` and the post being marked published.
    #[must_use]
    pub fn new(step_delay: Duration, settle_delay: Duration) -> Self {
        let (state, _) = watch::channel(PublishState::Idle);
        Self {
            step_delay,
            settle_delay,
            state,
            busy: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn state(&self) -> PublishState {
        *self.state.borrow()
    }

    /// Run the sequence for `post` and return it published and dated now.
    ///
    /// `on_event` is called once per state entered, in order.
    ///
    /// # Errors
    ///
    /// - [`PublishError::InvalidPost`] if `post` is already published. Checked
    ///   before the sequence starts.
    /// - [`PublishError::Busy`] if another sequence is running.
    /// - [`PublishError::Cancelled`] if `cancel` fires; the simulator returns
    ///   to `Idle` and the post is not published.
    pub async fn publish<F>(
        &self,
        post: Post,
        cancel: &CancellationToken,
        mut on_event: F,
    ) -> Result<Post, PublishError>
    where
        F: FnMut(PublishEvent) + Send,
    {
        if !post.status.can_transition_to(PostStatus::Published) {
            return Err(PostError::InvalidTransition {
                from: post.status,
                to: PostStatus::Published,
                id: post.id,
            }
            .into());
        }
        if self.busy.swap(true, Ordering::AcqRel) {
            return Err(PublishError::Busy);
        }
        let _guard = RunGuard(self);

        self.run(post, cancel, &mut on_event).await
    }

    async fn run<F>(
        &self,
        post: Post,
        cancel: &CancellationToken,
        on_event: &mut F,
    ) -> Result<Post, PublishError>
    where
        F: FnMut(PublishEvent) + Send,
    {
        let period = self.step_delay.max(Duration::from_millis(1));
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut state = PublishState::Idle;
        while let Some(next) = state.next() {
            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(PublishError::Cancelled),
                _ = ticker.tick() => {}
            }
            state = next;
            self.state.send_replace(state);
            tracing::debug!(post_id = %post.id, ?state, "publish step");
            on_event(PublishEvent {
                state,
                message: state.log_line(),
            });
        }

        tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(PublishError::Cancelled),
            () = sleep(self.settle_delay) => {}
        }

        let mut published = post.publish()?;
        published.scheduled_date = Utc::now();
        tracing::info!(post_id = %published.id, "post published");
        Ok(published)
    }
}

#[cfg(test)]
mod tests {
    use postpilot_core::{ContentFormat, GeneratedContent};

    use super::*;

    fn draft_post() -> Post {
        Post::draft(
            "post-1".to_owned(),
            "AI".to_owned(),
            GeneratedContent {
                headline: "H".to_owned(),
                body: "B".to_owned(),
                hashtags: Vec::new(),
                cta: "C?".to_owned(),
            },
            None,
            ContentFormat::CinematicPhoto,
            Utc::now(),
        )
    }

    fn simulator() -> PublishSimulator {
        PublishSimulator::new(Duration::from_millis(800), Duration::from_millis(1500))
    }

    #[test]
    fn states_advance_in_fixed_order() {
        let mut order = vec![PublishState::Idle];
        while let Some(next) = order.last().and_then(|s| s.next()) {
            order.push(next);
        }
        assert_eq!(
            order,
            [
                PublishState::Idle,
                PublishState::Connecting,
                PublishState::Authenticating,
                PublishState::PreparingPayload,
                PublishState::Sending,
                PublishState::AwaitingResponse,
                PublishState::Success,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn full_sequence_publishes_after_all_delays() {
        let sim = simulator();
        let mut events = Vec::new();
        let started = Instant::now();

        let post = sim
            .publish(draft_post(), &CancellationToken::new(), |e| events.push(e))
            .await
            .unwrap();

        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(events.len(), 6);
        assert_eq!(events[0].state, PublishState::Connecting);
        assert_eq!(events[5].state, PublishState::Success);
        assert!(events.iter().all(|e| !e.message.is_empty()));
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(6 * 800 + 1500), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(6 * 800 + 1600), "{elapsed:?}");
        assert_eq!(sim.state(), PublishState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn scheduled_posts_can_be_published() {
        let post = draft_post().schedule().unwrap();
        let published = simulator()
            .publish(post, &CancellationToken::new(), |_| {})
            .await
            .unwrap();
        assert_eq!(published.status, PostStatus::Published);
    }

    #[tokio::test(start_paused = true)]
    async fn already_published_post_is_rejected_up_front() {
        let post = draft_post().publish().unwrap();
        let mut events = 0;

        let err = simulator()
            .publish(post, &CancellationToken::new(), |_| events += 1)
            .await
            .unwrap_err();

        assert!(matches!(err, PublishError::InvalidPost(_)));
        assert_eq!(events, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn second_run_is_rejected_while_one_is_in_flight() {
        let sim = simulator();
        let cancel = CancellationToken::new();

        let (first, second) = tokio::join!(
            sim.publish(draft_post(), &cancel, |_| {}),
            sim.publish(draft_post(), &cancel, |_| {}),
        );

        assert_eq!(first.unwrap().status, PostStatus::Published);
        assert!(matches!(second, Err(PublishError::Busy)));

        let again = sim.publish(draft_post(), &cancel, |_| {}).await;
        assert!(again.is_ok(), "simulator should be released after a run");
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_resets_to_idle_without_publishing() {
        let sim = simulator();
        let cancel = CancellationToken::new();
        let mut events = Vec::new();

        let trigger = cancel.clone();
        let err = sim
            .publish(draft_post(), &cancel, |e| {
                if e.state == PublishState::PreparingPayload {
                    trigger.cancel();
                }
                events.push(e.state);
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PublishError::Cancelled));
        assert_eq!(events.last(), Some(&PublishState::PreparingPayload));
        assert_eq!(sim.state(), PublishState::Idle);
    }
}
