//! Handlers for the sub-commands that talk to the model gateway.
//!
//! Results go to stdout as pretty JSON; progress and logs go to stderr.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use postpilot_core::{load_profile, schedule_all, schedule_for_tomorrow, AppConfig, Profile};
use postpilot_gateway::{GeminiClient, GeminiOptions, InlineData};
use postpilot_studio::{Autopilot, BatchPhase, PostBrief, Studio};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::Commands;

fn gateway_options(config: &AppConfig) -> GeminiOptions {
    let mut options = GeminiOptions::new(&config.gemini_api_key);
    options.base_url.clone_from(&config.gateway_base_url);
    options.text_model.clone_from(&config.text_model);
    options.image_model.clone_from(&config.image_model);
    options.image_aspect_ratio.clone_from(&config.image_aspect_ratio);
    options.timeout_secs = config.request_timeout_secs;
    options.max_retries = config.max_retries;
    options.retry_backoff_base_ms = config.retry_backoff_base_ms;
    options
}

/// Studio over a live Gemini client, cancelled on Ctrl-C.
fn build_studio(config: &AppConfig) -> anyhow::Result<Studio> {
    let client = GeminiClient::new(gateway_options(config))
        .map_err(|e| anyhow::anyhow!("failed to build model gateway client: {e}"))?;

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received; cancelling");
            on_signal.cancel();
        }
    });

    Ok(Studio::new(Arc::new(client)).with_cancellation(cancel))
}

fn read_profile(path: &Path) -> anyhow::Result<Profile> {
    load_profile(path).map_err(|e| anyhow::anyhow!("failed to load profile {}: {e}", path.display()))
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) async fn run(
    command: Commands,
    profile_path: Option<PathBuf>,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let studio = build_studio(config)?;
    let profile_path = profile_path.unwrap_or_else(|| config.profile_path.clone());

    match command {
        Commands::Topics { resume, website } => {
            run_topics(&studio, resume.as_deref(), website.as_deref()).await
        }
        Commands::Research { topic } => print_json(&studio.research(&topic).await?),
        Commands::Post {
            topic,
            tone,
            format,
            language,
            news,
            schedule,
        } => {
            let profile = read_profile(&profile_path)?;
            let brief = PostBrief {
                topic,
                tone: tone.unwrap_or(profile.tone),
                format,
                news_context: news,
                language,
            };
            let mut post = studio.build_post(&brief, &profile).await?;
            if schedule {
                post = schedule_for_tomorrow(post, Utc::now())?;
            }
            print_json(&post)
        }
        Commands::Plan => {
            let profile = read_profile(&profile_path)?;
            print_json(&studio.plan_week(&profile).await?)
        }
        Commands::Autopilot { confirm } => {
            let profile = read_profile(&profile_path)?;
            run_autopilot(studio, &profile, config.publish_hour, confirm).await
        }
        Commands::Publish { .. } => {
            anyhow::bail!("publish does not use the model gateway")
        }
    }
}

async fn run_topics(
    studio: &Studio,
    resume: Option<&Path>,
    website: Option<&str>,
) -> anyhow::Result<()> {
    let resume = match resume {
        Some(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|e| anyhow::anyhow!("failed to read resume {}: {e}", path.display()))?;
            Some(InlineData::new("application/pdf", bytes))
        }
        None => None,
    };
    let topics = studio.suggest_topics(resume.as_ref(), website).await?;
    print_json(&topics)
}

/// Plan the week, generate every post and print the batch.
///
/// Progress lines are printed as each post arrives. With `confirm` the drafts
/// are scheduled before printing.
async fn run_autopilot(
    studio: Studio,
    profile: &Profile,
    publish_hour: u32,
    confirm: bool,
) -> anyhow::Result<()> {
    let plan = studio.plan_week(profile).await?;
    if plan.is_empty() {
        eprintln!("planner returned no items; nothing to generate");
        return print_json(&Value::Array(Vec::new()));
    }
    for item in &plan {
        eprintln!(
            "planned {}: {} [{} / {} / {}]",
            item.day, item.topic, item.language, item.tone, item.format
        );
    }

    let autopilot = Autopilot::new(studio, publish_hour);
    let mut rx = autopilot.subscribe();
    let progress = tokio::spawn(async move {
        let mut reported = 0;
        while rx.changed().await.is_ok() {
            let snapshot = rx.borrow_and_update().clone();
            for post in snapshot.posts.iter().skip(reported) {
                eprintln!(
                    "[{}/{}] {} -> {}",
                    snapshot.processed,
                    snapshot.total,
                    post.topic,
                    post.scheduled_date.format("%a %Y-%m-%d %H:%M UTC")
                );
            }
            reported = snapshot.posts.len();
            if snapshot.phase == BatchPhase::Completed {
                if snapshot.failed > 0 {
                    eprintln!("{} item(s) failed and were skipped", snapshot.failed);
                }
                if snapshot.cancelled {
                    eprintln!("batch cancelled");
                }
                break;
            }
        }
    });

    let mut posts = autopilot.run_batch(&plan, profile).await;
    if let Err(e) = progress.await {
        tracing::warn!(error = %e, "progress reporter stopped unexpectedly");
    }

    if confirm {
        posts = schedule_all(posts);
        eprintln!("{} post(s) scheduled", posts.len());
    }
    print_json(&posts)
}
