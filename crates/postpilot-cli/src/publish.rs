//! `publish`: run the simulated publish sequence for a saved post.

use std::path::Path;
use std::time::Duration;

use postpilot_core::Post;
use postpilot_studio::PublishSimulator;
use tokio_util::sync::CancellationToken;

pub(crate) async fn run_publish(
    path: &Path,
    step_delay_ms: u64,
    settle_delay_ms: u64,
) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| anyhow::anyhow!("failed to read post {}: {e}", path.display()))?;
    let post: Post = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("{} is not a valid post: {e}", path.display()))?;

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    let simulator = PublishSimulator::new(
        Duration::from_millis(step_delay_ms),
        Duration::from_millis(settle_delay_ms),
    );
    let published = simulator
        .publish(post, &cancel, |event| eprintln!("{}", event.message))
        .await?;

    println!("{}", serde_json::to_string_pretty(&published)?);
    Ok(())
}
