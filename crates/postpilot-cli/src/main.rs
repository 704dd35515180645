mod generate;
mod publish;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use postpilot_core::{ContentFormat, PostLanguage, Tone};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "postpilot")]
#[command(about = "PostPilot LinkedIn content studio")]
struct Cli {
    /// Profile YAML file (overrides `POSTPILOT_PROFILE_PATH`)
    #[arg(long, global = true)]
    profile: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Suggest content pillars from a resume and website
    Topics {
        /// PDF resume to analyse
        #[arg(long)]
        resume: Option<PathBuf>,
        /// Personal or company website
        #[arg(long)]
        website: Option<String>,
    },
    /// Find trending content ideas for a topic
    Research { topic: String },
    /// Write one post with its image
    Post {
        topic: String,
        /// Defaults to the profile tone
        #[arg(long)]
        tone: Option<Tone>,
        #[arg(long, default_value = "CINEMATIC_PHOTO")]
        format: ContentFormat,
        /// ES or EN; defaults to the profile language
        #[arg(long)]
        language: Option<PostLanguage>,
        /// News headline to weave into the post
        #[arg(long)]
        news: Option<String>,
        /// Schedule the draft for 24 hours from now
        #[arg(long)]
        schedule: bool,
    },
    /// Plan the coming week
    Plan,
    /// Plan the week and generate every post
    Autopilot {
        /// Schedule the generated drafts
        #[arg(long)]
        confirm: bool,
    },
    /// Simulate publishing a post saved as JSON
    Publish {
        post: PathBuf,
        #[arg(long, env = "POSTPILOT_PUBLISH_STEP_DELAY_MS", default_value_t = 800)]
        step_delay_ms: u64,
        #[arg(long, env = "POSTPILOT_PUBLISH_SETTLE_DELAY_MS", default_value_t = 1500)]
        settle_delay_ms: u64,
    },
}

fn init_tracing(fallback: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Clap reads the publish delay defaults from the environment.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Commands::Publish {
        post,
        step_delay_ms,
        settle_delay_ms,
    } = &cli.command
    {
        let level = std::env::var("POSTPILOT_LOG_LEVEL").unwrap_or_else(|_| "info".to_owned());
        init_tracing(&level)?;
        return publish::run_publish(post, *step_delay_ms, *settle_delay_ms).await;
    }

    let config = postpilot_core::load_app_config()?;
    init_tracing(&config.log_level)?;
    tracing::debug!(env = %config.env, "configuration loaded");

    generate::run(cli.command, cli.profile, &config).await
}
