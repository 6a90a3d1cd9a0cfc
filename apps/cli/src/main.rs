mod commands;
mod io;
mod runtime;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::prelude::*;

use crate::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "curator", version, about = "Podcast highlights and community curation")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    global: GlobalArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Read input from this file instead of stdin.
    #[arg(long, global = true)]
    pub input: Option<PathBuf>,

    /// Give up on the model after this many seconds and fall back.
    #[arg(long, global = true, env = "CURATOR_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Sent as the `x-demo-token` header to the model gate.
    #[arg(long, global = true, env = "CURATOR_DEMO_TOKEN")]
    pub demo_token: Option<String>,

    /// Never call the model; always produce fallback records.
    #[arg(long, global = true)]
    pub offline: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split a plain-text transcript into timed segments.
    Segment,
    /// Ground a quote against segments: `{segments, quote, fallbackIndex?}`.
    Align,
    /// Extract highlights: `{transcript, maxHighlights?, segments?}`.
    Highlights,
    /// Cluster comments by stance: `{comments, clusterK?}`.
    Clusters,
    /// Draft replies: `{targetCluster?, tone?, constraints?, evidence?}`.
    Drafts,
    /// Summarize a thread: `{post, comments, mode?}`.
    Summary,
    /// Build a share card: `{episodeTitle?, highlights?, tone?}`.
    ShareCard,
    /// Transcribe an audio file read from the input.
    Transcribe {
        /// Mime type or format name of the audio, e.g. `audio/mpeg` or `mp3`.
        #[arg(long, default_value = "audio/mpeg")]
        mime: String,
    },
    /// Score a podcast run report.
    EvaluatePodcast,
    /// Score a community run report.
    EvaluateCommunity,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Command::Segment => commands::transcript::segment(&global),
        Command::Align => commands::transcript::align(&global),
        Command::Highlights => commands::tasks::highlights(&Runtime::new(&global)?, &global).await,
        Command::Clusters => commands::tasks::clusters(&Runtime::new(&global)?, &global).await,
        Command::Drafts => commands::tasks::drafts(&Runtime::new(&global)?, &global).await,
        Command::Summary => commands::tasks::summary(&Runtime::new(&global)?, &global).await,
        Command::ShareCard => commands::tasks::share_card(&Runtime::new(&global)?, &global).await,
        Command::Transcribe { mime } => {
            commands::transcribe::run(&Runtime::new(&global)?, &global, &mime).await
        }
        Command::EvaluatePodcast => commands::eval::podcast(&global),
        Command::EvaluateCommunity => commands::eval::community(&global),
    }
}
