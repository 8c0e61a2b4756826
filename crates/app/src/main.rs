mod cli;
mod input;
mod render;
mod repl;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use services::ai::{AiAnswerGrader, AiClient, AiQuestionProvider};
use services::{SessionConfig, TutorSession};
use tutor_core::model::Curriculum;

use crate::cli::Args;

/// Level used when `RUST_LOG` is unset. Stays at `warn` so lifecycle logs do
/// not interleave with the prompt on stderr.
fn default_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_curriculum(path: Option<&Path>) -> Result<Curriculum, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(Curriculum::builtin());
    };
    let raw = std::fs::read_to_string(path)?;
    let curriculum: Curriculum = serde_json::from_str(&raw)?;
    info!(path = %path.display(), modules = curriculum.len(), "curriculum loaded");
    Ok(curriculum)
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let curriculum = Arc::new(load_curriculum(args.curriculum.as_deref())?);

    let client = AiClient::from_env();
    if client.enabled() {
        info!(model = client.model().unwrap_or_default(), "AI provider configured");
    } else {
        warn!("TUTOR_AI_API_KEY is not set; questions and grading will use fallbacks");
    }

    let config = SessionConfig::default()
        .with_advance_delay(Duration::from_millis(args.advance_delay_ms))
        .with_request_timeout(Duration::from_secs(args.request_timeout_secs));

    let session = TutorSession::new(
        curriculum,
        Arc::new(AiQuestionProvider::new(client.clone())),
        Arc::new(AiAnswerGrader::new(client)),
    )
    .with_config(config);

    repl::run(session, args.module).await
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);
    if let Err(err) = run(args).await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
