use std::path::PathBuf;

use clap::Parser;
use tutor_core::model::ModuleId;

/// Terminal statistics tutor.
#[derive(Debug, Parser)]
#[command(name = "tutor", version, about)]
pub struct Args {
    /// Start directly in this module.
    #[arg(long, short)]
    pub module: Option<ModuleId>,

    /// Load the syllabus from a JSON file instead of the built-in one.
    #[arg(long, env = "TUTOR_CURRICULUM")]
    pub curriculum: Option<PathBuf>,

    /// How long feedback on a correct answer stays up before the next question.
    #[arg(long, default_value_t = 3_500)]
    pub advance_delay_ms: u64,

    /// Give up on a question or grading request after this many seconds.
    #[arg(long, default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Log at debug level (RUST_LOG overrides).
    #[arg(long, short)]
    pub verbose: bool,
}
