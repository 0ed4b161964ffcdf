use std::io::Write;

use clap::Parser;
use serde::Serialize;

use crate::error::Result;

/// Argument the search binary treats as "print the dataset".
pub const LOAD_DATA_ONLY: &str = "load_data_only";

/// Every argument is positional and may start with `-`: the host passes
/// user text straight through, so `argv[1]` is always the query. There are
/// no flags; log verbosity comes from `KURALSEARCH_LOG`.
#[derive(Debug, Parser)]
#[command(
    name = "kural-search",
    about = "Keyword search over the Thirukkural couplets",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct SearchCli {
    /// Search query, or `load_data_only` to print the decoded dataset
    #[arg(allow_hyphen_values = true)]
    pub query: Option<String>,

    /// Maximum number of results
    pub limit: Option<usize>,

    /// Extra arguments are ignored
    #[arg(hide = true, allow_hyphen_values = true)]
    pub rest: Vec<String>,
}

#[derive(Debug, Parser)]
#[command(
    name = "kural-tts",
    about = "Read couplet text aloud and print the audio as base64",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct SpeechCli {
    /// Text to synthesize; HTML tags are stripped first
    #[arg(allow_hyphen_values = true)]
    pub text: Option<String>,

    /// Language tag: `tamil` or `english`
    #[arg(allow_hyphen_values = true)]
    pub language: Option<String>,

    /// Extra arguments are ignored
    #[arg(hide = true, allow_hyphen_values = true)]
    pub rest: Vec<String>,
}

/// Write `value` as a single line of JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer(&mut out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
