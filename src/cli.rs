use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface for `revio`.
#[derive(Parser, Debug)]
#[clap(author, version, about = "Heuristic code review with a mock AI flavour", long_about = None, name = "revio")]
pub struct RevioArgs {
    #[clap(subcommand)]
    pub command: RevioSubCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum RevioSubCommand {
    /// Review a source file (or stdin) and print the findings.
    #[clap(alias = "r")]
    Review(ReviewArgs),
    /// Print the language the reviewer would scan the code as.
    Detect(DetectArgs),
    /// Serve the review API over HTTP.
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ReviewArgs {
    /// File to review; reads stdin when omitted or "-".
    pub file: Option<PathBuf>,

    /// Language the code is declared to be written in.
    #[clap(short, long)]
    pub language: Option<String>,

    /// Fail when the declared language differs from the detected one.
    #[clap(long)]
    pub enforce_language: bool,

    /// Print the review as JSON.
    #[clap(long)]
    pub json: bool,

    /// Skip the simulated model latency.
    #[clap(long)]
    pub no_delay: bool,
}

#[derive(Args, Debug, Clone)]
pub struct DetectArgs {
    /// File to inspect; reads stdin when omitted or "-".
    pub file: Option<PathBuf>,

    /// Also validate against this declared language.
    #[clap(short, long)]
    pub language: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Interface to bind; overrides the config file.
    #[clap(long)]
    pub host: Option<String>,

    /// Port to listen on; overrides the config file and $PORT.
    #[clap(short, long)]
    pub port: Option<u16>,
}
