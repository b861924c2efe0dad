use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(name = "cardwise", version, about = "Cardwise spaced-repetition study CLI")]
pub struct Cli {
    /// Config file (defaults to config.toml in the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `info` or `cardwise_core=debug`
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print the ordered study queue for a deck file
    Queue(QueueCmd),
    /// Study a deck file interactively
    Study(StudyCmd),
}

#[derive(Debug, Args, Clone, Default)]
pub struct LimitArgs {
    /// Override the configured daily cap on new cards
    #[arg(long)]
    pub new_per_day: Option<usize>,
    /// Override the configured daily cap on reviews
    #[arg(long)]
    pub reviews_per_day: Option<usize>,
}

#[derive(Debug, Args, Clone)]
pub struct QueueCmd {
    /// TOML deck description
    pub deck_file: PathBuf,
    #[command(flatten)]
    pub limits: LimitArgs,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct StudyCmd {
    /// TOML deck description
    pub deck_file: PathBuf,
    #[command(flatten)]
    pub limits: LimitArgs,
    /// Print the session summary as JSON
    #[arg(long)]
    pub json: bool,
}
