use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "outline-renumber", version)]
#[command(about = "Renumber the top-level items of a hand-edited list", long_about = None)]
pub struct Cli {
    /// Files or glob patterns to renumber. Reads stdin when empty or `-`
    pub files: Vec<String>,

    /// Rewrite files in place instead of printing them
    #[arg(short, long, conflicts_with = "check")]
    pub in_place: bool,

    /// Print to stdout even if the config enables in-place rewriting
    #[arg(long, conflicts_with_all = ["in_place", "check"])]
    pub stdout: bool,

    /// Exit with status 1 if anything would be renumbered; writes nothing
    #[arg(long)]
    pub check: bool,

    /// Config file to use instead of ~/.config/outline-renumber/config.toml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write a default config file and exit
    #[arg(long, conflicts_with_all = ["files", "in_place", "stdout", "check"])]
    pub init_config: bool,

    /// More logging (repeatable)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}
