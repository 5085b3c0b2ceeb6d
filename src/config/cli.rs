use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "cube-solver")]
#[command(about = "Validate, encode and solve Rubik's cube states")]
pub struct CliConfig {
    #[arg(long, short, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Solve the cube in a JSON request body (`-` reads stdin)
    Solve { body: PathBuf },
    /// Validate the cube in a JSON request body without solving it
    Validate { body: PathBuf },
    /// Show recorded solves
    History {
        #[arg(long)]
        limit: Option<String>,
        #[arg(long)]
        offset: Option<String>,
        #[arg(long, help = "Write the page as CSV instead of JSON")]
        csv: Option<PathBuf>,
    },
    /// Report service health
    Health,
    /// Serve one JSON request envelope per stdin line
    Stdio,
}

impl CliConfig {
    pub fn reads_stdin(path: &std::path::Path) -> bool {
        path.as_os_str() == "-"
    }
}
