// Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "jobdeck", version, about = "Overview of the jobs in a Dagit workspace")]
pub struct Cli {
    /// GraphQL endpoint URL (overrides config and DAGIT_URL)
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Refresh interval in seconds
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Path to the config file
    #[arg(short, long, env = "JOBDECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the resolved config file path and exit
    #[arg(long)]
    pub print_config_path: bool,
}
