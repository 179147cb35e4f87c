use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "glass",
    about = "Glass: run a node landscape toward a goal",
    version
)]
pub struct Cli {
    /// Tracing filter directives (overrides RUST_LOG and the config file)
    #[arg(long, global = true)]
    pub log: Option<String>,

    /// Path to a runner config (TOML); defaults to ./glass.toml when present
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assemble a landscape from a goal file and run it
    Run {
        /// Path to a goal JSON file
        #[arg(long)]
        goal: String,

        /// Print every node's belief and measurement
        #[arg(long)]
        verbose: bool,

        /// Number of run cycles (overrides the config file)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        cycles: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the grid layout a goal file assembles to
    Layout {
        /// Path to a goal JSON file
        #[arg(long)]
        goal: String,
    },

    /// Assemble a goal file without running it
    Check {
        /// Path to a goal JSON file
        #[arg(long)]
        goal: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
