//! Glass CLI: the `glass` command.

mod cli;
mod commands;
mod config;
mod logging;
mod render;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let config = support::load_config_or_exit(cli.config.as_deref());

    if let Err(e) = logging::init(cli.log.as_deref(), config.log.filter.as_deref()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }

    match cli.command {
        Commands::Run {
            goal,
            verbose,
            cycles,
            json,
        } => commands::run::run(commands::run::Args {
            goal,
            verbose,
            cycles: cycles.unwrap_or(config.run.cycles),
            json,
        }),

        Commands::Layout { goal } => commands::layout::run(goal),

        Commands::Check { goal, json } => commands::check::run(goal, json),
    }
}
