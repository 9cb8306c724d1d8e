use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod plan_cmd;
mod state;

use plan_cmd::PlanArgs;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("FOCUSFORGE_BUILD_SHA"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "focusforge", version = VERSION, about = "Plan your day into focused time blocks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build today's schedule from a task file
    Plan(PlanArgs),

    /// List tasks with their deadline score
    Tasks {
        /// Task file (.json, .csv or .md). Defaults to general.tasks_file
        #[arg(long)]
        tasks: Option<PathBuf>,
    },

    /// Manage ~/.focusforge/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,

    /// Print the effective config
    Show,
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("FOCUSFORGE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Plan(args) => plan_cmd::run_plan(&args)?,
        Command::Tasks { tasks } => plan_cmd::run_tasks(tasks.as_deref())?,
        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_plan_flags() {
        let cli = Cli::try_parse_from([
            "focusforge",
            "plan",
            "--mode",
            "energy",
            "--energy",
            "2",
            "--no-pomodoro",
            "--date",
            "2026-10-19",
            "--json",
        ])
        .unwrap();

        let Command::Plan(args) = cli.command else {
            panic!("expected plan");
        };
        assert_eq!(args.mode.as_deref(), Some("energy"));
        assert_eq!(args.energy.as_deref(), Some("2"));
        assert!(args.no_pomodoro);
        assert!(args.json);
        assert_eq!(args.date, chrono::NaiveDate::from_ymd_opt(2026, 10, 19));
    }

    #[test]
    fn parses_config_subcommands() {
        let cli = Cli::try_parse_from(["focusforge", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config {
                command: ConfigCommand::Show
            }
        ));
    }
}
