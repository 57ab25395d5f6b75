use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod energy_cmd;
mod plan_cmd;
mod render;
mod state;
mod task_cmd;

use energy_cmd::EnergyCommand;
use plan_cmd::PlanArgs;
use task_cmd::TaskCommand;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CADENCE_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "cadence",
    version = VERSION,
    about = "Energy-aware daily planner"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage tasks in ~/.cadence/tasks.json
    Task {
        #[command(subcommand)]
        command: TaskCommand,
    },

    /// Energy check-ins
    Energy {
        #[command(subcommand)]
        command: EnergyCommand,
    },

    /// Build today's plan from your tasks and latest energy check-in
    Plan(PlanArgs),

    /// Read or initialize ~/.cadence/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,

    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let dir = state::ensure_cadence_home()?;
    let cfg = config::load_config(&dir)?;
    init_tracing(&cfg.log.level);

    match cli.command {
        Command::Task { command } => task_cmd::run(command, &dir)?,
        Command::Energy { command } => energy_cmd::run(command, &dir)?,
        Command::Plan(args) => plan_cmd::run(args, &cfg, &dir)?,
        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(&dir)?,
            ConfigCommand::Show => config::show_config(&dir)?,
        },
    }

    Ok(())
}

/// `RUST_LOG` wins, then the configured level, then `warn`. Logs go to
/// stderr so `--json` output stays clean.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
