use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use update_gate::config::GateConfig;
use update_gate::gate::coordinator::UpdateCoordinator;
use update_gate::gate::decision::GateVerdict;

#[derive(Parser)]
#[command(name = "update-gate")]
#[command(version, about = "Force/optional update gate for application launches")]
struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a single update check and print the verdict
    Check {
        /// Ignore any cached verdict and fetch fresh metadata
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GateConfig::load(path)?,
        None => GateConfig::default(),
    };

    match cli.command {
        Command::Check { force } => tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?
            .block_on(run_check(config, force)),
    }
}

async fn run_check(config: GateConfig, force: bool) -> anyhow::Result<ExitCode> {
    let coordinator = UpdateCoordinator::from_config(&config);
    let verdict = coordinator.check_now(force).await;

    match &verdict {
        GateVerdict::Proceed => println!("up to date"),
        GateVerdict::OptionalUpdate { latest } => {
            println!("update available: {latest}");
        }
        GateVerdict::ForcedUpdate { min_required } => {
            println!("update required: minimum supported version is {min_required}");
        }
    }

    // Exit code 2 lets wrapping scripts distinguish a blocking verdict.
    Ok(if verdict.is_blocking() {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    })
}
