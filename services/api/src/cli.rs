use crate::demo::{run_demo, run_fleet_status, DemoArgs, FleetStatusArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use wisar_fleet::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "WISAR Fleet Log",
    about = "Track vehicle drive and pump tests for the search and rescue fleet",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect the fleet roster from the command line
    Fleet {
        #[command(subcommand)]
        command: FleetCommand,
    },
    /// Walk through an overdue vehicle being brought back into service
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum FleetCommand {
    /// Print every vehicle ranked by inspection urgency
    Status(FleetStatusArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Vehicle roster CSV to seed the store with (overrides FLEET_ROSTER_CSV)
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Fleet {
            command: FleetCommand::Status(args),
        } => run_fleet_status(args),
        Command::Demo(args) => run_demo(args),
    }
}
