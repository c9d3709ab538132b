use crate::demo::{run_demo, run_marketplace_import, DemoArgs, MarketplaceImportArgs};
use crate::server;
use agrilink::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "AgriLink Logistics Marketplace",
    about = "Run and demonstrate the AgriLink logistics marketplace from the command line",
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
    /// Work with marketplace listings from the command line
    Marketplace {
        #[command(subcommand)]
        command: MarketplaceCommand,
    },
    /// Walk the transport lifecycle and a marketplace purchase end to end
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum MarketplaceCommand {
    /// Import listings from a CSV export and print the created records
    Import(MarketplaceImportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Seed the demo fleet, requests, listings, and accounts before serving
    #[arg(long)]
    pub(crate) seed_demo: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Marketplace {
            command: MarketplaceCommand::Import(args),
        } => run_marketplace_import(args),
        Command::Demo(args) => run_demo(args),
    }
}
