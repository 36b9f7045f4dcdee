use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::refresh::RefreshArgs;
use crate::route::RouteArgs;

mod graph;
mod parsers;
mod refresh;
mod route;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a single route on the loaded graph
    #[command(visible_alias = "r")]
    Route {
        #[command(flatten)]
        args: RouteArgs,
    },
    /// Run one refresh cycle and print congestion statistics
    Refresh {
        #[command(flatten)]
        args: RefreshArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Commands::Route { args } => route::run(args).await?,
        Commands::Refresh { args } => refresh::run(args).await?,
    }

    Ok(())
}
