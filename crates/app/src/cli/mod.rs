use clap::{Parser, Subcommand};

mod dispatch;
mod estimate;
mod search;

#[derive(Debug, Parser)]
#[command(name = "alero-app", about = "Alero storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the next dispatch slot for a product category
    Dispatch(dispatch::DispatchArgs),
    /// Search the live catalog
    Search(search::SearchArgs),
    /// Estimate the cost of a roofing project
    Estimate(estimate::EstimateArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Dispatch(args) => dispatch::run(&args),
            Commands::Search(args) => search::run(args).await,
            Commands::Estimate(args) => estimate::run(&args),
        }
    }
}
