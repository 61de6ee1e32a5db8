use crate::console::{run_catalog, run_quote, run_status, CatalogArgs, QuoteArgs, StatusArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use keyhaven::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Keyhaven",
    about = "Serve the Keyhaven rental marketplace or price and look up bookings from the terminal",
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
    /// Print the fee breakdown for leasing a property
    Quote(QuoteArgs),
    /// Look up a reservation by its booking code
    Status(StatusArgs),
    /// List or search the property catalog
    Catalog(CatalogArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Quote(args) => run_quote(args),
        Command::Status(args) => run_status(args),
        Command::Catalog(args) => run_catalog(args),
    }
}
