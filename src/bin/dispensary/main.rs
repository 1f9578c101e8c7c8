//! Dispensary CLI
//!
//! Browse the fixture catalog, build a cart and place an order against an in-memory order book.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use crate::cli::Cli;

mod cli;
mod config;

#[tokio::main]
async fn main() -> ExitCode {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    cli.config().init_tracing();

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "command failed");

            #[expect(
                clippy::print_stderr,
                reason = "the failure must reach the user whatever the log level"
            )]
            {
                eprintln!("error: {err:#}");
            }

            ExitCode::FAILURE
        }
    }
}
