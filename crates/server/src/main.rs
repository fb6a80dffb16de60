mod cli;
mod handlers;

use std::process::ExitCode;

use clap::Parser;
use slim_web::Server;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder().with_max_level(cli.log_level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("setting default subscriber failed: {e}");
        return ExitCode::FAILURE;
    }

    info!(directory = %cli.directory.display(), address = %cli.address, "starting");

    let server = match Server::builder().router(handlers::router(cli.directory)).address(cli.address.as_str()).build() {
        Ok(server) => server,
        Err(e) => {
            error!(cause = %e, "invalid server setup");
            return ExitCode::FAILURE;
        }
    };

    match server.start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(cause = %e, "server stopped");
            ExitCode::FAILURE
        }
    }
}
