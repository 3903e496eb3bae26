mod checks;
mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use brokerage_intake::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
