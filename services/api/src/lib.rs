mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use smart_hr::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
