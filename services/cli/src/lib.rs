mod cli;
mod demo;
mod infra;
mod render;
mod report;

use recruit_reports::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
