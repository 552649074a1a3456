use crate::demo::{run_demo, DemoArgs};
use crate::report::{run_report, ReportArgs};
use clap::{Parser, Subcommand};
use recruit_reports::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Recruitment Reports",
    about = "Build consolidated director reports from profile, client, and candidate feeds",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a consolidated report from JSON feeds on disk (default command)
    Report(ReportArgs),
    /// Build a report from the bundled sample agency data
    Demo(DemoArgs),
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Report(ReportArgs::default()));

    match command {
        Command::Report(args) => run_report(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}
