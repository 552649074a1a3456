use crate::infra::{bootstrap, OutputFormat, ViewArgs};
use crate::render::render_view;
use clap::Args;
use recruit_reports::error::AppError;
use recruit_reports::reports::{ConsolidatedView, JsonDirectorySource, ReportAssembler};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// Directory holding profiles.json, clients.json, and candidates.json
    /// (overrides REPORT_DATA_DIR)
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
    #[command(flatten)]
    pub(crate) view: ViewArgs,
}

pub(crate) async fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs { data_dir, view } = args;
    let config = bootstrap()?;

    let data_dir = data_dir.unwrap_or(config.sources.data_dir);
    info!(?config.environment, data_dir = %data_dir.display(), "reading report feeds");

    let assembler = ReportAssembler::new(
        Arc::new(JsonDirectorySource::new(data_dir)),
        config.reporting,
    );
    let report = assembler.generate_at(view.filter(), view.as_of()).await?;
    emit(&report, view.format)
}

pub(crate) fn emit(view: &ConsolidatedView, format: OutputFormat) -> Result<(), AppError> {
    match format {
        OutputFormat::Text => render_view(view),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(view)?),
    }
    Ok(())
}
