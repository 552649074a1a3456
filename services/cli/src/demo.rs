use crate::infra::{bootstrap, ViewArgs};
use crate::report::emit;
use clap::Args;
use recruit_reports::error::AppError;
use recruit_reports::reports::{InMemorySource, RawCollection, ReportAssembler};
use std::sync::Arc;

const SAMPLE_PROFILES: &str = include_str!("../data/profiles.json");
const SAMPLE_CLIENTS: &str = include_str!("../data/clients.json");
const SAMPLE_CANDIDATES: &str = include_str!("../data/candidates.json");

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    #[command(flatten)]
    pub(crate) view: ViewArgs,
}

/// The bundled agency feeds, deliberately inconsistent in field naming and
/// with a few broken references.
pub(crate) fn sample_source() -> Result<InMemorySource, AppError> {
    Ok(InMemorySource::new(
        RawCollection::from_slice(SAMPLE_PROFILES.as_bytes())?,
        RawCollection::from_slice(SAMPLE_CLIENTS.as_bytes())?,
        RawCollection::from_slice(SAMPLE_CANDIDATES.as_bytes())?,
    ))
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { view } = args;
    let config = bootstrap()?;

    println!("Consolidated reporting demo (bundled sample agency data)");
    let assembler = ReportAssembler::new(Arc::new(sample_source()?), config.reporting);
    let report = assembler.generate_at(view.filter(), view.as_of()).await?;
    emit(&report, view.format)
}
