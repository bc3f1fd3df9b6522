//! Per-plan DVH extraction: resolve links, compute a histogram per structure,
//! write one JSON record per plan.

pub mod catalog;
pub mod jsonable;
pub mod pipeline;
pub mod record;
pub mod service;
pub mod sink;

pub use catalog::RtStructCatalog;
pub use pipeline::{Extractor, PlanOutcome, PlanResult, PlanStage, RunSummary};
pub use record::{PlanDvhRecord, StructureDvhRecord};
pub use service::{ComputedDvh, DvhCalculator, StructureCatalog, StructureInfo};
pub use sink::{ExtractionLog, LogSink};

use crate::config::ExtractorConfig;
use crate::error::RecordResult;
use crate::model::Registry;

/// Scans the input folder, then extracts every plan found.
///
/// The registry is complete before the first plan is resolved.
pub fn batch_process<L: ExtractionLog>(
    config: &ExtractorConfig,
    catalog: &dyn StructureCatalog,
    calculator: &dyn DvhCalculator,
    log: L,
) -> RecordResult<RunSummary> {
    let (registry, _stats) = Registry::scan(config.input_dir(), config.extension())?;
    let mut extractor = Extractor::new(config, catalog, calculator, log);
    Ok(extractor.extract_all(&registry))
}
