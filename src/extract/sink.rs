use std::path::Path;

use super::pipeline::{PlanStage, RunSummary};
use super::service::StructureInfo;
use crate::error::{ExtractError, ServiceError};

/// Receives pipeline events. Handed to the extractor at construction and lives
/// for one run.
pub trait ExtractionLog {
    fn plan_started(&mut self, patient_id: &str, plan_uid: &str);
    /// `total` counts every structure of the set, empty ones included.
    fn structure_started(&mut self, plan_uid: &str, structure: &StructureInfo, total: usize);
    fn structure_failed(&mut self, plan_uid: &str, structure: &StructureInfo, error: &ServiceError);
    fn unrepresentable_value(&mut self, plan_uid: &str, path: &str, value: f64);
    fn plan_failed(&mut self, plan_uid: &str, reached: PlanStage, error: &ExtractError);
    fn plan_completed(&mut self, plan_uid: &str, structures: usize, output: &Path);
    fn run_finished(&mut self, summary: &RunSummary);
}

/// Forwards every event to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ExtractionLog for LogSink {
    fn plan_started(&mut self, patient_id: &str, plan_uid: &str) {
        log::info!("Processing plan {plan_uid} of patient {patient_id}");
    }

    fn structure_started(&mut self, plan_uid: &str, structure: &StructureInfo, total: usize) {
        log::debug!(
            "Plan {plan_uid}: structure {} ({}) of {total}",
            structure.id,
            structure.name
        );
    }

    fn structure_failed(&mut self, plan_uid: &str, structure: &StructureInfo, error: &ServiceError) {
        log::error!(
            "Plan {plan_uid}: DVH failed for structure {} ({}): {error}",
            structure.id,
            structure.name
        );
    }

    fn unrepresentable_value(&mut self, plan_uid: &str, path: &str, value: f64) {
        log::error!("Plan {plan_uid}: not JSON representable at {path}: f64 {value}");
    }

    fn plan_failed(&mut self, plan_uid: &str, reached: PlanStage, error: &ExtractError) {
        log::error!("Plan {plan_uid} failed after {reached:?}: {error}");
    }

    fn plan_completed(&mut self, plan_uid: &str, structures: usize, output: &Path) {
        log::info!(
            "Plan {plan_uid}: wrote {structures} structure(s) to {}",
            output.display()
        );
    }

    fn run_finished(&mut self, summary: &RunSummary) {
        log::info!(
            "Extraction finished: {} plan(s) completed, {} failed",
            summary.completed(),
            summary.failed()
        );
    }
}
