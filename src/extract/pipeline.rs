use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use super::jsonable::unrepresentable_values;
use super::record::{PlanDvhRecord, StructureDvhRecord};
use super::service::{DvhCalculator, StructureCatalog};
use super::sink::ExtractionLog;
use crate::config::ExtractorConfig;
use crate::error::{ExtractError, ExtractResult};
use crate::model::{Patient, Plan, Registry};

/// Progress of one plan through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStage {
    Pending,
    StructureResolved,
    DoseResolved,
    StructuresEnumerated,
    Completed,
    Failed,
}

#[derive(Debug)]
pub enum PlanResult {
    Completed {
        structures: usize,
        output: PathBuf,
    },
    /// `reached` is the last stage the plan got through before failing.
    Failed {
        reached: PlanStage,
        error: ExtractError,
    },
}

#[derive(Debug)]
pub struct PlanOutcome {
    pub patient_id: String,
    pub plan_uid: String,
    pub result: PlanResult,
}

impl PlanOutcome {
    pub fn stage(&self) -> PlanStage {
        match self.result {
            PlanResult::Completed { .. } => PlanStage::Completed,
            PlanResult::Failed { .. } => PlanStage::Failed,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.stage() == PlanStage::Completed
    }
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<PlanOutcome>,
}

impl RunSummary {
    pub fn completed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_completed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.completed()
    }

    pub fn outcome(&self, plan_uid: &str) -> Option<&PlanOutcome> {
        self.outcomes.iter().find(|o| o.plan_uid == plan_uid)
    }
}

type Staged<T> = Result<T, (PlanStage, ExtractError)>;

/// Runs every plan of a fully built registry through resolution, DVH computation
/// and serialization. A failing plan never stops the run.
pub struct Extractor<'a, L: ExtractionLog> {
    config: &'a ExtractorConfig,
    catalog: &'a dyn StructureCatalog,
    calculator: &'a dyn DvhCalculator,
    log: L,
}

impl<'a, L: ExtractionLog> Extractor<'a, L> {
    pub fn new(
        config: &'a ExtractorConfig,
        catalog: &'a dyn StructureCatalog,
        calculator: &'a dyn DvhCalculator,
        log: L,
    ) -> Self {
        Self {
            config,
            catalog,
            calculator,
            log,
        }
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn into_log(self) -> L {
        self.log
    }

    pub fn extract_all(&mut self, registry: &Registry) -> RunSummary {
        let mut summary = RunSummary::default();
        for patient in registry.patients() {
            for plan in patient.plans().values() {
                summary.outcomes.push(self.extract_plan(patient, plan));
            }
        }
        self.log.run_finished(&summary);
        summary
    }

    pub fn extract_plan(&mut self, patient: &Patient, plan: &Plan) -> PlanOutcome {
        let plan_uid = plan.sop_instance_uid();
        self.log.plan_started(patient.id(), plan_uid);

        let written = self.build_record(patient, plan).and_then(|record| {
            let structures = record.structures_dvh.len();
            self.write_record(patient.id(), &record)
                .map(|output| (structures, output))
                .map_err(|error| (PlanStage::StructuresEnumerated, error))
        });

        let result = match written {
            Ok((structures, output)) => {
                self.log.plan_completed(plan_uid, structures, &output);
                PlanResult::Completed { structures, output }
            }
            Err((reached, error)) => {
                self.log.plan_failed(plan_uid, reached, &error);
                PlanResult::Failed { reached, error }
            }
        };

        PlanOutcome {
            patient_id: patient.id().to_string(),
            plan_uid: plan_uid.to_string(),
            result,
        }
    }

    fn build_record(&mut self, patient: &Patient, plan: &Plan) -> Staged<PlanDvhRecord> {
        let plan_uid = plan.sop_instance_uid();

        let structure_set = patient.structure_set_for_plan(plan).ok_or_else(|| {
            (
                PlanStage::Pending,
                ExtractError::NoStructureSet {
                    plan_uid: plan_uid.to_string(),
                },
            )
        })?;
        let dose = patient.dose_for_plan(plan).ok_or_else(|| {
            (
                PlanStage::StructureResolved,
                ExtractError::NoDose {
                    plan_uid: plan_uid.to_string(),
                },
            )
        })?;
        let structures = self
            .catalog
            .structures(structure_set.file_location())
            .map_err(|error| (PlanStage::DoseResolved, ExtractError::Enumeration(error)))?;

        let total = structures.len();
        let mut structures_dvh = Vec::new();
        for structure in structures.values().filter(|structure| !structure.empty) {
            self.log.structure_started(plan_uid, structure, total);
            let computed = self
                .calculator
                .compute_dvh(
                    structure_set.file_location(),
                    dose.file_location(),
                    structure.id,
                )
                .and_then(|dvh| StructureDvhRecord::new(structure, dvh, plan.planned_dose()));
            match computed {
                Ok(record) => structures_dvh.push(record),
                Err(error) => self.log.structure_failed(plan_uid, structure, &error),
            }
        }

        Ok(PlanDvhRecord {
            plan_instance_uid: plan_uid.to_string(),
            structures_dvh,
        })
    }

    /// Writes `<output>/<patient>/<plan>.json`. Records holding non-finite numbers are
    /// reported value by value and never reach the disk.
    fn write_record(&mut self, patient_id: &str, record: &PlanDvhRecord) -> ExtractResult<PathBuf> {
        let bad = unrepresentable_values(record);
        if !bad.is_empty() {
            for (path, value) in &bad {
                self.log
                    .unrepresentable_value(&record.plan_instance_uid, path, *value);
            }
            return Err(ExtractError::Unrepresentable {
                plan_uid: record.plan_instance_uid.clone(),
                count: bad.len(),
            });
        }

        let path = self
            .config
            .plan_output_path(patient_id, &record.plan_instance_uid)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|source| ExtractError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let file = File::create(&path).map_err(|source| ExtractError::Io {
            path: path.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, record)?;
        writer.flush().map_err(|source| ExtractError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
