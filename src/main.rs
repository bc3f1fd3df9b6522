use std::path::PathBuf;
use std::process::ExitCode;

use dvhextract::config::{ExtractorConfig, DEFAULT_EXTENSION};
use dvhextract::extract::{RtStructCatalog, StructureCatalog};
use dvhextract::model::{Patient, Plan, Registry};
use dvhextract::utils::formatting::short_uid;

const UID_WIDTH: usize = 24;
const USAGE: &str = "usage: dvhextract <input-dir> <output-dir> [extension]";

/// Prints how every plan in a folder links to its structure set, dose and imaging,
/// and where its DVH record would be written.
pub fn main() -> ExitCode {
    let _ = env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .try_init();

    let mut args = std::env::args().skip(1);
    let (Some(input), Some(output)) = (args.next(), args.next()) else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };
    let extension = args.next().unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
    let config = match ExtractorConfig::new(PathBuf::from(input), PathBuf::from(output))
        .with_extension(&extension)
    {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let (registry, stats) = match Registry::scan(config.input_dir(), config.extension()) {
        Ok(scan) => scan,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    println!(
        "{} file(s): {} registered, {} ignored, {} failed",
        stats.files_seen, stats.registered, stats.ignored, stats.failed
    );

    for patient in registry.patients() {
        println!("{patient}");
        for plan in patient.plans().values() {
            report_plan(&config, patient, plan);
        }
    }
    ExitCode::SUCCESS
}

fn report_plan(config: &ExtractorConfig, patient: &Patient, plan: &Plan) {
    let structure_set = patient.structure_set_for_plan(plan);
    let dose = patient.dose_for_plan(plan);
    let series = structure_set.and_then(|set| patient.imaging_series_for_structure_set(set));

    println!(
        "  plan {} [{}] structure set: {} dose: {} imaging: {}",
        short_uid(plan.sop_instance_uid(), UID_WIDTH),
        plan.name().unwrap_or(plan.label()),
        linked(structure_set.map(|s| s.sop_instance_uid())),
        linked(dose.map(|d| d.sop_instance_uid())),
        linked(series.map(|s| s.series_instance_uid())),
    );
    match config.plan_output_path(patient.id(), plan.sop_instance_uid()) {
        Ok(path) => println!("    output: {}", path.display()),
        Err(err) => log::warn!("plan {}: {err}", plan.sop_instance_uid()),
    }

    let Some(structure_set) = structure_set else {
        return;
    };
    match RtStructCatalog.structures(structure_set.file_location()) {
        Ok(structures) => {
            for structure in structures.values() {
                let state = if structure.empty { "empty" } else { "contoured" };
                println!("    {:>3} {} ({state})", structure.id, structure.name);
            }
        }
        Err(err) => log::warn!("{}: {err}", structure_set.file_location().display()),
    }
}

fn linked(uid: Option<&str>) -> String {
    uid.map(|uid| short_uid(uid, UID_WIDTH))
        .unwrap_or_else(|| "not found".to_string())
}
