use std::collections::BTreeMap;
use std::path::Path;

use walkdir::WalkDir;

use super::header::{open_header, required_text, tag, text, Header};
use super::modality::Modality;
use super::patient::Patient;
use crate::error::{RecordError, RecordResult};

/// Counters for one folder scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub files_seen: usize,
    pub registered: usize,
    pub ignored: usize,
    pub failed: usize,
}

/// Every patient found in one run, keyed by patient ID.
#[derive(Debug, Default)]
pub struct Registry {
    patients: BTreeMap<String, Patient>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walks `root` and registers every file whose extension matches `extension`.
    /// Files that cannot be read or lack required attributes are logged and skipped.
    pub fn scan(root: &Path, extension: &str) -> RecordResult<(Self, ScanStats)> {
        if !root.is_dir() {
            return Err(RecordError::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        log::info!("Scanning {} for *.{extension} files", root.display());
        let mut registry = Self::new();
        let mut stats = ScanStats::default();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("Skipping unreadable entry: {err}");
                    continue;
                }
            };
            if !entry.file_type().is_file() || !has_extension(entry.path(), extension) {
                continue;
            }

            stats.files_seen += 1;
            let outcome = open_header(entry.path())
                .and_then(|object| registry.register(entry.path(), &object));
            match outcome {
                Ok(Modality::Unknown) => stats.ignored += 1,
                Ok(_) => stats.registered += 1,
                Err(err) => {
                    stats.failed += 1;
                    log::warn!("{}: {err}", entry.path().display());
                }
            }
        }

        log::info!(
            "Scan finished: {} patient(s), {} file(s) registered, {} ignored, {} failed",
            registry.len(),
            stats.registered,
            stats.ignored,
            stats.failed
        );
        Ok((registry, stats))
    }

    /// Adds one parsed record, creating its patient on first sight.
    pub fn register(&mut self, path: &Path, header: &Header) -> RecordResult<Modality> {
        let patient_id = required_text(header, tag::PATIENT_ID, "PatientID")?;
        let patient = self
            .patients
            .entry(patient_id)
            .or_insert_with_key(|id| Patient::new(id.clone(), text(header, tag::PATIENT_NAME)));
        patient.add_record(path, header)
    }

    pub fn patient(&self, patient_id: &str) -> Option<&Patient> {
        self.patients.get(patient_id)
    }

    pub fn contains(&self, patient_id: &str) -> bool {
        self.patients.contains_key(patient_id)
    }

    pub fn patient_ids(&self) -> impl Iterator<Item = &str> {
        self.patients.keys().map(String::as_str)
    }

    pub fn patients(&self) -> impl Iterator<Item = &Patient> {
        self.patients.values()
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::header::fixtures::*;
    use dicom::core::VR;

    #[test]
    fn patient_identity_is_first_write_wins() {
        let mut registry = Registry::new();
        registry
            .register(Path::new("a.dcm"), &ct_slice("P1", "1", "SER.1", "FOR.1"))
            .unwrap();

        let mut renamed = rtplan("P1", "RP.1", None, None);
        put_text(&mut renamed, tag::PATIENT_NAME, VR::PN, "Other^Name");
        registry.register(Path::new("b.dcm"), &renamed).unwrap();

        let patient = registry.patient("P1").unwrap();
        assert_eq!(patient.id(), "P1");
        assert_eq!(patient.name(), Some("Doe^Jane"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn records_are_routed_per_patient() {
        let mut registry = Registry::new();
        registry
            .register(Path::new("a.dcm"), &rtplan("P1", "RP.1", None, None))
            .unwrap();
        registry
            .register(Path::new("b.dcm"), &rtplan("P2", "RP.2", None, None))
            .unwrap();

        assert_eq!(registry.patient_ids().collect::<Vec<_>>(), ["P1", "P2"]);
        assert!(registry.patient("P1").unwrap().plans().contains("RP.1"));
        assert!(!registry.patient("P1").unwrap().plans().contains("RP.2"));
        assert!(registry.contains("P2"));
    }

    #[test]
    fn record_without_patient_id_is_rejected() {
        let mut registry = Registry::new();
        let mut header = Header::new_empty();
        put_text(&mut header, tag::MODALITY, VR::CS, "RTPLAN");
        assert!(registry.register(Path::new("a.dcm"), &header).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn extension_match_ignores_case() {
        assert!(has_extension(Path::new("x/RP.1.DCM"), "dcm"));
        assert!(!has_extension(Path::new("x/RP.1.json"), "dcm"));
        assert!(!has_extension(Path::new("x/DICOMDIR"), "dcm"));
    }

    #[test]
    fn scanning_a_missing_folder_fails() {
        let err = Registry::scan(Path::new("/definitely/not/here"), "dcm").unwrap_err();
        assert!(matches!(err, RecordError::NotADirectory { .. }));
    }
}
