use std::path::{Path, PathBuf};

use super::header::{first_item, float, required_text, tag, text, Header};
use crate::error::RecordResult;

#[derive(Debug, Clone)]
pub struct Plan {
    sop_instance_uid: String,
    file_location: PathBuf,
    label: String,
    name: Option<String>,
    referenced_structure_set_uid: Option<String>,
    planned_dose: Option<f64>,
}

impl Plan {
    pub fn from_header(path: &Path, header: &Header) -> RecordResult<Self> {
        let sop_instance_uid = required_text(header, tag::SOP_INSTANCE_UID, "SOPInstanceUID")?;
        let label = required_text(header, tag::RT_PLAN_LABEL, "RTPlanLabel")?;
        let name = text(header, tag::RT_PLAN_NAME);
        let referenced_structure_set_uid =
            first_item(header, tag::REFERENCED_STRUCTURE_SET_SEQUENCE)
                .and_then(|item| text(item, tag::REFERENCED_SOP_INSTANCE_UID));
        // Prescription of the first dose reference, in Gy.
        let planned_dose = first_item(header, tag::DOSE_REFERENCE_SEQUENCE)
            .and_then(|item| float(item, tag::TARGET_PRESCRIPTION_DOSE));

        Ok(Self {
            sop_instance_uid,
            file_location: path.to_path_buf(),
            label,
            name,
            referenced_structure_set_uid,
            planned_dose,
        })
    }

    pub fn sop_instance_uid(&self) -> &str {
        &self.sop_instance_uid
    }

    pub fn file_location(&self) -> &Path {
        &self.file_location
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn referenced_structure_set_uid(&self) -> Option<&str> {
        self.referenced_structure_set_uid.as_deref()
    }

    pub fn planned_dose(&self) -> Option<f64> {
        self.planned_dose
    }
}
