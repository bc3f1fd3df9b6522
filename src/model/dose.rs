use std::path::{Path, PathBuf};

use super::header::{first_item, required_text, tag, text, Header};
use crate::error::RecordResult;

/// Dose summation type of a dose grid covering the whole plan.
pub const PLAN_SUMMATION: &str = "PLAN";

#[derive(Debug, Clone)]
pub struct Dose {
    sop_instance_uid: String,
    file_location: PathBuf,
    dose_type: String,
    units: String,
    summation_type: Option<String>,
    referenced_plan_uid: Option<String>,
}

impl Dose {
    pub fn from_header(path: &Path, header: &Header) -> RecordResult<Self> {
        let sop_instance_uid = required_text(header, tag::SOP_INSTANCE_UID, "SOPInstanceUID")?;
        let units = required_text(header, tag::DOSE_UNITS, "DoseUnits")?;
        let dose_type = required_text(header, tag::DOSE_TYPE, "DoseType")?;
        let summation_type = text(header, tag::DOSE_SUMMATION_TYPE);
        let referenced_plan_uid = first_item(header, tag::REFERENCED_RT_PLAN_SEQUENCE)
            .and_then(|item| text(item, tag::REFERENCED_SOP_INSTANCE_UID));

        Ok(Self {
            sop_instance_uid,
            file_location: path.to_path_buf(),
            dose_type,
            units,
            summation_type,
            referenced_plan_uid,
        })
    }

    pub fn sop_instance_uid(&self) -> &str {
        &self.sop_instance_uid
    }

    pub fn file_location(&self) -> &Path {
        &self.file_location
    }

    pub fn dose_type(&self) -> &str {
        &self.dose_type
    }

    pub fn units(&self) -> &str {
        &self.units
    }

    pub fn summation_type(&self) -> Option<&str> {
        self.summation_type.as_deref()
    }

    pub fn referenced_plan_uid(&self) -> Option<&str> {
        self.referenced_plan_uid.as_deref()
    }

    pub fn is_plan_summation(&self) -> bool {
        self.summation_type.as_deref() == Some(PLAN_SUMMATION)
    }
}
