use std::path::{Path, PathBuf};

use super::header::{first_item, required_text, tag, text, Header};
use crate::error::RecordResult;

#[derive(Debug, Clone)]
pub struct StructureSet {
    sop_instance_uid: String,
    file_location: PathBuf,
    referenced_frame_of_reference: Option<String>,
    referenced_series_uid: Option<String>,
}

impl StructureSet {
    pub fn from_header(path: &Path, header: &Header) -> RecordResult<Self> {
        let sop_instance_uid = required_text(header, tag::SOP_INSTANCE_UID, "SOPInstanceUID")?;

        let frame_item = first_item(header, tag::REFERENCED_FRAME_OF_REFERENCE_SEQUENCE);
        let referenced_frame_of_reference =
            frame_item.and_then(|item| text(item, tag::FRAME_OF_REFERENCE_UID));
        let referenced_series_uid = frame_item
            .and_then(|item| first_item(item, tag::RT_REFERENCED_STUDY_SEQUENCE))
            .and_then(|study| first_item(study, tag::RT_REFERENCED_SERIES_SEQUENCE))
            .and_then(|series| text(series, tag::SERIES_INSTANCE_UID));

        Ok(Self {
            sop_instance_uid,
            file_location: path.to_path_buf(),
            referenced_frame_of_reference,
            referenced_series_uid,
        })
    }

    pub fn sop_instance_uid(&self) -> &str {
        &self.sop_instance_uid
    }

    pub fn file_location(&self) -> &Path {
        &self.file_location
    }

    pub fn referenced_frame_of_reference(&self) -> Option<&str> {
        self.referenced_frame_of_reference.as_deref()
    }

    pub fn referenced_series_uid(&self) -> Option<&str> {
        self.referenced_series_uid.as_deref()
    }
}
