//! Thin adapter over `dicom` objects: the tags this crate reads and typed
//! accessors that treat blank values as absent.

use std::path::Path;

use dicom::core::Tag;
use dicom::dictionary_std::tags::PIXEL_DATA;
use dicom::object::{DefaultDicomObject, InMemDicomObject, OpenFileOptions};

use crate::error::{RecordError, RecordResult};

/// A parsed record header.
pub type Header = InMemDicomObject;

pub mod tag {
    use dicom::core::Tag;

    pub const SOP_INSTANCE_UID: Tag = Tag(0x0008, 0x0018);
    pub const MODALITY: Tag = Tag(0x0008, 0x0060);
    pub const REFERENCED_SOP_INSTANCE_UID: Tag = Tag(0x0008, 0x1155);
    pub const PATIENT_NAME: Tag = Tag(0x0010, 0x0010);
    pub const PATIENT_ID: Tag = Tag(0x0010, 0x0020);
    pub const SERIES_INSTANCE_UID: Tag = Tag(0x0020, 0x000E);
    pub const FRAME_OF_REFERENCE_UID: Tag = Tag(0x0020, 0x0052);

    pub const DOSE_UNITS: Tag = Tag(0x3004, 0x0002);
    pub const DOSE_TYPE: Tag = Tag(0x3004, 0x0004);
    pub const DOSE_SUMMATION_TYPE: Tag = Tag(0x3004, 0x000A);

    pub const REFERENCED_FRAME_OF_REFERENCE_SEQUENCE: Tag = Tag(0x3006, 0x0010);
    pub const RT_REFERENCED_STUDY_SEQUENCE: Tag = Tag(0x3006, 0x0012);
    pub const RT_REFERENCED_SERIES_SEQUENCE: Tag = Tag(0x3006, 0x0014);
    pub const STRUCTURE_SET_ROI_SEQUENCE: Tag = Tag(0x3006, 0x0020);
    pub const ROI_NUMBER: Tag = Tag(0x3006, 0x0022);
    pub const ROI_NAME: Tag = Tag(0x3006, 0x0026);
    pub const ROI_DISPLAY_COLOR: Tag = Tag(0x3006, 0x002A);
    pub const ROI_CONTOUR_SEQUENCE: Tag = Tag(0x3006, 0x0039);
    pub const CONTOUR_SEQUENCE: Tag = Tag(0x3006, 0x0040);
    pub const REFERENCED_ROI_NUMBER: Tag = Tag(0x3006, 0x0084);

    pub const RT_PLAN_LABEL: Tag = Tag(0x300A, 0x0002);
    pub const RT_PLAN_NAME: Tag = Tag(0x300A, 0x0003);
    pub const DOSE_REFERENCE_SEQUENCE: Tag = Tag(0x300A, 0x0010);
    pub const TARGET_PRESCRIPTION_DOSE: Tag = Tag(0x300A, 0x0026);

    pub const REFERENCED_RT_PLAN_SEQUENCE: Tag = Tag(0x300C, 0x0002);
    pub const REFERENCED_STRUCTURE_SET_SEQUENCE: Tag = Tag(0x300C, 0x0060);
}

/// Opens a DICOM file, stopping before pixel data.
pub fn open_header(path: &Path) -> RecordResult<DefaultDicomObject> {
    log::debug!("Reading DICOM header: {}", path.display());
    OpenFileOptions::new()
        .read_until(PIXEL_DATA)
        .open_file(path)
        .map_err(|err| RecordError::Open {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
}

pub fn text(header: &Header, tag: Tag) -> Option<String> {
    header
        .element(tag)
        .ok()
        .and_then(|element| element.to_str().ok())
        .map(|value| value.trim_matches(|c: char| c.is_whitespace() || c == '\0').to_string())
        .filter(|value| !value.is_empty())
}

pub fn required_text(header: &Header, tag: Tag, name: &'static str) -> RecordResult<String> {
    text(header, tag).ok_or(RecordError::MissingAttribute { name, tag })
}

pub fn float(header: &Header, tag: Tag) -> Option<f64> {
    header
        .element(tag)
        .ok()
        .and_then(|element| element.to_float64().ok())
}

pub fn int(header: &Header, tag: Tag) -> Option<i32> {
    header
        .element(tag)
        .ok()
        .and_then(|element| element.to_int::<i32>().ok())
}

pub fn ints(header: &Header, tag: Tag) -> Option<Vec<i32>> {
    header
        .element(tag)
        .ok()
        .and_then(|element| element.to_multi_int::<i32>().ok())
}

/// Items of a sequence attribute; empty when the attribute is absent or not a sequence.
pub fn items(header: &Header, tag: Tag) -> &[Header] {
    header
        .element(tag)
        .ok()
        .and_then(|element| element.items())
        .unwrap_or(&[])
}

pub fn first_item(header: &Header, tag: Tag) -> Option<&Header> {
    items(header, tag).first()
}
