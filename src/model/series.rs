use std::path::{Path, PathBuf};

use super::header::{tag, text, Header};

/// Slices sharing one series instance UID, in the order they were registered.
#[derive(Debug, Clone)]
pub struct ImagingSeries {
    series_instance_uid: String,
    slices: Vec<PathBuf>,
    frame_of_reference: Option<String>,
    frame_of_reference_conflicts: usize,
}

impl ImagingSeries {
    pub fn new(series_instance_uid: String) -> Self {
        Self {
            series_instance_uid,
            slices: Vec::new(),
            frame_of_reference: None,
            frame_of_reference_conflicts: 0,
        }
    }

    /// Appends a slice. The frame of reference is taken from the first slice only;
    /// later slices that disagree are counted and logged, never applied.
    pub fn add_slice(&mut self, path: &Path, header: &Header) {
        let frame = text(header, tag::FRAME_OF_REFERENCE_UID);
        if self.slices.is_empty() {
            self.frame_of_reference = frame;
        } else if frame != self.frame_of_reference {
            self.frame_of_reference_conflicts += 1;
            log::warn!(
                "Series {}: slice {} has frame of reference {:?}, keeping {:?}",
                self.series_instance_uid,
                path.display(),
                frame,
                self.frame_of_reference
            );
        }
        self.slices.push(path.to_path_buf());
    }

    pub fn series_instance_uid(&self) -> &str {
        &self.series_instance_uid
    }

    pub fn slices(&self) -> &[PathBuf] {
        &self.slices
    }

    pub fn slice_count(&self) -> usize {
        self.slices.len()
    }

    pub fn frame_of_reference(&self) -> Option<&str> {
        self.frame_of_reference.as_deref()
    }

    pub fn frame_of_reference_conflicts(&self) -> usize {
        self.frame_of_reference_conflicts
    }
}
