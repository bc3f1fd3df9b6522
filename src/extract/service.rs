//! Interfaces to the services that turn contours and dose grids into histograms.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ServiceResult;

/// One ROI of a structure set.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureInfo {
    pub id: i32,
    pub name: String,
    pub color: [u8; 3],
    /// True when the ROI has no contour data.
    pub empty: bool,
}

/// Histogram of one structure as produced by a [`DvhCalculator`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedDvh {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
    pub volume: f64,
    pub bin_centers: Vec<f64>,
    pub counts: Vec<f64>,
}

pub trait StructureCatalog {
    /// Structures of the structure set stored at `structure_set`, keyed by ROI number.
    fn structures(&self, structure_set: &Path) -> ServiceResult<BTreeMap<i32, StructureInfo>>;
}

pub trait DvhCalculator {
    /// Cumulative DVH of `structure_id` in `structure_set` under the dose grid at `dose`.
    fn compute_dvh(
        &self,
        structure_set: &Path,
        dose: &Path,
        structure_id: i32,
    ) -> ServiceResult<ComputedDvh>;
}
