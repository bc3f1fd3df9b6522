//! Read side of the extraction output: DVH curves loaded from plan records.

use std::fs;
use std::path::Path;

use crate::error::{CurveError, CurveResult};
use crate::extract::record::{PlanDvhRecord, StructureDvhRecord};

/// A cumulative DVH of one structure.
///
/// Point queries pick the nearest bin; they do not interpolate.
#[derive(Debug, Clone, PartialEq)]
pub struct DvhCurve {
    name: String,
    min: f64,
    mean: f64,
    max: f64,
    recorded_volume: i64,
    color: [u8; 3],
    planned_dose: Option<f64>,
    dose_vector: Vec<f64>,
    volume_vector: Vec<f64>,
}

impl DvhCurve {
    pub fn from_record(record: StructureDvhRecord) -> CurveResult<Self> {
        let doses = record.dose_bins.len();
        let volumes = record.volume_counts.len();
        if doses == 0 || doses != volumes {
            return Err(CurveError::VectorShape {
                name: record.structure_name,
                doses,
                volumes,
            });
        }

        Ok(Self {
            name: record.structure_name,
            min: record.min,
            mean: record.mean,
            max: record.max,
            recorded_volume: record.volume,
            color: record.color,
            planned_dose: record.planned_dose,
            dose_vector: record.dose_bins,
            volume_vector: record.volume_counts,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// The truncated integer volume stored in the record.
    pub fn recorded_volume(&self) -> i64 {
        self.recorded_volume
    }

    pub fn color(&self) -> [u8; 3] {
        self.color
    }

    pub fn planned_dose(&self) -> Option<f64> {
        self.planned_dose
    }

    pub fn dose_vector(&self) -> &[f64] {
        &self.dose_vector
    }

    pub fn volume_vector(&self) -> &[f64] {
        &self.volume_vector
    }

    /// Total structure volume: the cumulative volume at the first dose bin.
    pub fn volume(&self) -> f64 {
        self.volume_vector[0]
    }

    /// Dose at the bin whose volume is closest to `volume`.
    pub fn dose_at_volume(&self, volume: f64) -> f64 {
        self.dose_vector[nearest_index(&self.volume_vector, volume)]
    }

    /// Dose covering `percent` of the total volume.
    pub fn dose_at_volume_relative(&self, percent: f64) -> f64 {
        self.dose_at_volume(percent / 100.0 * self.volume())
    }

    /// Volume at the bin whose dose is closest to `dose`.
    pub fn volume_at_dose(&self, dose: f64) -> f64 {
        self.volume_vector[nearest_index(&self.dose_vector, dose)]
    }

    /// Volume receiving `percent` of the planned dose; `None` without a planned dose.
    pub fn volume_at_dose_relative(&self, percent: f64) -> Option<f64> {
        self.planned_dose
            .map(|planned| self.volume_at_dose(percent / 100.0 * planned))
    }
}

impl TryFrom<StructureDvhRecord> for DvhCurve {
    type Error = CurveError;

    fn try_from(record: StructureDvhRecord) -> CurveResult<Self> {
        Self::from_record(record)
    }
}

/// First index minimising `|values[i] - target|`. `values` must be non-empty.
fn nearest_index(values: &[f64], target: f64) -> usize {
    let mut best = 0;
    let mut best_distance = (values[0] - target).abs();
    for (index, value) in values.iter().enumerate().skip(1) {
        let distance = (value - target).abs();
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best
}

/// All curves of one plan record.
#[derive(Debug, Clone)]
pub struct PlanDvh {
    plan_instance_uid: String,
    curves: Vec<DvhCurve>,
}

impl PlanDvh {
    pub fn from_record(record: PlanDvhRecord) -> CurveResult<Self> {
        let curves = record
            .structures_dvh
            .into_iter()
            .map(DvhCurve::from_record)
            .collect::<CurveResult<Vec<_>>>()?;
        Ok(Self {
            plan_instance_uid: record.plan_instance_uid,
            curves,
        })
    }

    pub fn from_json(text: &str) -> CurveResult<Self> {
        Self::from_record(serde_json::from_str(text)?)
    }

    pub fn from_path(path: &Path) -> CurveResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| CurveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn plan_instance_uid(&self) -> &str {
        &self.plan_instance_uid
    }

    pub fn curves(&self) -> &[DvhCurve] {
        &self.curves
    }

    pub fn curve(&self, name: &str) -> Option<&DvhCurve> {
        self.curves.iter().find(|curve| curve.name == name)
    }
}
