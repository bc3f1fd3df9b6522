use serde::{Deserialize, Serialize};

use super::service::{ComputedDvh, StructureInfo};
use crate::error::{ServiceError, ServiceResult};

/// Serialized output for one plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDvhRecord {
    #[serde(rename = "planInstanceUid")]
    pub plan_instance_uid: String,
    pub structures_dvh: Vec<StructureDvhRecord>,
}

/// Serialized DVH of one structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureDvhRecord {
    #[serde(rename = "structureName")]
    pub structure_name: String,
    pub min: f64,
    pub mean: f64,
    pub max: f64,
    pub volume: i64,
    pub color: [u8; 3],
    #[serde(rename = "plannedDose")]
    pub planned_dose: Option<f64>,
    /// Dose bin centers, ascending.
    #[serde(rename = "dvh_d")]
    pub dose_bins: Vec<f64>,
    /// Cumulative volume per dose bin.
    #[serde(rename = "dvh_v")]
    pub volume_counts: Vec<f64>,
}

impl StructureDvhRecord {
    /// Fails when the volume has no integer value (NaN or infinite).
    pub fn new(
        structure: &StructureInfo,
        dvh: ComputedDvh,
        planned_dose: Option<f64>,
    ) -> ServiceResult<Self> {
        if !dvh.volume.is_finite() {
            return Err(ServiceError::NonFiniteVolume(dvh.volume));
        }
        Ok(Self {
            structure_name: structure.name.clone(),
            min: dvh.min,
            mean: dvh.mean,
            max: dvh.max,
            // truncated, matching the integer volume of the output format
            volume: dvh.volume as i64,
            color: structure.color,
            planned_dose,
            dose_bins: dvh.bin_centers,
            volume_counts: dvh.counts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bladder() -> StructureInfo {
        StructureInfo {
            id: 3,
            name: "Bladder".into(),
            color: [255, 128, 0],
            empty: false,
        }
    }

    fn dvh() -> ComputedDvh {
        ComputedDvh {
            min: 0.5,
            mean: 21.25,
            max: 61.0,
            volume: 152.9,
            bin_centers: vec![0.0, 1.0],
            counts: vec![152.9, 140.0],
        }
    }

    fn record() -> PlanDvhRecord {
        PlanDvhRecord {
            plan_instance_uid: "1.2.3".into(),
            structures_dvh: vec![StructureDvhRecord::new(&bladder(), dvh(), Some(70.0)).unwrap()],
        }
    }

    #[test]
    fn uses_output_field_names() {
        let value = serde_json::to_value(record()).unwrap();
        assert_eq!(
            value,
            json!({
                "planInstanceUid": "1.2.3",
                "structures_dvh": [{
                    "structureName": "Bladder",
                    "min": 0.5,
                    "mean": 21.25,
                    "max": 61.0,
                    "volume": 152,
                    "color": [255, 128, 0],
                    "plannedDose": 70.0,
                    "dvh_d": [0.0, 1.0],
                    "dvh_v": [152.9, 140.0]
                }]
            })
        );
    }

    #[test]
    fn missing_planned_dose_is_null() {
        let mut record = record();
        record.structures_dvh[0].planned_dose = None;
        let text = serde_json::to_string(&record).unwrap();
        assert!(text.contains("\"plannedDose\":null"));
    }

    #[test]
    fn non_finite_volume_is_rejected() {
        for volume in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let dvh = ComputedDvh { volume, ..dvh() };
            assert!(matches!(
                StructureDvhRecord::new(&bladder(), dvh, None),
                Err(ServiceError::NonFiniteVolume(_))
            ));
        }
    }
}
