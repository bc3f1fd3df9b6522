//! Finds values JSON cannot carry (NaN and infinities) before a record is written.

use super::record::PlanDvhRecord;

const ROOT: &str = "root object";

/// Every non-finite number in `record`, with its path from the root object.
pub fn unrepresentable_values(record: &PlanDvhRecord) -> Vec<(String, f64)> {
    let mut found = Vec::new();
    for (index, structure) in record.structures_dvh.iter().enumerate() {
        let prefix = format!("{ROOT}:structures_dvh:{index}");
        let scalars = [
            ("min", Some(structure.min)),
            ("mean", Some(structure.mean)),
            ("max", Some(structure.max)),
            ("plannedDose", structure.planned_dose),
        ];
        for (field, value) in scalars {
            if let Some(value) = value.filter(|v| !v.is_finite()) {
                found.push((format!("{prefix}:{field}"), value));
            }
        }
        for (field, values) in [("dvh_d", &structure.dose_bins), ("dvh_v", &structure.volume_counts)] {
            for (position, value) in values.iter().enumerate() {
                if !value.is_finite() {
                    found.push((format!("{prefix}:{field}:{position}"), *value));
                }
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::record::StructureDvhRecord;

    fn structure(name: &str) -> StructureDvhRecord {
        StructureDvhRecord {
            structure_name: name.into(),
            min: 0.0,
            mean: 1.0,
            max: 2.0,
            volume: 10,
            color: [1, 2, 3],
            planned_dose: Some(50.0),
            dose_bins: vec![0.0, 1.0, 2.0],
            volume_counts: vec![10.0, 5.0, 0.0],
        }
    }

    #[test]
    fn finite_record_is_clean() {
        let record = PlanDvhRecord {
            plan_instance_uid: "1".into(),
            structures_dvh: vec![structure("A")],
        };
        assert!(unrepresentable_values(&record).is_empty());
    }

    #[test]
    fn reports_full_path_of_each_bad_value() {
        let mut bad = structure("B");
        bad.mean = f64::NAN;
        bad.volume_counts[2] = f64::INFINITY;
        let record = PlanDvhRecord {
            plan_instance_uid: "1".into(),
            structures_dvh: vec![structure("A"), bad],
        };

        let paths: Vec<_> = unrepresentable_values(&record)
            .into_iter()
            .map(|(path, _)| path)
            .collect();
        assert_eq!(
            paths,
            [
                "root object:structures_dvh:1:mean",
                "root object:structures_dvh:1:dvh_v:2"
            ]
        );
    }
}
