use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use super::dose::Dose;
use super::header::{required_text, tag, Header};
use super::modality::Modality;
use super::plan::Plan;
use super::series::ImagingSeries;
use super::structure_set::StructureSet;
use crate::error::RecordResult;

/// A map keyed by UID that iterates in insertion order.
#[derive(Debug, Clone)]
pub struct Keyed<T> {
    entries: Vec<(String, T)>,
    index: HashMap<String, usize>,
}

impl<T> Default for Keyed<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> Keyed<T> {
    /// Inserts `value`, replacing an existing entry in place. Returns the replaced value.
    pub fn insert(&mut self, key: String, value: T) -> Option<T> {
        match self.index.get(&key) {
            Some(&position) => Some(std::mem::replace(&mut self.entries[position].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get_or_insert_with(&mut self, key: &str, make: impl FnOnce() -> T) -> &mut T {
        let position = match self.index.get(key) {
            Some(&position) => position,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), make()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[position].1
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, value)| value)
    }
}

/// All records registered for one patient. Identity comes from the first record
/// seen and is never rewritten.
#[derive(Debug, Clone)]
pub struct Patient {
    id: String,
    name: Option<String>,
    imaging: Keyed<ImagingSeries>,
    structure_sets: Keyed<StructureSet>,
    plans: Keyed<Plan>,
    doses: Keyed<Dose>,
}

impl Patient {
    pub fn new(id: String, name: Option<String>) -> Self {
        Self {
            id,
            name,
            imaging: Keyed::default(),
            structure_sets: Keyed::default(),
            plans: Keyed::default(),
            doses: Keyed::default(),
        }
    }

    /// Routes a record into the collection for its modality.
    ///
    /// Imaging slices accumulate into their series; structure sets, plans and doses
    /// are one entity per record, and a repeated SOP instance UID replaces the earlier
    /// entity. Unknown modalities are accepted and dropped.
    pub fn add_record(&mut self, path: &Path, header: &Header) -> RecordResult<Modality> {
        let modality = Modality::of(header);
        match modality {
            Modality::Imaging => {
                let series_uid =
                    required_text(header, tag::SERIES_INSTANCE_UID, "SeriesInstanceUID")?;
                self.imaging
                    .get_or_insert_with(&series_uid, || ImagingSeries::new(series_uid.clone()))
                    .add_slice(path, header);
            }
            Modality::StructureSet => {
                let structure_set = StructureSet::from_header(path, header)?;
                let key = structure_set.sop_instance_uid().to_string();
                if self.structure_sets.insert(key, structure_set).is_some() {
                    log::debug!("Patient {}: structure set replaced by {}", self.id, path.display());
                }
            }
            Modality::Plan => {
                let plan = Plan::from_header(path, header)?;
                let key = plan.sop_instance_uid().to_string();
                if self.plans.insert(key, plan).is_some() {
                    log::debug!("Patient {}: plan replaced by {}", self.id, path.display());
                }
            }
            Modality::Dose => {
                let dose = Dose::from_header(path, header)?;
                let key = dose.sop_instance_uid().to_string();
                if self.doses.insert(key, dose).is_some() {
                    log::debug!("Patient {}: dose replaced by {}", self.id, path.display());
                }
            }
            Modality::Unknown => {
                log::debug!("Ignoring {}: unsupported modality", path.display());
            }
        }
        Ok(modality)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn imaging_series(&self) -> &Keyed<ImagingSeries> {
        &self.imaging
    }

    pub fn structure_sets(&self) -> &Keyed<StructureSet> {
        &self.structure_sets
    }

    pub fn plans(&self) -> &Keyed<Plan> {
        &self.plans
    }

    pub fn doses(&self) -> &Keyed<Dose> {
        &self.doses
    }
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Patient: {} - imaging series: {} - structure sets: {} - plans: {} - doses: {}",
            self.id,
            self.imaging.len(),
            self.structure_sets.len(),
            self.plans.len(),
            self.doses.len()
        )
    }
}
