//! Cross-reference resolution between a patient's records.
//!
//! Every lookup is a pure function of the patient's collections. A missing link
//! is an ordinary `None`, not an error.

use super::dose::Dose;
use super::patient::Patient;
use super::plan::Plan;
use super::series::ImagingSeries;
use super::structure_set::StructureSet;

impl Patient {
    /// The structure set the plan references by SOP instance UID.
    pub fn structure_set_for_plan(&self, plan: &Plan) -> Option<&StructureSet> {
        plan.referenced_structure_set_uid()
            .and_then(|uid| self.structure_sets().get(uid))
    }

    /// The imaging series a structure set was drawn on.
    ///
    /// The referenced series UID wins when it resolves. Otherwise the first series
    /// (in registration order) sharing the structure set's frame of reference is used.
    pub fn imaging_series_for_structure_set(
        &self,
        structure_set: &StructureSet,
    ) -> Option<&ImagingSeries> {
        let direct = structure_set
            .referenced_series_uid()
            .and_then(|uid| self.imaging_series().get(uid));
        if direct.is_some() {
            return direct;
        }

        let frame = structure_set.referenced_frame_of_reference()?;
        self.imaging_series()
            .values()
            .find(|series| series.frame_of_reference() == Some(frame))
    }

    /// The first plan-level dose grid referencing the plan.
    pub fn dose_for_plan(&self, plan: &Plan) -> Option<&Dose> {
        self.doses().values().find(|dose| {
            dose.referenced_plan_uid() == Some(plan.sop_instance_uid()) && dose.is_plan_summation()
        })
    }
}
