//! In-memory record graph: patients and the RT entities they own.

pub mod dose;
pub mod header;
mod links;
pub mod modality;
pub mod patient;
pub mod plan;
pub mod registry;
pub mod series;
pub mod structure_set;

pub use dose::{Dose, PLAN_SUMMATION};
pub use header::{open_header, Header};
pub use modality::Modality;
pub use patient::{Keyed, Patient};
pub use plan::Plan;
pub use registry::{Registry, ScanStats};
pub use series::ImagingSeries;
pub use structure_set::StructureSet;
