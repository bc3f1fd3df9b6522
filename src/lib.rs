//! Links DICOM RT records (imaging, structure sets, plans, doses) per patient and
//! extracts a dose-volume histogram per structure for every plan.
//!
//! ```text
//! folder ──scan──▶ Registry ──▶ Patient ──links──▶ (StructureSet, Dose, ImagingSeries)
//!                                   │
//!                                   ▼
//!                      Extractor ──▶ <output>/<patient>/<plan>.json ──▶ PlanDvh / DvhCurve
//! ```
//!
//! - [`model`]: entities, header adapter, registry and link resolution
//! - [`extract`]: the per-plan pipeline and the service traits it calls
//! - [`curve`]: DVH curves read back from the JSON records

pub mod config;
pub mod curve;
pub mod error;
pub mod extract;
pub mod model;
pub mod utils;

pub use config::ExtractorConfig;
pub use curve::{DvhCurve, PlanDvh};
pub use error::{ConfigError, CurveError, ExtractError, RecordError, ServiceError};
pub use extract::{batch_process, Extractor, LogSink, RtStructCatalog, RunSummary};
pub use model::{Patient, Registry};
