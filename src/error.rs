use std::path::PathBuf;

use dicom::core::Tag;

use crate::utils::format_tag;

/// Failures while turning one source file into an entity.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("{}: failed to open DICOM file ({message})", path.display())]
    Open { path: PathBuf, message: String },
    #[error("missing required attribute {name} {}", format_tag(*tag))]
    MissingAttribute { name: &'static str, tag: Tag },
    #[error("{}: not a directory", path.display())]
    NotADirectory { path: PathBuf },
}

pub type RecordResult<T> = Result<T, RecordError>;

/// Failure reported by the structure enumeration or DVH computation service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error("{0}")]
    Failed(String),
    #[error("structure volume {0} is not a finite number")]
    NonFiniteVolume(f64),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Per-plan failures raised by the extraction pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("no structure set linked to plan {plan_uid}")]
    NoStructureSet { plan_uid: String },
    #[error("no dose linked to plan {plan_uid}")]
    NoDose { plan_uid: String },
    #[error("structure enumeration failed: {0}")]
    Enumeration(#[source] ServiceError),
    #[error("{name:?} cannot be used as an output path component")]
    UnsafePathComponent { name: String },
    #[error("{count} value(s) in plan {plan_uid} cannot be written as JSON")]
    Unrepresentable { plan_uid: String, count: usize },
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize plan record: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ExtractResult<T> = Result<T, ExtractError>;

/// Failures loading serialized DVH records back into curves.
#[derive(Debug, thiserror::Error)]
pub enum CurveError {
    #[error("structure {name}: dose and volume vectors must be non-empty and equal length (got {doses} and {volumes})")]
    VectorShape {
        name: String,
        doses: usize,
        volumes: usize,
    },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse DVH record: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CurveResult<T> = Result<T, CurveError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
