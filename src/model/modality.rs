use super::header::{tag, text, Header};

/// Record kinds the registry knows how to store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    Imaging,
    StructureSet,
    Plan,
    Dose,
    Unknown,
}

impl Modality {
    pub fn from_code(code: &str) -> Self {
        match code {
            "CT" | "MR" | "PT" => Self::Imaging,
            "RTSTRUCT" => Self::StructureSet,
            "RTPLAN" => Self::Plan,
            "RTDOSE" => Self::Dose,
            _ => Self::Unknown,
        }
    }

    pub fn of(header: &Header) -> Self {
        text(header, tag::MODALITY)
            .map(|code| Self::from_code(&code))
            .unwrap_or(Self::Unknown)
    }
}
