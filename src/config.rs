//! Run configuration, resolved once by the caller and passed in.

use std::path::{Component, Path, PathBuf};

use crate::error::{ConfigError, ConfigResult, ExtractError, ExtractResult};

pub const DEFAULT_EXTENSION: &str = "dcm";

#[derive(Clone, Debug)]
pub struct ExtractorConfig {
    input_dir: PathBuf,
    output_dir: PathBuf,
    extension: String,
}

impl ExtractorConfig {
    pub fn new(input_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            input_dir,
            output_dir,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Restricts the scan to files with this extension (without the dot).
    pub fn with_extension(mut self, extension: &str) -> ConfigResult<Self> {
        let extension = extension.trim().trim_start_matches('.');
        if extension.is_empty() {
            return Err(ConfigError::Invalid("extension cannot be empty".into()));
        }
        self.extension = extension.to_string();
        Ok(self)
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Where the record for one plan is written: `<output>/<patient>/<plan>.json`.
    ///
    /// Both names come from file headers and must each be a single plain path
    /// component, so the result always stays under the output directory.
    pub fn plan_output_path(&self, patient_id: &str, plan_uid: &str) -> ExtractResult<PathBuf> {
        let patient_dir = path_component(patient_id)?;
        let file_stem = path_component(plan_uid)?;
        Ok(self
            .output_dir
            .join(patient_dir)
            .join(format!("{file_stem}.json")))
    }
}

fn path_component(name: &str) -> ExtractResult<&str> {
    let mut components = Path::new(name).components();
    let single = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !single || name.contains(['/', '\\']) {
        return Err(ExtractError::UnsafePathComponent {
            name: name.to_string(),
        });
    }
    Ok(name)
}
