use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::model::SeriesRole;
use crate::error::SanitizeError;

pub const DEFAULT_CUTOFF_FRACTION: f64 = 0.18;
pub const DEFAULT_RAW_DIR: &str = "data/raw";
pub const DEFAULT_OUTPUT_DIR: &str = "data/input";

// ---------------------------------------------------------------------------
// CutoffSpec – fraction of the maximum allowable frequency
// ---------------------------------------------------------------------------

/// Fraction of the maximum allowable frequency used as the low-pass cutoff.
///
/// Kept as entered (number or text) and only validated when the filter is
/// designed, so a bad value surfaces as an invalid-cutoff failure of that
/// stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CutoffSpec {
    Fraction(f64),
    Text(String),
}

impl CutoffSpec {
    pub fn new(fraction: f64) -> Self {
        CutoffSpec::Fraction(fraction)
    }

    pub fn from_text(text: &str) -> Self {
        CutoffSpec::Text(text.trim().to_string())
    }

    /// The fraction, checked to lie strictly inside (0, 1).
    pub fn fraction(&self) -> Result<f64, SanitizeError> {
        let value = match self {
            CutoffSpec::Fraction(f) => *f,
            CutoffSpec::Text(s) => s.parse::<f64>().map_err(|_| {
                SanitizeError::InvalidCutoff(format!("'{s}' is not a decimal number"))
            })?,
        };
        if value > 0.0 && value < 1.0 {
            Ok(value)
        } else {
            Err(SanitizeError::InvalidCutoff(format!(
                "fraction {value} is outside (0, 1)"
            )))
        }
    }
}

impl Default for CutoffSpec {
    fn default() -> Self {
        CutoffSpec::Fraction(DEFAULT_CUTOFF_FRACTION)
    }
}

impl fmt::Display for CutoffSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CutoffSpec::Fraction(v) => write!(f, "{v}"),
            CutoffSpec::Text(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// RolePaths – one file per series role
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolePaths {
    pub contrast: PathBuf,
    pub arterial_input: PathBuf,
    pub venous_input: PathBuf,
}

impl RolePaths {
    /// Raw recordings under `dir` with their conventional names.
    pub fn raw_in(dir: &Path) -> Self {
        Self::from_fn(|role| dir.join(role.raw_file_name()))
    }

    /// Sanitized outputs under `dir` with their conventional names.
    pub fn sanitized_in(dir: &Path) -> Self {
        Self::from_fn(|role| dir.join(role.sanitized_file_name()))
    }

    fn from_fn(f: impl Fn(SeriesRole) -> PathBuf) -> Self {
        RolePaths {
            contrast: f(SeriesRole::Contrast),
            arterial_input: f(SeriesRole::ArterialInput),
            venous_input: f(SeriesRole::VenousInput),
        }
    }

    pub fn get(&self, role: SeriesRole) -> &Path {
        match role {
            SeriesRole::Contrast => &self.contrast,
            SeriesRole::ArterialInput => &self.arterial_input,
            SeriesRole::VenousInput => &self.venous_input,
        }
    }
}

// ---------------------------------------------------------------------------
// PipelineConfig
// ---------------------------------------------------------------------------

/// Everything one sanitizer run needs. Passed explicitly to the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub cutoff: CutoffSpec,
    pub inputs: RolePaths,
    pub outputs: RolePaths,
    /// Where to export the contrast overlay for plotting, if anywhere.
    pub plot: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::in_dirs(Path::new(DEFAULT_RAW_DIR), Path::new(DEFAULT_OUTPUT_DIR))
    }
}

impl PipelineConfig {
    /// Default file names relocated to the given directories.
    pub fn in_dirs(raw_dir: &Path, output_dir: &Path) -> Self {
        PipelineConfig {
            cutoff: CutoffSpec::default(),
            inputs: RolePaths::raw_in(raw_dir),
            outputs: RolePaths::sanitized_in(output_dir),
            plot: None,
        }
    }

    /// Read a JSON config file. Missing keys fall back to the defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
