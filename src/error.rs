use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

// ---------------------------------------------------------------------------
// SanitizeError – failures of the individual pipeline components
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum SanitizeError {
    #[error("{}:{line}: {reason}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("time stamps must strictly increase: difference {diff} after sample {index}")]
    InvalidTimeSeries { index: usize, diff: f64 },

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("invalid cutoff: {0}")]
    InvalidCutoff(String),

    #[error("signal of {len} samples is shorter than the {min} samples the filter requires")]
    FilterApplication { len: usize, min: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SanitizeError>;

// ---------------------------------------------------------------------------
// PipelineError – a component failure tagged with where it happened
// ---------------------------------------------------------------------------

/// Pipeline stage a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Estimate,
    Design,
    Filter,
    Write,
    Plot,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Load => "load",
            Stage::Estimate => "sampling-rate estimation",
            Stage::Design => "filter design",
            Stage::Filter => "filtering",
            Stage::Write => "write",
            Stage::Plot => "plot export",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
#[error("{stage} failed{}", location(.path))]
pub struct PipelineError {
    pub stage: Stage,
    pub path: Option<PathBuf>,
    #[source]
    pub source: SanitizeError,
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" for {}", p.display()))
        .unwrap_or_default()
}

impl PipelineError {
    pub fn new(stage: Stage, path: Option<&Path>, source: SanitizeError) -> Self {
        Self {
            stage,
            path: path.map(Path::to_path_buf),
            source,
        }
    }

    /// The underlying component error.
    pub fn kind(&self) -> &SanitizeError {
        &self.source
    }
}

/// Attach a stage (and optionally a file) to a component result.
pub trait StageContext<T> {
    fn stage(self, stage: Stage, path: Option<&Path>) -> std::result::Result<T, PipelineError>;
}

impl<T> StageContext<T> for Result<T> {
    fn stage(self, stage: Stage, path: Option<&Path>) -> std::result::Result<T, PipelineError> {
        self.map_err(|e| PipelineError::new(stage, path, e))
    }
}
