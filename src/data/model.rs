use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SeriesRole – which recording a series came from
// ---------------------------------------------------------------------------

/// The three recordings a kinetic model run is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesRole {
    /// Tissue contrast concentration curve. Its timing drives the filter design.
    Contrast,
    /// Arterial input function.
    ArterialInput,
    /// Venous input function.
    VenousInput,
}

impl SeriesRole {
    /// All roles in processing order.
    pub const ALL: [SeriesRole; 3] = [
        SeriesRole::Contrast,
        SeriesRole::ArterialInput,
        SeriesRole::VenousInput,
    ];

    /// File name of the raw recording for this role.
    pub fn raw_file_name(self) -> &'static str {
        match self {
            SeriesRole::Contrast => "C_000009.txt",
            SeriesRole::ArterialInput => "AIF_000000.txt",
            SeriesRole::VenousInput => "VIF_000001.txt",
        }
    }

    /// File name of the sanitized output for this role.
    pub fn sanitized_file_name(self) -> &'static str {
        match self {
            SeriesRole::Contrast => "sanitized_c.txt",
            SeriesRole::ArterialInput => "sanitized_aif.txt",
            SeriesRole::VenousInput => "sanitized_vif.txt",
        }
    }
}

impl fmt::Display for SeriesRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesRole::Contrast => write!(f, "contrast"),
            SeriesRole::ArterialInput => write!(f, "arterial input"),
            SeriesRole::VenousInput => write!(f, "venous input"),
        }
    }
}

// ---------------------------------------------------------------------------
// Series – one recording as parallel time / value vectors
// ---------------------------------------------------------------------------

/// A single recording. `times` and `values` always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub role: SeriesRole,
    /// Sample times in seconds, expected to strictly increase.
    pub times: Vec<f64>,
    /// Intensity at each sample time.
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(role: SeriesRole, times: Vec<f64>, values: Vec<f64>) -> Self {
        debug_assert_eq!(times.len(), values.len());
        Series { role, times, values }
    }

    /// Same timing, new values (e.g. after filtering).
    pub fn with_values(&self, values: Vec<f64>) -> Self {
        Series::new(self.role, self.times.clone(), values)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the series has no samples.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}
