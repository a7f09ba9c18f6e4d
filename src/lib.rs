//! Zero-phase low-pass sanitizer for perfusion time series.
//!
//! Reads a tissue contrast curve plus arterial and venous input functions,
//! derives one Butterworth low-pass from the fastest sampling interval of
//! the contrast curve, filters all three forward and backward, and writes
//! them in the `time 0 value 0` layout the kinetic modeling step reads.

pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod plot;
pub mod signal;

pub use config::{CutoffSpec, PipelineConfig};
pub use error::{PipelineError, SanitizeError, Stage};
pub use pipeline::{run, PipelineReport};
