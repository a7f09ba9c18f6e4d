/// Signal layer: sampling-rate bound, filter design, zero-phase application.
///
/// ```text
///  contrast times ──► nyquist ──► max allowable frequency
///                                        │  × cutoff fraction
///                                        ▼
///                                   butterworth ──► FilterDesign (shared, immutable)
///                                                        │
///  each series' values ────────────────────────────► filtfilt ──► filtered values
/// ```

pub mod butterworth;
pub mod filtfilt;
pub mod nyquist;

pub use butterworth::{design_lowpass, FilterDesign, FILTER_ORDER};
pub use filtfilt::filtfilt;
pub use nyquist::max_allowable_frequency;
