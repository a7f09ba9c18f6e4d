/// Data layer: series model, loading, and sanitized output.
///
/// Architecture:
/// ```text
///  C_000009.txt / AIF_000000.txt / VIF_000001.txt
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse `time _ value ...` lines → Series
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Series   │  parallel times / values, tagged with a SeriesRole
///   └──────────┘
///        │   (filtered by crate::signal)
///        ▼
///   ┌──────────┐
///   │  writer   │  header + `time 0 value 0` lines → sanitized_*.txt
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod writer;
