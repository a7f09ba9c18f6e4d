use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::Result;

// ---------------------------------------------------------------------------
// Plot collaborator
// ---------------------------------------------------------------------------

/// Receives the contrast curve before and after filtering. Rendering is up
/// to the implementation.
pub trait PlotSink {
    /// Acquire whatever the sink writes to. Called before any sanitized file
    /// is written, so an unusable destination fails the run early.
    fn prepare(&mut self) -> Result<()> {
        Ok(())
    }

    fn plot(&mut self, times: &[f64], original: &[f64], filtered: &[f64]) -> Result<()>;
}

/// Discards the overlay.
#[derive(Debug, Default)]
pub struct NoPlot;

impl PlotSink for NoPlot {
    fn plot(&mut self, times: &[f64], _original: &[f64], _filtered: &[f64]) -> Result<()> {
        log::debug!("plot export disabled, dropping {} overlay points", times.len());
        Ok(())
    }
}

/// Writes the overlay as `time,original,filtered` CSV for an external
/// plotting tool.
#[derive(Debug)]
pub struct CsvOverlay {
    path: PathBuf,
    writer: Option<csv::Writer<File>>,
}

impl CsvOverlay {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PlotSink for CsvOverlay {
    fn prepare(&mut self) -> Result<()> {
        if self.writer.is_some() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let writer = csv::Writer::from_path(&self.path).map_err(std::io::Error::from)?;
        self.writer = Some(writer);
        Ok(())
    }

    fn plot(&mut self, times: &[f64], original: &[f64], filtered: &[f64]) -> Result<()> {
        self.prepare()?;
        let Some(mut writer) = self.writer.take() else {
            return Ok(());
        };
        writer
            .write_record(["time", "original", "filtered"])
            .map_err(std::io::Error::from)?;
        for ((t, o), f) in times.iter().zip(original).zip(filtered) {
            writer
                .write_record([t.to_string(), o.to_string(), f.to_string()])
                .map_err(std::io::Error::from)?;
        }
        writer.flush()?;
        log::info!("wrote contrast overlay to {}", self.path().display());
        Ok(())
    }
}
