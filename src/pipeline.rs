use std::path::PathBuf;

use serde::Serialize;

use crate::config::PipelineConfig;
use crate::data::loader::load_series;
use crate::data::model::{Series, SeriesRole};
use crate::data::writer::write_sanitized;
use crate::error::{PipelineError, SanitizeError, Stage, StageContext};
use crate::plot::PlotSink;
use crate::signal::{design_lowpass, filtfilt, max_allowable_frequency};

// ---------------------------------------------------------------------------
// Run report
// ---------------------------------------------------------------------------

/// What a successful run produced.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub cutoff_fraction: f64,
    /// Half the fastest sampling interval of the contrast series.
    pub max_allowable_frequency: f64,
    /// Nyquist-normalized cutoff of the shared filter.
    pub normalized_cutoff: f64,
    pub filter_order: usize,
    pub series: Vec<SeriesReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesReport {
    pub role: SeriesRole,
    pub samples: usize,
    pub output: PathBuf,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Sanitize the three recordings named in `config`.
///
/// Load → bound the passable frequency from the contrast timing → design one
/// low-pass → filter every series with it → write. Nothing is written unless
/// every series loaded and filtered cleanly and `plot` has acquired its
/// destination. The contrast curve is finally handed to `plot`.
pub fn run(
    config: &PipelineConfig,
    plot: &mut dyn PlotSink,
) -> Result<PipelineReport, PipelineError> {
    log::info!("Percentage cutoff of Nyquist frequency: {}", config.cutoff);

    let series = SeriesRole::ALL
        .iter()
        .map(|&role| load_nonempty(config, role))
        .collect::<Result<Vec<_>, _>>()?;
    let contrast = &series[0];

    let contrast_path = config.inputs.get(SeriesRole::Contrast);
    let max_freq =
        max_allowable_frequency(&contrast.times).stage(Stage::Estimate, Some(contrast_path))?;
    log::info!("max allowable frequency from contrast timing: {max_freq}");

    let design = design_lowpass(&config.cutoff, max_freq).stage(Stage::Design, None)?;

    let filtered = series
        .iter()
        .map(|s| {
            let input = config.inputs.get(s.role);
            if s.len() < design.min_input_len() {
                return Err(PipelineError::new(
                    Stage::Filter,
                    Some(input),
                    SanitizeError::InsufficientData(format!(
                        "{} series has {} samples, an order-{} zero-phase filter needs at least {}",
                        s.role,
                        s.len(),
                        design.order(),
                        design.min_input_len()
                    )),
                ));
            }
            let values = filtfilt(&design, &s.values).stage(Stage::Filter, Some(input))?;
            Ok(s.with_values(values))
        })
        .collect::<Result<Vec<Series>, _>>()?;

    plot.prepare().stage(Stage::Plot, config.plot.as_deref())?;

    let mut reports = Vec::with_capacity(filtered.len());
    for s in &filtered {
        let output = config.outputs.get(s.role);
        write_sanitized(output, &s.times, &s.values).stage(Stage::Write, Some(output))?;
        log::info!("wrote {} sanitized samples to {}", s.role, output.display());
        reports.push(SeriesReport {
            role: s.role,
            samples: s.len(),
            output: output.to_path_buf(),
        });
    }

    plot.plot(&contrast.times, &contrast.values, &filtered[0].values)
        .stage(Stage::Plot, config.plot.as_deref())?;

    Ok(PipelineReport {
        cutoff_fraction: design.cutoff_fraction(),
        max_allowable_frequency: max_freq,
        normalized_cutoff: design.normalized_cutoff(),
        filter_order: design.order(),
        series: reports,
    })
}

fn load_nonempty(config: &PipelineConfig, role: SeriesRole) -> Result<Series, PipelineError> {
    let path = config.inputs.get(role);
    let series = load_series(path, role).stage(Stage::Load, Some(path))?;
    if series.is_empty() {
        return Err(PipelineError::new(
            Stage::Load,
            Some(path),
            SanitizeError::InsufficientData(format!("{role} series has no samples")),
        ));
    }
    Ok(series)
}
