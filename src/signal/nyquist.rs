use crate::error::{Result, SanitizeError};

/// Highest frequency the series can carry without aliasing.
///
/// With adaptive sampling the fastest local rate is the binding constraint,
/// so this takes the smallest interval between consecutive samples and
/// returns half of it. Every interval must be strictly positive.
pub fn max_allowable_frequency(times: &[f64]) -> Result<f64> {
    if times.len() < 2 {
        return Err(SanitizeError::InsufficientData(format!(
            "{} sample(s) cannot define a sampling interval, need at least 2",
            times.len()
        )));
    }

    let mut min_interval = f64::INFINITY;
    for (index, pair) in times.windows(2).enumerate() {
        let diff = pair[1] - pair[0];
        log::trace!("sampling interval {index}: {diff}");
        if diff.is_nan() || diff <= 0.0 {
            return Err(SanitizeError::InvalidTimeSeries { index, diff });
        }
        min_interval = min_interval.min(diff);
    }

    let max_freq = min_interval / 2.0;
    log::debug!("minimum sampling interval {min_interval}, max allowable frequency {max_freq}");
    Ok(max_freq)
}
