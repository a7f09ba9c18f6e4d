use crate::error::{Result, SanitizeError};

use super::butterworth::FilterDesign;

/// Filter `x` forward then backward so the result has no phase lag.
///
/// Both ends are extended by odd reflection before filtering, and each pass
/// starts from the design's steady state scaled to its first sample, which
/// keeps edge transients small. Output has the same length as `x`.
pub fn filtfilt(design: &FilterDesign, x: &[f64]) -> Result<Vec<f64>> {
    let min = design.min_input_len();
    if x.len() < min {
        return Err(SanitizeError::FilterApplication { len: x.len(), min });
    }

    let edge = design.pad_len();
    let ext = odd_extend(x, edge);

    let mut y = lfilter(design, &ext, ext[0]);
    y.reverse();
    let first = y[0];
    let mut y = lfilter(design, &y, first);
    y.reverse();

    Ok(y[edge..y.len() - edge].to_vec())
}

/// Reflect `edge` samples through each endpoint: `2*x[0] - x[edge..1]` in
/// front, `2*x[n-1] - x[n-2..n-1-edge]` behind.
fn odd_extend(x: &[f64], edge: usize) -> Vec<f64> {
    let n = x.len();
    let (first, last) = (x[0], x[n - 1]);

    let mut ext = Vec::with_capacity(n + 2 * edge);
    ext.extend((1..=edge).rev().map(|i| 2.0 * first - x[i]));
    ext.extend_from_slice(x);
    ext.extend((1..=edge).map(|i| 2.0 * last - x[n - 1 - i]));
    ext
}

/// One causal pass in transposed direct form II, state initialised to the
/// steady state for a constant input of `initial`.
fn lfilter(design: &FilterDesign, x: &[f64], initial: f64) -> Vec<f64> {
    let b = design.numerator();
    let a = design.denominator();
    let mut z: Vec<f64> = design.steady_state().iter().map(|s| s * initial).collect();
    let last = z.len() - 1;

    x.iter()
        .map(|&xn| {
            let y = b[0] * xn + z[0];
            for i in 0..last {
                z[i] = b[i + 1] * xn + z[i + 1] - a[i + 1] * y;
            }
            z[last] = b[last + 1] * xn - a[last + 1] * y;
            y
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::butterworth::{butterworth_lowpass, FILTER_ORDER};

    fn design(wn: f64) -> FilterDesign {
        butterworth_lowpass(FILTER_ORDER, wn).unwrap()
    }

    #[test]
    fn test_length_preserved() {
        let d = design(0.108);
        for n in [d.min_input_len(), 20, 57, 100, 301] {
            let x: Vec<f64> = (0..n).map(|i| (i as f64 * 0.3).sin()).collect();
            assert_eq!(filtfilt(&d, &x).unwrap().len(), n);
        }
    }

    #[test]
    fn test_constant_unchanged() {
        let d = design(0.108);
        for n in [19, 64] {
            let x = vec![3.5; n];
            let y = filtfilt(&d, &x).unwrap();
            for v in y {
                assert!((v - 3.5).abs() < 1e-9, "{v}");
            }
        }
    }

    #[test]
    fn test_ramp_preserved_away_from_edges() {
        let d = design(0.3);
        let x: Vec<f64> = (0..400).map(|i| 0.5 * i as f64 + 2.0).collect();
        let y = filtfilt(&d, &x).unwrap();
        for i in 100..300 {
            assert!((y[i] - x[i]).abs() < 1e-8, "index {i}: {} vs {}", y[i], x[i]);
        }
    }

    #[test]
    fn test_alternating_signal_removed() {
        let d = design(0.108);
        let x: Vec<f64> = (0..400).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let y = filtfilt(&d, &x).unwrap();
        for v in &y[100..300] {
            assert!(v.abs() < 1e-3, "{v}");
        }
    }

    #[test]
    fn test_no_phase_shift_on_symmetric_pulse() {
        let d = design(0.2);
        let n = 201;
        let center = 100.0;
        let x: Vec<f64> = (0..n)
            .map(|i| (-((i as f64 - center) / 8.0).powi(2)).exp())
            .collect();
        let y = filtfilt(&d, &x).unwrap();
        let peak = y
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, 100);
        for k in 1..50 {
            assert!((y[100 - k] - y[100 + k]).abs() < 1e-6);
        }
    }

    #[test]
    fn test_too_short_rejected_before_filtering() {
        let d = design(0.108);
        let err = filtfilt(&d, &[1.0; 18]).unwrap_err();
        match err {
            SanitizeError::FilterApplication { len, min } => {
                assert_eq!(len, 18);
                assert_eq!(min, 19);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(filtfilt(&d, &[]).is_err());
    }

    #[test]
    fn test_odd_extend() {
        let ext = odd_extend(&[1.0, 2.0, 4.0, 7.0], 2);
        assert_eq!(ext, vec![-2.0, 0.0, 1.0, 2.0, 4.0, 7.0, 10.0, 12.0]);
    }
}
