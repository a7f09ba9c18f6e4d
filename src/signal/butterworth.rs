use std::f64::consts::PI;

use nalgebra::{DMatrix, DVector};
use num_complex::Complex64;

use crate::config::CutoffSpec;
use crate::error::{Result, SanitizeError};

/// Order of the low-pass used for every series.
pub const FILTER_ORDER: usize = 5;

// ---------------------------------------------------------------------------
// FilterDesign – immutable transfer-function coefficients
// ---------------------------------------------------------------------------

/// A designed IIR low-pass in transfer-function form, `a[0] == 1`.
///
/// Built once and shared by reference; applying it never mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterDesign {
    order: usize,
    cutoff_fraction: f64,
    normalized_cutoff: f64,
    b: Vec<f64>,
    a: Vec<f64>,
    /// Steady-state filter state for a unit step input.
    zi: Vec<f64>,
}

impl FilterDesign {
    pub fn order(&self) -> usize {
        self.order
    }

    /// Requested cutoff as a fraction of the maximum allowable frequency.
    pub fn cutoff_fraction(&self) -> f64 {
        self.cutoff_fraction
    }

    /// Cutoff as a fraction of the Nyquist frequency.
    pub fn normalized_cutoff(&self) -> f64 {
        self.normalized_cutoff
    }

    pub fn numerator(&self) -> &[f64] {
        &self.b
    }

    pub fn denominator(&self) -> &[f64] {
        &self.a
    }

    pub(crate) fn steady_state(&self) -> &[f64] {
        &self.zi
    }

    /// Samples reflected onto each end of the signal before filtering.
    pub fn pad_len(&self) -> usize {
        3 * self.a.len().max(self.b.len())
    }

    /// Shortest signal the zero-phase filter accepts.
    pub fn min_input_len(&self) -> usize {
        self.pad_len() + 1
    }

    /// Gain at 0 Hz, 1 for a low-pass.
    pub fn dc_gain(&self) -> f64 {
        self.b.iter().sum::<f64>() / self.a.iter().sum::<f64>()
    }
}

// ---------------------------------------------------------------------------
// Designer
// ---------------------------------------------------------------------------

/// Design the shared low-pass from a cutoff fraction and the maximum
/// allowable frequency of the primary series.
///
/// The product of the two is used directly as the Nyquist-normalized cutoff
/// and must land strictly inside (0, 1).
pub fn design_lowpass(cutoff: &CutoffSpec, max_allowable_frequency: f64) -> Result<FilterDesign> {
    let fraction = cutoff.fraction()?;
    if !(max_allowable_frequency.is_finite() && max_allowable_frequency > 0.0) {
        return Err(SanitizeError::InvalidCutoff(format!(
            "maximum allowable frequency must be positive, got {max_allowable_frequency}"
        )));
    }

    let wn = fraction * max_allowable_frequency;
    if !(wn > 0.0 && wn < 1.0) {
        return Err(SanitizeError::InvalidCutoff(format!(
            "normalized cutoff {fraction} x {max_allowable_frequency} = {wn} is outside (0, 1)"
        )));
    }

    let design = FilterDesign {
        cutoff_fraction: fraction,
        ..butterworth_lowpass(FILTER_ORDER, wn)?
    };
    log::info!(
        "designed order-{} Butterworth low-pass, normalized cutoff {wn}",
        design.order
    );
    Ok(design)
}

/// Digital Butterworth low-pass of the given order, `wn` relative to Nyquist.
/// The cutoff fraction is `wn` itself, i.e. relative to Nyquist.
///
/// Analog prototype poles are scaled to the pre-warped cutoff, mapped with
/// the bilinear transform, and expanded into polynomials.
pub(crate) fn butterworth_lowpass(order: usize, wn: f64) -> Result<FilterDesign> {
    // bilinear transform at fs = 2 puts Nyquist at 1
    let fs2 = 4.0;
    let warped = fs2 * (PI * wn / 2.0).tan();

    let n = order as f64;
    let analog_poles: Vec<Complex64> = (0..order)
        .map(|k| {
            let m = 2.0 * k as f64 - n + 1.0;
            -Complex64::from_polar(warped, PI * m / (2.0 * n))
        })
        .collect();

    let digital_poles: Vec<Complex64> = analog_poles
        .iter()
        .map(|&p| (fs2 + p) / (fs2 - p))
        .collect();
    let denom: Complex64 = analog_poles.iter().map(|&p| fs2 - p).product();
    let gain = warped.powi(order as i32) * denom.inv().re;

    // all zeros of a low-pass land on z = -1
    let zeros = vec![Complex64::new(-1.0, 0.0); order];
    let b: Vec<f64> = poly(&zeros).into_iter().map(|c| gain * c).collect();
    let a = poly(&digital_poles);

    let zi = steady_state(&b, &a)?;
    Ok(FilterDesign {
        order,
        cutoff_fraction: wn,
        normalized_cutoff: wn,
        b,
        a,
        zi,
    })
}

/// Real coefficients (highest power first) of the monic polynomial with the
/// given roots. Roots come in conjugate pairs so imaginary parts cancel.
fn poly(roots: &[Complex64]) -> Vec<f64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];
    for &r in roots {
        let mut next = coeffs.clone();
        next.push(Complex64::new(0.0, 0.0));
        for (i, &c) in coeffs.iter().enumerate() {
            next[i + 1] -= r * c;
        }
        coeffs = next;
    }
    coeffs.into_iter().map(|c| c.re).collect()
}

/// Solve `zi = A zi + B` for the transposed direct form II state that a
/// unit step holds in steady state.
fn steady_state(b: &[f64], a: &[f64]) -> Result<Vec<f64>> {
    let n = a.len().max(b.len());
    let coef = |v: &[f64], i: usize| v.get(i).copied().unwrap_or(0.0);

    let m = n - 1;
    // I - companion(a)^T
    let i_minus_a = DMatrix::from_fn(m, m, |r, c| {
        let mut v = if r == c { 1.0 } else { 0.0 };
        if c == 0 {
            v += coef(a, r + 1);
        }
        if c == r + 1 {
            v -= 1.0;
        }
        v
    });
    let rhs = DVector::from_fn(m, |r, _| coef(b, r + 1) - coef(a, r + 1) * coef(b, 0));

    i_minus_a
        .lu()
        .solve(&rhs)
        .map(|zi| zi.iter().copied().collect())
        .ok_or_else(|| {
            SanitizeError::InvalidCutoff("filter has a pole at DC, no steady state".into())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64], tol: f64) {
        assert_eq!(actual.len(), expected.len());
        for (i, (x, y)) in actual.iter().zip(expected).enumerate() {
            assert!((x - y).abs() < tol, "index {i}: {x} vs {y}");
        }
    }

    #[test]
    fn test_second_order_half_band() {
        let d = butterworth_lowpass(2, 0.5).unwrap();
        assert_close(d.numerator(), &[0.292_893_218_813_452_4, 0.585_786_437_626_904_9, 0.292_893_218_813_452_4], 1e-12);
        assert_close(d.denominator(), &[1.0, 0.0, 0.171_572_875_253_809_9], 1e-12);
    }

    #[test]
    fn test_fifth_order_coefficients() {
        let d = butterworth_lowpass(5, 0.2).unwrap();
        assert_close(
            d.numerator(),
            &[0.001_282_581_078_96, 0.006_412_905_394_80, 0.012_825_810_789_61, 0.012_825_810_789_61, 0.006_412_905_394_80, 0.001_282_581_078_96],
            1e-12,
        );
        assert_close(
            d.denominator(),
            &[1.0, -2.975_422_109_745_68, 3.806_018_119_320_41, -2.545_252_868_330_47, 0.881_130_075_437_84, -0.125_430_622_155_36],
            1e-10,
        );
    }

    #[test]
    fn test_unity_dc_gain() {
        for wn in [0.05, 0.108, 0.5, 0.9] {
            let d = butterworth_lowpass(FILTER_ORDER, wn).unwrap();
            assert!((d.dc_gain() - 1.0).abs() < 1e-9, "wn={wn}: {}", d.dc_gain());
        }
    }

    #[test]
    fn test_steady_state_holds_for_step() {
        let d = butterworth_lowpass(FILTER_ORDER, 0.3).unwrap();
        let (b, a, zi) = (d.numerator(), d.denominator(), d.steady_state());
        // one step of transposed direct form II with x = 1 must reproduce zi
        let y = b[0] + zi[0];
        assert!((y - 1.0).abs() < 1e-9);
        for i in 0..zi.len() - 1 {
            let next = b[i + 1] + zi[i + 1] - a[i + 1] * y;
            assert!((next - zi[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_design_from_cutoff_and_frequency() {
        let d = design_lowpass(&CutoffSpec::new(0.18), 0.6).unwrap();
        assert_eq!(d.order(), FILTER_ORDER);
        assert_eq!(d.cutoff_fraction(), 0.18);
        assert!((d.normalized_cutoff() - 0.108).abs() < 1e-12);
        assert_eq!(d.numerator().len(), 6);
        assert_eq!(d.denominator().len(), 6);
        assert_eq!(d.min_input_len(), 19);
    }

    #[test]
    fn test_rejects_fraction_bounds() {
        for bad in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            let err = design_lowpass(&CutoffSpec::new(bad), 0.5).unwrap_err();
            assert!(matches!(err, SanitizeError::InvalidCutoff(_)), "{bad}");
        }
    }

    #[test]
    fn test_rejects_product_outside_unit_interval() {
        // 0.5 x 4.0 = 2.0
        let err = design_lowpass(&CutoffSpec::new(0.5), 4.0).unwrap_err();
        assert!(matches!(err, SanitizeError::InvalidCutoff(_)));
        let err = design_lowpass(&CutoffSpec::new(0.5), 0.0).unwrap_err();
        assert!(matches!(err, SanitizeError::InvalidCutoff(_)));
    }

    #[test]
    fn test_text_cutoff_fraction_is_kept() {
        let d = design_lowpass(&CutoffSpec::from_text("0.25"), 0.4).unwrap();
        assert_eq!(d.cutoff_fraction(), 0.25);
        assert!((d.normalized_cutoff() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_non_numeric_text() {
        let err = design_lowpass(&CutoffSpec::from_text("abc"), 0.5).unwrap_err();
        assert!(matches!(err, SanitizeError::InvalidCutoff(_)));
    }
}
