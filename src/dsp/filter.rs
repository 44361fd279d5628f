//! Recursive (IIR) filter implementation
//!
//! Transfer function:
//!
//! ```text
//!         b[0] + b[1]·z^-1 + … + b[M]·z^-M
//! H(z) = ----------------------------------
//!         1    + a[1]·z^-1 + … + a[M]·z^-M
//! ```
//!
//! Samples run through Direct Form II Transposed, starting from a zero
//! state, which reproduces the output of a plain causal `lfilter` call.
//! The coefficients are real; samples may be complex, in which case the
//! real and imaginary parts are filtered independently.

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::domain::{QamError, QamResult};

/// Causal IIR filter with real coefficients
#[derive(Debug, Clone)]
pub struct IirFilter {
    /// Numerator, same length as `a`
    b: Vec<f64>,
    /// Denominator with `a[0] == 1`
    a: Vec<f64>,
    /// Delay line, one shorter than the coefficient vectors
    state: Vec<Complex64>,
}

impl IirFilter {
    /// Create a filter from raw coefficients.
    ///
    /// Both vectors are zero-extended to a common length and normalized so
    /// that `a[0] == 1`.
    pub fn new(mut b: Vec<f64>, mut a: Vec<f64>) -> QamResult<Self> {
        if b.is_empty() || a.is_empty() {
            return Err(QamError::InvalidInput(
                "filter needs at least one numerator and denominator coefficient".into(),
            ));
        }
        let a0 = a[0];
        if a0 == 0.0 || !a0.is_finite() {
            return Err(QamError::InvalidInput(
                "leading denominator coefficient must be non-zero".into(),
            ));
        }

        let order = b.len().max(a.len());
        b.resize(order, 0.0);
        a.resize(order, 0.0);
        for c in b.iter_mut().chain(a.iter_mut()) {
            *c /= a0;
        }

        Ok(Self {
            b,
            a,
            state: vec![Complex64::new(0.0, 0.0); order - 1],
        })
    }

    /// First-order digital Butterworth lowpass.
    ///
    /// `cutoff` is normalized to the Nyquist frequency, so it must lie
    /// strictly inside (0, 1). The analog prototype `1 / (s + 1)` is
    /// pre-warped and mapped through the bilinear transform:
    ///
    /// ```text
    /// K = tan(π·cutoff / 2)
    /// b = [K / (1 + K), K / (1 + K)]
    /// a = [1, (K - 1) / (K + 1)]
    /// ```
    pub fn butterworth_lowpass(cutoff: f64) -> QamResult<Self> {
        if !(cutoff > 0.0 && cutoff < 1.0) {
            return Err(QamError::UnstableFilter { cutoff });
        }

        let k = (PI * cutoff / 2.0).tan();
        let gain = k / (1.0 + k);
        let pole = (k - 1.0) / (k + 1.0);

        Self::new(vec![gain, gain], vec![1.0, pole])
    }

    pub fn numerator(&self) -> &[f64] {
        &self.b
    }

    pub fn denominator(&self) -> &[f64] {
        &self.a
    }

    /// Process a single sample
    pub fn process(&mut self, input: Complex64) -> Complex64 {
        let output = self.b[0] * input + self.state.first().copied().unwrap_or_default();

        let taps = self.state.len();
        for k in 1..taps {
            self.state[k - 1] = self.b[k] * input - self.a[k] * output + self.state[k];
        }
        if taps > 0 {
            self.state[taps - 1] = self.b[taps] * input - self.a[taps] * output;
        }

        output
    }

    /// Filter a whole block from a clean state, like `lfilter(b, a, x)`.
    ///
    /// The filter is left reset afterwards, so one instance can be reused
    /// for independent blocks.
    pub fn filter(&mut self, input: &[Complex64]) -> Vec<Complex64> {
        self.reset();
        let output = input.iter().map(|&x| self.process(x)).collect();
        self.reset();
        output
    }

    /// Real-valued convenience wrapper around [`IirFilter::filter`]
    pub fn filter_real(&mut self, input: &[f64]) -> Vec<f64> {
        let complex: Vec<Complex64> = input.iter().map(|&x| Complex64::new(x, 0.0)).collect();
        self.filter(&complex).into_iter().map(|y| y.re).collect()
    }

    /// Magnitude response at a normalized frequency (1.0 = Nyquist)
    pub fn gain_at(&self, normalized_freq: f64) -> f64 {
        let w = PI * normalized_freq;
        let eval = |coeffs: &[f64]| -> Complex64 {
            coeffs
                .iter()
                .enumerate()
                .map(|(k, &c)| c * Complex64::from_polar(1.0, -w * k as f64))
                .sum()
        };
        (eval(&self.b) / eval(&self.a)).norm()
    }

    /// Reset the filter state
    pub fn reset(&mut self) {
        self.state.fill(Complex64::new(0.0, 0.0));
    }
}
