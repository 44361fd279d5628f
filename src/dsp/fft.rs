//! FFT magnitude spectra for the plotting consumer

use std::sync::Arc;

use num_complex::Complex64;
use rustfft::{Fft, FftPlanner, Length};

/// FFT processor that caches plans across calls of different lengths
pub struct FftProcessor {
    planner: FftPlanner<f64>,
    /// Most recent plan, reused while the length stays the same
    last_plan: Option<Arc<dyn Fft<f64>>>,
}

impl FftProcessor {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
            last_plan: None,
        }
    }

    fn plan(&mut self, len: usize) -> Arc<dyn Fft<f64>> {
        match &self.last_plan {
            Some(plan) if plan.len() == len => Arc::clone(plan),
            _ => {
                let plan = self.planner.plan_fft_forward(len);
                self.last_plan = Some(Arc::clone(&plan));
                plan
            }
        }
    }

    /// `|FFT|` of the whole sequence, unwindowed, in natural bin order
    pub fn magnitudes(&mut self, samples: &[Complex64]) -> Vec<f64> {
        if samples.is_empty() {
            return Vec::new();
        }
        let mut buffer = samples.to_vec();
        self.plan(buffer.len()).process(&mut buffer);
        buffer.iter().map(|c| c.norm()).collect()
    }

    pub fn magnitudes_real(&mut self, samples: &[f64]) -> Vec<f64> {
        let buffer: Vec<Complex64> = samples.iter().map(|&s| Complex64::new(s, 0.0)).collect();
        self.magnitudes(&buffer)
    }
}

impl Default for FftProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Frequency of every FFT bin in natural order:
/// `[0, 1, …, ⌈n/2⌉-1, -⌊n/2⌋, …, -1] · sampling_rate / n`
pub fn bin_frequencies(len: usize, sampling_rate: u32) -> Vec<f64> {
    let resolution = sampling_rate as f64 / len as f64;
    let positive = len.div_ceil(2);
    (0..len)
        .map(|i| {
            if i < positive {
                i as f64 * resolution
            } else {
                (i as f64 - len as f64) * resolution
            }
        })
        .collect()
}

/// Magnitude spectrum paired with bin frequencies in hertz
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    pub frequencies: Vec<f64>,
    pub magnitudes: Vec<f64>,
}

impl Spectrum {
    pub fn of_real(samples: &[f64], sampling_rate: u32) -> Self {
        let magnitudes = FftProcessor::new().magnitudes_real(samples);
        Self {
            frequencies: bin_frequencies(samples.len(), sampling_rate),
            magnitudes,
        }
    }

    pub fn of_complex(samples: &[Complex64], sampling_rate: u32) -> Self {
        let magnitudes = FftProcessor::new().magnitudes(samples);
        Self {
            frequencies: bin_frequencies(samples.len(), sampling_rate),
            magnitudes,
        }
    }

    /// Frequency of the strongest bin; `None` for an empty spectrum
    pub fn peak_frequency(&self) -> Option<f64> {
        self.magnitudes
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| self.frequencies[i])
    }

    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn bin_frequencies_follow_fft_order() {
        assert_eq!(bin_frequencies(4, 4), vec![0.0, 1.0, -2.0, -1.0]);
        assert_eq!(bin_frequencies(5, 5), vec![0.0, 1.0, 2.0, -2.0, -1.0]);
    }

    #[test]
    fn pure_tone_peaks_at_its_frequency() {
        let sample_rate = 8000;
        let samples: Vec<f64> = (0..800)
            .map(|i| (2.0 * PI * 1000.0 * i as f64 / sample_rate as f64).cos())
            .collect();

        let spectrum = Spectrum::of_real(&samples, sample_rate);
        let peak = spectrum.peak_frequency().unwrap();
        assert_eq!(peak.abs(), 1000.0);
    }

    #[test]
    fn complex_exponential_has_one_sided_peak() {
        let sample_rate = 1000;
        let samples: Vec<Complex64> = (0..100)
            .map(|i| Complex64::from_polar(1.0, -2.0 * PI * 100.0 * i as f64 / 1000.0))
            .collect();

        let spectrum = Spectrum::of_complex(&samples, sample_rate);
        assert_eq!(spectrum.peak_frequency(), Some(-100.0));
        assert!((spectrum.magnitudes[90] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn repeated_calls_give_identical_results() {
        let mut processor = FftProcessor::new();
        let samples: Vec<f64> = (0..256).map(|i| (i as f64 * 0.3).sin()).collect();

        let first = processor.magnitudes_real(&samples);
        let second = processor.magnitudes_real(&samples);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_gives_empty_spectrum() {
        let spectrum = Spectrum::of_real(&[], 8000);
        assert!(spectrum.is_empty());
        assert_eq!(spectrum.peak_frequency(), None);
    }
}
