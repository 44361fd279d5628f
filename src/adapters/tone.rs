//! Sine tone generator
//!
//! Stands in for a decoded audio file when no recording is at hand, e.g. in
//! the demo binary and the integration tests.

use std::f64::consts::PI;

use crate::domain::{QamError, QamResult, Signal};
use crate::ports::SignalSource;

pub struct ToneSource {
    frequency: f64,
    amplitude: f64,
    num_samples: usize,
    sampling_rate: u32,
    label: String,
}

impl ToneSource {
    /// A full-scale tone of `num_samples` samples
    pub fn new(frequency: f64, num_samples: usize, sampling_rate: u32) -> Self {
        Self {
            frequency,
            amplitude: 1.0,
            num_samples,
            sampling_rate,
            label: format!("tone {frequency} Hz"),
        }
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl SignalSource for ToneSource {
    fn load(&mut self) -> QamResult<Signal> {
        if !self.frequency.is_finite() || !self.amplitude.is_finite() {
            return Err(QamError::InvalidInput(
                "tone frequency and amplitude must be finite".into(),
            ));
        }
        if self.sampling_rate == 0 {
            return Err(QamError::InvalidInput(
                "sampling rate must be a positive integer".into(),
            ));
        }

        let step = 2.0 * PI * self.frequency / self.sampling_rate as f64;
        let samples = (0..self.num_samples)
            .map(|i| self.amplitude * (step * i as f64).sin())
            .collect();

        log::debug!(
            "generated {} samples of '{}' at {} Hz",
            self.num_samples,
            self.label,
            self.sampling_rate
        );
        Ok(Signal::new(samples, self.sampling_rate)?.with_label(self.label.clone()))
    }
}
