//! Integer PCM source
//!
//! Takes samples that a decoder has already pulled out of a container and
//! turns them into a mono floating-point [`Signal`]: channels are averaged
//! into one, and values are scaled by `2^(8·width - 1)` so full scale maps
//! to roughly [-1, 1).

use crate::domain::{QamError, QamResult, Signal};
use crate::ports::SignalSource;

pub struct PcmSource {
    /// Interleaved samples, frame by frame
    samples: Vec<i32>,
    channels: u16,
    /// Bytes per sample, 1..=4
    sample_width: u8,
    sampling_rate: u32,
    label: String,
}

impl PcmSource {
    pub fn new(
        samples: Vec<i32>,
        channels: u16,
        sample_width: u8,
        sampling_rate: u32,
        label: impl Into<String>,
    ) -> Self {
        Self {
            samples,
            channels,
            sample_width,
            sampling_rate,
            label: label.into(),
        }
    }

    fn full_scale(&self) -> f64 {
        2f64.powi(8 * self.sample_width as i32 - 1)
    }

    fn validate(&self) -> QamResult<()> {
        if self.channels == 0 {
            return Err(QamError::InvalidInput("channel count must be positive".into()));
        }
        if !(1..=4).contains(&self.sample_width) {
            return Err(QamError::InvalidInput(format!(
                "sample width must be 1 to 4 bytes, got {}",
                self.sample_width
            )));
        }
        if self.samples.len() % self.channels as usize != 0 {
            return Err(QamError::InvalidInput(format!(
                "{} samples do not split into whole frames of {} channels",
                self.samples.len(),
                self.channels
            )));
        }
        Ok(())
    }
}

impl SignalSource for PcmSource {
    fn load(&mut self) -> QamResult<Signal> {
        self.validate()?;

        let channels = self.channels as usize;
        let scale = self.full_scale() * channels as f64;
        let mono = self
            .samples
            .chunks_exact(channels)
            .map(|frame| frame.iter().map(|&s| s as f64).sum::<f64>() / scale)
            .collect();

        log::debug!(
            "loaded '{}': {} frames, {} channel(s), {}-bit",
            self.label,
            self.samples.len() / channels,
            self.channels,
            8 * self.sample_width as u32
        );
        Ok(Signal::new(mono, self.sampling_rate)?.with_label(self.label.clone()))
    }
}
