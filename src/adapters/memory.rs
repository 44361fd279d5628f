//! In-memory sink for development and testing without an audio device.
//!
//! Every delivery is logged at INFO level and kept for inspection:
//!
//!   RUST_LOG=qamod_lib=info cargo run

use crate::domain::QamResult;
use crate::dsp::correlation::rms;
use crate::ports::SignalSink;

/// One signal handed to the sink
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub label: String,
    pub samples: Vec<f64>,
    pub sampling_rate: u32,
}

#[derive(Debug, Default)]
pub struct MemorySink {
    deliveries: Vec<Delivery>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    pub fn into_deliveries(self) -> Vec<Delivery> {
        self.deliveries
    }
}

impl SignalSink for MemorySink {
    fn consume(&mut self, label: &str, samples: &[f64], sampling_rate: u32) -> QamResult<()> {
        log::info!(
            "[MEMORY SINK] {label}: {} samples at {sampling_rate} Hz, rms {:.4}",
            samples.len(),
            rms(samples)
        );
        self.deliveries.push(Delivery {
            label: label.to_string(),
            samples: samples.to_vec(),
            sampling_rate,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deliveries_are_kept_in_order() {
        let mut sink = MemorySink::new();
        sink.consume("a", &[0.1, 0.2], 8000).unwrap();
        sink.consume("b", &[0.3], 16000).unwrap();

        let deliveries = sink.into_deliveries();
        assert_eq!(deliveries.len(), 2);
        assert_eq!(deliveries[0].label, "a");
        assert_eq!(deliveries[0].samples, vec![0.1, 0.2]);
        assert_eq!(deliveries[1].sampling_rate, 16000);
    }
}
