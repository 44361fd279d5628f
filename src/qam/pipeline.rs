//! End-to-end run: align → modulate → demodulate
//!
//! The core stages stay pure and silent; this is the layer that logs,
//! applies the configured input bound and output clipping, and talks to
//! the source and sink ports.

use crate::domain::{
    CarrierSpec, Configuration, DemodulatedPair, ModulatedSignal, QamError, QamResult, Signal,
};
use crate::ports::{SignalSink, SignalSource};

use super::{demodulator, modulator, resampler};

/// Everything one pipeline run produces
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub modulated: ModulatedSignal,
    pub demodulated: DemodulatedPair,
    /// Labels of the two inputs, in order
    pub labels: [Option<String>; 2],
}

impl PipelineOutput {
    pub fn sampling_rate(&self) -> u32 {
        self.modulated.sampling_rate
    }

    /// Hand both recovered signals to a sink.
    ///
    /// Unlabelled inputs are delivered as "signal 1" / "signal 2".
    pub fn deliver(&self, sink: &mut dyn SignalSink) -> QamResult<()> {
        let rate = self.sampling_rate();
        let channels = [&self.demodulated.first, &self.demodulated.second];
        for (index, (label, samples)) in self.labels.iter().zip(channels).enumerate() {
            let label = label
                .clone()
                .unwrap_or_else(|| format!("signal {}", index + 1));
            sink.consume(&label, samples, rate)?;
        }
        Ok(())
    }
}

/// Configured QAM modulate/demodulate chain
#[derive(Debug, Clone)]
pub struct QamPipeline {
    carrier: CarrierSpec,
    clip_output: bool,
    max_input_len: Option<usize>,
}

impl QamPipeline {
    /// A pipeline with clipping off and no input bound
    pub fn new(carrier: CarrierSpec) -> Self {
        Self {
            carrier,
            clip_output: false,
            max_input_len: None,
        }
    }

    pub fn from_config(config: &Configuration) -> Self {
        Self {
            carrier: config.carrier,
            clip_output: config.clip_output,
            max_input_len: config.max_input_len,
        }
    }

    pub fn with_clipping(mut self, clip_output: bool) -> Self {
        self.clip_output = clip_output;
        self
    }

    pub fn with_max_input_len(mut self, max_input_len: Option<usize>) -> Self {
        self.max_input_len = max_input_len;
        self
    }

    pub fn carrier(&self) -> &CarrierSpec {
        &self.carrier
    }

    fn check_len(&self, signal: &Signal) -> QamResult<()> {
        match self.max_input_len {
            Some(max) if signal.len() > max => Err(QamError::InvalidInput(format!(
                "input '{}' has {} samples, limit is {max}",
                signal.label().unwrap_or("unnamed"),
                signal.len()
            ))),
            _ => Ok(()),
        }
    }

    /// Run both signals through the chain.
    ///
    /// Demodulation happens at the first signal's sampling rate; a second
    /// signal recorded at a different rate is accepted with a warning.
    pub fn run(&self, first: &Signal, second: &Signal) -> QamResult<PipelineOutput> {
        self.check_len(first)?;
        self.check_len(second)?;

        let rate = first.sampling_rate();
        if second.sampling_rate() != rate {
            log::warn!(
                "sampling rates differ ({} Hz vs {} Hz); demodulating at {} Hz",
                rate,
                second.sampling_rate(),
                rate
            );
        }

        let (first, second) = resampler::align_signals(first, second)?;
        log::debug!(
            "aligned inputs to {} samples ({:.3} s at {} Hz)",
            first.len(),
            first.duration_secs(),
            rate
        );

        let samples = modulator::modulate(first.samples(), second.samples(), &self.carrier)?;
        let modulated = ModulatedSignal {
            samples,
            sampling_rate: rate,
        };
        log::debug!("modulated onto {} carrier", self.carrier);

        let mut demodulated = demodulator::demodulate(&modulated.samples, &self.carrier, rate)?;
        if self.clip_output {
            demodulated = demodulated.clipped();
        }
        log::debug!("demodulated {} samples per channel", demodulated.len());

        Ok(PipelineOutput {
            modulated,
            demodulated,
            labels: [
                first.label().map(String::from),
                second.label().map(String::from),
            ],
        })
    }

    /// Load both inputs from their sources, then [`run`](Self::run)
    pub fn run_sources(
        &self,
        first: &mut dyn SignalSource,
        second: &mut dyn SignalSource,
    ) -> QamResult<PipelineOutput> {
        let first = first.load()?;
        let second = second.load()?;
        self.run(&first, &second)
    }
}
