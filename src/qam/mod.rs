//! QAM signal chain
//!
//! Resampler → Modulator → Demodulator, plus the pipeline that runs them in
//! order. Each stage is a pure function of its inputs.

pub mod demodulator;
pub mod modulator;
pub mod pipeline;
pub mod resampler;

pub use demodulator::demodulate;
pub use modulator::{modulate, modulate_at_hz};
pub use pipeline::{PipelineOutput, QamPipeline};
pub use resampler::{align, align_signals};
