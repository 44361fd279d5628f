//! QAM two-signal modem
//!
//! Combines two real-valued audio signals onto one carrier with quadrature
//! amplitude modulation, then recovers both from the composite.
//!
//! ## Architecture (Hexagonal / Ports & Adapters)
//!
//! - `domain/` - Pure domain types, no I/O dependencies
//! - `dsp/` - Signal processing (pure functions, no I/O)
//! - `qam/` - The signal chain (resampler, modulator, demodulator, pipeline)
//! - `ports/` - Trait definitions for signal sources and sinks
//! - `adapters/` - Implementations of ports (tone generator, PCM, memory sink)
//! - `profiles` - Configuration profiles stored as JSON
//! - `batch` - Parallel execution of independent pipeline runs

// Core domain (pure, no I/O)
pub mod domain;
pub mod dsp;
pub mod ports;
pub mod qam;

// Adapters (external I/O)
pub mod adapters;

pub mod batch;
pub mod profiles;

pub use domain::{
    CarrierSpec, Configuration, DemodulatedPair, FrequencyUnit, ModulatedSignal, QamError,
    QamResult, Signal,
};
pub use qam::{align, demodulate, modulate, PipelineOutput, QamPipeline};
