//! Signal port traits

use crate::domain::{QamResult, Signal};

/// Supplies a decoded signal (e.g. from an audio file or a generator)
pub trait SignalSource {
    fn load(&mut self) -> QamResult<Signal>;
}

/// Consumes a recovered signal (e.g. for playback or plotting)
pub trait SignalSink {
    fn consume(&mut self, label: &str, samples: &[f64], sampling_rate: u32) -> QamResult<()>;
}
