//! Length alignment ahead of modulation
//!
//! The modulator needs two sequences of the same length. The shorter one is
//! right-padded with silence; nothing is interpolated, so the sampling rate
//! stays as it was and the padded signal simply lasts longer.

use crate::domain::{QamError, QamResult, Signal};

/// Zero-pad `samples` on the right up to `target_len`
pub fn pad_to(samples: &[f64], target_len: usize) -> QamResult<Vec<f64>> {
    if target_len < samples.len() {
        return Err(QamError::InvalidInput(format!(
            "cannot pad {} samples down to {target_len}",
            samples.len()
        )));
    }
    let mut padded = Vec::with_capacity(target_len);
    padded.extend_from_slice(samples);
    padded.resize(target_len, 0.0);
    Ok(padded)
}

/// Bring two sequences to a common length.
///
/// The shorter sequence is zero-padded to the length of the longer one,
/// which is returned unchanged.
pub fn align(a: &[f64], b: &[f64]) -> QamResult<(Vec<f64>, Vec<f64>)> {
    if a.is_empty() || b.is_empty() {
        return Err(QamError::InvalidInput(
            "cannot align an empty sequence".into(),
        ));
    }
    let len = a.len().max(b.len());
    Ok((pad_to(a, len)?, pad_to(b, len)?))
}

/// [`align`] over two signals, keeping each one's rate and label
pub fn align_signals(a: &Signal, b: &Signal) -> QamResult<(Signal, Signal)> {
    let (samples_a, samples_b) = align(a.samples(), b.samples())?;
    Ok((a.with_samples(samples_a)?, b.with_samples(samples_b)?))
}
