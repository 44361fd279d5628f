//! QAM modulator: two real baseband signals in, one complex signal out
//!
//! ```text
//! out[i] = s1[i]·cos(2π·f·t[i]) + s2[i]·(-j·sin(2π·f·t[i])),   t[i] = i / N
//! ```
//!
//! The real part carries `s1`, the imaginary part carries `s2`.
//!
//! Note the time base: `t` runs over the unit interval regardless of the
//! sampling rate, so `f` counts cycles per signal rather than per second.
//! The demodulator uses real seconds instead. The two only line up when the
//! signal holds exactly one second of audio.

use num_complex::Complex64;

use crate::domain::{CarrierSpec, QamError, QamResult};
use crate::dsp::carrier::{QuadratureCarrier, TimeBase};

/// Modulate `s1` and `s2` onto the carrier described by `carrier`.
///
/// Both inputs must have the same length; run them through
/// [`align`](super::resampler::align) first.
pub fn modulate(s1: &[f64], s2: &[f64], carrier: &CarrierSpec) -> QamResult<Vec<Complex64>> {
    modulate_at_hz(s1, s2, carrier.hz())
}

/// Same as [`modulate`] with the carrier already resolved to hertz.
///
/// A 0 Hz carrier is accepted: the in-phase carrier is then constant 1 and
/// the quadrature carrier constant 0.
pub fn modulate_at_hz(s1: &[f64], s2: &[f64], freq_hz: f64) -> QamResult<Vec<Complex64>> {
    if !freq_hz.is_finite() || freq_hz < 0.0 {
        return Err(QamError::InvalidInput(format!(
            "carrier frequency must be non-negative, got {freq_hz} Hz"
        )));
    }
    if s1.len() != s2.len() {
        return Err(QamError::LengthMismatch {
            first: s1.len(),
            second: s2.len(),
        });
    }
    if s1.is_empty() {
        return Err(QamError::InvalidInput("cannot modulate empty signals".into()));
    }

    let carrier = QuadratureCarrier::new(freq_hz, TimeBase::UnitInterval { len: s1.len() });

    Ok(s1
        .iter()
        .zip(s2)
        .enumerate()
        .map(|(i, (&a, &b))| {
            let (in_phase, quadrature) = carrier.iq(i);
            a * in_phase + b * quadrature
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_signals_modulate_to_zero() {
        let carrier = CarrierSpec::khz(3.0).unwrap();
        let out = modulate(&[0.0; 64], &[0.0; 64], &carrier).unwrap();
        assert_eq!(out.len(), 64);
        assert!(out.iter().all(|c| c.re == 0.0 && c.im == 0.0));
    }

    #[test]
    fn dc_carrier_passes_first_signal_only() {
        let out = modulate_at_hz(&[1.0, 0.0], &[0.0, 1.0], 0.0).unwrap();
        assert_eq!(out, vec![Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)]);
    }

    #[test]
    fn unequal_lengths_are_rejected() {
        let carrier = CarrierSpec::khz(1.0).unwrap();
        assert_eq!(
            modulate(&[1.0, 2.0, 3.0], &[1.0], &carrier),
            Err(QamError::LengthMismatch { first: 3, second: 1 })
        );
    }

    #[test]
    fn negative_frequency_is_rejected() {
        assert!(matches!(
            modulate_at_hz(&[1.0], &[1.0], -5.0),
            Err(QamError::InvalidInput(_))
        ));
        assert!(matches!(
            modulate_at_hz(&[1.0], &[1.0], f64::INFINITY),
            Err(QamError::InvalidInput(_))
        ));
    }

    #[test]
    fn empty_signals_are_rejected() {
        assert!(matches!(
            modulate_at_hz(&[], &[], 10.0),
            Err(QamError::InvalidInput(_))
        ));
    }

    #[test]
    fn real_part_carries_first_imaginary_part_carries_second() {
        // 1 cycle over 8 samples on the unit-interval time base
        let s1 = [0.5; 8];
        let s2 = [2.0; 8];
        let out = modulate_at_hz(&s1, &s2, 1.0).unwrap();

        for (i, sample) in out.iter().enumerate() {
            let phase = 2.0 * std::f64::consts::PI * i as f64 / 8.0;
            assert!((sample.re - 0.5 * phase.cos()).abs() < 1e-12);
            assert!((sample.im + 2.0 * phase.sin()).abs() < 1e-12);
        }
    }

    #[test]
    fn time_base_ignores_sampling_rate() {
        // Frequency is cycles per signal: a 1 kHz carrier over 1000 samples
        // lands every sample on phase 2π·k, i.e. cos = 1
        let carrier = CarrierSpec::khz(1.0).unwrap();
        let out = modulate(&[1.0; 1000], &[1.0; 1000], &carrier).unwrap();
        for sample in &out {
            assert!((sample.re - 1.0).abs() < 1e-9);
            assert!(sample.im.abs() < 1e-9);
        }
    }
}
