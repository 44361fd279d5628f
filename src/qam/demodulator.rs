//! Coherent QAM demodulator
//!
//! Pipeline: modulated samples → mix with cos / -j·sin → first-order
//! Butterworth lowpass → real part
//!
//! Mixing shifts each baseband component back to DC and leaves an image at
//! twice the carrier, which the lowpass removes. The carriers are rebuilt on
//! a time base of real seconds, `t[i] = i / sampling_rate`, which differs
//! from the modulator's unit-interval base (see the modulator docs).
//!
//! With these carriers the second estimate comes back sign-inverted:
//! `(-j)·(-j) = -1`, so the recovered pair is roughly `(s1/2, -s2/2)`.

use num_complex::Complex64;

use crate::domain::{CarrierSpec, DemodulatedPair, QamError, QamResult};
use crate::dsp::carrier::{QuadratureCarrier, TimeBase};
use crate::dsp::filter::IirFilter;

/// Design the image-rejection lowpass for a carrier and sampling rate.
///
/// The normalized cutoff is `2·magnitude / sampling_rate`, where
/// `magnitude` is the carrier value *before* unit conversion. A 10 kHz
/// carrier at 48 kHz therefore gets a cutoff of 10 Hz, not 10 kHz.
///
/// Fails with [`QamError::UnstableFilter`] unless the cutoff lies strictly
/// inside (0, 1), i.e. for a magnitude at or above half the sampling rate.
pub fn lowpass_for(carrier: &CarrierSpec, sampling_rate: u32) -> QamResult<IirFilter> {
    if sampling_rate == 0 {
        return Err(QamError::InvalidInput(
            "sampling rate must be a positive integer".into(),
        ));
    }
    let cutoff = 2.0 * carrier.magnitude() / sampling_rate as f64;
    IirFilter::butterworth_lowpass(cutoff)
}

/// Recover the two baseband signals from a modulated signal.
///
/// Both estimates have the same length as `modulated`.
pub fn demodulate(
    modulated: &[Complex64],
    carrier: &CarrierSpec,
    sampling_rate: u32,
) -> QamResult<DemodulatedPair> {
    if modulated.is_empty() {
        return Err(QamError::InvalidInput(
            "cannot demodulate an empty signal".into(),
        ));
    }
    // Validates the rate too, and runs before any mixing work
    let mut lowpass = lowpass_for(carrier, sampling_rate)?;

    let oscillator = QuadratureCarrier::new(carrier.hz(), TimeBase::Seconds { sampling_rate });

    let (mixed_i, mixed_q): (Vec<Complex64>, Vec<Complex64>) = modulated
        .iter()
        .enumerate()
        .map(|(i, &sample)| {
            let (in_phase, quadrature) = oscillator.iq(i);
            (sample * in_phase, sample * quadrature)
        })
        .unzip();

    let first = lowpass.filter(&mixed_i).into_iter().map(|y| y.re).collect();
    let second = lowpass.filter(&mixed_q).into_iter().map(|y| y.re).collect();

    Ok(DemodulatedPair { first, second })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::correlation::normalized_cross_correlation;
    use crate::qam::modulator::modulate;
    use std::f64::consts::PI;

    #[test]
    fn empty_signal_is_rejected() {
        let carrier = CarrierSpec::khz(1.0).unwrap();
        assert!(matches!(
            demodulate(&[], &carrier, 8000),
            Err(QamError::InvalidInput(_))
        ));
    }

    #[test]
    fn zero_sampling_rate_is_rejected() {
        let carrier = CarrierSpec::khz(1.0).unwrap();
        let modulated = vec![Complex64::new(1.0, 0.0); 4];
        assert!(matches!(
            demodulate(&modulated, &carrier, 0),
            Err(QamError::InvalidInput(_))
        ));
    }

    #[test]
    fn carrier_at_half_sampling_rate_is_unstable() {
        let modulated = vec![Complex64::new(1.0, 0.0); 16];
        for magnitude in [4000.0, 4000.5, 9000.0] {
            let carrier = CarrierSpec::khz(magnitude).unwrap();
            assert!(
                matches!(
                    demodulate(&modulated, &carrier, 8000),
                    Err(QamError::UnstableFilter { .. })
                ),
                "magnitude {magnitude} should be rejected at 8 kHz"
            );
        }
    }

    #[test]
    fn cutoff_uses_raw_magnitude() {
        // 2 MHz and 2 kHz both give a cutoff of 2·2/8000 = 0.0005
        let khz = lowpass_for(&CarrierSpec::khz(2.0).unwrap(), 8000).unwrap();
        let mhz = lowpass_for(&CarrierSpec::mhz(2.0).unwrap(), 8000).unwrap();
        assert_eq!(khz.numerator(), mhz.numerator());
        assert_eq!(khz.denominator(), mhz.denominator());
    }

    #[test]
    fn output_has_input_length() {
        let carrier = CarrierSpec::khz(1.0).unwrap();
        let modulated = vec![Complex64::new(0.25, -0.5); 123];
        let pair = demodulate(&modulated, &carrier, 8000).unwrap();
        assert_eq!(pair.first.len(), 123);
        assert_eq!(pair.second.len(), 123);
    }

    #[test]
    fn second_channel_is_silent_when_second_input_is() {
        // One second at 8 kHz so both time bases coincide
        let rate = 8000;
        let carrier = CarrierSpec::khz(1.0).unwrap();
        let s1: Vec<f64> = (0..rate)
            .map(|i| (2.0 * PI * 0.5 * i as f64 / rate as f64).sin())
            .collect();
        let s2 = vec![0.0; rate as usize];

        let modulated = modulate(&s1, &s2, &carrier).unwrap();
        let pair = demodulate(&modulated, &carrier, rate).unwrap();

        assert!(pair.second.iter().all(|y| y.abs() < 1e-12));
        assert!(normalized_cross_correlation(&pair.first, &s1) > 0.9);
    }
}
