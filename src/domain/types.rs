//! Core domain types

use std::fmt;
use std::str::FromStr;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use super::error::{QamError, QamResult};

/// A real-valued baseband signal with its sampling rate.
///
/// Both the "raw sample list" and the "named audio file" shapes of input
/// collapse into this one struct; the label is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Vec<f64>,
    sampling_rate: u32,
    label: Option<String>,
}

impl Signal {
    /// Create a signal, rejecting empty sample lists and a zero rate
    pub fn new(samples: Vec<f64>, sampling_rate: u32) -> QamResult<Self> {
        if samples.is_empty() {
            return Err(QamError::InvalidInput("signal has no samples".into()));
        }
        if sampling_rate == 0 {
            return Err(QamError::InvalidInput(
                "sampling rate must be a positive integer".into(),
            ));
        }
        Ok(Self {
            samples,
            sampling_rate,
            label: None,
        })
    }

    /// Attach a label (usually the name of the file the samples came from)
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    pub fn sampling_rate(&self) -> u32 {
        self.sampling_rate
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for a constructed signal; present for clippy's sake
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Time in seconds of every sample, `i / sampling_rate`
    pub fn time_axis(&self) -> Vec<f64> {
        let rate = self.sampling_rate as f64;
        (0..self.samples.len()).map(|i| i as f64 / rate).collect()
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sampling_rate as f64
    }

    /// Replace the samples while keeping rate and label.
    pub(crate) fn with_samples(&self, samples: Vec<f64>) -> QamResult<Self> {
        let mut signal = Signal::new(samples, self.sampling_rate)?;
        signal.label = self.label.clone();
        Ok(signal)
    }
}

/// Unit selector for a carrier magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FrequencyUnit {
    Kilohertz,
    Megahertz,
}

impl FrequencyUnit {
    /// Factor that converts a magnitude in this unit to hertz
    pub fn multiplier(self) -> f64 {
        match self {
            FrequencyUnit::Kilohertz => 1e3,
            FrequencyUnit::Megahertz => 1e6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FrequencyUnit::Kilohertz => "khz",
            FrequencyUnit::Megahertz => "mhz",
        }
    }
}

impl FromStr for FrequencyUnit {
    type Err = QamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "khz" => Ok(FrequencyUnit::Kilohertz),
            "mhz" => Ok(FrequencyUnit::Megahertz),
            other => Err(QamError::InvalidInput(format!(
                "unit must be either 'kHz' or 'MHz', got '{other}'"
            ))),
        }
    }
}

impl TryFrom<String> for FrequencyUnit {
    type Error = QamError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FrequencyUnit> for String {
    fn from(unit: FrequencyUnit) -> Self {
        unit.as_str().to_string()
    }
}

impl fmt::Display for FrequencyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrequencyUnit::Kilohertz => write!(f, "kHz"),
            FrequencyUnit::Megahertz => write!(f, "MHz"),
        }
    }
}

/// Carrier frequency as entered by the user: a magnitude plus a unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CarrierSpecRepr", into = "CarrierSpecRepr")]
pub struct CarrierSpec {
    magnitude: f64,
    unit: FrequencyUnit,
}

/// Unchecked wire form, validated on the way in
#[derive(Serialize, Deserialize)]
struct CarrierSpecRepr {
    value: f64,
    unit: FrequencyUnit,
}

impl CarrierSpec {
    pub fn new(magnitude: f64, unit: FrequencyUnit) -> QamResult<Self> {
        if !magnitude.is_finite() || magnitude <= 0.0 {
            return Err(QamError::InvalidInput(format!(
                "carrier magnitude must be positive, got {magnitude}"
            )));
        }
        Ok(Self { magnitude, unit })
    }

    /// Caller guarantees a positive, finite magnitude
    pub(crate) const fn new_unchecked(magnitude: f64, unit: FrequencyUnit) -> Self {
        Self { magnitude, unit }
    }

    pub fn khz(magnitude: f64) -> QamResult<Self> {
        Self::new(magnitude, FrequencyUnit::Kilohertz)
    }

    pub fn mhz(magnitude: f64) -> QamResult<Self> {
        Self::new(magnitude, FrequencyUnit::Megahertz)
    }

    /// Parse the unit from free text, e.g. `CarrierSpec::parse(100.0, "MHz")`
    pub fn parse(magnitude: f64, unit: &str) -> QamResult<Self> {
        Self::new(magnitude, unit.parse()?)
    }

    /// The raw magnitude, before unit conversion
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn unit(&self) -> FrequencyUnit {
        self.unit
    }

    /// Carrier frequency in hertz
    pub fn hz(&self) -> f64 {
        self.magnitude * self.unit.multiplier()
    }
}

impl TryFrom<CarrierSpecRepr> for CarrierSpec {
    type Error = QamError;

    fn try_from(repr: CarrierSpecRepr) -> Result<Self, Self::Error> {
        CarrierSpec::new(repr.value, repr.unit)
    }
}

impl From<CarrierSpec> for CarrierSpecRepr {
    fn from(spec: CarrierSpec) -> Self {
        Self {
            value: spec.magnitude,
            unit: spec.unit,
        }
    }
}

impl fmt::Display for CarrierSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.magnitude, self.unit)
    }
}

/// Output of one modulation call: complex samples at the sources' rate
#[derive(Debug, Clone, PartialEq)]
pub struct ModulatedSignal {
    pub samples: Vec<Complex64>,
    pub sampling_rate: u32,
}

impl ModulatedSignal {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Envelope `|x[i]|` of every sample
    pub fn magnitudes(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.norm()).collect()
    }
}

/// The two baseband estimates recovered by the demodulator
#[derive(Debug, Clone, PartialEq)]
pub struct DemodulatedPair {
    pub first: Vec<f64>,
    pub second: Vec<f64>,
}

impl DemodulatedPair {
    pub fn len(&self) -> usize {
        self.first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    /// Copy with every sample clamped to the playable range [-1, 1]
    pub fn clipped(&self) -> Self {
        let clip = |v: &[f64]| v.iter().map(|s| s.clamp(-1.0, 1.0)).collect();
        Self {
            first: clip(&self.first),
            second: clip(&self.second),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_rejects_empty_samples() {
        assert!(matches!(
            Signal::new(vec![], 8000),
            Err(QamError::InvalidInput(_))
        ));
    }

    #[test]
    fn signal_rejects_zero_rate() {
        assert!(matches!(
            Signal::new(vec![0.5], 0),
            Err(QamError::InvalidInput(_))
        ));
    }

    #[test]
    fn time_axis_is_in_seconds() {
        let signal = Signal::new(vec![0.0; 4], 4).unwrap();
        assert_eq!(signal.time_axis(), vec![0.0, 0.25, 0.5, 0.75]);
        assert_eq!(signal.duration_secs(), 1.0);
    }

    #[test]
    fn unit_parses_case_insensitively() {
        assert_eq!("kHz".parse::<FrequencyUnit>().unwrap(), FrequencyUnit::Kilohertz);
        assert_eq!("MHZ".parse::<FrequencyUnit>().unwrap(), FrequencyUnit::Megahertz);
        assert_eq!(" mhz ".parse::<FrequencyUnit>().unwrap(), FrequencyUnit::Megahertz);
        assert!("Hz".parse::<FrequencyUnit>().is_err());
        assert!("GHz".parse::<FrequencyUnit>().is_err());
    }

    #[test]
    fn carrier_resolves_to_hertz() {
        assert_eq!(CarrierSpec::khz(2.5).unwrap().hz(), 2_500.0);
        assert_eq!(CarrierSpec::mhz(100.0).unwrap().hz(), 100_000_000.0);
        assert_eq!(CarrierSpec::mhz(100.0).unwrap().magnitude(), 100.0);
    }

    #[test]
    fn carrier_rejects_non_positive_magnitude() {
        assert!(CarrierSpec::khz(0.0).is_err());
        assert!(CarrierSpec::khz(-1.0).is_err());
        assert!(CarrierSpec::khz(f64::NAN).is_err());
        assert!(CarrierSpec::parse(1.0, "furlongs").is_err());
    }

    #[test]
    fn carrier_serde_validates_on_load() {
        let spec: CarrierSpec = serde_json::from_str(r#"{"value":3.0,"unit":"KHz"}"#).unwrap();
        assert_eq!(spec.hz(), 3_000.0);

        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(json, r#"{"value":3.0,"unit":"khz"}"#);

        assert!(serde_json::from_str::<CarrierSpec>(r#"{"value":-3.0,"unit":"khz"}"#).is_err());
        assert!(serde_json::from_str::<CarrierSpec>(r#"{"value":3.0,"unit":"ghz"}"#).is_err());
    }

    #[test]
    fn clipped_clamps_both_channels() {
        let pair = DemodulatedPair {
            first: vec![-2.0, 0.5, 3.0],
            second: vec![1.5, -0.25, -1.0001],
        };
        let clipped = pair.clipped();
        assert_eq!(clipped.first, vec![-1.0, 0.5, 1.0]);
        assert_eq!(clipped.second, vec![1.0, -0.25, -1.0]);
    }

    #[test]
    fn modulated_magnitudes() {
        let modulated = ModulatedSignal {
            samples: vec![Complex64::new(3.0, 4.0), Complex64::new(0.0, -1.0)],
            sampling_rate: 8000,
        };
        assert_eq!(modulated.magnitudes(), vec![5.0, 1.0]);
    }
}
