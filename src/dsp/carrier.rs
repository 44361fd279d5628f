//! Quadrature carrier generator
//!
//! Produces the in-phase `cos(2π·f·t)` and quadrature `-j·sin(2π·f·t)`
//! carriers shared by the modulator and the demodulator. Unlike a running
//! NCO, the phase of sample `i` is computed directly from `t[i]`, so the two
//! ends of the chain agree exactly whenever their time bases agree.

use std::f64::consts::PI;

use num_complex::Complex64;

/// How sample indices map to time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeBase {
    /// `t[i] = i / len`: the whole signal spans one unit of time.
    ///
    /// This is what the modulator uses, which makes the carrier frequency
    /// "cycles per signal" rather than cycles per second. It only matches
    /// the demodulator's base when the signal is exactly one second long.
    UnitInterval { len: usize },
    /// `t[i] = i / sampling_rate`, real seconds
    Seconds { sampling_rate: u32 },
}

impl TimeBase {
    pub fn time(&self, index: usize) -> f64 {
        match *self {
            TimeBase::UnitInterval { len } => index as f64 / len as f64,
            TimeBase::Seconds { sampling_rate } => index as f64 / sampling_rate as f64,
        }
    }
}

/// Carrier pair at one frequency over one time base
#[derive(Debug, Clone, Copy)]
pub struct QuadratureCarrier {
    frequency_hz: f64,
    time_base: TimeBase,
}

impl QuadratureCarrier {
    pub fn new(frequency_hz: f64, time_base: TimeBase) -> Self {
        Self {
            frequency_hz,
            time_base,
        }
    }

    pub fn frequency(&self) -> f64 {
        self.frequency_hz
    }

    fn phase(&self, index: usize) -> f64 {
        2.0 * PI * self.frequency_hz * self.time_base.time(index)
    }

    /// Real carrier value `cos(2π·f·t[i])`
    pub fn in_phase(&self, index: usize) -> f64 {
        self.phase(index).cos()
    }

    /// Complex carrier value `-j·sin(2π·f·t[i])`
    pub fn quadrature(&self, index: usize) -> Complex64 {
        Complex64::new(0.0, -self.phase(index).sin())
    }

    /// Both carriers for sample `i`
    pub fn iq(&self, index: usize) -> (f64, Complex64) {
        let (sin, cos) = self.phase(index).sin_cos();
        (cos, Complex64::new(0.0, -sin))
    }
}
