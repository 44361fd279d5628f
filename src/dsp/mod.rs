//! Digital Signal Processing
//!
//! Pure functions for signal processing. No I/O dependencies.

pub mod carrier;
pub mod correlation;
pub mod fft;
pub mod filter;

// Re-export commonly used items
pub use carrier::{QuadratureCarrier, TimeBase};
pub use correlation::{normalized_cross_correlation, rms};
pub use fft::{FftProcessor, Spectrum};
pub use filter::IirFilter;
