//! Port traits (interfaces)
//!
//! These traits define the boundaries between the signal chain and the
//! layers around it that decode input files and render output.

pub mod signal;

pub use signal::*;
