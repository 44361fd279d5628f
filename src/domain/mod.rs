//! Core domain types
//!
//! Pure types with no I/O dependencies. These represent the signals and
//! carrier parameters that flow through the modulation chain.

pub mod config;
pub mod error;
pub mod types;

pub use config::*;
pub use error::*;
pub use types::*;
