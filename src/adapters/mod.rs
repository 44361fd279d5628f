//! Adapters implementing the signal ports
//!
//! - `tone` - sine generator source
//! - `pcm` - source over already-decoded integer PCM samples
//! - `memory` - sink that records deliveries in memory

pub mod memory;
pub mod pcm;
pub mod tone;

pub use memory::MemorySink;
pub use pcm::PcmSource;
pub use tone::ToneSource;
