//! Configuration profiles
//!
//! A Configuration is a saved profile holding the carrier and the
//! post-processing options applied by the pipeline.

use serde::{Deserialize, Serialize};

use super::types::{CarrierSpec, FrequencyUnit};

fn default_clip_output() -> bool {
    true
}

/// A saved configuration profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Profile name (e.g., "Default", "Voice 10 kHz")
    pub name: String,
    /// Shared carrier for both signals
    pub carrier: CarrierSpec,
    /// Clamp the recovered signals to [-1, 1] before handing them out
    #[serde(default = "default_clip_output")]
    pub clip_output: bool,
    /// Upper bound on input length in samples; `None` means unbounded
    #[serde(default)]
    pub max_input_len: Option<usize>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            carrier: CarrierSpec::new_unchecked(100.0, FrequencyUnit::Megahertz),
            clip_output: default_clip_output(),
            max_input_len: None,
        }
    }
}
