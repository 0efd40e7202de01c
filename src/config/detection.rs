//! Detection configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Detection settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetectionSection {
    /// Beamformer power a sensor's strongest detection must exceed
    #[serde(default = "defaults::power_threshold")]
    pub power_threshold: f64,
}

impl Default for DetectionSection {
    fn default() -> Self {
        Self {
            power_threshold: defaults::power_threshold(),
        }
    }
}
