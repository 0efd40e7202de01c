//! Replay configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Replay (simulation) settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReplaySection {
    /// Read azimuths from `angles_file` instead of a live front-end
    #[serde(default)]
    pub enabled: bool,

    /// Angle file, one azimuth in degrees per line
    #[serde(default = "defaults::angles_file")]
    pub angles_file: String,
}

impl Default for ReplaySection {
    fn default() -> Self {
        Self {
            enabled: false,
            angles_file: defaults::angles_file(),
        }
    }
}
