//! Output frame configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Output labels and visualization settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FramesSection {
    /// Frame the solution is expressed in
    #[serde(default = "defaults::world_frame")]
    pub world: String,

    /// Label of the estimated source
    #[serde(default = "defaults::solution_frame")]
    pub solution: String,

    /// Length of the bearing rays (meters)
    #[serde(default = "defaults::ray_length")]
    pub ray_length: f64,
}

impl Default for FramesSection {
    fn default() -> Self {
        Self {
            world: defaults::world_frame(),
            solution: defaults::solution_frame(),
            ray_length: defaults::ray_length(),
        }
    }
}
