//! Solver configuration section.

use serde::{Deserialize, Serialize};

use crate::algorithms::search::{GridWindow, SolverType};
use crate::error::Result;

use super::defaults;

/// Solver settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SolverSection {
    /// Refinement of the closed-form estimate
    #[serde(default = "defaults::algorithm")]
    pub algorithm: SolverType,

    /// Side of the square grid window (meters)
    #[serde(default = "defaults::window_size")]
    pub window_size: f64,

    /// Grid spacing (meters)
    #[serde(default = "defaults::step_size")]
    pub step_size: f64,
}

impl SolverSection {
    /// Validated grid window.
    pub fn grid_window(&self) -> Result<GridWindow> {
        GridWindow::new(self.window_size, self.step_size)
    }
}

impl Default for SolverSection {
    fn default() -> Self {
        Self {
            algorithm: defaults::algorithm(),
            window_size: defaults::window_size(),
            step_size: defaults::step_size(),
        }
    }
}
