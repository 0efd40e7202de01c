//! Default value functions for serde deserialization.

use crate::algorithms::search::SolverType;

pub fn power_threshold() -> f64 {
    0.0
}

pub fn algorithm() -> SolverType {
    SolverType::FastGrid
}

pub fn window_size() -> f64 {
    10.0
}

pub fn step_size() -> f64 {
    0.01
}

pub fn world_frame() -> String {
    "world".to_string()
}

pub fn solution_frame() -> String {
    "acoustic_source".to_string()
}

pub fn ray_length() -> f64 {
    20.0
}

pub fn angles_file() -> String {
    "angles.txt".to_string()
}

pub fn weight() -> f64 {
    1.0
}
