//! Unified configuration loading for Dhvani.
//!
//! Loads all configuration from a single TOML file.

mod defaults;
mod detection;
mod dhvani;
mod frames;
mod replay;
mod sensors;
mod solver;

// Re-export main types
pub use dhvani::{DEFAULT_CONFIG_PATH, DhvaniConfig};

// Re-export section types
pub use detection::DetectionSection;
pub use frames::FramesSection;
pub use replay::ReplaySection;
pub use sensors::{PoseSettings, SensorSettings};
pub use solver::SolverSection;
