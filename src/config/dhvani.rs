//! Main DhvaniConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::algorithms::search::GridWindow;
use crate::algorithms::wls::SensorWeights;
use crate::core::types::SensorPose;
use crate::engine::LocatorConfig;
use crate::error::{Error, Result};

use super::detection::DetectionSection;
use super::frames::FramesSection;
use super::replay::ReplaySection;
use super::sensors::SensorSettings;
use super::solver::SolverSection;

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "dhvani.toml";

/// Full Dhvani configuration loaded from TOML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct DhvaniConfig {
    /// Detection settings
    #[serde(default)]
    pub detection: DetectionSection,

    /// Solver settings
    #[serde(default)]
    pub solver: SolverSection,

    /// Output frames
    #[serde(default)]
    pub frames: FramesSection,

    /// Replay settings
    #[serde(default)]
    pub replay: ReplaySection,

    /// Sensor slots, in slot order
    #[serde(default)]
    pub sensors: Vec<SensorSettings>,
}

impl DhvaniConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        log::info!(
            "Loaded config from {} ({} sensors)",
            path.display(),
            config.sensors.len()
        );
        Ok(config)
    }

    /// Load from the default path, falling back to defaults if it is absent
    pub fn load_default() -> Result<Self> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from a TOML string
    pub fn from_toml(toml: &str) -> Result<Self> {
        Ok(basic_toml::from_str(toml)?)
    }

    /// Number of sensor slots.
    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }

    /// Check the configuration for values the locator cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.sensors.is_empty() {
            return Err(Error::Configuration(
                "no [[sensors]] configured".to_string(),
            ));
        }
        if !self.detection.power_threshold.is_finite() {
            return Err(Error::Configuration(format!(
                "detection.power_threshold must be finite, got {}",
                self.detection.power_threshold
            )));
        }
        if !self.frames.ray_length.is_finite() || self.frames.ray_length <= 0.0 {
            return Err(Error::Configuration(format!(
                "frames.ray_length must be positive and finite, got {}",
                self.frames.ray_length
            )));
        }
        if self.solver.algorithm.refines() {
            self.solver.grid_window()?;
        }
        for (i, sensor) in self.sensors.iter().enumerate() {
            if !sensor.weight.is_finite() || sensor.weight <= 0.0 {
                return Err(Error::Configuration(format!(
                    "sensors[{}].weight must be positive and finite, got {}",
                    i, sensor.weight
                )));
            }
        }
        if self.replay.enabled && self.replay.angles_file.trim().is_empty() {
            return Err(Error::Configuration(
                "replay is enabled but replay.angles_file is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Closed-form weighting implied by the per-sensor weights.
    pub fn sensor_weights(&self) -> SensorWeights {
        if self.sensors.iter().all(|s| s.weight == 1.0) {
            SensorWeights::Uniform
        } else {
            SensorWeights::PerSensor(self.sensors.iter().map(|s| s.weight).collect())
        }
    }

    /// Convert to LocatorConfig.
    ///
    /// In replay mode every sensor counts as detected, whatever the
    /// configured threshold.
    pub fn to_locator_config(&self) -> Result<LocatorConfig> {
        self.validate()?;

        let window = if self.solver.algorithm.refines() {
            self.solver.grid_window()?
        } else {
            // Unused by the closed-form solver; kept for reporting
            GridWindow::new(self.solver.window_size, self.solver.step_size).unwrap_or_default()
        };
        let power_threshold = if self.replay.enabled {
            f64::NEG_INFINITY
        } else {
            self.detection.power_threshold
        };

        Ok(LocatorConfig {
            power_threshold,
            solver: self.solver.algorithm,
            window,
            ray_length: self.frames.ray_length,
            weights: self.sensor_weights(),
        })
    }

    /// Fixed poses of every sensor slot.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] if any sensor has no `pose`.
    pub fn static_poses(&self) -> Result<Vec<SensorPose>> {
        self.sensors
            .iter()
            .enumerate()
            .map(|(i, sensor)| {
                sensor.pose.map(|p| p.to_sensor_pose()).ok_or_else(|| {
                    Error::Configuration(format!(
                        "sensors[{}] ({}) has no static pose",
                        i, sensor.pose_frame
                    ))
                })
            })
            .collect()
    }
}
