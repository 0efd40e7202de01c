//! Per-sensor configuration.

use serde::{Deserialize, Serialize};

use crate::core::types::SensorPose;

use super::defaults;

/// One microphone-array sensor slot
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SensorSettings {
    /// Pose-tracker identifier of the sensor frame
    #[serde(default)]
    pub pose_frame: String,

    /// Identifier of the sensor's direction-of-arrival stream
    #[serde(default)]
    pub bearing_topic: String,

    /// Fixed pose, for sensors that do not move
    #[serde(default)]
    pub pose: Option<PoseSettings>,

    /// Weight in the closed-form intersection
    #[serde(default = "defaults::weight")]
    pub weight: f64,
}

/// Planar pose with optional height
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseSettings {
    #[serde(default)]
    pub x: f64,

    #[serde(default)]
    pub y: f64,

    #[serde(default)]
    pub z: f64,

    /// Heading in degrees, counter-clockwise from the world x axis
    #[serde(default)]
    pub yaw_deg: f64,
}

impl PoseSettings {
    /// Convert to a sensor pose.
    pub fn to_sensor_pose(&self) -> SensorPose {
        SensorPose::from_yaw(self.x, self.y, self.z, self.yaw_deg.to_radians())
    }
}
