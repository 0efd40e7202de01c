//! Point and sensor pose types.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A 2D point in meters (world frame, z implicitly 0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate in meters
    pub x: f64,
    /// Y coordinate in meters
    pub y: f64,
}

impl Point2D {
    /// Create a new point.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point (avoids sqrt).
    #[inline]
    pub fn distance_squared(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point2D) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Point reached by travelling `length` meters along `heading` radians.
    #[inline]
    pub fn advance(&self, heading: f64, length: f64) -> Point2D {
        let (sin_h, cos_h) = heading.sin_cos();
        Point2D::new(self.x + length * cos_h, self.y + length * sin_h)
    }

    /// True if both coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Point2D {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

/// Rigid 3D transform of one microphone array in the world frame.
///
/// Rotation is stored as a row-major 3x3 matrix. Only the heading about the
/// vertical axis matters for bearing extraction; roll and pitch are carried
/// so poses from an external tracker can be stored without loss.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorPose {
    /// Translation (x, y, z) in meters
    pub translation: [f64; 3],
    /// Row-major rotation matrix
    pub rotation: [[f64; 3]; 3],
}

impl SensorPose {
    /// Create a pose from translation and rotation matrix.
    #[inline]
    pub fn new(translation: [f64; 3], rotation: [[f64; 3]; 3]) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Identity pose at the world origin.
    #[inline]
    pub fn identity() -> Self {
        Self {
            translation: [0.0; 3],
            rotation: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Pose with a pure heading rotation about the vertical axis.
    pub fn from_yaw(x: f64, y: f64, z: f64, yaw: f64) -> Self {
        Self::from_euler([x, y, z], 0.0, 0.0, yaw)
    }

    /// Pose from roll/pitch/yaw (radians), applied as `Rz(yaw)·Ry(pitch)·Rx(roll)`.
    pub fn from_euler(translation: [f64; 3], roll: f64, pitch: f64, yaw: f64) -> Self {
        let (sr, cr) = roll.sin_cos();
        let (sp, cp) = pitch.sin_cos();
        let (sy, cy) = yaw.sin_cos();

        let rotation = [
            [cy * cp, cy * sp * sr - sy * cr, cy * sp * cr + sy * sr],
            [sy * cp, sy * sp * sr + cy * cr, sy * sp * cr - cy * sr],
            [-sp, cp * sr, cp * cr],
        ];

        Self {
            translation,
            rotation,
        }
    }

    /// Pose from a unit quaternion `(w, x, y, z)`, as delivered by pose trackers.
    ///
    /// The quaternion is normalized first; a zero or non-finite quaternion is
    /// rejected.
    pub fn from_quaternion(translation: [f64; 3], quaternion: [f64; 4]) -> Result<Self> {
        let norm = quaternion.iter().map(|q| q * q).sum::<f64>().sqrt();
        if !norm.is_finite() || norm < f64::EPSILON {
            return Err(Error::InvalidInput(format!(
                "quaternion {:?} cannot be normalized",
                quaternion
            )));
        }
        let [w, x, y, z] = quaternion.map(|q| q / norm);

        let rotation = [
            [
                1.0 - 2.0 * (y * y + z * z),
                2.0 * (x * y - w * z),
                2.0 * (x * z + w * y),
            ],
            [
                2.0 * (x * y + w * z),
                1.0 - 2.0 * (x * x + z * z),
                2.0 * (y * z - w * x),
            ],
            [
                2.0 * (x * z - w * y),
                2.0 * (y * z + w * x),
                1.0 - 2.0 * (x * x + y * y),
            ],
        ];

        Ok(Self {
            translation,
            rotation,
        })
    }

    /// Heading about the vertical axis: `atan2(R[1][0], R[0][0])`.
    #[inline]
    pub fn yaw(&self) -> f64 {
        self.rotation[1][0].atan2(self.rotation[0][0])
    }

    /// Sensor position projected onto the ground plane.
    #[inline]
    pub fn position(&self) -> Point2D {
        Point2D::new(self.translation[0], self.translation[1])
    }
}

impl Default for SensorPose {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn test_point2d_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert_relative_eq!(a.distance(&b), 5.0);
        assert_relative_eq!(a.distance_squared(&b), 25.0);
    }

    #[test]
    fn test_point2d_advance() {
        let p = Point2D::new(1.0, 1.0).advance(FRAC_PI_2, 2.0);
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_identity_yaw_is_zero() {
        let pose = SensorPose::identity();
        assert_relative_eq!(pose.yaw(), 0.0);
        assert_eq!(pose.position(), Point2D::new(0.0, 0.0));
    }

    #[test]
    fn test_from_yaw_roundtrip() {
        for yaw in [-3.0, -FRAC_PI_2, 0.0, 0.3, FRAC_PI_2, 3.0] {
            let pose = SensorPose::from_yaw(1.0, 2.0, 0.5, yaw);
            assert_relative_eq!(pose.yaw(), yaw, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_yaw_ignores_roll() {
        let pose = SensorPose::from_euler([0.0, 0.0, 1.0], 0.7, 0.0, FRAC_PI_4);
        assert_relative_eq!(pose.yaw(), FRAC_PI_4, epsilon = 1e-12);
    }

    #[test]
    fn test_yaw_ignores_moderate_pitch() {
        let pose = SensorPose::from_euler([0.0, 0.0, 1.0], 0.2, 0.4, -2.0);
        assert_relative_eq!(pose.yaw(), -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_from_quaternion_heading() {
        // Rotation of 90° about z
        let half = FRAC_PI_4;
        let q = [half.cos(), 0.0, 0.0, half.sin()];
        let pose = SensorPose::from_quaternion([2.0, 3.0, 0.0], q).unwrap();
        assert_relative_eq!(pose.yaw(), FRAC_PI_2, epsilon = 1e-12);
        assert_eq!(pose.position(), Point2D::new(2.0, 3.0));
    }

    #[test]
    fn test_from_quaternion_normalizes() {
        let q = [0.0, 0.0, 0.0, 4.0]; // 180° about z, unnormalized
        let pose = SensorPose::from_quaternion([0.0; 3], q).unwrap();
        assert_relative_eq!(pose.yaw().abs(), PI, epsilon = 1e-12);
    }

    #[test]
    fn test_from_quaternion_rejects_zero() {
        let result = SensorPose::from_quaternion([0.0; 3], [0.0; 4]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
