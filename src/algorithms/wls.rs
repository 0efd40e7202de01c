//! Closed-form weighted least-squares bearing intersection.
//!
//! Each detecting sensor i defines a line through its position `tᵢ` along the
//! unit bearing `kᵢ = (cos θᵢ, sin θᵢ)`. The point minimizing the weighted sum
//! of squared perpendicular distances to those lines solves
//!
//! ```text
//! (Σ wᵢ·I − Σ wᵢ·kᵢkᵢᵀ) · p = Σ wᵢ·(I − kᵢkᵢᵀ)·tᵢ
//! ```
//!
//! The 2x2 system is solved directly. For two sensors its determinant is
//! `w₁w₂·sin²(θ₁ − θ₂)`, so parallel bearings make it singular.

use serde::{Deserialize, Serialize};

use crate::core::types::{DetectionMask, Point2D, SensorPose};
use crate::error::{Error, Result};

/// Determinant below this fraction of trace² is treated as singular.
const MIN_RELATIVE_DETERMINANT: f64 = 1e-9;

/// Minimum number of detecting sensors for a bearing intersection.
pub const MIN_SENSORS: usize = 2;

/// Per-sensor weighting of the normal equations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorWeights {
    /// Every detecting sensor weighs 1
    #[default]
    Uniform,
    /// Explicit weight per sensor slot (indexed like the poses)
    PerSensor(Vec<f64>),
}

impl SensorWeights {
    fn weight(&self, index: usize) -> Result<f64> {
        match self {
            SensorWeights::Uniform => Ok(1.0),
            SensorWeights::PerSensor(weights) => {
                let w = weights.get(index).copied().ok_or_else(|| {
                    Error::InvalidInput(format!("no weight configured for sensor {}", index))
                })?;
                if !w.is_finite() || w <= 0.0 {
                    return Err(Error::InvalidInput(format!(
                        "weight {} for sensor {} must be positive and finite",
                        w, index
                    )));
                }
                Ok(w)
            }
        }
    }
}

/// Weighted least-squares bearing intersection solver.
#[derive(Debug, Clone, Default)]
pub struct WlsSolver {
    weights: SensorWeights,
}

impl WlsSolver {
    /// Create a solver with the given weighting.
    pub fn new(weights: SensorWeights) -> Self {
        Self { weights }
    }

    /// Weighting in use.
    pub fn weights(&self) -> &SensorWeights {
        &self.weights
    }

    /// Intersect the bearings of all sensors flagged in `mask`.
    ///
    /// `poses`, `bearings` and `mask` are indexed by sensor slot.
    ///
    /// # Errors
    ///
    /// - [`Error::InsufficientInputs`] if fewer than two sensors are flagged
    /// - [`Error::InvalidInput`] if a flagged sensor has no pose, or no finite
    ///   bearing
    /// - [`Error::DegenerateGeometry`] if the flagged bearings are parallel
    pub fn solve(
        &self,
        poses: &[SensorPose],
        bearings: &[Option<f64>],
        mask: &DetectionMask,
    ) -> Result<Point2D> {
        let detected = mask.count();
        if detected < MIN_SENSORS {
            return Err(Error::InsufficientInputs {
                detected,
                required: MIN_SENSORS,
            });
        }

        // Normal matrix [[a00, a01], [a01, a11]] and right-hand side [b0, b1]
        let mut a00 = 0.0;
        let mut a01 = 0.0;
        let mut a11 = 0.0;
        let mut b0 = 0.0;
        let mut b1 = 0.0;

        for i in mask.detected_indices() {
            let pose = poses
                .get(i)
                .ok_or_else(|| Error::InvalidInput(format!("no pose for sensor {}", i)))?;
            let theta = bearings.get(i).copied().flatten().ok_or_else(|| {
                Error::InvalidInput(format!("sensor {} is detected but has no bearing", i))
            })?;
            if !theta.is_finite() {
                return Err(Error::InvalidInput(format!(
                    "sensor {} has a non-finite bearing {}",
                    i, theta
                )));
            }
            let w = self.weights.weight(i)?;

            let (ky, kx) = theta.sin_cos();
            let t = pose.position();

            // w·(I − k·kᵀ)
            let p00 = w * (1.0 - kx * kx);
            let p01 = -w * kx * ky;
            let p11 = w * (1.0 - ky * ky);

            a00 += p00;
            a01 += p01;
            a11 += p11;
            b0 += p00 * t.x + p01 * t.y;
            b1 += p01 * t.x + p11 * t.y;
        }

        let det = a00 * a11 - a01 * a01;
        let trace = a00 + a11;
        if !det.is_finite() || det.abs() <= MIN_RELATIVE_DETERMINANT * trace * trace {
            log::warn!(
                "WLS normal matrix singular (det={:.3e}, {} sensors): bearings are parallel",
                det,
                detected
            );
            return Err(Error::DegenerateGeometry(format!(
                "bearings of {} detecting sensors do not intersect (det={:.3e})",
                detected, det
            )));
        }

        // Cramer's rule for the symmetric 2x2 system
        let x = (b0 * a11 - a01 * b1) / det;
        let y = (a00 * b1 - a01 * b0) / det;

        Ok(Point2D::new(x, y))
    }
}

/// Uniformly weighted bearing intersection (contract form).
///
/// See [`WlsSolver::solve`].
pub fn solve_wls(
    poses: &[SensorPose],
    bearings: &[Option<f64>],
    mask: &DetectionMask,
) -> Result<Point2D> {
    WlsSolver::default().solve(poses, bearings, mask)
}
