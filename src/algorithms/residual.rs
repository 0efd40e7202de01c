//! Angular residual cost surface.
//!
//! For a candidate source position `p`, each sensor contributes the squared
//! wrapped difference between the heading from the sensor to `p` and the
//! bearing the sensor observed:
//!
//! ```text
//! cost(p) = Σᵢ wrap(atan2(p.y - sᵢ.y, p.x - sᵢ.x) - θᵢ)²
//! ```
//!
//! The surface is non-convex. It has a single basin for well-spread sensors
//! but can grow secondary minima when bearings are near-collinear with the
//! candidate or azimuth noise is large.

use crate::core::math::{angle_diff, heading};
use crate::core::types::{Point2D, SensorPose};

/// A scalar cost over the plane, minimized by the grid searches.
pub trait CostSurface {
    /// Cost at `point`. Lower is better.
    fn cost(&self, point: Point2D) -> f64;
}

impl<F> CostSurface for F
where
    F: Fn(Point2D) -> f64,
{
    #[inline]
    fn cost(&self, point: Point2D) -> f64 {
        self(point)
    }
}

/// Sum of squared angular residuals over every sensor that has a bearing.
///
/// The detection mask is deliberately not applied: weak sensors still shape
/// the refinement surface.
#[derive(Debug, Clone, Default)]
pub struct AngularResidual {
    /// (sensor position, absolute bearing) pairs
    observers: Vec<(Point2D, f64)>,
}

impl AngularResidual {
    /// Build the surface from per-slot poses and bearings.
    ///
    /// Slots without a bearing (empty reports) are skipped.
    pub fn new(poses: &[SensorPose], bearings: &[Option<f64>]) -> Self {
        let observers = poses
            .iter()
            .zip(bearings)
            .filter_map(|(pose, bearing)| bearing.map(|b| (pose.position(), b)))
            .collect();
        Self { observers }
    }

    /// Build the surface from explicit sensor positions and bearings.
    pub fn from_observers(observers: Vec<(Point2D, f64)>) -> Self {
        Self { observers }
    }

    /// Number of contributing sensors.
    #[inline]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// True if no sensor contributes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Evaluate the residual at `point`.
    pub fn evaluate(&self, point: Point2D) -> f64 {
        self.observers
            .iter()
            .map(|(origin, bearing)| {
                let implied = heading(origin.x, origin.y, point.x, point.y);
                let r = angle_diff(*bearing, implied);
                r * r
            })
            .sum()
    }
}

impl CostSurface for AngularResidual {
    #[inline]
    fn cost(&self, point: Point2D) -> f64 {
        self.evaluate(point)
    }
}

/// Angular residual at `point` for all sensors (contract form).
///
/// `poses` and `bearings` are paired by index.
pub fn angular_residual(point: Point2D, poses: &[SensorPose], bearings: &[f64]) -> f64 {
    poses
        .iter()
        .zip(bearings)
        .map(|(pose, &bearing)| {
            let origin = pose.position();
            let r = angle_diff(bearing, heading(origin.x, origin.y, point.x, point.y));
            r * r
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_4, PI, TAU};

    fn poses_at(points: &[(f64, f64)]) -> Vec<SensorPose> {
        points
            .iter()
            .map(|&(x, y)| SensorPose::from_yaw(x, y, 0.0, 0.0))
            .collect()
    }

    #[test]
    fn test_zero_at_true_source() {
        let poses = poses_at(&[(0.0, 0.0), (10.0, 0.0)]);
        let bearings = [FRAC_PI_4, 3.0 * FRAC_PI_4];
        assert_relative_eq!(
            angular_residual(Point2D::new(5.0, 5.0), &poses, &bearings),
            0.0,
            epsilon = 1e-24
        );
    }

    #[test]
    fn test_positive_away_from_source() {
        let poses = poses_at(&[(0.0, 0.0), (10.0, 0.0)]);
        let bearings = [FRAC_PI_4, 3.0 * FRAC_PI_4];
        assert!(angular_residual(Point2D::new(4.0, 6.0), &poses, &bearings) > 0.0);
    }

    #[test]
    fn test_residual_wraps_across_pi() {
        // Observed bearing just below +π, implied just above -π: tiny residual
        let poses = poses_at(&[(0.0, 0.0)]);
        let bearings = [PI - 0.01];
        let cost = angular_residual(Point2D::new(-1.0, -0.01), &poses, &bearings);
        assert!(cost < 1e-3, "cost = {}", cost);
    }

    #[test]
    fn test_residual_invariant_to_full_turns() {
        let poses = poses_at(&[(0.0, 0.0), (4.0, 1.0), (2.0, 5.0)]);
        let bearings = [0.3, 2.0, -1.9];
        let shifted = [0.3 + TAU, 2.0 - 2.0 * TAU, -1.9 + 3.0 * TAU];
        let p = Point2D::new(1.5, 2.5);
        assert_relative_eq!(
            angular_residual(p, &poses, &bearings),
            angular_residual(p, &poses, &shifted),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_surface_skips_missing_bearings() {
        let poses = poses_at(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]);
        let surface = AngularResidual::new(&poses, &[Some(FRAC_PI_4), None, Some(-FRAC_PI_4)]);
        assert_eq!(surface.len(), 2);

        let expected = angular_residual(
            Point2D::new(3.0, 2.0),
            &[poses[0], poses[2]],
            &[FRAC_PI_4, -FRAC_PI_4],
        );
        assert_relative_eq!(surface.evaluate(Point2D::new(3.0, 2.0)), expected);
    }

    #[test]
    fn test_empty_surface_is_flat() {
        let surface = AngularResidual::default();
        assert!(surface.is_empty());
        assert_eq!(surface.cost(Point2D::new(1.0, 1.0)), 0.0);
    }

    #[test]
    fn test_closure_cost_surface() {
        let bowl = |p: Point2D| p.x * p.x + p.y * p.y;
        assert_eq!(bowl.cost(Point2D::new(1.0, 2.0)), 5.0);
    }
}
