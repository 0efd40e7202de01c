//! Grid minimizers for the angular residual surface.
//!
//! Provides square-window searches seeded at the closed-form estimate.
//!
//! # Algorithms
//!
//! - [`ExhaustiveMinimizer`]: evaluates every lattice point; reference result
//! - [`MultiResolutionMinimizer`]: coordinate-wise power-of-two probing;
//!   approximates the exhaustive result with far fewer evaluations
//! - [`SeedMinimizer`]: returns the seed unchanged (closed-form only)
//!
//! [`DynMinimizer`] selects one of them at runtime from a [`SolverType`].
//!
//! # Example
//!
//! ```
//! use dhvani::algorithms::search::{ExhaustiveMinimizer, GridWindow, Minimizer};
//! use dhvani::core::types::Point2D;
//!
//! let bowl = |p: Point2D| (p.x - 0.3).powi(2) + (p.y + 0.2).powi(2);
//! let minimizer = ExhaustiveMinimizer::new(GridWindow::new(2.0, 0.1).unwrap());
//! let best = minimizer.minimize(&bowl, Point2D::new(0.0, 0.0)).unwrap();
//! assert!((best.point.x - 0.3).abs() < 1e-9);
//! assert!((best.point.y + 0.2).abs() < 1e-9);
//! ```

mod dynamic;
mod exhaustive;
mod multi_resolution;

pub use dynamic::{DynMinimizer, SeedMinimizer, SolverType};
pub use exhaustive::{ExhaustiveMinimizer, minimize_slow};
pub use multi_resolution::{MultiResolutionMinimizer, minimize_fast};

use serde::{Deserialize, Serialize};

use super::residual::CostSurface;
use crate::core::types::Point2D;
use crate::error::{Error, Result};

/// Largest supported number of power-of-two levels per axis.
pub const MAX_GRID_LEVELS: u32 = 30;

/// Slack absorbing representation error in `window_size / step_size`.
const RATIO_SLACK: f64 = 1e-9;

/// Square search window centered on the seed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridWindow {
    /// Side length of the square window (meters)
    window_size: f64,
    /// Lattice spacing along both axes (meters)
    step_size: f64,
}

impl GridWindow {
    /// Create a validated window.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] if either size is non-positive or non-finite,
    /// or if the window spans fewer than two steps (no grid level).
    pub fn new(window_size: f64, step_size: f64) -> Result<Self> {
        let window = Self {
            window_size,
            step_size,
        };
        window.levels()?;
        Ok(window)
    }

    /// Side length of the window.
    #[inline]
    pub fn window_size(&self) -> f64 {
        self.window_size
    }

    /// Lattice spacing.
    #[inline]
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Whole steps spanned by the window: `⌊window_size / step_size⌋`.
    pub fn intervals(&self) -> Result<u64> {
        if !self.window_size.is_finite() || self.window_size <= 0.0 {
            return Err(Error::Configuration(format!(
                "grid window size must be positive and finite, got {}",
                self.window_size
            )));
        }
        if !self.step_size.is_finite() || self.step_size <= 0.0 {
            return Err(Error::Configuration(format!(
                "grid step size must be positive and finite, got {}",
                self.step_size
            )));
        }
        let ratio = self.window_size / self.step_size + RATIO_SLACK;
        if !ratio.is_finite() || ratio >= (1u64 << MAX_GRID_LEVELS) as f64 {
            return Err(Error::Configuration(format!(
                "grid window {} with step {} exceeds {} levels",
                self.window_size, self.step_size, MAX_GRID_LEVELS
            )));
        }
        Ok(ratio.floor() as u64)
    }

    /// Power-of-two levels per axis: `⌈log₂(intervals)⌉`.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] if the result is not a positive level count.
    pub fn levels(&self) -> Result<u32> {
        let intervals = self.intervals()?;
        if intervals < 2 {
            return Err(Error::Configuration(format!(
                "grid window {} with step {} yields no grid level",
                self.window_size, self.step_size
            )));
        }
        // ceil(log2(n)) for n >= 2
        Ok(u64::BITS - (intervals - 1).leading_zeros())
    }
}

impl Default for GridWindow {
    /// 10 m window at 1 cm resolution.
    fn default() -> Self {
        Self {
            window_size: 10.0,
            step_size: 0.01,
        }
    }
}

/// Best lattice point found by a minimizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridMinimum {
    /// Minimizing point
    pub point: Point2D,
    /// Cost at `point`
    pub cost: f64,
    /// Number of cost evaluations spent
    pub evaluations: usize,
}

/// Trait for cost-surface minimizers seeded at an initial estimate.
pub trait Minimizer {
    /// Search around `seed` for the point of lowest cost.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if no finite cost was found in the window.
    fn minimize<S: CostSurface + ?Sized>(&self, surface: &S, seed: Point2D)
    -> Result<GridMinimum>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_reference_window() {
        // 2 m at 1 cm: 200 intervals -> 2^8 = 256
        assert_eq!(GridWindow::new(2.0, 0.01).unwrap().levels().unwrap(), 8);
        // Default window: 10 m at 1 cm -> 1000 intervals -> 2^10
        assert_eq!(GridWindow::new(10.0, 0.01).unwrap().levels().unwrap(), 10);
    }

    #[test]
    fn test_levels_powers_of_two() {
        assert_eq!(GridWindow::new(2.0, 1.0).unwrap().levels().unwrap(), 1);
        assert_eq!(GridWindow::new(4.0, 1.0).unwrap().levels().unwrap(), 2);
        assert_eq!(GridWindow::new(5.0, 1.0).unwrap().levels().unwrap(), 3);
        assert_eq!(GridWindow::new(8.0, 1.0).unwrap().levels().unwrap(), 3);
    }

    #[test]
    fn test_intervals_truncate() {
        let window = GridWindow::new(1.3, 0.07).unwrap();
        assert_eq!(window.intervals().unwrap(), 18);
        assert_eq!(window.levels().unwrap(), 5);
    }

    #[test]
    fn test_rejects_single_interval() {
        assert!(matches!(
            GridWindow::new(1.0, 1.0),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            GridWindow::new(0.5, 1.0),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_rejects_non_positive_or_non_finite() {
        for (w, s) in [
            (0.0, 0.01),
            (-1.0, 0.01),
            (2.0, 0.0),
            (2.0, -0.1),
            (f64::NAN, 0.01),
            (2.0, f64::INFINITY),
            (f64::INFINITY, 0.01),
        ] {
            assert!(
                matches!(GridWindow::new(w, s), Err(Error::Configuration(_))),
                "window={} step={} should be rejected",
                w,
                s
            );
        }
    }

    #[test]
    fn test_rejects_too_many_levels() {
        assert!(matches!(
            GridWindow::new(1e9, 1e-9),
            Err(Error::Configuration(_))
        ));
    }
}
