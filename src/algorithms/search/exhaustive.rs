//! Exhaustive grid minimizer.
//!
//! Evaluates the cost at every lattice point of a square window centered on
//! the seed and keeps the lowest. `O((window/step)²)` evaluations; this is the
//! reference the multi-resolution search is validated against.
//!
//! # Algorithm
//!
//! 1. Lattice coordinates `seed ± window/2` in `step` increments per axis
//! 2. Scan x-major, y-minor
//! 3. Keep the first point with strictly lower cost (first found wins ties)

use super::{GridMinimum, GridWindow, Minimizer};
use crate::algorithms::residual::CostSurface;
use crate::core::types::Point2D;
use crate::error::{Error, Result};

/// Brute-force square-window minimizer.
#[derive(Debug, Clone)]
pub struct ExhaustiveMinimizer {
    window: GridWindow,
}

impl ExhaustiveMinimizer {
    /// Create a new exhaustive minimizer.
    pub fn new(window: GridWindow) -> Self {
        Self { window }
    }

    /// Search window.
    pub fn window(&self) -> &GridWindow {
        &self.window
    }
}

impl Minimizer for ExhaustiveMinimizer {
    fn minimize<S: CostSurface + ?Sized>(
        &self,
        surface: &S,
        seed: Point2D,
    ) -> Result<GridMinimum> {
        let intervals = self.window.intervals()?;
        let step = self.window.step_size();
        let x0 = seed.x - self.window.window_size() / 2.0;
        let y0 = seed.y - self.window.window_size() / 2.0;

        let mut best: Option<(Point2D, f64)> = None;
        let mut evaluations = 0usize;

        // Index-based lattice avoids accumulating step error along the axis
        for i in 0..=intervals {
            let x = x0 + i as f64 * step;
            for j in 0..=intervals {
                let point = Point2D::new(x, y0 + j as f64 * step);
                let cost = surface.cost(point);
                evaluations += 1;

                if best.is_none_or(|(_, best_cost)| cost < best_cost) && cost.is_finite() {
                    best = Some((point, cost));
                }
            }
        }

        let (point, cost) = best.ok_or_else(|| {
            Error::InvalidInput(format!(
                "cost surface has no finite value within {} m of ({:.3}, {:.3})",
                self.window.window_size() / 2.0,
                seed.x,
                seed.y
            ))
        })?;

        log::trace!(
            "Exhaustive search: ({:.3}, {:.3}) cost={:.6} after {} evaluations",
            point.x,
            point.y,
            cost,
            evaluations
        );

        Ok(GridMinimum {
            point,
            cost,
            evaluations,
        })
    }
}

/// Exhaustive minimization (contract form).
pub fn minimize_slow<S: CostSurface + ?Sized>(
    surface: &S,
    seed: Point2D,
    window_size: f64,
    step_size: f64,
) -> Result<GridMinimum> {
    ExhaustiveMinimizer::new(GridWindow::new(window_size, step_size)?).minimize(surface, seed)
}
