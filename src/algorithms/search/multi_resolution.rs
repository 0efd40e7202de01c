//! Multi-resolution grid minimizer.
//!
//! Approximates the exhaustive search with a coordinate-wise probe that
//! halves its stride each level, in the spirit of a coarse-to-fine pyramid.
//!
//! # Lattice
//!
//! With `L = ⌈log₂(⌊window/step⌋)⌉` levels, each axis is indexed `0..=2^L`
//! and index `i` maps to `seed + (i − 2^(L−1))·step`. The lattice is rounded
//! up to a power of two, so the probe can travel past the configured window
//! when `window/step` is not one.
//!
//! # Algorithm
//!
//! Axes are searched recursively: the x-probe at each index runs a full
//! y-search, and the y-search scores lattice points directly.
//!
//! 1. Start the probe at the center index with stride `2^(L−1)`
//! 2. Score the probe. If it fell below the best so far on an inner level,
//!    step half a stride back toward the best index
//! 3. Otherwise walk backwards over a plateau of equal scores, then either
//!    jump back down the levels (the slope rises behind the probe) or step
//!    half a stride forward
//! 4. At the upper edge, also score the last index `2^L`
//!
//! Among equal best scores the lowest index on the current axis wins.
//! Ties between the two minimizers are not guaranteed: on non-convex
//! surfaces the probe can settle in a neighboring basin.

use super::{GridMinimum, GridWindow, Minimizer};
use crate::algorithms::residual::CostSurface;
use crate::core::types::Point2D;
use crate::error::{Error, Result};

/// Number of searched axes.
const AXES: usize = 2;

/// Coarse-to-fine square-window minimizer.
#[derive(Debug, Clone)]
pub struct MultiResolutionMinimizer {
    window: GridWindow,
}

impl MultiResolutionMinimizer {
    /// Create a new multi-resolution minimizer.
    pub fn new(window: GridWindow) -> Self {
        Self { window }
    }

    /// Search window.
    pub fn window(&self) -> &GridWindow {
        &self.window
    }
}

impl Minimizer for MultiResolutionMinimizer {
    fn minimize<S: CostSurface + ?Sized>(
        &self,
        surface: &S,
        seed: Point2D,
    ) -> Result<GridMinimum> {
        let levels = self.window.levels()?;
        let mut search = AxisSearch {
            surface,
            seed,
            step: self.window.step_size(),
            levels: i64::from(levels),
            evaluations: 0,
        };

        let best = search.search(0, [0; AXES]);
        if !best.score.is_finite() {
            return Err(Error::InvalidInput(format!(
                "cost surface has no finite value near ({:.3}, {:.3})",
                seed.x, seed.y
            )));
        }

        // The axis trackers keep scores, not costs; re-score the winner
        let point = search.point(best.indices);
        let cost = surface.cost(point);
        let evaluations = search.evaluations + 1;

        log::trace!(
            "Multi-resolution search: ({:.3}, {:.3}) cost={:.6} after {} evaluations ({} levels)",
            point.x,
            point.y,
            cost,
            evaluations,
            levels
        );

        Ok(GridMinimum {
            point,
            cost,
            evaluations,
        })
    }
}

/// Multi-resolution minimization (contract form).
pub fn minimize_fast<S: CostSurface + ?Sized>(
    surface: &S,
    seed: Point2D,
    window_size: f64,
    step_size: f64,
) -> Result<GridMinimum> {
    MultiResolutionMinimizer::new(GridWindow::new(window_size, step_size)?).minimize(surface, seed)
}

/// Best lattice indices found along an axis, with their score (negated cost).
#[derive(Debug, Clone, Copy)]
struct AxisBest {
    indices: [i64; AXES],
    score: f64,
}

/// Running best for one axis.
struct AxisTracker {
    axis: usize,
    best: AxisBest,
    /// Lowest index on `axis` that reached the best score
    leftmost: Option<i64>,
}

impl AxisTracker {
    fn new(axis: usize, indices: [i64; AXES]) -> Self {
        Self {
            axis,
            best: AxisBest {
                indices,
                score: f64::NEG_INFINITY,
            },
            leftmost: None,
        }
    }

    fn offer(&mut self, candidate: AxisBest) {
        let index = candidate.indices[self.axis];
        if candidate.score > self.best.score {
            self.best = candidate;
            self.leftmost = Some(index);
        } else if candidate.score == self.best.score && self.leftmost.is_some_and(|l| index < l) {
            self.leftmost = Some(index);
        }
    }

    fn finish(mut self) -> AxisBest {
        if let Some(leftmost) = self.leftmost {
            self.best.indices[self.axis] = leftmost;
        }
        self.best
    }
}

/// Recursive per-axis probe over a shared cost surface.
struct AxisSearch<'a, S: ?Sized> {
    surface: &'a S,
    seed: Point2D,
    step: f64,
    levels: i64,
    evaluations: usize,
}

impl<S: CostSurface + ?Sized> AxisSearch<'_, S> {
    fn point(&self, indices: [i64; AXES]) -> Point2D {
        let center = 1i64 << (self.levels - 1);
        Point2D::new(
            self.seed.x + (indices[0] - center) as f64 * self.step,
            self.seed.y + (indices[1] - center) as f64 * self.step,
        )
    }

    fn search(&mut self, axis: usize, mut indices: [i64; AXES]) -> AxisBest {
        if axis == AXES {
            self.evaluations += 1;
            return AxisBest {
                indices,
                score: -self.surface.cost(self.point(indices)),
            };
        }

        let levels = self.levels;
        let last = (1i64 << levels) - 1;
        let mut tracker = AxisTracker::new(axis, indices);
        let mut probe = 1i64 << (levels - 1);
        let mut level = levels - 1;

        while level >= 0 {
            indices[axis] = probe;
            let forward = self.search(axis + 1, indices);
            tracker.offer(forward);

            if level > 0 {
                if level < levels - 1 && forward.score < tracker.best.score {
                    // Overshot: fall back toward the best index
                    if probe < tracker.best.indices[axis] {
                        probe += half_stride(level);
                    } else {
                        probe -= half_stride(level);
                    }
                } else {
                    // Walk back across a plateau of equal scores
                    let mut back_index = probe;
                    let mut backward = forward;
                    while probe - back_index < (1i64 << level) - 1
                        && backward.score == forward.score
                    {
                        back_index -= 1;
                        indices[axis] = back_index;
                        backward = self.search(axis + 1, indices);
                    }
                    tracker.offer(backward);

                    if backward.score > forward.score {
                        // Rising behind the probe: descend levels until it
                        // sits at or before the plateau start
                        probe -= half_stride(level);
                        while probe > back_index {
                            level -= 1;
                            probe -= half_stride(level);
                        }
                    } else if probe == last {
                        probe += 1;
                        indices[axis] = probe;
                        let edge = self.search(axis + 1, indices);
                        tracker.offer(edge);
                    } else {
                        probe += half_stride(level);
                    }
                }
            }
            level -= 1;
        }

        tracker.finish()
    }
}

/// Half the probe stride at `level`; never less than one index.
#[inline]
fn half_stride(level: i64) -> i64 {
    if level >= 1 { 1i64 << (level - 1) } else { 1 }
}
