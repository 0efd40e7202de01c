//! Runtime solver selection.
//!
//! The locator refines the closed-form estimate with one of the grid
//! minimizers, or not at all, depending on configuration. [`DynMinimizer`]
//! wraps the choice behind the [`Minimizer`] trait.
//!
//! # Solver Types
//!
//! - **WlsOnly**: keep the closed-form estimate (fastest, no refinement)
//! - **FastGrid**: multi-resolution search (recommended)
//! - **SlowGrid**: exhaustive search (reference quality, slow)

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::{ExhaustiveMinimizer, GridMinimum, GridWindow, Minimizer, MultiResolutionMinimizer};
use crate::algorithms::residual::CostSurface;
use crate::core::types::Point2D;
use crate::error::{Error, Result};

/// Available localization solver types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum SolverType {
    /// Closed-form weighted least squares only.
    ///
    /// Exact for noise-free bearings, biased toward near sensors under noise.
    WlsOnly,

    /// WLS seed refined by the multi-resolution grid search.
    #[default]
    FastGrid,

    /// WLS seed refined by the exhaustive grid search.
    ///
    /// Quadratic in `window/step`; meant for validation.
    SlowGrid,
}

impl std::fmt::Display for SolverType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverType::WlsOnly => write!(f, "WLS"),
            SolverType::FastGrid => write!(f, "Fast Grid"),
            SolverType::SlowGrid => write!(f, "Slow Grid"),
        }
    }
}

impl SolverType {
    /// Get a short description of this solver type.
    pub fn description(&self) -> &'static str {
        match self {
            SolverType::WlsOnly => "Closed-form bearing intersection only",
            SolverType::FastGrid => "WLS + multi-resolution grid (recommended)",
            SolverType::SlowGrid => "WLS + exhaustive grid",
        }
    }

    /// Returns all available solver types.
    pub fn all() -> &'static [SolverType] {
        &[SolverType::WlsOnly, SolverType::FastGrid, SolverType::SlowGrid]
    }

    /// True if this solver refines the seed with a grid search.
    pub fn refines(&self) -> bool {
        !matches!(self, SolverType::WlsOnly)
    }
}

/// Minimizer that keeps the seed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedMinimizer;

impl Minimizer for SeedMinimizer {
    fn minimize<S: CostSurface + ?Sized>(
        &self,
        surface: &S,
        seed: Point2D,
    ) -> Result<GridMinimum> {
        let cost = surface.cost(seed);
        if cost.is_nan() {
            return Err(Error::InvalidInput(format!(
                "cost surface is undefined at seed ({:.3}, {:.3})",
                seed.x, seed.y
            )));
        }
        Ok(GridMinimum {
            point: seed,
            cost,
            evaluations: 1,
        })
    }
}

/// Runtime-selectable minimizer.
#[derive(Debug, Clone)]
pub enum DynMinimizer {
    /// Keep the closed-form estimate.
    Seed(SeedMinimizer),
    /// Multi-resolution grid search.
    Fast(MultiResolutionMinimizer),
    /// Exhaustive grid search.
    Slow(ExhaustiveMinimizer),
}

impl DynMinimizer {
    /// Create a minimizer for `solver_type` over `window`.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] if a grid solver is selected and the window
    /// yields no grid level. The window is not checked for
    /// [`SolverType::WlsOnly`].
    pub fn new(solver_type: SolverType, window: GridWindow) -> Result<Self> {
        if solver_type.refines() {
            window.levels()?;
        }
        Ok(match solver_type {
            SolverType::WlsOnly => DynMinimizer::Seed(SeedMinimizer),
            SolverType::FastGrid => DynMinimizer::Fast(MultiResolutionMinimizer::new(window)),
            SolverType::SlowGrid => DynMinimizer::Slow(ExhaustiveMinimizer::new(window)),
        })
    }

    /// Get the solver type.
    pub fn solver_type(&self) -> SolverType {
        match self {
            DynMinimizer::Seed(_) => SolverType::WlsOnly,
            DynMinimizer::Fast(_) => SolverType::FastGrid,
            DynMinimizer::Slow(_) => SolverType::SlowGrid,
        }
    }
}

impl Minimizer for DynMinimizer {
    fn minimize<S: CostSurface + ?Sized>(
        &self,
        surface: &S,
        seed: Point2D,
    ) -> Result<GridMinimum> {
        match self {
            DynMinimizer::Seed(m) => m.minimize(surface, seed),
            DynMinimizer::Fast(m) => m.minimize(surface, seed),
            DynMinimizer::Slow(m) => m.minimize(surface, seed),
        }
    }
}
