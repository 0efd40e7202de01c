//! Per-tick source localization pipeline.
//!
//! Combines bearing extraction, the closed-form intersection and the grid
//! refinement into one pure function of a [`TickSnapshot`].

use serde::{Deserialize, Serialize};

use crate::algorithms::residual::AngularResidual;
use crate::algorithms::search::{
    DynMinimizer, GridMinimum, GridWindow, Minimizer, SeedMinimizer, SolverType,
};
use crate::algorithms::wls::{MIN_SENSORS, SensorWeights, WlsSolver};
use crate::core::types::{BearingRay, Point2D, TickSnapshot};
use crate::error::{Error, Result};
use crate::sensors::{BearingExtractor, BearingSet};

/// Configuration for the locator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatorConfig {
    /// Power a strongest detection must exceed to count as detected.
    pub power_threshold: f64,

    /// Refinement applied to the closed-form estimate.
    pub solver: SolverType,

    /// Grid window used by the refining solvers.
    pub window: GridWindow,

    /// Length of the visualization rays (meters).
    pub ray_length: f64,

    /// Weighting of the closed-form intersection.
    pub weights: SensorWeights,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            power_threshold: 0.0,
            solver: SolverType::FastGrid,
            window: GridWindow::default(),
            ray_length: 20.0,
            weights: SensorWeights::Uniform,
        }
    }
}

/// Source position estimate for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Estimated source position (z = 0).
    pub point: Point2D,

    /// Closed-form estimate the refinement was seeded at.
    pub wls_estimate: Point2D,

    /// Solver that produced `point`.
    ///
    /// [`SolverType::WlsOnly`] whenever exactly two sensors detect, whatever
    /// the configured solver.
    pub solver: SolverType,

    /// Number of detecting sensors.
    pub detected: usize,

    /// Angular residual at `point` over every sensor with a bearing.
    pub cost: f64,

    /// Residual evaluations spent on refinement.
    pub evaluations: usize,
}

/// Everything computed during one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatorOutput {
    /// Position estimate; `None` if fewer than two sensors detect.
    pub solution: Option<Solution>,

    /// Absolute bearings and detection flags per sensor slot.
    pub bearings: BearingSet,

    /// One ray per sensor with a bearing.
    pub rays: Vec<BearingRay>,
}

/// Bearing-only source locator for a fixed number of sensors.
#[derive(Debug, Clone)]
pub struct Locator {
    config: LocatorConfig,
    sensor_count: usize,
    extractor: BearingExtractor,
    wls: WlsSolver,
    minimizer: DynMinimizer,
}

impl Locator {
    /// Create a locator for `sensor_count` sensor slots.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] if there are no sensors, the threshold is NaN,
    /// the ray length is not positive, per-sensor weights do not cover every
    /// slot, or a grid solver is selected with an unusable window.
    pub fn new(sensor_count: usize, config: LocatorConfig) -> Result<Self> {
        if sensor_count == 0 {
            return Err(Error::Configuration(
                "at least one sensor must be configured".to_string(),
            ));
        }
        if config.power_threshold.is_nan() {
            return Err(Error::Configuration(
                "power threshold must be a number".to_string(),
            ));
        }
        if !config.ray_length.is_finite() || config.ray_length <= 0.0 {
            return Err(Error::Configuration(format!(
                "ray length must be positive and finite, got {}",
                config.ray_length
            )));
        }
        if let SensorWeights::PerSensor(weights) = &config.weights {
            if weights.len() != sensor_count {
                return Err(Error::Configuration(format!(
                    "{} sensor weights configured for {} sensors",
                    weights.len(),
                    sensor_count
                )));
            }
            if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w <= 0.0) {
                return Err(Error::Configuration(format!(
                    "sensor weight {} must be positive and finite",
                    w
                )));
            }
        }

        let minimizer = DynMinimizer::new(config.solver, config.window)?;

        log::info!(
            "Locator: {} sensors, solver={} ({}), window={} m, step={} m, threshold={}",
            sensor_count,
            config.solver,
            config.solver.description(),
            config.window.window_size(),
            config.window.step_size(),
            config.power_threshold
        );

        Ok(Self {
            extractor: BearingExtractor::new(config.power_threshold),
            wls: WlsSolver::new(config.weights.clone()),
            minimizer,
            sensor_count,
            config,
        })
    }

    /// Number of sensor slots.
    #[inline]
    pub fn sensor_count(&self) -> usize {
        self.sensor_count
    }

    /// Configuration in use.
    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Run the full pipeline on one snapshot.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if the snapshot does not hold exactly one
    ///   pose and report per sensor slot
    /// - [`Error::DegenerateGeometry`] if the detecting bearings are parallel
    ///
    /// Fewer than two detecting sensors is not an error: the output carries
    /// no solution.
    pub fn locate(&self, snapshot: &TickSnapshot) -> Result<LocatorOutput> {
        if snapshot.len() != self.sensor_count {
            return Err(Error::InvalidInput(format!(
                "snapshot has {} sensor slots, expected {}",
                snapshot.len(),
                self.sensor_count
            )));
        }

        let bearings = self.extractor.extract(snapshot);
        let poses = snapshot.poses();

        let rays = bearings
            .bearings
            .iter()
            .zip(poses)
            .enumerate()
            .filter_map(|(i, (bearing, pose))| {
                bearing.map(|b| BearingRay::new(i, pose.position(), b, self.config.ray_length))
            })
            .collect();

        let detected = bearings.mask.count();
        if detected < MIN_SENSORS {
            log::debug!(
                "{} of {} sensors detected, no solution this tick",
                detected,
                self.sensor_count
            );
            return Ok(LocatorOutput {
                solution: None,
                bearings,
                rays,
            });
        }

        let wls_estimate = self.wls.solve(poses, &bearings.bearings, &bearings.mask)?;
        let surface = AngularResidual::new(poses, &bearings.bearings);

        // With exactly two detections the intersection is used as is
        let (refined, solver) = if detected > MIN_SENSORS {
            (
                self.minimizer.minimize(&surface, wls_estimate)?,
                self.minimizer.solver_type(),
            )
        } else {
            (
                SeedMinimizer.minimize(&surface, wls_estimate)?,
                SolverType::WlsOnly,
            )
        };
        let GridMinimum {
            point,
            cost,
            evaluations,
        } = refined;

        log::debug!(
            "{} detected, WLS ({:.3}, {:.3}) -> {} ({:.3}, {:.3}) cost={:.6} evals={}",
            detected,
            wls_estimate.x,
            wls_estimate.y,
            solver,
            point.x,
            point.y,
            cost,
            evaluations
        );

        Ok(LocatorOutput {
            solution: Some(Solution {
                point,
                wls_estimate,
                solver,
                detected,
                cost,
                evaluations,
            }),
            bearings,
            rays,
        })
    }
}
