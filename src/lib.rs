//! Dhvani - Bearing-only acoustic source localization
//!
//! Estimates the 2D position of a sound source from the direction-of-arrival
//! reports of several microphone arrays with known poses.
//!
//! # Architecture
//!
//! The crate is organized into 5 logical layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                 main.rs / config/                   │  ← CLI, TOML config
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                      io/                            │  ← Infrastructure
//! │            (pose/bearing sources, replay)           │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                    engine/                          │  ← Orchestration
//! │               (locator, tick runner)                │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                  algorithms/                        │  ← Core algorithms
//! │           (residual, wls, grid search)              │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                   sensors/                          │  ← Sensor processing
//! │              (bearing extraction)                   │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │                (types, math)                        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Pipeline
//!
//! Each tick:
//! 1. Pick every sensor's strongest detection and rotate it into the world
//!    frame by the sensor yaw
//! 2. Flag sensors whose strongest power exceeds the threshold
//! 3. With two or more flagged sensors, intersect their bearings in closed
//!    form (weighted least squares)
//! 4. With three or more, refine that estimate on the angular residual
//!    surface with a grid search
//!
//! # Example
//!
//! ```
//! use dhvani::{BearingReport, Detection, Locator, LocatorConfig, SensorPose, TickSnapshot};
//!
//! let locator = Locator::new(2, LocatorConfig::default()).unwrap();
//! let snapshot = TickSnapshot::new(
//!     vec![
//!         SensorPose::from_yaw(0.0, 0.0, 0.0, 0.0),
//!         SensorPose::from_yaw(10.0, 0.0, 0.0, 0.0),
//!     ],
//!     vec![
//!         BearingReport::from_detections(vec![Detection::new(45.0, 1.0)]),
//!         BearingReport::from_detections(vec![Detection::new(135.0, 1.0)]),
//!     ],
//! )
//! .unwrap();
//!
//! let solution = locator.locate(&snapshot).unwrap().solution.unwrap();
//! assert!((solution.point.x - 5.0).abs() < 1e-9);
//! assert!((solution.point.y - 5.0).abs() < 1e-9);
//! ```

// ============================================================================
// Layer 1: Core foundation (no internal deps)
// ============================================================================
pub mod core;
pub mod error;

// ============================================================================
// Layer 2: Sensor processing (depends on core)
// ============================================================================
pub mod sensors;

// ============================================================================
// Layer 3: Algorithms (depends on core)
// ============================================================================
pub mod algorithms;

// ============================================================================
// Layer 4: Engine (depends on core, sensors, algorithms)
// ============================================================================
pub mod engine;

// ============================================================================
// Layer 5: I/O infrastructure and configuration
// ============================================================================
pub mod config;
pub mod io;

// ============================================================================
// Convenience re-exports (flat namespace for common use)
// ============================================================================

pub use error::{Error, Result};

// Core types
pub use core::math;
pub use core::types::{BearingRay, BearingReport, Detection, DetectionMask, TickSnapshot};
pub use core::types::{Point2D, SensorPose};

// Sensors
pub use sensors::{BearingExtractor, BearingSet, absolute_bearing};

// Algorithms
pub use algorithms::residual::{AngularResidual, CostSurface, angular_residual};
pub use algorithms::search::{
    DynMinimizer, ExhaustiveMinimizer, GridMinimum, GridWindow, Minimizer,
    MultiResolutionMinimizer, SeedMinimizer, SolverType, minimize_fast, minimize_slow,
};
pub use algorithms::wls::{SensorWeights, WlsSolver, solve_wls};

// Engine
pub use engine::{Locator, LocatorConfig, LocatorOutput, Solution, TickRunner};

// I/O
pub use io::{BearingSource, PoseSource, ReplayBearings, StaticPoses};

// Configuration
pub use config::DhvaniConfig;
