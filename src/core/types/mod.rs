//! Core data types for bearing-only localization.
//!
//! Geometry:
//! - [`Point2D`]: 2D point in meters (solution space, z fixed at 0)
//! - [`SensorPose`]: 3D rigid transform of a microphone array
//!
//! Measurements:
//! - [`Detection`]: one (azimuth, power) candidate
//! - [`BearingReport`]: all candidates from one sensor for one tick
//! - [`DetectionMask`]: per-sensor power-threshold flags
//! - [`BearingRay`]: visualization segment along an absolute bearing
//!
//! Per-tick input:
//! - [`TickSnapshot`]: poses and reports for all sensor slots

mod bearing;
mod pose;
mod snapshot;

pub use bearing::{BearingRay, BearingReport, Detection, DetectionMask};
pub use pose::{Point2D, SensorPose};
pub use snapshot::TickSnapshot;
