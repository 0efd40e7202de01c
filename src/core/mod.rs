//! Core foundation layer.
//!
//! This is the bottom layer of the localization stack with no internal
//! dependencies besides the error type. All other layers depend on core.
//!
//! # Contents
//!
//! - [`types`]: Core data types (points, sensor poses, bearing reports)
//! - [`math`]: Angle normalization and heading helpers

pub mod math;
pub mod types;
