//! Sensor processing layer.
//!
//! Converts raw direction-of-arrival reports from microphone arrays into
//! world-frame bearings.
//!
//! # Contents
//!
//! - [`extractor`]: strongest-detection selection, yaw rotation, power masking

pub mod extractor;

pub use extractor::{BearingExtractor, BearingSet, absolute_bearing};
