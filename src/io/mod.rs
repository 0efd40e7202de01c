//! I/O infrastructure layer.
//!
//! # Contents
//!
//! - [`sources`]: Pose and bearing source traits, static poses, replayed bearings
//! - [`replay`]: Recorded azimuth file reader

pub mod replay;
pub mod sources;

pub use replay::{load_angles, parse_angles};
pub use sources::{BearingSource, PoseSource, ReplayBearings, StaticPoses};
