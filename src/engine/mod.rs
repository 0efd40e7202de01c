//! Localization orchestration layer.
//!
//! # Contents
//!
//! - [`locator`]: Per-tick pipeline (extraction, WLS, grid refinement)
//! - [`runner`]: Source-driven tick driver with in-place buffers

pub mod locator;
pub mod runner;

pub use locator::{Locator, LocatorConfig, LocatorOutput, Solution};
pub use runner::TickRunner;
