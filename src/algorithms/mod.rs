//! Localization algorithms layer.
//!
//! This layer contains the numerical building blocks for bearing-only
//! source localization.
//!
//! # Contents
//!
//! - [`residual`]: Angular residual cost surface
//! - [`wls`]: Closed-form weighted least-squares bearing intersection
//! - [`search`]: Grid minimizers (exhaustive, multi-resolution) and runtime selection

pub mod residual;
pub mod search;
pub mod wls;
