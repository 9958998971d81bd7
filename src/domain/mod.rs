//! Domain types used throughout the estimator and its front ends.
//!
//! This module defines:
//!
//! - the known task/era categories (`Task`, `Era`)
//! - user-entered work history rows (`Role`)
//! - estimation outputs (`ExposureBand`, `RoleSummary`, `EstimateResult`)

pub mod types;

pub use types::*;
