//! Exposure estimation.
//!
//! Responsibilities:
//!
//! - look up base exposure bands for a (task, era) pair
//! - scale bands by work frequency and exposure controls
//! - aggregate per-role doses into totals and a latency figure
//!
//! Everything here is a pure function of its inputs; front ends own parsing,
//! validation and presentation.

pub mod bands;
pub mod dose;

pub use bands::*;
pub use dose::*;
