//! Input/output helpers.
//!
//! - role sheet CSV ingest + writing (`sheet`)
//! - per-role summary CSV export (`export`)
//! - result JSON read/write (`result_json`)

pub mod export;
pub mod result_json;
pub mod sheet;

pub use export::*;
pub use result_json::*;
pub use sheet::*;
