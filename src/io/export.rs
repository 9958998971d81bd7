//! Export per-role summaries to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.
//! Values use the same 3-decimal rounding as the terminal summary.

use std::path::Path;

use crate::domain::EstimateResult;
use crate::error::AppError;
use crate::report::round_to;

const HEADER: [&str; 11] = [
    "role",
    "task",
    "era",
    "years",
    "band_source",
    "base_band_low",
    "base_band_high",
    "adj_band_low",
    "adj_band_high",
    "dose_low",
    "dose_high",
];

/// Write per-role summaries to a CSV file.
pub fn write_summaries_csv(path: &Path, result: &EstimateResult) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::input(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writer
        .write_record(HEADER)
        .map_err(|e| AppError::input(format!("Failed to write export CSV header: {e}")))?;

    for (idx, s) in result.summaries.iter().enumerate() {
        writer
            .write_record([
                (idx + 1).to_string(),
                s.task.clone(),
                s.era.clone(),
                s.years.to_string(),
                s.band_source.display_name().to_string(),
                round_to(s.base_band.low, 3).to_string(),
                round_to(s.base_band.high, 3).to_string(),
                round_to(s.adjusted_band.low, 3).to_string(),
                round_to(s.adjusted_band.high, 3).to_string(),
                round_to(s.dose.low, 3).to_string(),
                round_to(s.dose.high, 3).to_string(),
            ])
            .map_err(|e| AppError::input(format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::input(format!("Failed to flush export CSV: {e}")))?;

    tracing::info!(path = %path.display(), roles = result.summaries.len(), "wrote summary CSV");
    Ok(())
}
