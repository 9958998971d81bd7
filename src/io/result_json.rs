//! Read/write estimate JSON files.
//!
//! Result JSON is the portable representation of one estimate:
//! - the roles exactly as entered
//! - the full-precision `EstimateResult`
//! - the year latency was measured against and when the file was written

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::domain::{EstimateResult, Role};
use crate::error::AppError;

/// A saved estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultFile {
    pub tool: String,
    pub generated_at: DateTime<Local>,
    pub current_year: i32,
    pub roles: Vec<Role>,
    pub result: EstimateResult,
}

impl ResultFile {
    pub fn new(roles: &[Role], result: &EstimateResult, current_year: i32) -> Self {
        Self {
            tool: "exposure".to_string(),
            generated_at: Local::now(),
            current_year,
            roles: roles.to_vec(),
            result: result.clone(),
        }
    }
}

/// Write a result JSON file.
pub fn write_result_json(path: &Path, file_contents: &ResultFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create result JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, file_contents)
        .map_err(|e| AppError::input(format!("Failed to write result JSON: {e}")))?;

    tracing::info!(path = %path.display(), "wrote result JSON");
    Ok(())
}

/// Read a result JSON file.
pub fn read_result_json(path: &Path) -> Result<ResultFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open result JSON '{}': {e}", path.display())))?;
    let saved: ResultFile =
        serde_json::from_reader(file).map_err(|e| AppError::input(format!("Invalid result JSON: {e}")))?;
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::estimate_all_at;

    #[test]
    fn saved_result_reloads_unchanged() {
        let path = std::env::temp_dir().join(format!("exposure_result_{}.json", std::process::id()));
        let roles = vec![Role::example()];
        let result = estimate_all_at(&roles, 2025);
        write_result_json(&path, &ResultFile::new(&roles, &result, 2025)).unwrap();

        let saved = read_result_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(saved.current_year, 2025);
        assert_eq!(saved.roles, roles);
        assert_eq!(saved.result, result);
    }

    #[test]
    fn short_field_names_are_accepted() {
        let json = r#"{"task":"bystander","era":"pre-1980","start_year":1970,"end_year":1971,
                       "days_per_week":5,"hours_per_day":8,"rpe":true,"lev":false}"#;
        let role: Role = serde_json::from_str(json).unwrap();
        assert!(role.respirator_used);
        assert!(!role.lev_used);
    }

    #[test]
    fn invalid_json_is_input_error() {
        let path = std::env::temp_dir().join(format!("exposure_bad_{}.json", std::process::id()));
        std::fs::write(&path, "{not json").unwrap();
        let err = read_result_json(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert_eq!(err.exit_code(), 2);
    }
}
