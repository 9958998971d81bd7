//! Shared "estimate pipeline" logic used by every front end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! roles -> estimate -> optional exports
//!
//! The CLI commands and the TUI can then focus on presentation.

use std::path::PathBuf;

use crate::domain::{EstimateResult, Role};
use crate::error::AppError;
use crate::estimator::estimate_all_at;
use crate::io::{ResultFile, write_result_json, write_summaries_csv};
use crate::report::write_markdown_report;

/// All computed outputs of a single estimate run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub roles: Vec<Role>,
    pub result: EstimateResult,
    pub current_year: i32,
}

/// Requested export files.
#[derive(Debug, Clone, Default)]
pub struct ExportTargets {
    pub summaries_csv: Option<PathBuf>,
    pub result_json: Option<PathBuf>,
    /// `Some(None)` writes the report to a timestamped default path.
    pub report: Option<Option<PathBuf>>,
}

/// Execute the estimate for a list of roles.
pub fn run_estimate(roles: Vec<Role>, current_year: i32) -> RunOutput {
    let result = estimate_all_at(&roles, current_year);

    let fallbacks = result
        .summaries
        .iter()
        .filter(|s| s.band_source != crate::domain::BandSource::Table)
        .count();
    if fallbacks > 0 {
        tracing::warn!(fallbacks, "roles without an exact task/era band used a fallback band");
    }
    tracing::info!(
        roles = roles.len(),
        total_low = result.total_low,
        total_high = result.total_high,
        "estimated exposure"
    );

    RunOutput {
        roles,
        result,
        current_year,
    }
}

/// Write every requested export; returns the paths written.
pub fn write_exports(run: &RunOutput, targets: &ExportTargets) -> Result<Vec<PathBuf>, AppError> {
    let mut written = Vec::new();

    if let Some(path) = &targets.summaries_csv {
        write_summaries_csv(path, &run.result)?;
        written.push(path.clone());
    }
    if let Some(path) = &targets.result_json {
        write_result_json(path, &ResultFile::new(&run.roles, &run.result, run.current_year))?;
        written.push(path.clone());
    }
    if let Some(path) = &targets.report {
        written.push(write_markdown_report(path.as_deref(), &run.roles, &run.result)?);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_keeps_roles_and_year() {
        let run = run_estimate(vec![Role::example()], 2025);
        assert_eq!(run.roles.len(), 1);
        assert_eq!(run.current_year, 2025);
        assert_eq!(run.result.latency_years, Some(40));
    }

    #[test]
    fn no_targets_writes_nothing() {
        let run = run_estimate(vec![Role::example()], 2025);
        let written = write_exports(&run, &ExportTargets::default()).unwrap();
        assert!(written.is_empty());
    }

    #[test]
    fn writes_requested_files() {
        let dir = std::env::temp_dir();
        let pid = std::process::id();
        let targets = ExportTargets {
            summaries_csv: Some(dir.join(format!("exposure_pipeline_{pid}.csv"))),
            result_json: Some(dir.join(format!("exposure_pipeline_{pid}.json"))),
            report: Some(Some(dir.join(format!("exposure_pipeline_{pid}.md")))),
        };
        let run = run_estimate(vec![Role::example()], 2025);
        let written = write_exports(&run, &targets).unwrap();
        assert_eq!(written.len(), 3);
        for path in &written {
            assert!(path.exists());
            let _ = std::fs::remove_file(path);
        }
    }
}
