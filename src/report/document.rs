//! Printable Markdown report.
//!
//! The report mirrors what a user would print or attach: the entered roles,
//! cumulative totals, latency, educational context and the disclaimer.

use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::domain::{EstimateResult, INTERPRETATION_NOTES, Role};
use crate::error::AppError;
use crate::report::{fmt_band, format_total_range, latency_note, yes_no};

/// Directory used when no explicit report path is given.
pub const DEFAULT_REPORT_DIR: &str = "reports";

/// Render the report body.
pub fn render_markdown_report(
    roles: &[Role],
    result: &EstimateResult,
    generated_at: DateTime<Local>,
) -> String {
    let mut out = String::new();

    out.push_str("# Asbestos Exposure Educational Estimator — Summary\n\n");
    out.push_str(&format!("- generated: {}\n\n", generated_at.format("%Y-%m-%d %H:%M")));

    out.push_str("## Roles\n\n");
    for (idx, r) in roles.iter().enumerate() {
        out.push_str(&format!(
            "**Role {}:** {} ({}) {}–{}  \n",
            idx + 1,
            r.task,
            r.era,
            r.start_year,
            r.end_year
        ));
        out.push_str(&format!(
            "Days/week: {}, Hours/day: {}, RPE: {}, LEV: {}\n\n",
            r.days_per_week,
            r.hours_per_day,
            yes_no(r.respirator_used),
            yes_no(r.lev_used)
        ));
    }

    if !result.summaries.is_empty() {
        out.push_str("| # | task | era | years | adjusted band | dose (f/ml·years) |\n");
        out.push_str("| - | - | - | - | - | - |\n");
        for (idx, s) in result.summaries.iter().enumerate() {
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} |\n",
                idx + 1,
                s.task,
                s.era,
                s.years,
                fmt_band(s.adjusted_band),
                fmt_band(s.dose)
            ));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "## Cumulative exposure: {}\n\n",
        format_total_range(result.total_low, result.total_high)
    ));
    out.push_str(&format!("**{}**\n\n", latency_note(result.latency_years)));

    out.push_str("| Educational context (not diagnostic) |\n");
    out.push_str("| - |\n");
    for note in INTERPRETATION_NOTES {
        out.push_str(&format!("| • {note} |\n"));
    }
    out.push('\n');

    out.push_str("### Disclaimer\n\n");
    out.push_str(&result.disclaimer);
    out.push('\n');

    out
}

/// Write the report to `path`, or to a timestamped file under `reports/`.
///
/// Returns the path actually written.
pub fn write_markdown_report(
    path: Option<&Path>,
    roles: &[Role],
    result: &EstimateResult,
) -> Result<PathBuf, AppError> {
    let now = Local::now();
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let dir = PathBuf::from(DEFAULT_REPORT_DIR);
            create_dir_all(&dir)
                .map_err(|e| AppError::input(format!("Failed to create report dir: {e}")))?;
            dir.join(format!("exposure_report_{}.md", now.format("%Y%m%d_%H%M%S")))
        }
    };

    let mut file = File::create(&path)
        .map_err(|e| AppError::input(format!("Failed to create report '{}': {e}", path.display())))?;
    file.write_all(render_markdown_report(roles, result, now).as_bytes())
        .map_err(|e| AppError::input(format!("Failed to write report: {e}")))?;

    tracing::info!(path = %path.display(), "wrote report");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crate::estimator::estimate_all_at;

    #[test]
    fn report_sections() {
        let roles = vec![Role::example()];
        let result = estimate_all_at(&roles, 2025);
        let at = Local.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        let md = render_markdown_report(&roles, &result, at);

        assert!(md.starts_with("# Asbestos Exposure Educational Estimator"));
        assert!(md.contains("- generated: 2025-03-01 09:30"));
        assert!(md.contains("**Role 1:** bystander (1980-1999) 1985–1990"));
        assert!(md.contains("Days/week: 5, Hours/day: 6, RPE: no, LEV: no"));
        assert!(md.contains("| 1 | bystander | 1980-1999 | 5 | 0.038–0.15 | 0.188–0.75 |"));
        assert!(md.contains("## Cumulative exposure: 0.19–0.75 f/ml·years"));
        assert!(md.contains("**Latency (years since first exposure): ~40**"));
        assert!(md.contains("Mesothelioma: no safe threshold"));
        assert!(md.trim_end().ends_with(&result.disclaimer));
    }

    #[test]
    fn empty_history_report_has_no_table() {
        let result = estimate_all_at(&[], 2025);
        let md = render_markdown_report(&[], &result, Local::now());
        assert!(!md.contains("| # | task"));
        assert!(md.contains("**Latency: n/a**"));
    }

    #[test]
    fn writes_to_explicit_path() {
        let path = std::env::temp_dir().join(format!("exposure_report_{}.md", std::process::id()));
        let roles = vec![Role::example()];
        let result = estimate_all_at(&roles, 2025);
        let written = write_markdown_report(Some(&path), &roles, &result).unwrap();
        let text = std::fs::read_to_string(&written).unwrap();
        let _ = std::fs::remove_file(&written);
        assert_eq!(written, path);
        assert!(text.contains("Disclaimer"));
    }
}
