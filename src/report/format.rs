//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the estimator stays free of display concerns
//! - output changes are localized (important for snapshot tests)

use crate::domain::{BandSource, EstimateResult, ExposureBand, Role};
use crate::report::{ROLE_DECIMALS, format_total_range, latency_note, round_to};

/// Format the full estimate: per-role table, totals, latency and disclaimer.
pub fn format_estimate(result: &EstimateResult, current_year: i32) -> String {
    let mut out = String::new();

    out.push_str("=== exposure - Asbestos Exposure Estimator (educational) ===\n");
    out.push_str(&format!(
        "Roles: n={} | current year: {current_year}\n\n",
        result.summaries.len()
    ));

    out.push_str(&format_summary_table(result));
    out.push('\n');

    out.push_str(&format!(
        "Cumulative exposure: {}\n",
        format_total_range(result.total_low, result.total_high)
    ));
    out.push_str(&latency_note(result.latency_years));
    out.push('\n');

    let fallbacks = result
        .summaries
        .iter()
        .filter(|s| s.band_source != BandSource::Table)
        .count();
    if fallbacks > 0 {
        out.push_str(&format!(
            "\nNote: {fallbacks} role(s) had no exact task/era match and used a fallback band.\n"
        ));
    }

    out.push_str(&format!("\nDisclaimer: {}\n", result.disclaimer));
    out
}

/// Per-role summary table.
pub fn format_summary_table(result: &EstimateResult) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<3} {:<24} {:<10} {:>5} {:<12} {:<13} {:<13} {:<13}\n",
            "#", "task", "era", "years", "band", "base", "adjusted", "dose"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<3} {:-<24} {:-<10} {:-<5} {:-<12} {:-<13} {:-<13} {:-<13}\n",
            "", "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for (idx, s) in result.summaries.iter().enumerate() {
        out.push_str(
            format!(
                "{:<3} {:<24} {:<10} {:>5} {:<12} {:<13} {:<13} {:<13}\n",
                idx + 1,
                truncate(&s.task, 24),
                truncate(&s.era, 10),
                s.years,
                s.band_source.display_name(),
                fmt_band(s.base_band),
                fmt_band(s.adjusted_band),
                fmt_band(s.dose),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// One line per entered role, as typed.
pub fn format_role_inputs(roles: &[Role]) -> String {
    let mut out = String::new();
    for (idx, r) in roles.iter().enumerate() {
        out.push_str(&format!(
            "Role {}: {} ({}) {}–{} | days/week: {} | hours/day: {} | RPE: {} | LEV: {}\n",
            idx + 1,
            r.task,
            r.era,
            r.start_year,
            r.end_year,
            r.days_per_week,
            r.hours_per_day,
            yes_no(r.respirator_used),
            yes_no(r.lev_used),
        ));
    }
    out
}

pub fn fmt_band(band: ExposureBand) -> String {
    format!(
        "{}–{}",
        round_to(band.low, ROLE_DECIMALS),
        round_to(band.high, ROLE_DECIMALS)
    )
}

pub fn yes_no(v: bool) -> &'static str {
    if v { "yes" } else { "no" }
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Era, Task};
    use crate::estimator::estimate_all_at;

    #[test]
    fn estimate_text_contains_key_lines() {
        let result = estimate_all_at(&[Role::example()], 2025);
        let txt = format_estimate(&result, 2025);

        assert!(txt.starts_with("=== exposure"));
        assert!(txt.contains("Roles: n=1 | current year: 2025"));
        assert!(txt.contains("Cumulative exposure: 0.19–0.75 f/ml·years"));
        assert!(txt.contains("Latency (years since first exposure): ~40"));
        assert!(txt.contains("Disclaimer: Educational use only."));
        assert!(!txt.contains("fallback band"));
    }

    #[test]
    fn table_row_shows_rounded_bands() {
        let result = estimate_all_at(&[Role::example()], 2025);
        let table = format_summary_table(&result);
        let row = table.lines().nth(2).unwrap();
        assert!(row.starts_with("1   bystander"));
        assert!(row.contains("table"));
        assert!(row.contains("0.05–0.2"));
        assert!(row.contains("0.038–0.15"));
        assert!(row.ends_with("0.188–0.75"));
    }

    #[test]
    fn fallback_roles_are_called_out() {
        let mut role = Role::new(Task::Bystander, Era::From2000, 2001, 2003);
        role.task = "welding".to_string();
        let result = estimate_all_at(&[role], 2025);
        let txt = format_estimate(&result, 2025);
        assert!(txt.contains("era fallback"));
        assert!(txt.contains("1 role(s) had no exact task/era match"));
    }

    #[test]
    fn role_inputs_lines() {
        let txt = format_role_inputs(&[Role::example()]);
        assert_eq!(
            txt,
            "Role 1: bystander (1980-1999) 1985–1990 | days/week: 5 | hours/day: 6 | RPE: no | LEV: no\n"
        );
    }

    #[test]
    fn truncate_long_labels() {
        assert_eq!(truncate("maintenance/demolition", 10), "maintenan.");
        assert_eq!(truncate("bystander", 10), "bystander");
    }
}
