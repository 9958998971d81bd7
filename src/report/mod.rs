//! Reporting utilities: display rounding, terminal summaries and printable reports.
//!
//! The estimator keeps full precision; everything in this module is
//! presentation only.

pub mod document;
pub mod format;

pub use document::*;
pub use format::*;

/// Decimal places for per-role values.
pub const ROLE_DECIMALS: i32 = 3;
/// Decimal places for history totals.
pub const TOTAL_DECIMALS: i32 = 2;

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// One-line latency note shared by every front end.
pub fn latency_note(latency_years: Option<i32>) -> String {
    match latency_years {
        Some(years) => format!("Latency (years since first exposure): ~{years}"),
        None => "Latency: n/a".to_string(),
    }
}

/// `low–high f/ml·years` using total rounding.
pub fn format_total_range(low: f64, high: f64) -> String {
    format!(
        "{}–{} f/ml·years",
        round_to(low, TOTAL_DECIMALS),
        round_to(high, TOTAL_DECIMALS)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_is_display_only_helper() {
        assert_eq!(round_to(0.1875, 3), 0.188);
        assert_eq!(round_to(0.18750000000000003, 2), 0.19);
        assert_eq!(round_to(12.0, 2), 12.0);
    }

    #[test]
    fn latency_notes() {
        assert_eq!(latency_note(Some(40)), "Latency (years since first exposure): ~40");
        assert_eq!(latency_note(None), "Latency: n/a");
    }

    #[test]
    fn total_range_text() {
        assert_eq!(format_total_range(0.1875, 0.75), "0.19–0.75 f/ml·years");
    }
}
