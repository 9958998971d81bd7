//! ASCII dose-range bars for terminal output.
//!
//! This is intentionally "dumb" (fixed-width bars), optimized for:
//! - quick visual comparison of roles in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Bar elements:
//! - `=` from zero to the low end of the dose range
//! - `-` from the low end to the high end

use crate::domain::EstimateResult;
use crate::report::{fmt_band, round_to, truncate};

const LABEL_WIDTH: usize = 14;

/// Render one bar per role, all on a shared scale.
pub fn render_dose_bars(result: &EstimateResult, width: usize) -> String {
    let width = width.max(10);
    let scale_max = scale_max(result);

    let mut out = String::new();
    out.push_str(&format!(
        "Dose ranges (f/ml·years) | scale=[0, {}]\n",
        round_to(scale_max, 3)
    ));

    if result.summaries.is_empty() {
        out.push_str("(no roles)\n");
        return out;
    }

    for (idx, s) in result.summaries.iter().enumerate() {
        let low_cols = map_cols(s.dose.low, scale_max, width);
        let high_cols = map_cols(s.dose.high, scale_max, width).max(low_cols);

        let mut bar = String::with_capacity(width);
        bar.push_str(&"=".repeat(low_cols));
        bar.push_str(&"-".repeat(high_cols - low_cols));
        bar.push_str(&" ".repeat(width - high_cols));

        out.push_str(&format!(
            "{:>2} {:<label$} |{bar}| {}\n",
            idx + 1,
            truncate(&s.task, LABEL_WIDTH),
            fmt_band(s.dose),
            label = LABEL_WIDTH,
        ));
    }

    out
}

fn scale_max(result: &EstimateResult) -> f64 {
    let max = result
        .summaries
        .iter()
        .map(|s| s.dose.high.max(s.dose.low))
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max);
    if max > 0.0 { max } else { 1.0 }
}

fn map_cols(v: f64, max: f64, width: usize) -> usize {
    let u = (v / max).clamp(0.0, 1.0);
    if !u.is_finite() {
        return 0;
    }
    (u * width as f64).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Era, Role, Task};
    use crate::estimator::estimate_all_at;

    #[test]
    fn bars_golden_snapshot_small() {
        let roles = vec![
            Role::example(),
            Role::new(Task::GarageBrakes, Era::Pre1980, 1980, 1979),
        ];
        let result = estimate_all_at(&roles, 2025);
        let txt = render_dose_bars(&result, 10);
        let expected = concat!(
            "Dose ranges (f/ml·years) | scale=[0, 0.75]\n",
            " 1 bystander      |===-------| 0.188–0.75\n",
            " 2 garage/brakes  |          | 0–0\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn empty_history() {
        let result = estimate_all_at(&[], 2025);
        assert_eq!(
            render_dose_bars(&result, 20),
            "Dose ranges (f/ml·years) | scale=[0, 1]\n(no roles)\n"
        );
    }
}
