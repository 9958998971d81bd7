//! Frequency/control scaling and dose aggregation.

use chrono::{Datelike, Local};

use crate::domain::{DISCLAIMER, EstimateResult, Role, RoleSummary};
use crate::estimator::bands::lookup_band;

/// Multiplier applied for a respirator worn consistently.
pub const RESPIRATOR_FACTOR: f64 = 0.5;
/// Multiplier applied when local exhaust ventilation was in use.
pub const LEV_FACTOR: f64 = 0.8;

/// Reference working week and day.
pub const FULL_TIME_DAYS: f64 = 5.0;
pub const FULL_TIME_HOURS: f64 = 8.0;

/// Combined protection factor. The two controls compound multiplicatively.
pub fn control_multiplier(respirator_used: bool, lev_used: bool) -> f64 {
    let mut mult = 1.0;
    if respirator_used {
        mult *= RESPIRATOR_FACTOR;
    }
    if lev_used {
        mult *= LEV_FACTOR;
    }
    mult
}

/// Fraction of a full-time week/day actually worked.
pub fn frequency_multiplier(days_per_week: f64, hours_per_day: f64) -> f64 {
    (days_per_week / FULL_TIME_DAYS) * (hours_per_day / FULL_TIME_HOURS)
}

/// Whole years between start and end, never negative.
pub fn exposure_years(start_year: i32, end_year: i32) -> u32 {
    u32::try_from(i64::from(end_year) - i64::from(start_year)).unwrap_or(0)
}

/// Derive the summary for a single role. No rounding happens here.
pub fn compute_role(role: &Role) -> RoleSummary {
    let (base_band, band_source) = lookup_band(&role.task, &role.era);
    let adjusted_band = base_band
        .scale(frequency_multiplier(role.days_per_week, role.hours_per_day))
        .scale(control_multiplier(role.respirator_used, role.lev_used));
    let years = exposure_years(role.start_year, role.end_year);
    let dose = adjusted_band.scale(f64::from(years));

    RoleSummary {
        task: role.task.clone(),
        era: role.era.clone(),
        years,
        base_band,
        band_source,
        adjusted_band,
        dose,
    }
}

/// Estimate a whole history against the local calendar year.
pub fn estimate_all(roles: &[Role]) -> EstimateResult {
    estimate_all_at(roles, Local::now().year())
}

/// Estimate a whole history against an explicit "current" year.
///
/// Totals are the plain sum of per-role doses in input order. Latency is
/// `current_year - earliest start_year` (saturating), or `None` for an empty history.
pub fn estimate_all_at(roles: &[Role], current_year: i32) -> EstimateResult {
    let mut summaries = Vec::with_capacity(roles.len());
    let mut total_low = 0.0;
    let mut total_high = 0.0;

    for role in roles {
        let summary = compute_role(role);
        total_low += summary.dose.low;
        total_high += summary.dose.high;
        summaries.push(summary);
    }

    let latency_years = roles
        .iter()
        .map(|r| r.start_year)
        .min()
        .map(|first| current_year.saturating_sub(first));

    EstimateResult {
        summaries,
        total_low,
        total_high,
        latency_years,
        disclaimer: DISCLAIMER.to_string(),
    }
}
