//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built by any front end (flags, role sheets, free text, the terminal grid)
//! - exported to JSON/CSV
//! - reloaded later for display

use serde::{Deserialize, Serialize};

/// Text shown alongside every estimate.
pub const DISCLAIMER: &str = "Educational use only. This estimator provides a non-diagnostic approximation \
of cumulative exposure using literature-style bands and user-entered history. It is not medical or legal \
advice and does not determine eligibility for any claim or benefit. Operated in the UK for a UK audience. \
© 2025 Dr W. Kent. Independent of sponsors; no editorial input from any funder.";

/// Educational context lines printed in reports (not diagnostic thresholds).
pub const INTERPRETATION_NOTES: [&str; 3] = [
    "Asbestosis/Diffuse pleural thickening often associated with ~10–25+ f/ml·years.",
    "Lung cancer without asbestosis: typically very high cumulative exposures.",
    "Mesothelioma: no safe threshold; qualitative exposure history remains important.",
];

/// Known task categories.
///
/// Roles carry the task as text; these are the labels the band table knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Task {
    #[serde(rename = "lagging/insulation")]
    LaggingInsulation,
    #[serde(rename = "maintenance/demolition")]
    MaintenanceDemolition,
    #[serde(rename = "cement/board cutting")]
    CementBoardCutting,
    #[serde(rename = "garage/brakes")]
    GarageBrakes,
    #[serde(rename = "bystander")]
    Bystander,
}

impl Task {
    pub const ALL: [Task; 5] = [
        Task::LaggingInsulation,
        Task::MaintenanceDemolition,
        Task::CementBoardCutting,
        Task::GarageBrakes,
        Task::Bystander,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Task::LaggingInsulation => "lagging/insulation",
            Task::MaintenanceDemolition => "maintenance/demolition",
            Task::CementBoardCutting => "cement/board cutting",
            Task::GarageBrakes => "garage/brakes",
            Task::Bystander => "bystander",
        }
    }

    /// Match a label case-insensitively, ignoring surrounding whitespace.
    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|t| t.label().eq_ignore_ascii_case(s))
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Known era categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Era {
    #[serde(rename = "pre-1980")]
    Pre1980,
    #[serde(rename = "1980-1999")]
    From1980To1999,
    #[serde(rename = "2000+")]
    From2000,
}

impl Era {
    pub const ALL: [Era; 3] = [Era::Pre1980, Era::From1980To1999, Era::From2000];

    pub fn label(self) -> &'static str {
        match self {
            Era::Pre1980 => "pre-1980",
            Era::From1980To1999 => "1980-1999",
            Era::From2000 => "2000+",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|e| e.label() == s)
    }

    /// Era a calendar year falls into.
    pub fn for_year(year: i32) -> Self {
        if year < 1980 {
            Era::Pre1980
        } else if year < 2000 {
            Era::From1980To1999
        } else {
            Era::From2000
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&e| e == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&e| e == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// One entry of a work history.
///
/// `task` and `era` stay as text: unknown categories are valid input and fall
/// back to a generic band during estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub task: String,
    pub era: String,
    pub start_year: i32,
    pub end_year: i32,
    pub days_per_week: f64,
    pub hours_per_day: f64,
    /// Respiratory protective equipment worn consistently.
    #[serde(alias = "rpe")]
    pub respirator_used: bool,
    /// Local exhaust ventilation in use.
    #[serde(alias = "lev")]
    pub lev_used: bool,
}

impl Role {
    pub fn new(task: Task, era: Era, start_year: i32, end_year: i32) -> Self {
        Self {
            task: task.label().to_string(),
            era: era.label().to_string(),
            start_year,
            end_year,
            days_per_week: 5.0,
            hours_per_day: 8.0,
            respirator_used: false,
            lev_used: false,
        }
    }

    /// The pre-filled row shown by interactive front ends.
    pub fn example() -> Self {
        Self {
            hours_per_day: 6.0,
            ..Self::new(Task::Bystander, Era::From1980To1999, 1985, 1990)
        }
    }
}

/// A (low, high) exposure interval.
///
/// Used both for rates (f/ml per year) and for cumulative doses (f/ml·years).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExposureBand {
    pub low: f64,
    pub high: f64,
}

impl ExposureBand {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn scale(self, factor: f64) -> Self {
        Self {
            low: self.low * factor,
            high: self.high * factor,
        }
    }
}

/// Where a base band came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandSource {
    /// Exact (task, era) table entry.
    Table,
    /// Unknown task in the `2000+` era; the generic `any/2000+` band.
    EraFallback,
    /// No match at all; the hardcoded default band.
    Default,
}

impl BandSource {
    pub fn display_name(self) -> &'static str {
        match self {
            BandSource::Table => "table",
            BandSource::EraFallback => "era fallback",
            BandSource::Default => "default",
        }
    }
}

/// Per-role derived values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSummary {
    pub task: String,
    pub era: String,
    pub years: u32,
    pub base_band: ExposureBand,
    pub band_source: BandSource,
    /// Base band after frequency and control multipliers.
    pub adjusted_band: ExposureBand,
    /// Adjusted band × years (f/ml·years).
    pub dose: ExposureBand,
}

/// Aggregate output for a whole work history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateResult {
    pub summaries: Vec<RoleSummary>,
    pub total_low: f64,
    pub total_high: f64,
    /// Years since the earliest start year; `None` for an empty history.
    pub latency_years: Option<i32>,
    pub disclaimer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disclaimer_carries_attribution() {
        assert!(DISCLAIMER.starts_with("Educational use only."));
        assert!(DISCLAIMER.contains("Operated in the UK for a UK audience. © 2025 Dr W. Kent."));
        assert!(DISCLAIMER.ends_with("no editorial input from any funder."));
    }
}
