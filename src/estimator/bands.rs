//! Fixed exposure band table.

use crate::domain::{BandSource, ExposureBand};

/// Task label of the generic post-2000 entry.
pub const ANY_TASK: &str = "any";

/// Era label that has a generic fallback entry.
pub const FALLBACK_ERA: &str = "2000+";

/// Band used when nothing else matches.
pub const DEFAULT_BAND: ExposureBand = ExposureBand::new(0.05, 0.2);

/// Literature-style rate bands (f/ml per year) keyed by `(task, era)`.
pub static BASE_BANDS: [(&str, &str, ExposureBand); 9] = [
    ("lagging/insulation", "pre-1980", ExposureBand::new(5.0, 10.0)),
    ("maintenance/demolition", "pre-1980", ExposureBand::new(0.5, 2.0)),
    ("cement/board cutting", "pre-1980", ExposureBand::new(1.0, 5.0)),
    ("garage/brakes", "pre-1980", ExposureBand::new(0.2, 1.0)),
    ("bystander", "pre-1980", ExposureBand::new(0.1, 0.5)),
    ("lagging/insulation", "1980-1999", ExposureBand::new(0.5, 2.0)),
    ("maintenance/demolition", "1980-1999", ExposureBand::new(0.2, 0.8)),
    ("bystander", "1980-1999", ExposureBand::new(0.05, 0.2)),
    (ANY_TASK, FALLBACK_ERA, ExposureBand::new(0.01, 0.05)),
];

/// Base band for a task/era pair.
///
/// Unknown combinations never fail; see [`lookup_band`] for which rule applied.
pub fn band_for(task: &str, era: &str) -> ExposureBand {
    lookup_band(task, era).0
}

/// Base band plus the rule that produced it.
///
/// The table is keyed by the lower-cased, trimmed task and the trimmed era.
/// The era fallback compares the era exactly as given.
pub fn lookup_band(task: &str, era: &str) -> (ExposureBand, BandSource) {
    let task_key = task.trim().to_lowercase();
    let era_key = era.trim();

    if let Some(band) = table_entry(&task_key, era_key) {
        return (band, BandSource::Table);
    }
    if era == FALLBACK_ERA {
        if let Some(band) = table_entry(ANY_TASK, FALLBACK_ERA) {
            return (band, BandSource::EraFallback);
        }
    }
    (DEFAULT_BAND, BandSource::Default)
}

fn table_entry(task: &str, era: &str) -> Option<ExposureBand> {
    BASE_BANDS
        .iter()
        .find(|(t, e, _)| *t == task && *e == era)
        .map(|(_, _, band)| *band)
}
