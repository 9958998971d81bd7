//! Free-text work description → `Role`.
//!
//! A small keyword parser for people who would rather type
//! "stripped lagging off boilers 1968-1974, wore a mask" than fill a form.
//! It never fails: anything it cannot read falls back to defaults, and the
//! estimator's own band fallbacks take it from there.

use crate::domain::{Era, Role, Task};

/// Task keywords, checked in order; first hit wins.
const TASK_KEYWORDS: [(Task, &[&str]); 4] = [
    (Task::LaggingInsulation, &["lagg", "insulat", "pipe cover", "boiler"]),
    (
        Task::MaintenanceDemolition,
        &["demoli", "strip", "maintenance", "refurb", "electrician", "plumb"],
    ),
    (Task::CementBoardCutting, &["cement", "board", "cut", "sheet"]),
    (Task::GarageBrakes, &["brake", "clutch", "garage", "mechanic"]),
];

const RESPIRATOR_KEYWORDS: [&str; 5] = ["mask", "masks", "respirator", "respirators", "rpe"];
const LEV_KEYWORDS: [&str; 4] = ["extraction", "extractor", "extractors", "lev"];

const PART_TIME_DAYS: f64 = 3.0;

/// Parse a description into a role, using `current_year` for open-ended dates.
pub fn describe(text: &str, current_year: i32) -> Role {
    let lower = text.to_lowercase();
    let words = tokenize(&lower);

    let task = detect_task(&lower);
    let (start_year, end_year) = detect_years(&words, current_year);

    let mut role = Role::new(task, Era::for_year(start_year), start_year, end_year);
    if lower.contains("part time") || lower.contains("part-time") {
        role.days_per_week = PART_TIME_DAYS;
    }
    role.respirator_used = detect_control(&words, &RESPIRATOR_KEYWORDS);
    role.lev_used = detect_control(&words, &LEV_KEYWORDS);

    tracing::debug!(?role, "parsed description");
    role
}

fn detect_task(lower: &str) -> Task {
    TASK_KEYWORDS
        .iter()
        .find(|(_, keys)| keys.iter().any(|k| lower.contains(k)))
        .map(|(task, _)| *task)
        .unwrap_or(Task::Bystander)
}

/// Lower-case alphanumeric words; everything else separates.
fn tokenize(lower: &str) -> Vec<&str> {
    lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect()
}

/// First mentioned year starts the role, last mentioned year ends it.
///
/// Decades (`1970s`, `70s`) contribute their first and last year.
fn detect_years(words: &[&str], current_year: i32) -> (i32, i32) {
    let mut years = Vec::new();
    for word in words {
        if let Some(year) = parse_full_year(word) {
            years.push(year);
        } else if let Some(decade) = parse_decade(word) {
            years.push(decade);
            years.push(decade + 9);
        }
    }

    match (years.first(), years.last()) {
        (Some(&first), Some(&last)) if years.len() > 1 => (first, last),
        (Some(&only), _) => (only, current_year),
        _ => (current_year - 1, current_year),
    }
}

fn parse_full_year(word: &str) -> Option<i32> {
    if word.len() != 4 || !word.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = word.parse::<i32>().ok()?;
    (1900..=2099).contains(&year).then_some(year)
}

/// `1970s` → 1970, `70s` → 1970, `00s` → 2000.
fn parse_decade(word: &str) -> Option<i32> {
    let digits = word.strip_suffix('s')?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match digits.len() {
        4 => {
            let year = parse_full_year(digits)?;
            (year % 10 == 0).then_some(year)
        }
        2 => {
            let yy = digits.parse::<i32>().ok()?;
            if yy % 10 != 0 {
                return None;
            }
            Some(if yy < 30 { 2000 + yy } else { 1900 + yy })
        }
        _ => None,
    }
}

/// Whole-word keyword present and not directly preceded by "no".
fn detect_control(words: &[&str], keywords: &[&str]) -> bool {
    words.iter().enumerate().any(|(idx, w)| {
        let hit = keywords.contains(w);
        let negated = idx > 0 && words[idx - 1] == "no";
        hit && !negated
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lagging_with_year_range_and_mask() {
        let role = describe("Stripped lagging off boilers 1968-1974, wore a mask", 2025);
        assert_eq!(role.task, "lagging/insulation");
        assert_eq!(role.era, "pre-1980");
        assert_eq!((role.start_year, role.end_year), (1968, 1974));
        assert!(role.respirator_used);
        assert!(!role.lev_used);
        assert_eq!(role.days_per_week, 5.0);
        assert_eq!(role.hours_per_day, 8.0);
    }

    #[test]
    fn decade_phrase_and_part_time() {
        let role = describe("part-time brake fitter in a garage in the 80s", 2025);
        assert_eq!(role.task, "garage/brakes");
        assert_eq!(role.era, "1980-1999");
        assert_eq!((role.start_year, role.end_year), (1980, 1989));
        assert_eq!(role.days_per_week, 3.0);
    }

    #[test]
    fn single_year_runs_to_current_year() {
        let role = describe("office worker near refurbishment since 2005 with extraction", 2025);
        assert_eq!(role.task, "maintenance/demolition");
        assert_eq!(role.era, "2000+");
        assert_eq!((role.start_year, role.end_year), (2005, 2025));
        assert!(role.lev_used);
    }

    #[test]
    fn negated_controls() {
        let role = describe("cutting cement sheets 1975 to 1979, no mask, no extraction", 2025);
        assert_eq!(role.task, "cement/board cutting");
        assert!(!role.respirator_used);
        assert!(!role.lev_used);
    }

    #[test]
    fn control_keywords_match_whole_words_only() {
        let role = describe("bystander on the ground level of a shipyard 1975-1980", 2025);
        assert!(!role.lev_used);
        assert!(!describe("pulled the lever, levelling floors 1990", 2025).lev_used);
        assert!(!describe("masking tape on pipes 1990", 2025).respirator_used);

        let role = describe("fitted extractors and wore masks 1990", 2025);
        assert!(role.lev_used);
        assert!(role.respirator_used);
        assert!(describe("had LEV on site 1990", 2025).lev_used);
    }

    #[test]
    fn nothing_recognised_defaults_to_bystander_last_year() {
        let role = describe("worked in a school", 2025);
        assert_eq!(role.task, "bystander");
        assert_eq!(role.era, "2000+");
        assert_eq!((role.start_year, role.end_year), (2024, 2025));
    }

    #[test]
    fn decade_parsing() {
        assert_eq!(parse_decade("1970s"), Some(1970));
        assert_eq!(parse_decade("60s"), Some(1960));
        assert_eq!(parse_decade("00s"), Some(2000));
        assert_eq!(parse_decade("75s"), None);
        assert_eq!(parse_decade("boss"), None);
    }
}
