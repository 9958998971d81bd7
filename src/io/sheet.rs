//! Role sheet (CSV) ingest.
//!
//! This module turns a spreadsheet-style list of roles into clean `Role`
//! values for the estimator.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level coercion** (skip bad rows, but report what happened)
//! - **Blank rows are not errors**: a grid with trailing empty rows is normal

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::Role;
use crate::error::AppError;

/// Canonical column order (also used when writing sheets).
pub const SHEET_COLUMNS: [&str; 8] = [
    "task",
    "era",
    "start_year",
    "end_year",
    "days_per_week",
    "hours_per_day",
    "rpe",
    "lev",
];

/// Accepted spellings per canonical column.
const COLUMN_ALIASES: [(&str, &[&str]); 8] = [
    ("task", &["task"]),
    ("era", &["era"]),
    ("start_year", &["start_year", "start"]),
    ("end_year", &["end_year", "end"]),
    ("days_per_week", &["days_per_week", "days"]),
    ("hours_per_day", &["hours_per_day", "hours"]),
    ("rpe", &["rpe", "respirator", "respirator_used"]),
    ("lev", &["lev", "lev_used", "local_exhaust_ventilation"]),
];

/// A row-level problem encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: coerced roles plus bookkeeping.
#[derive(Debug, Clone)]
pub struct RoleSheet {
    pub roles: Vec<Role>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_blank: usize,
}

impl RoleSheet {
    pub fn rows_used(&self) -> usize {
        self.roles.len()
    }
}

/// Load a role sheet from disk.
pub fn load_role_sheet(path: &Path) -> Result<RoleSheet, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open role sheet '{}': {e}", path.display())))?;
    let sheet = read_role_sheet(file)?;

    tracing::info!(
        path = %path.display(),
        rows_read = sheet.rows_read,
        rows_used = sheet.rows_used(),
        rows_blank = sheet.rows_blank,
        rows_rejected = sheet.row_errors.len(),
        "loaded role sheet"
    );

    if sheet.roles.is_empty() {
        return Err(AppError::no_roles(format!(
            "No valid roles in '{}' ({} row(s) read, {} rejected).",
            path.display(),
            sheet.rows_read,
            sheet.row_errors.len()
        )));
    }
    Ok(sheet)
}

/// Parse a role sheet from any reader.
pub fn read_role_sheet<R: Read>(input: R) -> Result<RoleSheet, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read role sheet headers: {e}")))?
        .clone();
    let columns = resolve_columns(&headers)?;

    let mut roles = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;
    let mut rows_blank = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: header is line 1 and lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &columns) {
            Ok(Some(role)) => roles.push(role),
            Ok(None) => rows_blank += 1,
            Err(message) => {
                tracing::warn!(line, %message, "skipping malformed role row");
                row_errors.push(RowError { line, message });
            }
        }
    }

    Ok(RoleSheet {
        roles,
        row_errors,
        rows_read,
        rows_blank,
    })
}

/// Write roles in the canonical sheet layout.
pub fn write_role_sheet(path: &Path, roles: &[Role]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::input(format!("Failed to create role sheet '{}': {e}", path.display())))?;

    writer
        .write_record(SHEET_COLUMNS)
        .map_err(|e| AppError::input(format!("Failed to write role sheet header: {e}")))?;

    for role in roles {
        writer
            .write_record([
                role.task.clone(),
                role.era.clone(),
                role.start_year.to_string(),
                role.end_year.to_string(),
                role.days_per_week.to_string(),
                role.hours_per_day.to_string(),
                role.respirator_used.to_string(),
                role.lev_used.to_string(),
            ])
            .map_err(|e| AppError::input(format!("Failed to write role sheet row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::input(format!("Failed to flush role sheet: {e}")))?;
    Ok(())
}

fn resolve_columns(headers: &StringRecord) -> Result<HashMap<&'static str, usize>, AppError> {
    let normalized: Vec<String> = headers.iter().map(normalize_header_name).collect();

    let mut columns = HashMap::new();
    let mut missing = Vec::new();
    for (canonical, aliases) in COLUMN_ALIASES {
        match normalized.iter().position(|h| aliases.contains(&h.as_str())) {
            Some(idx) => {
                columns.insert(canonical, idx);
            }
            None => missing.push(canonical),
        }
    }

    if !missing.is_empty() {
        return Err(AppError::input(format!(
            "Role sheet is missing required column(s): {}",
            missing.iter().map(|c| format!("`{c}`")).collect::<Vec<_>>().join(", ")
        )));
    }
    Ok(columns)
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}').trim();
    name.to_ascii_lowercase().replace([' ', '-'], "_")
}

/// `Ok(None)` means a blank grid row (no task or no era).
fn parse_row(record: &StringRecord, columns: &HashMap<&'static str, usize>) -> Result<Option<Role>, String> {
    let task = cell(record, columns, "task");
    let era = cell(record, columns, "era");
    if task.is_empty() || era.is_empty() {
        return Ok(None);
    }

    Ok(Some(Role {
        task: task.to_string(),
        era: era.to_string(),
        start_year: parse_year(cell(record, columns, "start_year"), "start_year")?,
        end_year: parse_year(cell(record, columns, "end_year"), "end_year")?,
        days_per_week: parse_amount(cell(record, columns, "days_per_week"), "days_per_week")?,
        hours_per_day: parse_amount(cell(record, columns, "hours_per_day"), "hours_per_day")?,
        respirator_used: parse_flag(cell(record, columns, "rpe"), "rpe")?,
        lev_used: parse_flag(cell(record, columns, "lev"), "lev")?,
    }))
}

fn cell<'a>(record: &'a StringRecord, columns: &HashMap<&'static str, usize>, name: &str) -> &'a str {
    columns
        .get(name)
        .and_then(|&idx| record.get(idx))
        .map(str::trim)
        .unwrap_or("")
}

/// Calendar years accepted by every front end.
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

/// Integer years in `YEAR_RANGE`; integral floats such as `1985.0` are accepted.
pub fn parse_year(s: &str, column: &str) -> Result<i32, String> {
    if s.is_empty() {
        return Err(format!("Missing value: `{column}`"));
    }
    let year = match s.parse::<i32>() {
        Ok(v) => v,
        Err(_) => match s.parse::<f64>() {
            Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() <= f64::from(i32::MAX) => v as i32,
            _ => return Err(format!("Invalid `{column}` '{s}': expected a whole year")),
        },
    };
    if !YEAR_RANGE.contains(&year) {
        return Err(format!(
            "Invalid `{column}` '{s}': year must be between {} and {}",
            YEAR_RANGE.start(),
            YEAR_RANGE.end()
        ));
    }
    Ok(year)
}

/// Non-negative finite number (days per week, hours per day).
pub fn parse_amount(s: &str, column: &str) -> Result<f64, String> {
    if s.is_empty() {
        return Err(format!("Missing value: `{column}`"));
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        Ok(_) => Err(format!("Invalid `{column}` '{s}': expected a non-negative number")),
        Err(_) => Err(format!("Invalid `{column}` '{s}': expected a number")),
    }
}

/// Spreadsheet-style boolean. Empty cells are `false`.
pub fn parse_flag(s: &str, column: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "" | "false" | "no" | "n" | "0" => Ok(false),
        "true" | "yes" | "y" | "1" => Ok(true),
        _ => Err(format!("Invalid `{column}` '{s}': expected true/false")),
    }
}
