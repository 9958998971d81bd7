//! Interactive role sheet picker.
//!
//! Kept separate from clap parsing: `exposure sheet` without `-f` lists the
//! `*.csv` files under the current directory and asks which one to use.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Directory recursion depth when looking for sheets.
const DEFAULT_SEARCH_DEPTH: usize = 3;

/// Prompt on stdin/stdout for a role sheet.
pub fn prompt_for_sheet_path() -> Result<PathBuf, AppError> {
    let files = discover_csv_files(Path::new("."));
    let stdin = io::stdin();
    let stdout = io::stdout();
    choose_sheet(&files, &mut stdin.lock(), &mut stdout.lock())
}

/// Selection loop over an arbitrary input/output pair.
///
/// Accepts a list number or an explicit path; `q` cancels.
pub fn choose_sheet<R: BufRead, W: Write>(
    files: &[PathBuf],
    input: &mut R,
    output: &mut W,
) -> Result<PathBuf, AppError> {
    if files.is_empty() {
        return Err(AppError::input(
            "No .csv role sheets found. Provide one with `exposure sheet -f <roles.csv>`.",
        ));
    }

    let io_err = |e: io::Error| AppError::input(format!("Failed to prompt for a role sheet: {e}"));

    writeln!(output, "Found {} CSV file(s):", files.len()).map_err(io_err)?;
    for (idx, path) in files.iter().enumerate() {
        writeln!(output, "{:>3}) {}", idx + 1, pretty_path(path)).map_err(io_err)?;
    }

    loop {
        write!(output, "Select a sheet by number (1-{}) or type a path (q to quit): ", files.len())
            .map_err(io_err)?;
        output.flush().map_err(io_err)?;

        let mut line = String::new();
        if input.read_line(&mut line).map_err(io_err)? == 0 {
            return Err(AppError::input(
                "No input received. Provide a role sheet with `exposure sheet -f <roles.csv>`.",
            ));
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Err(AppError::input("Canceled."));
        }

        if let Ok(choice) = line.parse::<usize>() {
            if (1..=files.len()).contains(&choice) {
                return validate_sheet_path(&files[choice - 1]);
            }
            writeln!(output, "Invalid choice: {choice}.").map_err(io_err)?;
            continue;
        }

        match validate_sheet_path(Path::new(line)) {
            Ok(path) => return Ok(path),
            Err(err) => writeln!(output, "{err}").map_err(io_err)?,
        }
    }
}

/// The path must be an existing `.csv` file.
pub fn validate_sheet_path(path: &Path) -> Result<PathBuf, AppError> {
    if !path.is_file() {
        return Err(AppError::input(format!("Role sheet not found: {}", path.display())));
    }
    if !has_csv_extension(path) {
        return Err(AppError::input(format!(
            "Expected a .csv role sheet (got: {}).",
            path.display()
        )));
    }
    Ok(path.to_path_buf())
}

/// `*.csv` files under `root`, sorted for a stable listing.
pub fn discover_csv_files(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    walk(root, 0, &mut out);
    out.sort_by_key(|p| pretty_path(p));
    out
}

fn walk(dir: &Path, depth: usize, out: &mut Vec<PathBuf>) {
    if depth > DEFAULT_SEARCH_DEPTH {
        return;
    }
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
            if !matches!(name, ".git" | "target" | "node_modules" | "reports") {
                walk(&path, depth + 1, out);
            }
        } else if file_type.is_file() && has_csv_extension(&path) {
            out.push(path);
        }
    }
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn pretty_path(path: &Path) -> String {
    path.strip_prefix("./").unwrap_or(path).display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("exposure_picker_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("b.csv"), "task\n").unwrap();
        fs::write(dir.join("nested").join("a.CSV"), "task\n").unwrap();
        fs::write(dir.join("notes.txt"), "x").unwrap();
        dir
    }

    #[test]
    fn discovers_only_csv_files() {
        let dir = scratch_dir("discover");
        let files = discover_csv_files(&dir);
        let _ = fs::remove_dir_all(&dir);
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| has_csv_extension(p)));
    }

    #[test]
    fn choose_by_number_after_bad_input() {
        let dir = scratch_dir("choose");
        let files = discover_csv_files(&dir);
        let mut input = "9\n2\n".as_bytes();
        let mut output = Vec::new();
        let chosen = choose_sheet(&files, &mut input, &mut output).unwrap();
        let _ = fs::remove_dir_all(&dir);

        assert_eq!(chosen, files[1]);
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Found 2 CSV file(s):"));
        assert!(shown.contains("Invalid choice: 9."));
    }

    #[test]
    fn quit_and_eof_cancel() {
        let files = vec![PathBuf::from("roles.csv")];
        let err = choose_sheet(&files, &mut "q\n".as_bytes(), &mut Vec::new()).unwrap_err();
        assert_eq!(err.message(), "Canceled.");
        assert!(choose_sheet(&files, &mut "".as_bytes(), &mut Vec::new()).is_err());
    }

    #[test]
    fn no_files_is_an_error() {
        assert!(choose_sheet(&[], &mut "1\n".as_bytes(), &mut Vec::new()).is_err());
    }
}
