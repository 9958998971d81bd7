//! Command-line parsing for the exposure estimator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the estimation code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::io::sheet::{parse_amount, parse_year};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "exposure",
    version,
    about = "Educational asbestos exposure estimator (cumulative f/ml·years)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate a single role given as flags.
    Estimate(FormArgs),
    /// Estimate every role in a CSV role sheet.
    Sheet(SheetArgs),
    /// Estimate a role parsed from a plain-language description.
    Describe(DescribeArgs),
    /// Print a previously exported result JSON.
    Show(ShowArgs),
    /// List the exposure band table and known categories.
    Bands,
    /// Launch the interactive role grid.
    ///
    /// This uses the same estimator as the other commands, but lets you edit
    /// roles in a terminal table and see totals update live.
    Tui(TuiArgs),
}

/// One role, field by field.
#[derive(Debug, Args, Clone)]
pub struct FormArgs {
    /// Task category (e.g. "lagging/insulation", "bystander").
    #[arg(short = 't', long, default_value = "bystander")]
    pub task: String,

    /// Era category ("pre-1980", "1980-1999", "2000+").
    #[arg(short = 'e', long, default_value = "1980-1999")]
    pub era: String,

    /// First year of exposure.
    #[arg(long = "start", value_parser = year_arg)]
    pub start_year: i32,

    /// Last year of exposure.
    #[arg(long = "end", value_parser = year_arg)]
    pub end_year: i32,

    /// Days worked per week.
    #[arg(long = "days", default_value_t = 5.0, value_parser = amount_arg)]
    pub days_per_week: f64,

    /// Hours exposed per working day.
    #[arg(long = "hours", default_value_t = 8.0, value_parser = amount_arg)]
    pub hours_per_day: f64,

    /// A respirator was worn consistently.
    #[arg(long)]
    pub rpe: bool,

    /// Local exhaust ventilation was in use.
    #[arg(long)]
    pub lev: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Options for role sheets.
#[derive(Debug, Args, Clone)]
pub struct SheetArgs {
    /// Role sheet CSV. Prompts for one under the current directory if omitted.
    #[arg(short = 'f', long, value_name = "CSV")]
    pub file: Option<PathBuf>,

    /// List rows that were skipped and why.
    #[arg(long)]
    pub show_skipped: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Options for free-text input.
#[derive(Debug, Args, Clone)]
pub struct DescribeArgs {
    /// Description of the work, e.g. "lagging pipes 1968-1974, no mask".
    #[arg(required = true, num_args = 1.., value_name = "TEXT")]
    pub text: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Options for re-displaying a saved result.
#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    /// Result JSON produced by `--export-json`.
    #[arg(long, value_name = "JSON")]
    pub result: PathBuf,

    /// Bar width (columns).
    #[arg(long, default_value_t = 40)]
    pub width: usize,
}

/// Options for the interactive grid.
#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    /// Role sheet to load into the grid (also the save target for `w`).
    #[arg(short = 'f', long, value_name = "CSV")]
    pub file: Option<PathBuf>,

    /// Calendar year used for latency (default: EXPOSURE_CURRENT_YEAR or today).
    #[arg(long)]
    pub current_year: Option<i32>,
}

/// Output and export options shared by the estimating commands.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Calendar year used for latency (default: EXPOSURE_CURRENT_YEAR or today).
    #[arg(long)]
    pub current_year: Option<i32>,

    /// Print the result as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Disable the dose bar chart.
    #[arg(long)]
    pub no_bars: bool,

    /// Bar width (columns).
    #[arg(long, default_value_t = 40)]
    pub width: usize,

    /// Export per-role summaries to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the full result (roles + estimate) to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    /// Write a printable Markdown report (default: reports/exposure_report_<time>.md).
    #[arg(long, value_name = "MD", num_args = 0..=1)]
    pub report: Option<Option<PathBuf>>,
}

fn year_arg(s: &str) -> Result<i32, String> {
    parse_year(s.trim(), "year")
}

fn amount_arg(s: &str) -> Result<f64, String> {
    parse_amount(s.trim(), "value")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_flags() {
        let cli = Cli::parse_from([
            "exposure", "estimate", "--task", "garage/brakes", "--era", "pre-1980", "--start", "1972",
            "--end", "1979", "--hours", "4", "--rpe", "--report",
        ]);
        let Command::Estimate(args) = cli.command else {
            panic!("expected estimate");
        };
        assert_eq!(args.task, "garage/brakes");
        assert_eq!(args.start_year, 1972);
        assert_eq!(args.days_per_week, 5.0);
        assert_eq!(args.hours_per_day, 4.0);
        assert!(args.rpe);
        assert!(!args.lev);
        assert_eq!(args.output.report, Some(None));
    }

    #[test]
    fn negative_hours_rejected() {
        let res = Cli::try_parse_from([
            "exposure", "estimate", "--start", "1972", "--end", "1979", "--hours", "-2",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn implausible_years_rejected() {
        for start in ["0", "10000", "-2147483648"] {
            let res = Cli::try_parse_from(["exposure", "estimate", "--start", start, "--end", "1990"]);
            assert!(res.is_err(), "start {start} should be rejected");
        }
    }

    #[test]
    fn describe_collects_words() {
        let cli = Cli::parse_from(["exposure", "describe", "lagging", "1970s", "--current-year", "2025"]);
        let Command::Describe(args) = cli.command else {
            panic!("expected describe");
        };
        assert_eq!(args.text, vec!["lagging", "1970s"]);
        assert_eq!(args.output.current_year, Some(2025));
    }
}
