//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and environment settings
//! - installs logging
//! - turns each front end's input into roles
//! - runs the shared estimate pipeline
//! - prints results and writes optional exports

use clap::Parser;

use crate::cli::{Command, DescribeArgs, FormArgs, OutputArgs, SheetArgs, ShowArgs, TuiArgs};
use crate::config::Settings;
use crate::domain::{Era, Role, Task};
use crate::error::AppError;
use crate::estimator::{BASE_BANDS, DEFAULT_BAND};

pub mod pipeline;

use pipeline::{ExportTargets, RunOutput};

/// Entry point for the `exposure` binary.
pub fn run() -> Result<(), AppError> {
    // `exposure` and `exposure -f roles.csv` behave like `exposure tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let settings = Settings::from_env()?;
    let owns_terminal = matches!(cli.command, Command::Tui(_));
    let _log_guard = crate::logging::init(&settings, owns_terminal)?;

    match cli.command {
        Command::Estimate(args) => handle_estimate(args, &settings),
        Command::Sheet(args) => handle_sheet(args, &settings),
        Command::Describe(args) => handle_describe(args, &settings),
        Command::Show(args) => handle_show(args),
        Command::Bands => {
            print!("{}", format_band_table());
            Ok(())
        }
        Command::Tui(args) => handle_tui(args, &settings),
    }
}

fn handle_estimate(args: FormArgs, settings: &Settings) -> Result<(), AppError> {
    let role = role_from_form(&args);
    let run = pipeline::run_estimate(vec![role], current_year(&args.output, settings));
    emit(&run, &args.output)
}

fn handle_sheet(args: SheetArgs, settings: &Settings) -> Result<(), AppError> {
    let path = match &args.file {
        Some(path) => crate::cli::picker::validate_sheet_path(path)?,
        None => crate::cli::picker::prompt_for_sheet_path()?,
    };
    let sheet = crate::io::load_role_sheet(&path)?;

    if !args.output.json {
        println!(
            "Sheet: {} | rows read: {} | used: {} | blank: {} | rejected: {}",
            path.display(),
            sheet.rows_read,
            sheet.rows_used(),
            sheet.rows_blank,
            sheet.row_errors.len()
        );
        if args.show_skipped {
            for err in &sheet.row_errors {
                println!("  line {}: {}", err.line, err.message);
            }
        }
        println!();
    }

    let run = pipeline::run_estimate(sheet.roles, current_year(&args.output, settings));
    emit(&run, &args.output)
}

fn handle_describe(args: DescribeArgs, settings: &Settings) -> Result<(), AppError> {
    let text = args.text.join(" ");
    let year = current_year(&args.output, settings);
    let role = crate::describe::describe(&text, year);

    if !args.output.json {
        print!("Interpreted as:\n{}\n", crate::report::format_role_inputs(std::slice::from_ref(&role)));
    }

    let run = pipeline::run_estimate(vec![role], year);
    emit(&run, &args.output)
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let saved = crate::io::read_result_json(&args.result)?;
    println!("Saved by {} at {}", saved.tool, saved.generated_at.format("%Y-%m-%d %H:%M"));
    print!("{}", crate::report::format_role_inputs(&saved.roles));
    println!();
    println!("{}", crate::report::format_estimate(&saved.result, saved.current_year));
    println!("{}", crate::plot::render_dose_bars(&saved.result, args.width));
    Ok(())
}

fn handle_tui(args: TuiArgs, settings: &Settings) -> Result<(), AppError> {
    let year = args.current_year.unwrap_or(settings.current_year);
    let roles = match &args.file {
        Some(path) => crate::io::load_role_sheet(path)?.roles,
        None => vec![Role::example()],
    };
    crate::tui::run(roles, year, args.file.clone())
}

/// Print the result (text or JSON) and write requested exports.
fn emit(run: &RunOutput, output: &OutputArgs) -> Result<(), AppError> {
    if output.json {
        let json = serde_json::to_string_pretty(&run.result)
            .map_err(|e| AppError::input(format!("Failed to serialize result: {e}")))?;
        println!("{json}");
    } else {
        println!("{}", crate::report::format_estimate(&run.result, run.current_year));
        if !output.no_bars {
            println!("{}", crate::plot::render_dose_bars(&run.result, output.width));
        }
    }

    let targets = ExportTargets {
        summaries_csv: output.export.clone(),
        result_json: output.export_json.clone(),
        report: output.report.clone(),
    };
    for path in pipeline::write_exports(run, &targets)? {
        // Keep stdout clean for `--json` consumers.
        eprintln!("Wrote {}", path.display());
    }
    Ok(())
}

pub fn role_from_form(args: &FormArgs) -> Role {
    Role {
        task: args.task.trim().to_string(),
        era: args.era.trim().to_string(),
        start_year: args.start_year,
        end_year: args.end_year,
        days_per_week: args.days_per_week,
        hours_per_day: args.hours_per_day,
        respirator_used: args.rpe,
        lev_used: args.lev,
    }
}

fn current_year(output: &OutputArgs, settings: &Settings) -> i32 {
    output.current_year.unwrap_or(settings.current_year)
}

/// Band table plus known categories, for `exposure bands`.
pub fn format_band_table() -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<24} {:<10} {:>6} {:>6}\n", "task", "era", "low", "high"));
    out.push_str(&format!("{:-<24} {:-<10} {:-<6} {:-<6}\n", "", "", "", ""));
    for (task, era, band) in BASE_BANDS.iter() {
        out.push_str(&format!("{task:<24} {era:<10} {:>6} {:>6}\n", band.low, band.high));
    }
    out.push_str(&format!(
        "{:<24} {:<10} {:>6} {:>6}\n",
        "(anything else)", "", DEFAULT_BAND.low, DEFAULT_BAND.high
    ));
    out.push_str(&format!(
        "\nTasks: {}\nEras: {}\n",
        Task::ALL.map(Task::label).join(", "),
        Era::ALL.map(Era::label).join(", ")
    ));
    out
}

/// Rewrite argv so `exposure` defaults to `exposure tui`.
///
/// Rules:
/// - `exposure`                         -> `exposure tui`
/// - `exposure -f roles.csv ...`        -> `exposure tui -f roles.csv ...`
/// - `exposure --help/--version/-h/-V`  -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    if matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help") {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
    }
    argv
}
