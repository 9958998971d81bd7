//! `exposure-estimator` library crate.
//!
//! Estimates cumulative occupational asbestos exposure (f/ml·years) from a
//! work history, for educational, non-diagnostic display.
//!
//! The binary (`exposure`) is a thin wrapper around this library so that:
//!
//! - the estimator is testable without spawning processes
//! - every front end (flags, role sheets, free text, the terminal grid) calls
//!   the same `estimator` module

pub mod app;
pub mod cli;
pub mod config;
pub mod describe;
pub mod domain;
pub mod error;
pub mod estimator;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
pub mod tui;
