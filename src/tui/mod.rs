//! Ratatui-based role grid.
//!
//! The TUI shows the work history as an editable table and renders totals,
//! latency and dose bars underneath. Every edit re-runs the shared estimator.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};

use crate::domain::{BandSource, Role};
use crate::error::AppError;
use crate::io::sheet::write_role_sheet;
use crate::plot::render_dose_bars;
use crate::report::{format_total_range, latency_note, write_markdown_report};

pub mod grid;

use grid::{Column, RoleGrid};

/// Save target when no sheet was loaded.
const DEFAULT_SHEET_PATH: &str = "roles.csv";

/// Start the TUI with the given roles.
pub fn run(roles: Vec<Role>, current_year: i32, sheet_path: Option<PathBuf>) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| AppError::terminal(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(roles, current_year, sheet_path);
    tracing::info!(roles = app.grid.roles.len(), current_year, "starting role grid");
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::terminal(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    grid: RoleGrid,
    editing: Option<String>,
    status: String,
    sheet_path: PathBuf,
    table_state: TableState,
}

impl App {
    fn new(roles: Vec<Role>, current_year: i32, sheet_path: Option<PathBuf>) -> Self {
        Self {
            grid: RoleGrid::new(roles, current_year),
            editing: None,
            status: "Ready.".to_string(),
            sheet_path: sheet_path.unwrap_or_else(|| PathBuf::from(DEFAULT_SHEET_PATH)),
            table_state: TableState::default(),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::terminal(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::terminal(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::terminal(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing.is_some() {
            self.handle_edit_key(code);
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => self.grid.move_row(-1),
            KeyCode::Down => self.grid.move_row(1),
            KeyCode::Left => self.grid.move_col(-1),
            KeyCode::Right | KeyCode::Tab => self.grid.move_col(1),
            KeyCode::Enter => {
                let column = self.grid.column();
                if column.is_flag() {
                    self.grid.cycle_cell(true);
                } else if let Some(role) = self.grid.selected() {
                    self.editing = Some(column.value(role));
                    self.status = format!("Editing {}. Enter to apply, Esc to cancel.", column.title());
                } else {
                    self.status = "No rows. Press `a` to add one.".to_string();
                }
            }
            KeyCode::Char(' ') => {
                if !self.grid.cycle_cell(true) {
                    self.status = "Press Enter to type a value for this column.".to_string();
                }
            }
            KeyCode::Backspace => {
                self.grid.cycle_cell(false);
            }
            KeyCode::Char('a') => {
                self.grid.add_row();
                self.status = format!("Added role {}.", self.grid.roles.len());
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if self.grid.delete_row() {
                    self.status = "Deleted role.".to_string();
                }
            }
            KeyCode::Char('e') => {
                self.status = match write_markdown_report(None, &self.grid.run.roles, &self.grid.run.result) {
                    Ok(path) => format!("Wrote report: {}", path.display()),
                    Err(err) => format!("Report failed: {err}"),
                };
            }
            KeyCode::Char('w') => {
                self.status = match write_role_sheet(&self.sheet_path, &self.grid.roles) {
                    Ok(()) => format!("Saved {} role(s) to {}", self.grid.roles.len(), self.sheet_path.display()),
                    Err(err) => format!("Save failed: {err}"),
                };
            }
            _ => {}
        }
        false
    }

    fn handle_edit_key(&mut self, code: KeyCode) {
        let Some(buffer) = self.editing.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc => {
                self.editing = None;
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => {
                let text = std::mem::take(buffer);
                self.editing = None;
                self.status = match self.grid.set_cell(&text) {
                    Ok(()) => "Updated.".to_string(),
                    Err(message) => message,
                };
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) => buffer.push(c),
            _ => {}
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let result = &self.grid.run.result;
        let lines = vec![
            Line::from(vec![
                Span::styled("exposure", Style::default().fg(Color::Cyan)),
                Span::raw(" — asbestos exposure estimator (educational)"),
            ]),
            Line::from(Span::styled(
                format!(
                    "Cumulative exposure: {} | roles: {} | year: {}",
                    format_total_range(result.total_low, result.total_high),
                    result.summaries.len(),
                    self.grid.current_year
                ),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                latency_note(result.latency_years),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let bars_height = (self.grid.roles.len() as u16).saturating_add(3).min(12);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(bars_height), Constraint::Length(4)])
            .split(area);

        self.draw_table(frame, chunks[0]);
        self.draw_bars(frame, chunks[1]);
        self.draw_disclaimer(frame, chunks[2]);
    }

    fn draw_table(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let header = Row::new(
            Column::ALL
                .iter()
                .map(|c| Cell::from(c.title()))
                .chain(["dose (f/ml·yr)", "band"].into_iter().map(Cell::from)),
        )
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

        self.table_state.select((!self.grid.roles.is_empty()).then_some(self.grid.row));

        let (sel_row, sel_col) = (self.grid.row, self.grid.col);
        let editing = self.editing.as_deref();
        let summaries = &self.grid.run.result.summaries;
        let rows: Vec<Row> = self
            .grid
            .roles
            .iter()
            .enumerate()
            .map(|(r_idx, role)| {
                let mut cells: Vec<Cell> = Column::ALL
                    .iter()
                    .enumerate()
                    .map(|(c_idx, column)| {
                        let selected = r_idx == sel_row && c_idx == sel_col;
                        let text = match (editing, selected) {
                            (Some(buffer), true) => format!("{buffer}▏"),
                            _ => column.value(role),
                        };
                        let style = if selected {
                            Style::default().fg(Color::Black).bg(Color::White)
                        } else {
                            Style::default()
                        };
                        Cell::from(text).style(style)
                    })
                    .collect();

                if let Some(s) = summaries.get(r_idx) {
                    cells.push(Cell::from(crate::report::fmt_band(s.dose)));
                    let band_style = match s.band_source {
                        BandSource::Table => Style::default().fg(Color::Gray),
                        _ => Style::default().fg(Color::Yellow),
                    };
                    cells.push(Cell::from(s.band_source.display_name()).style(band_style));
                }
                Row::new(cells)
            })
            .collect();

        let widths = [
            Constraint::Length(24),
            Constraint::Length(10),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(16),
            Constraint::Length(12),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().title("Roles").borders(Borders::ALL));

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn draw_bars(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let width = (area.width as usize).saturating_sub(40).max(10);
        let bars = render_dose_bars(&self.grid.run.result, width);
        let p = Paragraph::new(bars).block(Block::default().title("Dose ranges").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_disclaimer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let p = Paragraph::new(self.grid.run.result.disclaimer.as_str())
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::TOP));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓/←/→ move  Enter edit  Space cycle  a add  x delete  w save  e report  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}
