//! Editable role grid state.
//!
//! Everything here is terminal-independent so the editing rules can be tested
//! without a TTY. The widget code in `tui::mod` only reads this state.

use crate::app::pipeline::{RunOutput, run_estimate};
use crate::domain::{Era, Role, Task};
use crate::io::sheet::{parse_amount, parse_flag, parse_year};

/// Grid columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Task,
    Era,
    StartYear,
    EndYear,
    DaysPerWeek,
    HoursPerDay,
    Rpe,
    Lev,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::Task,
        Column::Era,
        Column::StartYear,
        Column::EndYear,
        Column::DaysPerWeek,
        Column::HoursPerDay,
        Column::Rpe,
        Column::Lev,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Column::Task => "task",
            Column::Era => "era",
            Column::StartYear => "start",
            Column::EndYear => "end",
            Column::DaysPerWeek => "days/wk",
            Column::HoursPerDay => "hrs/day",
            Column::Rpe => "rpe",
            Column::Lev => "lev",
        }
    }

    pub fn is_flag(self) -> bool {
        matches!(self, Column::Rpe | Column::Lev)
    }

    /// Current cell text for a role.
    pub fn value(self, role: &Role) -> String {
        match self {
            Column::Task => role.task.clone(),
            Column::Era => role.era.clone(),
            Column::StartYear => role.start_year.to_string(),
            Column::EndYear => role.end_year.to_string(),
            Column::DaysPerWeek => role.days_per_week.to_string(),
            Column::HoursPerDay => role.hours_per_day.to_string(),
            Column::Rpe => role.respirator_used.to_string(),
            Column::Lev => role.lev_used.to_string(),
        }
    }

    /// Parse `text` into this column of `role`. On error the role is unchanged.
    pub fn apply(self, role: &mut Role, text: &str) -> Result<(), String> {
        let text = text.trim();
        match self {
            Column::Task => {
                if text.is_empty() {
                    return Err("Task cannot be empty.".to_string());
                }
                role.task = text.to_string();
            }
            Column::Era => {
                if text.is_empty() {
                    return Err("Era cannot be empty.".to_string());
                }
                role.era = text.to_string();
            }
            Column::StartYear => role.start_year = parse_year(text, "start_year")?,
            Column::EndYear => role.end_year = parse_year(text, "end_year")?,
            Column::DaysPerWeek => role.days_per_week = parse_amount(text, "days_per_week")?,
            Column::HoursPerDay => role.hours_per_day = parse_amount(text, "hours_per_day")?,
            Column::Rpe => role.respirator_used = parse_flag(text, "rpe")?,
            Column::Lev => role.lev_used = parse_flag(text, "lev")?,
        }
        Ok(())
    }

    /// Step a categorical or boolean cell. Returns `false` for free-form columns.
    pub fn cycle(self, role: &mut Role, forward: bool) -> bool {
        match self {
            Column::Task => {
                let next = match Task::from_label(&role.task) {
                    Some(t) if forward => t.next(),
                    Some(t) => t.prev(),
                    None => Task::ALL[0],
                };
                role.task = next.label().to_string();
            }
            Column::Era => {
                let next = match Era::from_label(&role.era) {
                    Some(e) if forward => e.next(),
                    Some(e) => e.prev(),
                    None => Era::ALL[0],
                };
                role.era = next.label().to_string();
            }
            Column::Rpe => role.respirator_used = !role.respirator_used,
            Column::Lev => role.lev_used = !role.lev_used,
            _ => return false,
        }
        true
    }
}

/// The roles being edited plus cursor and the latest estimate.
#[derive(Debug, Clone)]
pub struct RoleGrid {
    pub roles: Vec<Role>,
    pub row: usize,
    pub col: usize,
    pub current_year: i32,
    pub run: RunOutput,
}

impl RoleGrid {
    pub fn new(roles: Vec<Role>, current_year: i32) -> Self {
        let run = run_estimate(roles.clone(), current_year);
        Self {
            roles,
            row: 0,
            col: 0,
            current_year,
            run,
        }
    }

    pub fn column(&self) -> Column {
        Column::ALL[self.col.min(Column::ALL.len() - 1)]
    }

    pub fn selected(&self) -> Option<&Role> {
        self.roles.get(self.row)
    }

    pub fn move_row(&mut self, delta: isize) {
        if self.roles.is_empty() {
            self.row = 0;
            return;
        }
        let max = self.roles.len() as isize - 1;
        self.row = (self.row as isize + delta).clamp(0, max) as usize;
    }

    pub fn move_col(&mut self, delta: isize) {
        let max = Column::ALL.len() as isize - 1;
        self.col = (self.col as isize + delta).clamp(0, max) as usize;
    }

    /// Append a default row and select it.
    pub fn add_row(&mut self) {
        self.roles.push(Role::example());
        self.row = self.roles.len() - 1;
        self.recompute();
    }

    pub fn delete_row(&mut self) -> bool {
        if self.row >= self.roles.len() {
            return false;
        }
        self.roles.remove(self.row);
        if self.row >= self.roles.len() && self.row > 0 {
            self.row -= 1;
        }
        self.recompute();
        true
    }

    /// Write `text` into the selected cell.
    pub fn set_cell(&mut self, text: &str) -> Result<(), String> {
        let column = self.column();
        let role = self
            .roles
            .get_mut(self.row)
            .ok_or_else(|| "No row selected. Press `a` to add one.".to_string())?;
        column.apply(role, text)?;
        self.recompute();
        Ok(())
    }

    pub fn cycle_cell(&mut self, forward: bool) -> bool {
        let column = self.column();
        let Some(role) = self.roles.get_mut(self.row) else {
            return false;
        };
        let changed = column.cycle(role, forward);
        if changed {
            self.recompute();
        }
        changed
    }

    fn recompute(&mut self) {
        self.run = run_estimate(self.roles.clone(), self.current_year);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> RoleGrid {
        RoleGrid::new(vec![Role::example()], 2025)
    }

    #[test]
    fn editing_a_cell_recomputes_totals() {
        let mut g = grid();
        g.col = 5; // hours/day
        g.set_cell("8").unwrap();
        assert_eq!(g.roles[0].hours_per_day, 8.0);
        assert!((g.run.result.total_low - 0.25).abs() < 1e-12);
        assert!((g.run.result.total_high - 1.0).abs() < 1e-12);
    }

    #[test]
    fn bad_cell_text_leaves_role_unchanged() {
        let mut g = grid();
        g.col = 2;
        let err = g.set_cell("nineteen").unwrap_err();
        assert!(err.contains("start_year"));
        assert_eq!(g.roles[0].start_year, 1985);
    }

    #[test]
    fn out_of_range_year_cell_is_rejected() {
        let mut g = grid();
        g.col = 2;
        let err = g.set_cell("-2147483648").unwrap_err();
        assert!(err.contains("between 1 and 9999"));
        assert_eq!(g.roles[0].start_year, 1985);
    }

    #[test]
    fn cycling_categories_and_flags() {
        let mut g = grid();
        assert!(g.cycle_cell(true));
        assert_eq!(g.roles[0].task, "lagging/insulation");
        assert!(g.cycle_cell(false));
        assert_eq!(g.roles[0].task, "bystander");

        g.col = 1;
        g.cycle_cell(true);
        assert_eq!(g.roles[0].era, "2000+");

        g.col = 6;
        g.cycle_cell(true);
        assert!(g.roles[0].respirator_used);

        g.col = 2;
        assert!(!g.cycle_cell(true));
    }

    #[test]
    fn unknown_task_cycles_to_first_known() {
        let mut g = grid();
        g.set_cell("welding").unwrap();
        g.cycle_cell(true);
        assert_eq!(g.roles[0].task, Task::ALL[0].label());
    }

    #[test]
    fn add_and_delete_rows() {
        let mut g = grid();
        g.set_cell("garage/brakes").unwrap();
        g.add_row();
        assert_eq!(g.roles.len(), 2);
        assert_eq!(g.row, 1);
        assert_eq!(g.roles[0].task, "garage/brakes");
        assert_eq!(g.roles[1], Role::example());
        assert_eq!(g.run.result.summaries.len(), 2);

        assert!(g.delete_row());
        assert!(g.delete_row());
        assert!(g.roles.is_empty());
        assert_eq!(g.run.result.latency_years, None);
        assert!(!g.delete_row());
        assert!(g.set_cell("x").is_err());
    }

    #[test]
    fn cursor_is_clamped() {
        let mut g = grid();
        g.move_row(5);
        assert_eq!(g.row, 0);
        g.move_col(-3);
        assert_eq!(g.col, 0);
        g.move_col(20);
        assert_eq!(g.column(), Column::Lev);
    }

    #[test]
    fn column_values_round_trip_through_apply() {
        let mut role = Role::example();
        for column in Column::ALL {
            let text = column.value(&role);
            column.apply(&mut role, &text).unwrap();
        }
        assert_eq!(role, Role::example());
    }
}
