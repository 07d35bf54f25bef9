use itertools::Itertools;
use std::fmt;

use crate::agenda::Agenda;
use crate::calendar::{CalendarCursor, DateKey, WeekStart};
use crate::provider::Event;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayCell<'a> {
    pub day: u32,
    pub key: DateKey,
    pub events: &'a [Event],
    pub is_today: bool,
    pub is_selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthGrid<'a> {
    pub label: String,
    pub weekday_labels: [&'static str; 7],
    pub leading_blanks: u32,
    pub cells: Vec<DayCell<'a>>,
}

pub fn month_grid<'a>(
    cursor: &CalendarCursor,
    week_start: WeekStart,
    agenda: &'a Agenda,
    today: DateKey,
    selected: DateKey,
) -> MonthGrid<'a> {
    let metadata = cursor.metadata(week_start);

    let cells = (1..=metadata.days_in_month)
        .filter_map(|day| cursor.day(day).map(|date| (day, DateKey::from(date))))
        .map(|(day, key)| DayCell {
            day,
            key,
            events: agenda.events_of_day(&key),
            is_today: key == today,
            is_selected: key == selected,
        })
        .collect();

    MonthGrid {
        label: metadata.label,
        weekday_labels: week_start.labels(),
        leading_blanks: metadata.first_weekday_offset,
        cells,
    }
}

impl<'a> MonthGrid<'a> {
    pub const COLUMNS: usize = 7;

    /// Week rows; `None` marks the padding before the first day.
    pub fn rows(&self) -> Vec<Vec<Option<&DayCell<'a>>>> {
        std::iter::repeat(None)
            .take(self.leading_blanks as usize)
            .chain(self.cells.iter().map(Some))
            .collect::<Vec<_>>()
            .chunks(Self::COLUMNS)
            .map(|row| row.to_vec())
            .collect()
    }

    pub fn cell(&self, day: u32) -> Option<&DayCell<'a>> {
        self.cells.iter().find(|cell| cell.day == day)
    }

    pub fn selected_day(&self) -> Option<u32> {
        self.cells
            .iter()
            .find(|cell| cell.is_selected)
            .map(|cell| cell.day)
    }
}

impl fmt::Display for MonthGrid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const CELL_WIDTH: usize = 5;

        writeln!(
            f,
            "{:^width$}",
            self.label,
            width = CELL_WIDTH * Self::COLUMNS
        )?;
        for head in self.weekday_labels.iter() {
            write!(f, "{:>width$}", head, width = CELL_WIDTH)?;
        }

        for row in self.rows() {
            writeln!(f)?;
            for cell in row {
                match cell {
                    Some(cell) => {
                        let today = if cell.is_today { '*' } else { ' ' };
                        let selected = if cell.is_selected { '>' } else { ' ' };
                        let busy = if cell.events.is_empty() { ' ' } else { '+' };
                        write!(f, "{}{}{:>2}{}", today, selected, cell.day, busy)?;
                    }
                    None => write!(f, "{:width$}", "", width = CELL_WIDTH)?,
                }
            }
        }

        if self.cells.iter().any(|cell| !cell.events.is_empty()) {
            writeln!(f)?;
        }
        for cell in self.cells.iter().filter(|cell| !cell.events.is_empty()) {
            writeln!(f)?;
            write!(
                f,
                "{}: {}",
                cell.key,
                cell.events
                    .iter()
                    .map(|event| format!("[{}]", event.title()))
                    .join(" ")
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::SequentialIds;
    use chrono::Month;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    #[test]
    fn february_2024_layout() {
        let agenda = Agenda::new();
        let grid = month_grid(
            &CalendarCursor::new(Month::February, 2024),
            WeekStart::Sunday,
            &agenda,
            key("2024-02-14"),
            key("2024-02-29"),
        );

        assert_eq!(grid.label, "February 2024");
        assert_eq!(grid.cells.len(), 29);
        // 2024-02-01 is a Thursday
        assert_eq!(grid.leading_blanks, 4);
        assert!(grid.cell(14).unwrap().is_today);
        assert_eq!(grid.selected_day(), Some(29));

        let rows = grid.rows();
        assert_eq!(rows.len(), 5);
        assert!(rows[0][..4].iter().all(Option::is_none));
        assert_eq!(rows[0][4].map(|cell| cell.day), Some(1));
        assert_eq!(rows[4].len(), 5);
        assert!(!grid.to_string().ends_with('\n'));
    }

    #[test]
    fn cells_carry_their_events() {
        let mut ids = SequentialIds::default();
        let agenda = Agenda::new()
            .add_event(key("2024-05-01"), "Standup", &mut ids)
            .unwrap();
        let grid = month_grid(
            &CalendarCursor::new(Month::May, 2024),
            WeekStart::Monday,
            &agenda,
            key("2024-01-01"),
            key("2024-01-01"),
        );

        assert_eq!(grid.weekday_labels[0], "Mon");
        assert_eq!(grid.cell(1).unwrap().events.len(), 1);
        assert!(grid.cell(2).unwrap().events.is_empty());
        assert_eq!(grid.selected_day(), None);
        assert!(grid.cells.iter().all(|cell| !cell.is_today));
    }

    #[test]
    fn renders_as_text() {
        let mut ids = SequentialIds::default();
        let agenda = Agenda::new()
            .add_event(key("2024-05-01"), "Standup", &mut ids)
            .unwrap();
        let grid = month_grid(
            &CalendarCursor::new(Month::May, 2024),
            WeekStart::Sunday,
            &agenda,
            key("2024-05-02"),
            key("2024-05-01"),
        );
        let text = grid.to_string();

        assert!(text.contains("May 2024"));
        assert!(text.contains(" > 1+"));
        assert!(text.contains("*  2 "));
        assert!(text.contains("\n\n2024-05-01: [Standup]"));
        assert!(text.ends_with("2024-05-01: [Standup]"));

        let agenda = agenda.add_event(key("2024-05-01"), "Lunch", &mut ids).unwrap();
        let grid = month_grid(
            &CalendarCursor::new(Month::May, 2024),
            WeekStart::Sunday,
            &agenda,
            key("2024-05-02"),
            key("2024-05-01"),
        );
        assert!(grid.to_string().ends_with("2024-05-01: [Standup] [Lunch]"));
    }
}
