use std::fmt::{Display, Write};
use unsegen::base::*;
use unsegen::widget::*;

use super::{Context, Theme};
use crate::grid::{self, MonthGrid};

struct DayCell<'a> {
    day_num: u32,
    selected: bool,
    is_today: bool,
    has_events: bool,
    theme: &'a Theme,
}

impl<'a> DayCell<'a> {
    const CELL_WIDTH: usize = 5;

    fn new(cell: &grid::DayCell, theme: &'a Theme) -> Self {
        DayCell {
            day_num: cell.day,
            selected: cell.is_selected,
            is_today: cell.is_today,
            has_events: !cell.events.is_empty(),
            theme,
        }
    }

    fn style(&self) -> StyleModifier {
        let theme = self.theme;

        if self.selected {
            theme.focus_day_style
        } else if self.is_today {
            theme.today_day_style.format(theme.today_day_text_style)
        } else {
            theme.day_style.format(theme.day_text_style)
        }
    }
}

impl Display for DayCell<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arg_today = if self.is_today {
            self.theme.today_day_char.unwrap_or(' ')
        } else {
            ' '
        };

        let arg_focus = if self.selected {
            self.theme.focus_day_char.unwrap_or(' ')
        } else {
            ' '
        };

        let arg_events = if self.has_events { '+' } else { ' ' };

        write!(
            f,
            "{}{}{:>2}{}",
            arg_today, arg_focus, self.day_num, arg_events
        )
    }
}

pub struct CalendarWindow<'a> {
    context: &'a Context,
}

impl<'a> CalendarWindow<'a> {
    const ROWS: usize = 6;
    const LABEL_ROWS: usize = 1;
    const HEADER_ROWS: usize = 1;

    pub fn new(context: &'a Context) -> Self {
        CalendarWindow { context }
    }

    fn width() -> usize {
        MonthGrid::COLUMNS * DayCell::CELL_WIDTH
    }
}

impl Widget for CalendarWindow<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::exact(Self::width()),
            height: RowDemand::exact(Self::LABEL_ROWS + Self::HEADER_ROWS + Self::ROWS),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = self.context.theme();
        let grid = self.context.calendar().grid();

        let mut cursor = Cursor::new(&mut window).style_modifier(
            theme
                .month_header_style
                .format(theme.month_header_text_style),
        );

        let _ = write!(&mut cursor, "{:^width$}", grid.label, width = Self::width());
        cursor.wrap_line();

        cursor.set_style_modifier(theme.month_header_style);
        for head in grid.weekday_labels.iter() {
            let _ = write!(
                &mut cursor,
                "{:>width$}",
                head,
                width = DayCell::CELL_WIDTH
            );
        }
        cursor.wrap_line();

        for row in grid.rows() {
            for cell in row {
                match cell {
                    Some(cell) => {
                        let cell = DayCell::new(cell, theme);
                        cursor.set_style_modifier(cell.style());
                        let _ = write!(&mut cursor, "{}", cell);
                    }
                    None => {
                        cursor.set_style_modifier(theme.day_style);
                        let _ = write!(&mut cursor, "{:width$}", "", width = DayCell::CELL_WIDTH);
                    }
                }
            }
            cursor.wrap_line();
        }
    }
}
