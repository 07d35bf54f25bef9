use chrono::Local;

use crate::config::{Config, ThemeConfig};
use crate::context::{Action, Context as CalendarContext};
use crate::provider::UuidGenerator;

use unsegen::base::style::*;
use unsegen::widget::builtin::PromptLine;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Insert,
    Command,
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub day_style: StyleModifier,
    pub day_text_style: TextFormatModifier,
    pub focus_day_style: StyleModifier,
    pub focus_day_char: Option<char>,
    pub today_day_style: StyleModifier,
    pub today_day_text_style: TextFormatModifier,
    pub today_day_char: Option<char>,
    pub month_header_style: StyleModifier,
    pub month_header_text_style: TextFormatModifier,
    pub event_style: StyleModifier,
    pub notice_style: StyleModifier,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            day_style: StyleModifier::default(),
            day_text_style: TextFormatModifier::default(),
            focus_day_style: StyleModifier::default().bg_color(Color::Blue),
            focus_day_char: None,
            today_day_style: StyleModifier::default().invert(true),
            today_day_text_style: TextFormatModifier::default().italic(true),
            today_day_char: Some('*'),
            month_header_style: StyleModifier::default().fg_color(Color::Yellow),
            month_header_text_style: TextFormatModifier::default().bold(true),
            event_style: StyleModifier::default(),
            notice_style: StyleModifier::default().fg_color(Color::LightRed),
        }
    }
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        Theme {
            today_day_char: config.today_char,
            focus_day_char: config.focus_char,
            ..Theme::default()
        }
    }
}

pub struct Context {
    pub mode: Mode,
    pub theme: Theme,
    pub eventlist_index: usize,
    pub last_notice: Option<String>,
    command_line: PromptLine,
    insert_line: PromptLine,
    calendar: CalendarContext,
    ids: UuidGenerator,
}

impl Context {
    pub fn new(calendar: CalendarContext, config: &Config) -> Self {
        Context {
            mode: Mode::Normal,
            theme: Theme::from_config(&config.theme),
            eventlist_index: 0,
            last_notice: None,
            command_line: PromptLine::with_prompt(":".to_owned()),
            insert_line: PromptLine::with_prompt("New event: ".to_owned()),
            calendar,
            ids: UuidGenerator,
        }
    }

    pub fn calendar(&self) -> &CalendarContext {
        &self.calendar
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn dispatch(&mut self, action: Action) -> bool {
        match self.calendar.apply(action, &mut self.ids) {
            Ok(next) => {
                if next.selected() != self.calendar.selected() {
                    self.eventlist_index = 0;
                }
                self.calendar = next;
                self.last_notice = None;
                true
            }
            Err(err) => {
                self.last_notice = Some(err.to_string());
                false
            }
        }
    }

    pub fn update(&mut self) {
        self.calendar = self.calendar.refresh_today(Local::now().date_naive());
    }

    pub fn open_form(&mut self) {
        if self.dispatch(Action::OpenForm) {
            let draft = self.calendar.form().title.clone();
            self.insert_line.set(&draft);
            self.mode = Mode::Insert;
        }
    }

    pub fn close_form(&mut self) {
        if self.calendar.form().open {
            let draft = self.insert_line.active_line().to_owned();
            // a failed submit stays reported after closing
            let notice = self.last_notice.take();
            self.dispatch(Action::EditTitle(draft));
            self.dispatch(Action::CloseForm);
            self.last_notice = notice;
        }
        self.mode = Mode::Normal;
    }

    pub fn submit_form(&mut self) {
        let title = self.insert_line.finish_line().to_owned();

        if self.dispatch(Action::EditTitle(title.clone())) && self.dispatch(Action::SubmitForm) {
            self.mode = Mode::Normal;
        } else {
            self.insert_line.set(&title);
        }
    }

    pub fn move_selection(&mut self, delta: i64) -> Result<(), ()> {
        let (selected, num_days) = {
            let grid = self.calendar.grid();
            (grid.selected_day(), grid.cells.len() as i64)
        };
        // Selection in another month: start over at the first day
        let target = match selected {
            Some(day) => day as i64 + delta,
            None => 1,
        };

        if target < 1 || target > num_days {
            return Err(());
        }

        if self.dispatch(Action::SelectDay(target as u32)) {
            Ok(())
        } else {
            Err(())
        }
    }

    pub fn input_sink(&self, mode: Mode) -> &PromptLine {
        match mode {
            Mode::Insert => &self.insert_line,
            _ => &self.command_line,
        }
    }

    pub fn input_sink_mut(&mut self, mode: Mode) -> &mut PromptLine {
        match mode {
            Mode::Insert => &mut self.insert_line,
            _ => &mut self.command_line,
        }
    }
}
