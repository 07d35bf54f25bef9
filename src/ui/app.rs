use std::convert::TryFrom;
use std::fmt::Write;

use crate::config::Config;
use crate::context::{Action, Context as CalendarContext};
use crate::events::{Dispatcher, Event};

use super::command::CommandParser;
use super::insert::InsertParser;
use super::{CalendarWindow, Context, EventWindow, EventWindowBehaviour, Mode};

use unsegen::base::{Cursor, GraphemeCluster, StyleModifier, Terminal, Window};
use unsegen::input::{
    EditBehavior, Input, Key, Navigatable, NavigateBehavior, OperationResult, ScrollBehavior,
};
use unsegen::widget::*;

const KEY_HELP: &str =
    "h/j/k/l: day  H/L: month  t: today  [/]: events  i: add  :: command  q: quit";

struct StatusLine<'a> {
    text: &'a str,
    style: StyleModifier,
}

impl Widget for StatusLine<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::at_least(self.text.chars().count()),
            height: RowDemand::exact(1),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let mut cursor = Cursor::new(&mut window);
        cursor.set_style_modifier(self.style);
        let _ = write!(&mut cursor, "{}", self.text);
    }
}

fn status_text(context: &Context) -> Option<&str> {
    match (context.last_notice.as_deref(), context.mode) {
        (Some(notice), _) => Some(notice),
        (None, Mode::Normal) => Some(KEY_HELP),
        (None, _) => None,
    }
}

pub struct App<'a> {
    config: &'a Config,
    context: Context,
}

impl<'a> App<'a> {
    pub fn new(config: &'a Config, calendar: CalendarContext) -> App<'a> {
        let context = Context::new(calendar, config);
        App { config, context }
    }

    fn bottom_bar<'w>(&'w self) -> impl Widget + 'w {
        let spacer = StatusLine {
            text: " ",
            style: StyleModifier::new(),
        };

        let mut layout = HLayout::new()
            .separator(GraphemeCluster::try_from(' ').unwrap())
            .widget(spacer);

        if let mode @ (Mode::Command | Mode::Insert) = self.context.mode {
            layout = layout.widget(self.context.input_sink(mode).as_widget());
        }

        if let Some(text) = status_text(&self.context) {
            let style = if self.context.last_notice.is_some() {
                self.context.theme().notice_style
            } else {
                StyleModifier::new()
            };
            layout = layout.widget(StatusLine { text, style });
        }

        layout
    }

    fn as_widget<'w>(&'w self) -> impl Widget + 'w
    where
        'a: 'w,
    {
        VLayout::new()
            .widget(
                HLayout::new()
                    .separator(GraphemeCluster::try_from('│').unwrap())
                    .widget(CalendarWindow::new(&self.context))
                    .widget(EventWindow::new(&self.context)),
            )
            .widget(self.bottom_bar())
    }

    fn handle_input(&mut self, input: Input) -> bool {
        let mut run = true;
        let num_events_of_selected_day = self.context.calendar().selected_events().len();

        if input.matches(Key::Esc) {
            self.context.close_form();
            self.context.mode = Mode::Normal;
            return run;
        }

        match self.context.mode {
            Mode::Normal => {
                input
                    .chain((Key::Char('q'), || run = false))
                    .chain((Key::Char(':'), || self.context.mode = Mode::Command))
                    .chain((Key::Char('i'), || self.context.open_form()))
                    .chain((Key::Char('t'), || {
                        self.context.dispatch(Action::GoToday);
                    }))
                    .chain((Key::Char('H'), || {
                        self.context.dispatch(Action::PreviousMonth);
                    }))
                    .chain((Key::Char('L'), || {
                        self.context.dispatch(Action::NextMonth);
                    }))
                    .chain(
                        NavigateBehavior::new(&mut CursorBehaviour(&mut self.context))
                            .down_on(Key::Char('j'))
                            .up_on(Key::Char('k'))
                            .left_on(Key::Char('h'))
                            .right_on(Key::Char('l')),
                    )
                    .chain(
                        ScrollBehavior::new(&mut EventWindowBehaviour(
                            &mut self.context,
                            num_events_of_selected_day,
                        ))
                        .forwards_on(Key::Char(']'))
                        .backwards_on(Key::Char('[')),
                    )
                    .finish();
            }
            mode @ Mode::Insert => {
                input
                    .chain(InsertParser::new(&mut self.context))
                    .chain(
                        EditBehavior::new(self.context.input_sink_mut(mode))
                            .delete_forwards_on(Key::Delete)
                            .delete_backwards_on(Key::Backspace)
                            .left_on(Key::Left)
                            .right_on(Key::Right),
                    )
                    .finish();
            }
            mode @ Mode::Command => {
                input
                    .chain(CommandParser::new(&mut self.context))
                    .chain(
                        EditBehavior::new(self.context.input_sink_mut(mode))
                            .delete_forwards_on(Key::Delete)
                            .delete_backwards_on(Key::Backspace)
                            .left_on(Key::Left)
                            .right_on(Key::Right),
                    )
                    .chain(
                        ScrollBehavior::new(self.context.input_sink_mut(mode))
                            .backwards_on(Key::Up)
                            .forwards_on(Key::Down),
                    )
                    .finish();
            }
        }

        run
    }

    pub fn run(
        &mut self,
        dispatcher: Dispatcher,
        mut term: Terminal,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut run = true;

        log::debug!("Tick rate is {:?}", self.config.tick_rate());

        while run {
            // Draw
            let root = term.create_root_window();
            self.as_widget().draw(root, RenderingHints::new());
            term.present();

            // Handle events
            match dispatcher.next()? {
                Event::Update => self.context.update(),
                Event::Signal(signal) => log::debug!("Received {}, redrawing", signal),
                Event::Input(input) => run = self.handle_input(input),
            }
        }

        Ok(())
    }
}

struct CursorBehaviour<'a>(&'a mut Context);

impl Navigatable for CursorBehaviour<'_> {
    fn move_down(&mut self) -> OperationResult {
        self.0.move_selection(7)
    }

    fn move_left(&mut self) -> OperationResult {
        self.0.move_selection(-1)
    }

    fn move_right(&mut self) -> OperationResult {
        self.0.move_selection(1)
    }

    fn move_up(&mut self) -> OperationResult {
        self.0.move_selection(-7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{SupportedRange, WeekStart};
    use chrono::NaiveDate;

    fn context() -> Context {
        let today = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        let calendar = CalendarContext::new(today, SupportedRange::default(), WeekStart::Sunday);

        Context::new(calendar, &Config::default())
    }

    #[test]
    fn notice_is_shown_next_to_the_prompt() {
        let mut ctx = context();
        ctx.open_form();
        assert_eq!(status_text(&ctx), None);

        ctx.submit_form();
        assert_eq!(ctx.mode, Mode::Insert);
        assert_eq!(
            status_text(&ctx),
            Some("Please enter a title for the event.")
        );

        ctx.close_form();
        assert_eq!(
            status_text(&ctx),
            Some("Please enter a title for the event.")
        );
    }

    #[test]
    fn key_help_in_normal_mode() {
        let ctx = context();

        assert_eq!(status_text(&ctx), Some(KEY_HELP));
    }
}
