use std::result::Result;
use unsegen::input::*;

use nom::{
    character::complete::{alpha1, digit1, space1},
    combinator::{all_consuming, map_opt, map_res, opt, rest},
    sequence::{preceded, tuple},
    IResult,
};

use super::context::{Context, Mode};
use crate::calendar::DateKey;
use crate::context::Action;
use crate::provider::{Error, ErrorKind};

pub type ActionResult = Result<(), Error>;

pub enum Command {
    Arg(fn(&mut Context, &str) -> ActionResult),
    NoArg(fn(&mut Context) -> ActionResult),
    Repeatable(fn(&mut Context, u32) -> ActionResult),
}

fn dispatch(context: &mut Context, action: Action) -> ActionResult {
    if context.dispatch(action) {
        Ok(())
    } else {
        Err(Error::new(
            ErrorKind::CommandParse,
            context.last_notice.as_deref().unwrap_or("command failed"),
        ))
    }
}

fn repeat(context: &mut Context, action: Action, times: u32) -> ActionResult {
    (0..times).try_for_each(|_| dispatch(context, action.clone()))
}

const COMMANDS: &[(&'static str, Command)] = &[
    (
        "next",
        Command::Repeatable(|c, n| repeat(c, Action::NextMonth, n)),
    ),
    (
        "prev",
        Command::Repeatable(|c, n| repeat(c, Action::PreviousMonth, n)),
    ),
    ("today", Command::NoArg(|c| dispatch(c, Action::GoToday))),
    (
        "date",
        Command::Arg(|c, arg| {
            let date = arg.parse::<DateKey>()?;
            dispatch(c, Action::SetFormDate(date))
        }),
    ),
    (
        "select",
        Command::Arg(|c, arg| {
            let day = arg.parse::<u32>().map_err(|_| {
                Error::new(ErrorKind::DateParse, &format!("'{}' is not a day", arg))
            })?;
            dispatch(c, Action::SelectDay(day))
        }),
    ),
    (
        "add",
        Command::Arg(|c, arg| {
            let date = c.calendar().selected();
            dispatch(
                c,
                Action::AddEvent {
                    title: arg.to_owned(),
                    date,
                },
            )
        }),
    ),
];

fn command_name(input: &str) -> IResult<&str, &'static (&'static str, Command)> {
    map_opt(alpha1, |name: &str| {
        COMMANDS.iter().find(|(command, _)| *command == name)
    })(input)
}

/// `[count]name[ argument]`
fn parse_command(
    input: &str,
) -> IResult<&str, (Option<u32>, &'static (&'static str, Command), Option<&str>)> {
    all_consuming(tuple((
        opt(map_res(digit1, |digits: &str| digits.parse::<u32>())),
        command_name,
        opt(preceded(space1, rest)),
    )))(input)
}

pub struct CommandParser<'a> {
    context: &'a mut Context,
}

impl<'a> CommandParser<'a> {
    pub fn new(context: &'a mut Context) -> Self {
        CommandParser { context }
    }

    pub fn run_command(&mut self, cmd: &str) -> ActionResult {
        let (_, (count, (name, command), arg)) = parse_command(cmd.trim()).map_err(|_| {
            Error::new(
                ErrorKind::CommandParse,
                &format!("Unknown command '{}'", cmd.trim()),
            )
        })?;

        match (command, count, arg.map(str::trim)) {
            (Command::Repeatable(act), count, None) => act(self.context, count.unwrap_or(1)),
            (Command::NoArg(act), None, None) => act(self.context),
            (Command::Arg(act), None, Some(arg)) if !arg.is_empty() => act(self.context, arg),
            _ => Err(Error::new(
                ErrorKind::CommandParse,
                &format!("Invalid arguments for '{}'", name),
            )),
        }
    }

    fn report_error(&mut self, error: Error) {
        log::warn!("{}", error);
        self.context.last_notice = Some(error.to_string());
    }
}

impl Behavior for CommandParser<'_> {
    fn input(mut self, input: Input) -> Option<Input> {
        if let Event::Key(key) = input.event {
            match key {
                Key::Char('\n') => {
                    let cmd = self
                        .context
                        .input_sink_mut(Mode::Command)
                        .finish_line()
                        .to_owned();
                    if let Err(e) = self.run_command(&cmd) {
                        self.report_error(e);
                    } else {
                        self.context.mode = Mode::Normal;
                    }
                    None
                }
                _ => Some(input),
            }
        } else {
            Some(input)
        }
    }
}
