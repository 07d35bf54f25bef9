use unsegen::input::*;

use super::context::Context;

pub struct InsertParser<'a> {
    context: &'a mut Context,
}

impl<'a> InsertParser<'a> {
    pub fn new(context: &'a mut Context) -> Self {
        InsertParser { context }
    }
}

impl Behavior for InsertParser<'_> {
    fn input(self, input: Input) -> Option<Input> {
        if let Event::Key(Key::Char('\n')) = input.event {
            self.context.submit_form();
            None
        } else {
            Some(input)
        }
    }
}
