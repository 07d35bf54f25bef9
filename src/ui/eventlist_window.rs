use std::fmt::{Display, Write};
use unsegen::base::*;
use unsegen::input::Scrollable;
use unsegen::widget::*;

use crate::agenda::MAX_EVENTS_PER_DAY;
use crate::provider::Event;
use crate::ui::Context;

struct Entry<'a> {
    position: usize,
    event: &'a Event,
}

impl Display for Entry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}", self.position + 1, self.event.title())
    }
}

pub struct EventWindow<'a> {
    context: &'a Context,
}

impl<'a> EventWindow<'a> {
    pub fn new(context: &'a Context) -> Self {
        EventWindow { context }
    }
}

impl Widget for EventWindow<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::at_least(20),
            height: RowDemand::at_least(MAX_EVENTS_PER_DAY + 2),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let calendar = self.context.calendar();
        let theme = self.context.theme();
        let events = calendar.selected_events();

        let mut cursor = Cursor::new(&mut window);

        cursor.set_style_modifier(theme.month_header_style);
        let _ = write!(
            &mut cursor,
            "{} ({}/{})",
            calendar.selected(),
            events.len(),
            MAX_EVENTS_PER_DAY
        );
        if calendar.form().open {
            let _ = write!(&mut cursor, " - adding event");
        }
        cursor.fill_and_wrap_line();
        cursor.set_style_modifier(theme.event_style);

        if events.is_empty() {
            let _ = write!(&mut cursor, "No events");
            cursor.fill_and_wrap_line();
        }

        for (position, event) in events.iter().enumerate() {
            let saved_style = cursor.get_style_modifier();

            if position == self.context.eventlist_index {
                cursor.apply_style_modifier(StyleModifier::new().invert(true));
            }

            if let Err(err) = write!(&mut cursor, "{}", Entry { position, event }) {
                log::warn!("Error while writing event: {}", err);
            }

            cursor.fill_and_wrap_line();
            cursor.set_style_modifier(saved_style);
        }
    }
}

pub struct EventWindowBehaviour<'a>(pub &'a mut Context, pub usize);

impl Scrollable for EventWindowBehaviour<'_> {
    fn scroll_backwards(&mut self) -> unsegen::input::OperationResult {
        if self.0.eventlist_index > 0 {
            self.0.eventlist_index -= 1;
            Ok(())
        } else {
            Err(())
        }
    }

    fn scroll_forwards(&mut self) -> unsegen::input::OperationResult {
        if self.0.eventlist_index + 1 < self.1 {
            self.0.eventlist_index += 1;
            Ok(())
        } else {
            Err(())
        }
    }
}
