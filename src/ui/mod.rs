pub mod app;
mod calendar_window;
mod command;
mod context;
mod eventlist_window;
mod insert;

pub use calendar_window::CalendarWindow;
pub use context::{Context, Mode, Theme};
pub use eventlist_window::{EventWindow, EventWindowBehaviour};
