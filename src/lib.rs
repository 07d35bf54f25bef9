pub mod agenda;
pub mod calendar;
pub mod config;
pub mod context;
pub mod events;
pub mod grid;
pub mod provider;
pub mod ui;
