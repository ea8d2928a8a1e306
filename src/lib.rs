pub mod agenda;
pub mod calendar;
pub mod config;
pub mod events;
pub mod provider;
pub mod selection;
pub mod transition;
pub mod ui;
