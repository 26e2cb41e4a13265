//! Terminal front end: argument parsing, command handlers and the view that
//! renders workflow events.

pub mod cli;
pub mod commands;
pub mod terminal;
