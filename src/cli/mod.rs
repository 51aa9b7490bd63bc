//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing, enums, and subcommand handlers.

mod args;
mod commands;
mod enums;

pub use args::{Args, Command, ConfigAction, RenderArgs};
pub use commands::{ansi_text, handle_config_action, list_formats, render};
pub use enums::{CharacterSet, PatternKind};
