//! Command-line interface for godless-player.
//!
//! Running without a subcommand opens the GUI. Subcommands list, import,
//! search, edit and remove tracks without launching it.

mod commands;

pub use commands::{Cli, Commands, run_command};
