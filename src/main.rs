//! Godless Player - a small MP3 library and player.
//!
//! Tracks live in a SQLite database with their artist, album and genre.
//! Runs as a GUI application by default; the library can also be managed
//! from the command line.

// Hide console window on Windows when running as GUI
// CLI commands will attach to the parent console or allocate one
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod library;
pub mod model;
pub mod player;
pub mod playlist;
#[cfg(test)]
pub mod test_utils;
pub mod ui;

use clap::Parser;
use iced::application;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use ui::GodlessPlayer;

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // If running CLI commands on Windows, attach to console for output
    #[cfg(target_os = "windows")]
    if args.command.is_some() {
        attach_console();
    }

    let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(log_filter(&env_directives)?)
        .init();

    let config = config::load();

    if cli::run_command(&args, &config)? {
        return Ok(());
    }

    let db_path = config.database_path(args.db.as_deref());
    tracing::info!(target: "godless_player::main", db = %db_path.display(), "Launching GUI");

    application("Godless Player", GodlessPlayer::update, GodlessPlayer::view)
        .subscription(GodlessPlayer::subscription)
        .theme(|_| iced::Theme::Dark)
        .run_with(move || GodlessPlayer::new(config, db_path))
        .map_err(|e| anyhow::anyhow!("GUI Error: {}", e))
}

/// `RUST_LOG`-style directives plus info-level logging for this crate.
///
/// Log targets are all prefixed with `godless_player::` so the default
/// directive covers them.
fn log_filter(env_directives: &str) -> anyhow::Result<EnvFilter> {
    Ok(EnvFilter::builder()
        .parse_lossy(env_directives)
        .add_directive("godless_player=info".parse()?))
}

/// Attach to parent console on Windows for CLI output.
/// This is needed because windows_subsystem = "windows" detaches from console.
#[cfg(target_os = "windows")]
fn attach_console() {
    use windows_sys::Win32::System::Console::{ATTACH_PARENT_PROCESS, AttachConsole};
    unsafe {
        // If that fails there is no console output, which is fine for a GUI launch
        let _ = AttachConsole(ATTACH_PARENT_PROCESS);
    }
}
