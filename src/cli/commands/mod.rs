//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in the `library` submodule and shares the
//! database resolution done here.

mod library;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::model::EntityKind;

pub use library::{
    cmd_edit, cmd_entities, cmd_import, cmd_list, cmd_remove, cmd_search, format_track_line,
};

/// Godless Player CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// SQLite database file (overrides the config file)
    #[arg(long, global = true, env = "GODLESS_PLAYER_DB")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// List all tracks in the library
    List,
    /// Import audio files into the library
    Import {
        /// Files to import
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Show tracks matching a query (title, artist, album or genre)
    Search {
        query: String,
    },
    /// Edit a track's title, artist, album or genre
    Edit {
        /// Track ID (see `list`)
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        artist: Option<String>,
        #[arg(long)]
        album: Option<String>,
        #[arg(long)]
        genre: Option<String>,
    },
    /// Remove a track from the library
    Remove {
        /// Track ID (see `list`)
        id: i64,
    },
    /// List artists, albums or genres
    Entities {
        #[arg(value_enum)]
        kind: KindArg,
    },
}

/// Entity table selector for `entities`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Artists,
    Albums,
    Genres,
}

impl From<KindArg> for EntityKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Artists => EntityKind::Artist,
            KindArg::Albums => EntityKind::Album,
            KindArg::Genres => EntityKind::Genre,
        }
    }
}

/// Run the specified CLI command.
///
/// Returns `Ok(true)` if a command was run, `Ok(false)` if no command was specified
/// (meaning the GUI should launch).
pub fn run_command(cli: &Cli, config: &Config) -> anyhow::Result<bool> {
    let Some(command) = &cli.command else {
        return Ok(false);
    };

    let rt = Runtime::new()?;
    let db_path = config.database_path(cli.db.as_deref());

    match command {
        Commands::List => cmd_list(&rt, &db_path)?,
        Commands::Import { files } => cmd_import(&rt, &db_path, files, config)?,
        Commands::Search { query } => cmd_search(&rt, &db_path, query)?,
        Commands::Edit {
            id,
            title,
            artist,
            album,
            genre,
        } => cmd_edit(
            &rt,
            &db_path,
            *id,
            title.as_deref(),
            artist.as_deref(),
            album.as_deref(),
            genre.as_deref(),
        )?,
        Commands::Remove { id } => cmd_remove(&rt, &db_path, *id)?,
        Commands::Entities { kind } => cmd_entities(&rt, &db_path, (*kind).into())?,
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_launches_gui() {
        let cli = Cli::parse_from(["godless-player"]);
        assert!(cli.command.is_none());
        assert!(!run_command(&cli, &Config::default()).unwrap());
    }

    #[test]
    fn test_parse_edit_flags() {
        let cli = Cli::parse_from([
            "godless-player",
            "--db",
            "/tmp/x.db",
            "edit",
            "7",
            "--artist",
            "Pink Floyd",
        ]);
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
        match cli.command {
            Some(Commands::Edit {
                id, artist, title, ..
            }) => {
                assert_eq!(id, 7);
                assert_eq!(artist.as_deref(), Some("Pink Floyd"));
                assert!(title.is_none());
            }
            _ => panic!("expected edit"),
        }
    }

    #[test]
    fn test_parse_entities_kind() {
        let cli = Cli::parse_from(["godless-player", "entities", "genres"]);
        match cli.command {
            Some(Commands::Entities { kind }) => {
                assert_eq!(EntityKind::from(kind), EntityKind::Genre);
            }
            _ => panic!("expected entities"),
        }
        assert!(Cli::try_parse_from(["godless-player", "entities", "moods"]).is_err());
    }

    #[test]
    fn test_import_requires_files() {
        assert!(Cli::try_parse_from(["godless-player", "import"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
