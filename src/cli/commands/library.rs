//! Library commands: list, import, search, edit, remove and entities.

use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;
use tracing::info;

use crate::config::Config;
use crate::db::{self, TrackWithRelations};
use crate::library::{self, ImportDefaults, SkipReason, TrackEdit};
use crate::model::EntityKind;
use crate::playlist::search;

async fn open_db(db_path: &Path) -> anyhow::Result<sqlx::SqlitePool> {
    if let Some(dir) = db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let pool = db::init_db(&db::db_url(Some(db_path)))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open database {}: {}", db_path.display(), e))?;
    info!(target: "godless_player::cli", db = %db_path.display(), "Database opened");
    Ok(pool)
}

/// One line per track: `id  title — artist / album / genre`.
pub fn format_track_line(track: &TrackWithRelations) -> String {
    format!(
        "{:>5}  {} — {} / {} / {}",
        track.id,
        track.title,
        track.artist_name.as_deref().unwrap_or("-"),
        track.album_name.as_deref().unwrap_or("-"),
        track.genre_name.as_deref().unwrap_or("-"),
    )
}

fn print_tracks(tracks: &[TrackWithRelations]) {
    for track in tracks {
        println!("{}", format_track_line(track));
    }
    println!("{} track(s)", tracks.len());
}

/// List all tracks in the library
pub fn cmd_list(rt: &Runtime, db_path: &Path) -> anyhow::Result<()> {
    rt.block_on(async {
        let pool = open_db(db_path).await?;
        let tracks = library::load_library(&pool).await?;
        print_tracks(&tracks);

        let mut counts = Vec::new();
        for kind in EntityKind::ALL {
            let n = db::count_entities(&pool, kind).await?;
            counts.push(format!("{} {}", n, kind.table()));
        }
        println!("{}", counts.join(", "));
        Ok(())
    })
}

/// Import files into the library
pub fn cmd_import(
    rt: &Runtime,
    db_path: &Path,
    files: &[PathBuf],
    config: &Config,
) -> anyhow::Result<()> {
    rt.block_on(async {
        let pool = open_db(db_path).await?;
        let defaults = ImportDefaults::from(&config.library);
        let report = library::import_files(&pool, files, &defaults).await?;

        for track in &report.imported {
            println!("Imported {}", format_track_line(track));
        }
        for (path, reason) in &report.skipped {
            let why = match reason {
                SkipReason::Missing => "not found",
                SkipReason::Unsupported => "unsupported extension",
            };
            eprintln!("Skipped {} ({})", path.display(), why);
        }
        println!(
            "{} imported, {} skipped.",
            report.imported.len(),
            report.skipped.len()
        );
        Ok(())
    })
}

/// Print tracks matching a query
pub fn cmd_search(rt: &Runtime, db_path: &Path, query: &str) -> anyhow::Result<()> {
    rt.block_on(async {
        let pool = open_db(db_path).await?;
        let tracks = library::load_library(&pool).await?;
        print_tracks(&search::filter(&tracks, query));
        Ok(())
    })
}

/// Edit a track. Omitted fields are left unchanged.
pub fn cmd_edit(
    rt: &Runtime,
    db_path: &Path,
    id: i64,
    title: Option<&str>,
    artist: Option<&str>,
    album: Option<&str>,
    genre: Option<&str>,
) -> anyhow::Result<()> {
    let edit = TrackEdit {
        title: title.unwrap_or_default().to_string(),
        artist: artist.unwrap_or_default().to_string(),
        album: album.unwrap_or_default().to_string(),
        genre: genre.unwrap_or_default().to_string(),
    };

    rt.block_on(async {
        let pool = open_db(db_path).await?;
        let track = library::edit_track(&pool, id, &edit).await?;
        println!("Updated {}", format_track_line(&track));
        Ok(())
    })
}

/// Remove a track from the library
pub fn cmd_remove(rt: &Runtime, db_path: &Path, id: i64) -> anyhow::Result<()> {
    rt.block_on(async {
        let pool = open_db(db_path).await?;
        let track = library::remove_track(&pool, id).await?;
        println!("Removed track {}: {}", track.id, track.title);
        Ok(())
    })
}

/// List the artists, albums or genres in the library
pub fn cmd_entities(rt: &Runtime, db_path: &Path, kind: EntityKind) -> anyhow::Result<()> {
    rt.block_on(async {
        let pool = open_db(db_path).await?;
        let entities = db::list_entities(&pool, kind).await?;
        for entity in &entities {
            println!("{:>5}  {}", entity.id, entity.name);
        }
        println!("{} {}", entities.len(), kind.table());
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{mock_track, touch};

    #[test]
    fn test_format_track_line() {
        let line = format_track_line(&mock_track(3, "Dogs"));
        assert_eq!(line, "    3  Dogs — Test Artist / Test Album / Test Genre");

        let bare = TrackWithRelations {
            album_name: None,
            ..mock_track(12, "Pigs")
        };
        assert!(format_track_line(&bare).contains("Test Artist / - / Test Genre"));
    }

    #[test]
    fn test_commands_against_temp_database() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("data").join("library.db");
        let file = touch(dir.path(), "Sheep.mp3");
        let rt = Runtime::new().unwrap();

        cmd_import(&rt, &db_path, &[file], &Config::default()).unwrap();
        cmd_edit(&rt, &db_path, 1, None, Some("Pink Floyd"), None, None).unwrap();
        cmd_list(&rt, &db_path).unwrap();
        cmd_search(&rt, &db_path, "FLOYD").unwrap();
        cmd_entities(&rt, &db_path, EntityKind::Artist).unwrap();

        let tracks = rt
            .block_on(async {
                let pool = open_db(&db_path).await?;
                Ok::<_, anyhow::Error>(library::load_library(&pool).await?)
            })
            .unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "Sheep");
        assert_eq!(tracks[0].artist_name.as_deref(), Some("Pink Floyd"));

        cmd_remove(&rt, &db_path, 1).unwrap();
        assert!(cmd_remove(&rt, &db_path, 1).is_err());
    }
}
