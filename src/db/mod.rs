//! Library store: track, artist, album and genre persistence.
//!
//! Uses SQLx with SQLite for lightweight, embedded database storage.
//! Provides async operations for:
//! - Track CRUD operations
//! - Get-or-create lookups of artists, albums and genres by name
//! - Loading the whole library with resolved names
//!
//! Functions that take a `&mut SqliteConnection` can run inside a
//! transaction; batched mutations commit once through [`sqlx::Transaction::commit`].
//!
//! # Example
//!
//! ```ignore
//! use godless_player::db::{init_db, get_all_tracks_with_relations};
//!
//! let pool = init_db("sqlite:library.db").await?;
//! let tracks = get_all_tracks_with_relations(&pool).await?;
//! ```

use std::path::{Path, PathBuf};

use crate::model::{EntityKind, NamedEntity, Track};
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqliteConnection, SqlitePool, SqlitePoolOptions};

/// Default database filename.
pub const DEFAULT_DB_NAME: &str = "library.db";

/// Build a SQLite database URL from an optional path.
///
/// If no path is provided, uses [`DEFAULT_DB_NAME`] in the current directory.
pub fn db_url(path: Option<&Path>) -> String {
    match path {
        Some(p) => format!("sqlite:{}", p.display()),
        None => format!("sqlite:{}", DEFAULT_DB_NAME),
    }
}

/// Initialize the database connection pool and run migrations.
///
/// Creates the database file if it doesn't exist, establishes a connection
/// pool and runs all pending migrations, so the schema exists afterwards.
///
/// # Errors
///
/// Returns an error if:
/// - Database creation fails
/// - Connection cannot be established
/// - Migration fails
pub async fn init_db(db_url: &str) -> Result<SqlitePool, sqlx::Error> {
    if !sqlx::Sqlite::database_exists(db_url).await.unwrap_or(false) {
        tracing::info!(target: "godless_player::db", url = %db_url, "Creating database");
        sqlx::Sqlite::create_database(db_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(db_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Get or create an artist, album or genre by name.
///
/// Looks up the entity by exact name match. If not found, creates a new
/// record. Calling twice with the same name returns the same ID; names that
/// differ only in case are distinct entities.
pub async fn get_or_create(
    conn: &mut SqliteConnection,
    kind: EntityKind,
    name: &str,
) -> sqlx::Result<i64> {
    let select = format!("SELECT id FROM {} WHERE name = ?", kind.table());
    let row: Option<(i64,)> = sqlx::query_as(&select)
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;

    if let Some((id,)) = row {
        return Ok(id);
    }

    let insert = format!("INSERT INTO {} (name) VALUES (?)", kind.table());
    let result = sqlx::query(&insert).bind(name).execute(&mut *conn).await?;
    let id = result.last_insert_rowid();
    tracing::debug!(target: "godless_player::db", %kind, name, id, "Created entity");
    Ok(id)
}

/// List all entities of one kind, ordered by name.
pub async fn list_entities(pool: &SqlitePool, kind: EntityKind) -> sqlx::Result<Vec<NamedEntity>> {
    let sql = format!("SELECT id, name FROM {} ORDER BY name", kind.table());
    sqlx::query_as::<_, NamedEntity>(&sql).fetch_all(pool).await
}

/// Count entities of one kind.
pub async fn count_entities(pool: &SqlitePool, kind: EntityKind) -> sqlx::Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", kind.table());
    let (count,): (i64,) = sqlx::query_as(&sql).fetch_one(pool).await?;
    Ok(count)
}

/// Fields of a track that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrack {
    pub title: String,
    pub path: String,
    pub artist_id: Option<i64>,
    pub album_id: Option<i64>,
    pub genre_id: Option<i64>,
}

/// Insert a track record and return its ID.
///
/// Paths are not unique: importing the same file twice creates two tracks.
pub async fn insert_track(conn: &mut SqliteConnection, track: &NewTrack) -> sqlx::Result<i64> {
    let result = sqlx::query(
        "INSERT INTO tracks (title, path, artist_id, album_id, genre_id) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&track.title)
    .bind(&track.path)
    .bind(track.artist_id)
    .bind(track.album_id)
    .bind(track.genre_id)
    .execute(&mut *conn)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Partial update of a track. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackUpdate {
    pub title: Option<String>,
    pub artist_id: Option<i64>,
    pub album_id: Option<i64>,
    pub genre_id: Option<i64>,
}

/// Apply a partial update to a track.
///
/// Returns `false` when no track has this ID.
pub async fn update_track(
    conn: &mut SqliteConnection,
    track_id: i64,
    update: &TrackUpdate,
) -> sqlx::Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE tracks SET
            title = COALESCE(?, title),
            artist_id = COALESCE(?, artist_id),
            album_id = COALESCE(?, album_id),
            genre_id = COALESCE(?, genre_id)
        WHERE id = ?
        "#,
    )
    .bind(update.title.as_deref())
    .bind(update.artist_id)
    .bind(update.album_id)
    .bind(update.genre_id)
    .bind(track_id)
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete a track by ID.
///
/// Returns `false` when no track has this ID. Referenced artists, albums
/// and genres are kept.
pub async fn delete_track(pool: &SqlitePool, track_id: i64) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM tracks WHERE id = ?")
        .bind(track_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Get a track by its database ID.
pub async fn get_track_by_id(pool: &SqlitePool, track_id: i64) -> sqlx::Result<Option<Track>> {
    sqlx::query_as::<_, Track>(
        "SELECT id, title, path, artist_id, album_id, genre_id FROM tracks WHERE id = ?",
    )
    .bind(track_id)
    .fetch_optional(pool)
    .await
}

/// Track with resolved artist, album and genre names.
///
/// This is the shape the playlist and the UI work with. Equality compares
/// every field, so two imports of the same file are distinct tracks.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TrackWithRelations {
    /// Database ID
    pub id: i64,
    /// Track title
    pub title: String,
    /// File path
    pub path: String,
    pub artist_id: Option<i64>,
    pub album_id: Option<i64>,
    pub genre_id: Option<i64>,
    /// Artist name, if the track references one
    pub artist_name: Option<String>,
    /// Album name, if the track references one
    pub album_name: Option<String>,
    /// Genre name, if the track references one
    pub genre_name: Option<String>,
}

impl TrackWithRelations {
    /// Convert the path string to a PathBuf.
    pub fn path_buf(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }

    /// Name of the referenced entity of the given kind.
    pub fn entity_name(&self, kind: EntityKind) -> Option<&str> {
        match kind {
            EntityKind::Artist => self.artist_name.as_deref(),
            EntityKind::Album => self.album_name.as_deref(),
            EntityKind::Genre => self.genre_name.as_deref(),
        }
    }
}

const TRACKS_WITH_RELATIONS: &str = r#"
    SELECT
        t.id, t.title, t.path, t.artist_id, t.album_id, t.genre_id,
        a.name AS artist_name,
        al.name AS album_name,
        g.name AS genre_name
    FROM tracks t
    LEFT JOIN artists a ON t.artist_id = a.id
    LEFT JOIN albums al ON t.album_id = al.id
    LEFT JOIN genres g ON t.genre_id = g.id
"#;

/// Get all tracks with artist, album and genre names, in import order.
///
/// Performs LEFT JOINs so tracks without references are included.
/// This is the primary method for loading the library for display.
pub async fn get_all_tracks_with_relations(
    pool: &SqlitePool,
) -> sqlx::Result<Vec<TrackWithRelations>> {
    let sql = format!("{TRACKS_WITH_RELATIONS} ORDER BY t.id");
    sqlx::query_as::<_, TrackWithRelations>(&sql)
        .fetch_all(pool)
        .await
}

/// Get one track with resolved names.
pub async fn get_track_with_relations(
    conn: &mut SqliteConnection,
    track_id: i64,
) -> sqlx::Result<Option<TrackWithRelations>> {
    let sql = format!("{TRACKS_WITH_RELATIONS} WHERE t.id = ?");
    sqlx::query_as::<_, TrackWithRelations>(&sql)
        .bind(track_id)
        .fetch_optional(&mut *conn)
        .await
}
