//! Core data models for the music library.
//!
//! Defines the persisted entities: [`Track`] and the artist, album and
//! genre rows sharing the [`NamedEntity`] shape. These are derived from
//! SQLx for database mapping.
//!
//! # Database Schema
//!
//! The models map to the following tables:
//! - `artists`, `albums`, `genres` - named entities with unique names
//! - `tracks` - individual audio files with optional references to the above

use sqlx::FromRow;

/// A track (audio file) in the music library.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Track {
    /// Database ID (auto-generated)
    pub id: i64,
    /// Track title (file stem on import)
    pub title: String,
    /// File path, resolved at import time
    pub path: String,
    /// Foreign key to artists table
    pub artist_id: Option<i64>,
    /// Foreign key to albums table
    pub album_id: Option<i64>,
    /// Foreign key to genres table
    pub genre_id: Option<i64>,
}

/// A named entity row (artist, album or genre share the same shape).
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct NamedEntity {
    pub id: i64,
    pub name: String,
}

/// Which named entity table a lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Artist,
    Album,
    Genre,
}

impl EntityKind {
    /// All kinds, in display order.
    pub const ALL: [EntityKind; 3] = [EntityKind::Artist, EntityKind::Album, EntityKind::Genre];

    /// Backing table name.
    pub fn table(self) -> &'static str {
        match self {
            EntityKind::Artist => "artists",
            EntityKind::Album => "albums",
            EntityKind::Genre => "genres",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Artist => "Artist",
            EntityKind::Album => "Album",
            EntityKind::Genre => "Genre",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
