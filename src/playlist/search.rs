//! Case-insensitive substring search over the library.
//!
//! A track matches when its title, artist, album or genre name contains
//! the query. Missing references never match.

use crate::db::TrackWithRelations;

/// Normalize a query for [`matches`].
pub fn normalize(query: &str) -> String {
    query.to_lowercase()
}

/// Check one track against an already-normalized query.
pub fn matches(track: &TrackWithRelations, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    let contains = |field: Option<&str>| {
        field
            .filter(|s| !s.is_empty())
            .is_some_and(|s| s.to_lowercase().contains(needle))
    };

    contains(Some(&track.title))
        || contains(track.artist_name.as_deref())
        || contains(track.album_name.as_deref())
        || contains(track.genre_name.as_deref())
}

/// Filter tracks by query, preserving order.
///
/// An empty query yields the full list.
pub fn filter(tracks: &[TrackWithRelations], query: &str) -> Vec<TrackWithRelations> {
    let needle = normalize(query);
    tracks
        .iter()
        .filter(|t| matches(t, &needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mock_track;

    fn library() -> Vec<TrackWithRelations> {
        vec![
            TrackWithRelations {
                genre_name: Some("Rock".to_string()),
                ..mock_track(1, "Time")
            },
            TrackWithRelations {
                artist_name: Some("Miles Davis".to_string()),
                genre_name: Some("Jazz".to_string()),
                ..mock_track(2, "So What")
            },
            TrackWithRelations {
                album_name: Some("Rockin' the Suburbs".to_string()),
                ..mock_track(3, "Zak and Sara")
            },
            TrackWithRelations {
                artist_name: None,
                album_name: None,
                genre_name: None,
                ..mock_track(4, "Bare")
            },
        ]
    }

    fn titles(tracks: &[TrackWithRelations]) -> Vec<&str> {
        tracks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let tracks = library();
        assert_eq!(filter(&tracks, ""), tracks);
    }

    #[test]
    fn test_matches_any_field() {
        let tracks = library();
        assert_eq!(titles(&filter(&tracks, "rock")), vec!["Time", "Zak and Sara"]);
        assert_eq!(titles(&filter(&tracks, "davis")), vec!["So What"]);
        assert_eq!(titles(&filter(&tracks, "bare")), vec!["Bare"]);
    }

    #[test]
    fn test_case_insensitive() {
        let tracks = library();
        assert_eq!(filter(&tracks, "ROCK"), filter(&tracks, "rock"));
        assert_eq!(titles(&filter(&tracks, "JAZZ")), vec!["So What"]);
    }

    #[test]
    fn test_missing_references_do_not_match() {
        let tracks = library();
        let hits = filter(&tracks, "test");
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|t| t.id != 4));
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(filter(&library(), "zzz").is_empty());
    }
}
