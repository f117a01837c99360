//! In-memory playlist state and navigation.
//!
//! The playlist owns two lists:
//! - the full library in import order, which navigation walks, and
//! - the visible view, recomputed from the active search query.
//!
//! The current index always points into the full list. Filtering narrows
//! what is shown and selectable, but next/previous still traverse every
//! track.

pub mod search;

use rand::Rng;

use crate::db::TrackWithRelations;

/// Ordered library, filtered view and current position.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    /// Authoritative ordered list
    all: Vec<TrackWithRelations>,
    /// Derived view, replaced wholesale whenever the query changes
    filtered: Vec<TrackWithRelations>,
    /// Active search query (as typed)
    query: String,
    /// Position into `all` (None = nothing started yet)
    current: Option<usize>,
}

impl Playlist {
    /// Create an empty playlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with tracks loaded from the store.
    ///
    /// The visible view is reset to the same content and the query cleared.
    pub fn load(&mut self, tracks: Vec<TrackWithRelations>) {
        self.filtered = tracks.clone();
        self.all = tracks;
        self.query.clear();
        self.current = None;
    }

    /// Full ordered list.
    pub fn tracks(&self) -> &[TrackWithRelations] {
        &self.all
    }

    /// Tracks currently shown (matching the active query).
    pub fn visible(&self) -> &[TrackWithRelations] {
        &self.filtered
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Active search query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Position into the full list.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Track at the current position, if the position is still valid.
    pub fn current(&self) -> Option<&TrackWithRelations> {
        self.current.and_then(|i| self.all.get(i))
    }

    /// Recompute the visible view for a new query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = search::filter(&self.all, &self.query);
    }

    /// Append a track to the library.
    ///
    /// It becomes visible immediately when it matches the active query.
    pub fn add(&mut self, track: TrackWithRelations) {
        if search::matches(&track, &search::normalize(&self.query)) {
            self.filtered.push(track.clone());
        }
        self.all.push(track);
    }

    /// Remove a track by ID from both lists.
    ///
    /// The current index is not adjusted: removing a track before it shifts
    /// which track the index refers to.
    pub fn remove(&mut self, track_id: i64) -> Option<TrackWithRelations> {
        self.filtered.retain(|t| t.id != track_id);
        let pos = self.all.iter().position(|t| t.id == track_id)?;
        Some(self.all.remove(pos))
    }

    /// Replace a track (after an edit) in both lists and re-apply the filter.
    ///
    /// Returns `false` when the ID is unknown.
    pub fn replace(&mut self, track: TrackWithRelations) -> bool {
        let Some(slot) = self.all.iter_mut().find(|t| t.id == track.id) else {
            return false;
        };
        *slot = track;
        self.refilter();
        true
    }

    /// Find a track in the full list by value equality.
    pub fn position_of(&self, track: &TrackWithRelations) -> Option<usize> {
        self.all.iter().position(|t| t == track)
    }

    /// Make the track at `visible_index` of the visible view current.
    ///
    /// The track is resolved to its position in the full list, so
    /// navigation continues from there over the whole library.
    pub fn select_visible(&mut self, visible_index: usize) -> Option<&TrackWithRelations> {
        let track = self.filtered.get(visible_index)?;
        let index = self.position_of(track)?;
        self.current = Some(index);
        self.all.get(index)
    }

    /// Make the track at `index` of the full list current.
    pub fn jump_to(&mut self, index: usize) -> Option<&TrackWithRelations> {
        if index < self.all.len() {
            self.current = Some(index);
            self.all.get(index)
        } else {
            None
        }
    }

    /// Advance to the next track.
    ///
    /// With `shuffle`, picks a uniformly random index; otherwise moves one
    /// forward and wraps around. No-op on an empty list.
    pub fn next_with<R: Rng + ?Sized>(
        &mut self,
        shuffle: bool,
        rng: &mut R,
    ) -> Option<&TrackWithRelations> {
        let len = self.all.len();
        if len == 0 {
            return None;
        }

        let index = if shuffle {
            rng.random_range(0..len)
        } else {
            match self.current {
                Some(i) => (i + 1) % len,
                None => 0,
            }
        };
        self.current = Some(index);
        self.all.get(index)
    }

    /// Advance to the next track using the thread-local RNG.
    pub fn next(&mut self, shuffle: bool) -> Option<&TrackWithRelations> {
        let mut rng = rand::rng();
        self.next_with(shuffle, &mut rng)
    }

    /// Step back one track, wrapping around. No-op on an empty list.
    ///
    /// Before anything has been started the position counts as -1.
    pub fn previous(&mut self) -> Option<&TrackWithRelations> {
        let len = self.all.len() as i64;
        if len == 0 {
            return None;
        }

        let current = self.current.map(|i| i as i64).unwrap_or(-1);
        let index = (current - 1 + len).rem_euclid(len) as usize;
        self.current = Some(index);
        self.all.get(index)
    }

    /// Track to start when play is pressed with nothing current.
    pub fn start(&mut self) -> Option<&TrackWithRelations> {
        if self.current.is_none() {
            return self.jump_to(0);
        }
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{mock_track, mock_tracks};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn playlist(n: usize) -> Playlist {
        let mut p = Playlist::new();
        p.load(mock_tracks(n));
        p
    }

    #[test]
    fn test_load_initializes_both_lists() {
        let p = playlist(3);
        assert_eq!(p.tracks(), p.visible());
        assert_eq!(p.current_index(), None);
        assert!(p.current().is_none());
    }

    #[test]
    fn test_next_from_start_walks_and_wraps() {
        let mut p = Playlist::new();
        p.load(vec![mock_track(1, "A"), mock_track(2, "B")]);

        assert_eq!(p.next(false).unwrap().title, "A");
        assert_eq!(p.current_index(), Some(0));
        assert_eq!(p.next(false).unwrap().title, "B");
        assert_eq!(p.current_index(), Some(1));
        assert_eq!(p.next(false).unwrap().title, "A");
        assert_eq!(p.current_index(), Some(0));
    }

    #[test]
    fn test_previous_wraps_backwards() {
        let mut p = playlist(3);
        p.jump_to(0);
        assert_eq!(p.previous().unwrap().id, 3);
        assert_eq!(p.previous().unwrap().id, 2);
    }

    #[test]
    fn test_previous_before_start_uses_minus_one() {
        let mut p = playlist(4);
        // (-1 - 1 + 4) mod 4 = 2
        p.previous();
        assert_eq!(p.current_index(), Some(2));

        let mut single = playlist(1);
        single.previous();
        assert_eq!(single.current_index(), Some(0));
    }

    #[test]
    fn test_navigation_on_empty_is_noop() {
        let mut p = Playlist::new();
        assert!(p.next(false).is_none());
        assert!(p.next(true).is_none());
        assert!(p.previous().is_none());
        assert_eq!(p.current_index(), None);
    }

    #[test]
    fn test_shuffle_stays_in_bounds() {
        let mut p = playlist(5);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            p.next_with(true, &mut rng);
            assert!(p.current_index().unwrap() < 5);
        }
    }

    #[test]
    fn test_select_visible_resolves_into_full_list() {
        let mut p = Playlist::new();
        p.load(vec![
            mock_track(1, "Alpha"),
            mock_track(2, "Beta"),
            mock_track(3, "Gamma"),
        ]);
        p.set_query("gamma");
        assert_eq!(p.visible().len(), 1);

        let selected = p.select_visible(0).unwrap();
        assert_eq!(selected.title, "Gamma");
        assert_eq!(p.current_index(), Some(2));

        // Navigation continues over the full list, not the filtered view
        assert_eq!(p.next(false).unwrap().title, "Alpha");
    }

    #[test]
    fn test_select_visible_out_of_range() {
        let mut p = playlist(2);
        assert!(p.select_visible(5).is_none());
        assert_eq!(p.current_index(), None);
    }

    #[test]
    fn test_add_respects_active_query() {
        let mut p = Playlist::new();
        p.load(vec![mock_track(1, "Alpha")]);
        p.set_query("beta");

        p.add(mock_track(2, "Beta"));
        p.add(mock_track(3, "Gamma"));

        assert_eq!(p.len(), 3);
        assert_eq!(p.visible().len(), 1);
        assert_eq!(p.visible()[0].title, "Beta");

        p.set_query("");
        assert_eq!(p.visible(), p.tracks());
    }

    #[test]
    fn test_remove_from_both_lists() {
        let mut p = playlist(3);
        let removed = p.remove(2).unwrap();
        assert_eq!(removed.id, 2);
        assert!(p.tracks().iter().all(|t| t.id != 2));
        assert!(p.visible().iter().all(|t| t.id != 2));
        assert!(p.remove(2).is_none());
    }

    #[test]
    fn test_remove_current_then_next_skips_deleted() {
        let mut p = playlist(3);
        p.jump_to(1);
        p.remove(2);

        for _ in 0..4 {
            let next = p.next(false).unwrap();
            assert_ne!(next.id, 2);
        }
    }

    #[test]
    fn test_remove_before_current_does_not_adjust_index() {
        let mut p = playlist(3);
        p.jump_to(2);
        p.remove(1);
        // Index stays 2, which is now past the end of the list
        assert_eq!(p.current_index(), Some(2));
        assert!(p.current().is_none());
        // Navigation recovers by wrapping
        assert_eq!(p.next(false).unwrap().id, 2);
    }

    #[test]
    fn test_remove_last_track_then_navigate() {
        let mut p = playlist(1);
        p.jump_to(0);
        p.remove(1);
        assert!(p.next(false).is_none());
        assert!(p.previous().is_none());
    }

    #[test]
    fn test_replace_updates_and_refilters() {
        let mut p = playlist(2);
        p.set_query("floyd");
        assert!(p.visible().is_empty());

        let edited = TrackWithRelations {
            artist_name: Some("Pink Floyd".to_string()),
            ..p.tracks()[0].clone()
        };
        assert!(p.replace(edited.clone()));
        assert_eq!(p.visible(), &[edited]);
        assert!(!p.replace(mock_track(99, "ghost")));
    }

    #[test]
    fn test_start_picks_first_when_idle() {
        let mut p = playlist(3);
        assert_eq!(p.start().unwrap().id, 1);
        p.jump_to(2);
        assert_eq!(p.start().unwrap().id, 3);
        assert!(Playlist::new().start().is_none());
    }
}
