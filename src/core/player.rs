//! Player identification and per-seat storage.
//!
//! ## PlayerId
//!
//! Stable seat index assigned at game setup. Ids are never reused within a
//! session and there is no elimination, so `0..player_count` is always the
//! full set of valid ids.
//!
//! ## PlayerMap
//!
//! One slot per seat, backed by a `Vec` for O(1) access by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat identifier. The first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Raw 0-based seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over every seat of a table with `player_count` players.
    ///
    /// ```
    /// use board_ledger::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(seats.len(), 4);
    /// assert_eq!(seats[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// The seat after this one, wrapping round the table.
    #[must_use]
    pub fn next(self, player_count: usize) -> PlayerId {
        PlayerId(((self.index() + 1) % player_count) as u8)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Per-seat storage.
///
/// ```
/// use board_ledger::core::{PlayerId, PlayerMap};
///
/// let mut cash: PlayerMap<i64> = PlayerMap::with_value(4, 1500);
/// cash[PlayerId::new(2)] -= 60;
/// assert_eq!(cash[PlayerId::new(2)], 1440);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build one entry per seat from a factory.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            data: PlayerId::all(player_count).map(factory).collect(),
        }
    }

    /// Every seat starts with the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Whether `player` is a seat at this table.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.data.len()
    }

    /// Checked lookup; `None` for an unknown seat.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Checked mutable lookup; `None` for an unknown seat.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    /// Panics on an unknown seat; use [`PlayerMap::get`] for untrusted ids.
    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_display_is_one_based() {
        assert_eq!(format!("{}", PlayerId::new(0)), "Player 1");
        assert_eq!(format!("{}", PlayerId::new(3)), "Player 4");
    }

    #[test]
    fn test_next_wraps_round_the_table() {
        assert_eq!(PlayerId::new(0).next(4), PlayerId::new(1));
        assert_eq!(PlayerId::new(3).next(4), PlayerId::new(0));
        assert_eq!(PlayerId::new(1).next(2), PlayerId::new(0));
    }

    #[test]
    fn test_player_map_factory() {
        let map: PlayerMap<i64> = PlayerMap::new(3, |p| p.index() as i64 * 100);

        assert_eq!(map[PlayerId::new(0)], 0);
        assert_eq!(map[PlayerId::new(2)], 200);
        assert_eq!(map.player_count(), 3);
    }

    #[test]
    fn test_checked_lookup() {
        let map: PlayerMap<i64> = PlayerMap::with_value(2, 1500);

        assert!(map.contains(PlayerId::new(1)));
        assert!(!map.contains(PlayerId::new(2)));
        assert_eq!(map.get(PlayerId::new(1)), Some(&1500));
        assert_eq!(map.get(PlayerId::new(7)), None);
    }

    #[test]
    fn test_player_map_serialization() {
        let map: PlayerMap<i64> = PlayerMap::new(2, |p| p.index() as i64 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let restored: PlayerMap<i64> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, restored);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_player_map_zero_players() {
        let _: PlayerMap<i64> = PlayerMap::with_value(0, 0);
    }
}
