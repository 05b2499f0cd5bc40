//! Board definition: the fixed loop of 40 tiles.
//!
//! The board is loaded once and shared read-only (behind an `Arc`) by the
//! ledger and the turn controller. It answers lookups only: which tile is
//! where, which streets form a colour group, where the jail is.

pub mod tile;
pub mod classic;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::core::Money;

pub use tile::{
    ColorGroup, PropertyDeed, RailroadDeed, RentTable, Tile, TileId, TileKind, UtilityDeed,
    BOARD_SIZE,
};

/// Why a tile list was rejected as a board.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board needs {BOARD_SIZE} tiles, got {0}")]
    WrongSize(usize),

    #[error("tile at position {position} has id {id}")]
    OutOfOrder { position: usize, id: u8 },

    #[error("board must have exactly one {0} tile")]
    Landmark(&'static str),
}

/// The immutable board with precomputed group indexes.
#[derive(Clone, Debug)]
pub struct Board {
    tiles: Vec<Tile>,
    groups: FxHashMap<ColorGroup, SmallVec<[TileId; 3]>>,
    railroads: SmallVec<[TileId; 4]>,
    utilities: SmallVec<[TileId; 2]>,
    jail: TileId,
    go_payout: Money,
}

impl Board {
    /// The 40-tile Glasgow edition.
    ///
    /// Panics only if the bundled table is malformed, which the tests rule out.
    #[must_use]
    pub fn classic() -> Self {
        Self::from_tiles(classic::tiles())
            .unwrap_or_else(|err| panic!("bundled board is malformed: {err}"))
    }

    /// Build a board from tiles listed in loop order.
    pub fn from_tiles(tiles: Vec<Tile>) -> Result<Self, BoardError> {
        if tiles.len() != usize::from(BOARD_SIZE) {
            return Err(BoardError::WrongSize(tiles.len()));
        }

        let mut groups: FxHashMap<ColorGroup, SmallVec<[TileId; 3]>> = FxHashMap::default();
        let mut railroads = SmallVec::new();
        let mut utilities = SmallVec::new();
        let mut jail = None;
        let mut go_payout = None;

        for (position, tile) in tiles.iter().enumerate() {
            if tile.id.index() != position {
                return Err(BoardError::OutOfOrder { position, id: tile.id.0 });
            }
            match tile.kind {
                TileKind::Property(deed) => groups.entry(deed.group).or_default().push(tile.id),
                TileKind::Railroad(_) => railroads.push(tile.id),
                TileKind::Utility(_) => utilities.push(tile.id),
                TileKind::Jail => {
                    if jail.replace(tile.id).is_some() {
                        return Err(BoardError::Landmark("jail"));
                    }
                }
                TileKind::Go { payout } => {
                    if position != 0 || go_payout.replace(payout).is_some() {
                        return Err(BoardError::Landmark("go"));
                    }
                }
                _ => {}
            }
        }

        Ok(Self {
            tiles,
            groups,
            railroads,
            utilities,
            jail: jail.ok_or(BoardError::Landmark("jail"))?,
            go_payout: go_payout.ok_or(BoardError::Landmark("go"))?,
        })
    }

    /// Look a tile up; `None` for ids outside the loop.
    #[must_use]
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    /// Infallible lookup for ids produced by movement.
    #[must_use]
    pub fn tile(&self, id: TileId) -> &Tile {
        &self.tiles[id.index() % self.tiles.len()]
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Every Property, Railroad and Utility tile.
    pub fn ownable_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter(|t| t.is_ownable())
    }

    /// Streets of a colour group, in loop order.
    #[must_use]
    pub fn group_members(&self, group: ColorGroup) -> &[TileId] {
        self.groups.get(&group).map_or(&[], |members| members.as_slice())
    }

    #[must_use]
    pub fn railroads(&self) -> &[TileId] {
        &self.railroads
    }

    #[must_use]
    pub fn utilities(&self) -> &[TileId] {
        &self.utilities
    }

    #[must_use]
    pub fn jail(&self) -> TileId {
        self.jail
    }

    /// Paid once per crossing of (or landing on) Go.
    #[must_use]
    pub fn go_payout(&self) -> Money {
        self.go_payout
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::classic()
    }
}
