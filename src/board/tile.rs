//! Tile templates.
//!
//! A [`Tile`] is immutable: id, display name and a [`TileKind`] carrying the
//! kind-specific economics. Ownership and houses live in the ledger, never
//! here.

use serde::{Deserialize, Serialize};

use crate::core::Money;

/// Number of tiles in the loop.
pub const BOARD_SIZE: u8 = 40;

/// Position on the board, `0..40`. Also the loop order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u8);

impl TileId {
    /// The Go tile.
    pub const GO: TileId = TileId(0);

    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Step forward `steps` tiles round the loop.
    ///
    /// Returns the destination and whether tile 0 was crossed or landed on.
    ///
    /// ```
    /// use board_ledger::board::TileId;
    ///
    /// assert_eq!(TileId::new(39).advance(2), (TileId::new(1), true));
    /// assert_eq!(TileId::new(38).advance(2), (TileId::new(0), true));
    /// assert_eq!(TileId::new(5).advance(7), (TileId::new(12), false));
    /// ```
    #[must_use]
    pub const fn advance(self, steps: u8) -> (TileId, bool) {
        let raw = self.0 as u16 + steps as u16;
        let size = BOARD_SIZE as u16;
        (TileId((raw % size) as u8), raw >= size)
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tile {}", self.0)
    }
}

/// Colour group of a street property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorGroup {
    Brown,
    LightBlue,
    Pink,
    Orange,
    Red,
    Yellow,
    Green,
    DarkBlue,
}

/// Street rent by improvement level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentTable {
    pub base: Money,
    /// Unimproved rent when the owner holds the whole colour group.
    pub monopoly: Money,
    /// Rent with 1-4 houses.
    pub houses: [Money; 4],
    pub hotel: Money,
}

impl RentTable {
    /// Rent at `level` improvements, where 5 is a hotel.
    ///
    /// Level 0 has no single answer (it depends on the monopoly) and
    /// returns `base`.
    #[must_use]
    pub fn at_level(&self, level: u8) -> Money {
        match level {
            0 => self.base,
            1..=4 => self.houses[usize::from(level - 1)],
            _ => self.hotel,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDeed {
    pub group: ColorGroup,
    pub cost: Money,
    pub house_cost: Money,
    pub rent: RentTable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RailroadDeed {
    pub cost: Money,
    /// Rent when the owner holds 1, 2, 3 or 4 railroads.
    pub rent_by_count: [Money; 4],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilityDeed {
    pub cost: Money,
    /// Dice multiplier when the owner holds one utility.
    pub one: Money,
    /// Dice multiplier when the owner holds both.
    pub both: Money,
}

/// What a tile is and what it does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Go { payout: Money },
    Property(PropertyDeed),
    Railroad(RailroadDeed),
    Utility(UtilityDeed),
    CommunityChest,
    Chance,
    Tax { amount: Money },
    LuxuryTax { amount: Money },
    Jail,
    FreeParking,
    GoToJail,
}

impl TileKind {
    /// Short kind name for logs and views.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Go { .. } => "go",
            Self::Property(_) => "property",
            Self::Railroad(_) => "railroad",
            Self::Utility(_) => "utility",
            Self::CommunityChest => "community-chest",
            Self::Chance => "chance",
            Self::Tax { .. } => "tax",
            Self::LuxuryTax { .. } => "luxury-tax",
            Self::Jail => "jail",
            Self::FreeParking => "free-parking",
            Self::GoToJail => "go-to-jail",
        }
    }
}

/// One square of the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub name: String,
    pub kind: TileKind,
}

impl Tile {
    pub fn new(id: u8, name: impl Into<String>, kind: TileKind) -> Self {
        Self {
            id: TileId(id),
            name: name.into(),
            kind,
        }
    }

    /// Purchase price for Property, Railroad and Utility tiles.
    #[must_use]
    pub fn purchase_cost(&self) -> Option<Money> {
        match self.kind {
            TileKind::Property(deed) => Some(deed.cost),
            TileKind::Railroad(deed) => Some(deed.cost),
            TileKind::Utility(deed) => Some(deed.cost),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_ownable(&self) -> bool {
        self.purchase_cost().is_some()
    }

    /// The street deed, if this is a Property.
    #[must_use]
    pub fn deed(&self) -> Option<&PropertyDeed> {
        match &self.kind {
            TileKind::Property(deed) => Some(deed),
            _ => None,
        }
    }

    /// One-line summary of what landing here means.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.kind {
            TileKind::Go { payout } => format!("Collect ${payout} when passing Go."),
            TileKind::Property(deed) => {
                format!("Price ${} • Base rent ${}", deed.cost, deed.rent.base)
            }
            TileKind::Railroad(deed) => {
                format!("Price ${} • Starting rent ${}", deed.cost, deed.rent_by_count[0])
            }
            TileKind::Utility(deed) => format!("Price ${} • Multiplier x{}", deed.cost, deed.one),
            TileKind::Tax { amount } | TileKind::LuxuryTax { amount } => {
                format!("Pay ${amount} to the bank.")
            }
            TileKind::CommunityChest => "Draw a Community Chest card.".to_string(),
            TileKind::Chance => "Draw a Chance card.".to_string(),
            TileKind::Jail => "Just visiting, or serving time.".to_string(),
            TileKind::FreeParking => "Free rest. Nothing happens.".to_string(),
            TileKind::GoToJail => "Go directly to jail without passing Go.".to_string(),
        }
    }
}
