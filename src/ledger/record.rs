//! Ownership record for one purchasable tile.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Houses on a street once it has a hotel.
pub const HOTEL: u8 = 5;

/// Who owns a tile and how far it is built up.
///
/// `Unowned → Owned(x) → Owned(y) … → Unowned`; records are never removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipRecord {
    /// `None` means the bank holds it.
    pub owner: Option<PlayerId>,
    /// 0-4 houses, or [`HOTEL`].
    pub houses: u8,
}

impl OwnershipRecord {
    #[must_use]
    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }

    #[must_use]
    pub fn has_hotel(&self) -> bool {
        self.houses >= HOTEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unowned_and_bare() {
        let record = OwnershipRecord::default();
        assert_eq!(record.owner, None);
        assert_eq!(record.houses, 0);
        assert!(!record.is_owned_by(PlayerId::new(0)));
    }

    #[test]
    fn test_hotel() {
        let record = OwnershipRecord { owner: Some(PlayerId::new(1)), houses: HOTEL };
        assert!(record.has_hotel());
        assert!(record.is_owned_by(PlayerId::new(1)));
    }
}
