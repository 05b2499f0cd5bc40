//! The bundled Glasgow board.

use crate::core::Money;

use super::tile::{ColorGroup, PropertyDeed, RailroadDeed, RentTable, Tile, TileKind, UtilityDeed};
use ColorGroup::*;

const RAILROAD_COST: Money = 200;
const RAILROAD_RENT: [Money; 4] = [25, 50, 100, 200];
const UTILITY_COST: Money = 150;

/// `rent` is `[base, monopoly, house1, house2, house3, house4, hotel]`.
fn street(
    id: u8,
    name: &str,
    group: ColorGroup,
    cost: Money,
    house_cost: Money,
    rent: [Money; 7],
) -> Tile {
    let [base, monopoly, h1, h2, h3, h4, hotel] = rent;
    Tile::new(
        id,
        name,
        TileKind::Property(PropertyDeed {
            group,
            cost,
            house_cost,
            rent: RentTable {
                base,
                monopoly,
                houses: [h1, h2, h3, h4],
                hotel,
            },
        }),
    )
}

fn railroad(id: u8, name: &str) -> Tile {
    Tile::new(
        id,
        name,
        TileKind::Railroad(RailroadDeed {
            cost: RAILROAD_COST,
            rent_by_count: RAILROAD_RENT,
        }),
    )
}

fn utility(id: u8, name: &str) -> Tile {
    Tile::new(
        id,
        name,
        TileKind::Utility(UtilityDeed {
            cost: UTILITY_COST,
            one: 4,
            both: 10,
        }),
    )
}

/// All 40 tiles in loop order, starting at Go.
#[rustfmt::skip]
pub fn tiles() -> Vec<Tile> {
    vec![
        Tile::new(0, "Go", TileKind::Go { payout: 200 }),
        street(1, "Botanic Gardens", Brown, 60, 50, [2, 4, 10, 30, 90, 160, 250]),
        Tile::new(2, "Community Chest", TileKind::CommunityChest),
        street(3, "Oran Mor", Brown, 60, 50, [4, 8, 20, 60, 180, 320, 450]),
        Tile::new(4, "Income Tax", TileKind::Tax { amount: 200 }),
        railroad(5, "St Enoch Underground"),
        street(6, "Richmond Street", LightBlue, 100, 50, [6, 12, 30, 90, 270, 400, 550]),
        Tile::new(7, "Chance", TileKind::Chance),
        street(8, "Kelvingrove", LightBlue, 100, 50, [6, 12, 30, 90, 270, 400, 550]),
        street(9, "The Lighthouse", LightBlue, 120, 50, [8, 16, 40, 100, 300, 450, 600]),
        Tile::new(10, "Jail / Just Visiting", TileKind::Jail),
        street(11, "Celtic Park", Pink, 140, 100, [10, 20, 50, 150, 450, 625, 750]),
        utility(12, "Irn Bru"),
        street(13, "Argyle Street", Pink, 140, 100, [10, 20, 50, 150, 450, 625, 750]),
        street(14, "Hampden Park", Pink, 160, 100, [12, 24, 60, 180, 500, 700, 900]),
        railroad(15, "Queen Street Station"),
        street(16, "Buchanan Street", Orange, 180, 100, [14, 28, 70, 200, 550, 750, 950]),
        Tile::new(17, "Community Chest", TileKind::CommunityChest),
        street(18, "Byres Road", Orange, 180, 100, [14, 28, 70, 200, 550, 750, 950]),
        street(19, "Howard Street", Orange, 200, 100, [16, 32, 80, 220, 600, 800, 1000]),
        Tile::new(20, "Free Parking", TileKind::FreeParking),
        street(21, "Auchentoshan Distillery", Red, 220, 150, [18, 36, 90, 250, 700, 875, 1050]),
        Tile::new(22, "Chance", TileKind::Chance),
        street(23, "Duke Street", Red, 220, 150, [18, 36, 90, 250, 700, 875, 1050]),
        street(24, "Gallowgate", Red, 240, 150, [20, 40, 100, 300, 750, 925, 1100]),
        railroad(25, "Buchanan Bus Station"),
        street(26, "Bath Street", Yellow, 260, 150, [22, 44, 110, 330, 800, 975, 1150]),
        street(27, "Sauchiehall Street", Yellow, 260, 150, [22, 44, 110, 330, 800, 975, 1150]),
        utility(28, "Figma"),
        street(29, "St Vincent Street", Yellow, 280, 150, [24, 48, 120, 360, 850, 1025, 1200]),
        Tile::new(30, "Go To Jail", TileKind::GoToJail),
        street(31, "West Regent Street", Green, 300, 200, [26, 52, 130, 390, 900, 1100, 1275]),
        street(32, "Charing Cross", Green, 300, 200, [26, 52, 130, 390, 900, 1100, 1275]),
        Tile::new(33, "Community Chest", TileKind::CommunityChest),
        street(34, "Bothwell Street", Green, 320, 200, [28, 56, 150, 450, 1000, 1200, 1400]),
        railroad(35, "Central Station"),
        Tile::new(36, "Chance", TileKind::Chance),
        street(37, "George Square", DarkBlue, 350, 200, [35, 70, 175, 500, 1100, 1300, 1500]),
        Tile::new(38, "Luxury Tax", TileKind::LuxuryTax { amount: 75 }),
        street(
            39,
            "Pollok Country Park",
            DarkBlue,
            400,
            200,
            [50, 100, 200, 600, 1400, 1700, 2000],
        ),
    ]
}
