//! End-to-end rule scenarios.
//!
//! Each test drives a table through the controller with scripted dice and
//! checks the rule it names: buying and rent, Go payouts on wraparound,
//! the doubles cap and the two bail modes.

use std::sync::Arc;

use board_ledger::board::{Board, TileId};
use board_ledger::core::{Action, BailMovement, DiceRoll, GameConfig, PlayerId, ScriptedDice};
use board_ledger::ledger::PropertyLedger;
use board_ledger::players::PlayerRegistry;
use board_ledger::turn::{JailReason, JailRelease, RollOutcome, TurnController, TurnEvent};

const A: PlayerId = PlayerId(0);
const B: PlayerId = PlayerId(1);

fn two_player_table(config: GameConfig) -> TurnController {
    TurnController::new(config.with_players(2, 0)).unwrap()
}

fn roll(a: u8, b: u8) -> DiceRoll {
    DiceRoll::new(a, b).unwrap()
}

/// A buys tile 1 for 60; B lands there and pays A the base rent.
#[test]
fn test_buy_then_pay_base_rent() {
    let mut ledger = PropertyLedger::new(Arc::new(Board::classic()));
    let mut players = PlayerRegistry::new(&GameConfig::default().with_players(2, 0));

    ledger.purchase(&mut players, A, TileId::new(1)).unwrap();
    assert_eq!(players.balance(A), Ok(1440));
    assert_eq!(ledger.owner(TileId::new(1)), Some(A));

    let rent = ledger.compute_rent(TileId::new(1), None).unwrap();
    assert_eq!(rent, 2);
    let payment = ledger.pay_rent(&mut players, B, TileId::new(1), None).unwrap().unwrap();
    assert_eq!(payment.paid, rent);
    assert_eq!(players.balance(B), Ok(1500 - rent));
    assert_eq!(players.balance(A), Ok(1440 + rent));
}

/// The same scenario played through the controller.
#[test]
fn test_buy_then_pay_base_rent_through_turns() {
    let mut table = two_player_table(GameConfig::default());
    table.setup_mut().1.set_position(A, TileId::new(39)).unwrap();
    table.setup_mut().1.set_position(B, TileId::new(38)).unwrap();

    // A: 39 → 1 via Go, buys.
    let outcome = table.submit_roll(roll(1, 1)).unwrap();
    assert_eq!(outcome.landed_on(), Some(TileId::new(1)));
    table.apply(Action::Buy).unwrap();
    // The double grants A another roll: 1 → 4 (Income Tax).
    table.submit_roll(roll(1, 2)).unwrap();
    let a_after = table.players().balance(A).unwrap();
    assert_eq!(a_after, 1500 + 200 - 60 - 200);

    // B: 38 → 1 via Go, pays rent on arrival.
    let outcome = table.submit_roll(roll(1, 2)).unwrap();
    let payment = *outcome.rent().unwrap();
    assert_eq!((payment.payer, payment.owner, payment.paid), (B, A, 2));
    assert_eq!(table.players().balance(B), Ok(1500 + 200 - 2));
    assert_eq!(table.players().balance(A), Ok(a_after + 2));
}

/// 39 + 2 lands on tile 1 with exactly one Go payout.
#[test]
fn test_wraparound_pays_go_once() {
    let mut table = two_player_table(GameConfig::default());
    table.setup_mut().1.set_position(A, TileId::new(39)).unwrap();

    let outcome = table.submit_roll(roll(1, 1)).unwrap();
    assert_eq!(outcome.landed_on(), Some(TileId::new(1)));
    assert_eq!(outcome.go_payouts(), 1);
    assert_eq!(table.players().balance(A), Ok(1700));
}

/// Landing exactly on Go pays once; resolving the Go tile adds nothing.
#[test]
fn test_landing_on_go_pays_once() {
    let mut table = two_player_table(GameConfig::default());
    table.setup_mut().1.set_position(A, TileId::new(33)).unwrap();

    let outcome = table.submit_roll(roll(3, 4)).unwrap();
    assert_eq!(outcome.landed_on(), Some(TileId::GO));
    assert_eq!(outcome.go_payouts(), 1);
    assert_eq!(table.players().balance(A), Ok(1700));
    assert_eq!(table.active_player(), B);
}

/// Third double: jail, no movement from that roll, turn passes.
#[test]
fn test_three_doubles_send_to_jail() {
    let mut table = two_player_table(GameConfig::default());
    // 1+1 → 2 (Community Chest), 1+1 → 4 (Income Tax), 2+2 would reach 8.
    let mut dice = ScriptedDice::new(&[(1, 1), (1, 1), (2, 2)]);

    table.roll_with(&mut dice).unwrap();
    table.roll_with(&mut dice).unwrap();
    let before = table.players().get(A).unwrap().position;
    assert_eq!(before, TileId::new(4));

    let outcome = table.roll_with(&mut dice).unwrap();
    assert_eq!(outcome.sent_to_jail(), Some(JailReason::ConsecutiveDoubles));
    assert!(!outcome.events.iter().any(|e| matches!(e, TurnEvent::Moved { .. })));

    let player = table.players().get(A).unwrap();
    assert!(player.in_jail);
    assert_eq!(player.position, table.board().jail());
    assert_eq!(table.active_player(), B);
}

/// Teleporting to jail from Go To Jail never pays Go.
#[test]
fn test_go_to_jail_does_not_pay_go() {
    let mut table = two_player_table(GameConfig::default());
    table.setup_mut().1.set_position(A, TileId::new(25)).unwrap();

    let outcome = table.submit_roll(roll(2, 3)).unwrap();
    assert_eq!(outcome.sent_to_jail(), Some(JailReason::GoToJailTile));
    assert_eq!(outcome.go_payouts(), 0);
    assert_eq!(table.players().balance(A), Ok(1500));
}

/// Jail A, miss twice, then roll 2+3 on the forced-fine attempt.
fn serve_until_bail(mut table: TurnController) -> (TurnController, RollOutcome) {
    table.setup_mut().1.send_to_jail(A, TileId::new(10)).unwrap();
    // B's rolls land on Chance, then Hampden Park (closed with EndTurn).
    let mut dice = ScriptedDice::new(&[(1, 2), (3, 4), (1, 2), (2, 5), (2, 3)]);
    for _ in 0..2 {
        table.roll_with(&mut dice).unwrap();
        table.roll_with(&mut dice).unwrap();
        if table.pending().is_some() {
            table.apply(Action::EndTurn).unwrap();
        }
    }
    let outcome = table.roll_with(&mut dice).unwrap();
    (table, outcome)
}

#[test]
fn test_bail_moves_rolled_total_by_default() {
    let (table, outcome) = serve_until_bail(two_player_table(GameConfig::default()));

    assert!(outcome.events.contains(&TurnEvent::ReleasedFromJail {
        player: A,
        how: JailRelease::Fine { amount: 50 },
    }));
    assert_eq!(outcome.landed_on(), Some(TileId::new(15)));
    assert_eq!(table.players().balance(A), Ok(1450));
}

#[test]
fn test_bail_stay_put() {
    let config = GameConfig::default().with_bail_movement(BailMovement::StayPut);
    let (table, outcome) = serve_until_bail(two_player_table(config));

    assert!(outcome.events.iter().any(|e| matches!(e, TurnEvent::ReleasedFromJail { .. })));
    assert_eq!(outcome.landed_on(), None);
    let player = table.players().get(A).unwrap();
    assert!(!player.in_jail);
    assert_eq!(player.position, TileId::new(10));
    assert_eq!(table.active_player(), B);
}
