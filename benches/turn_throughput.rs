use criterion::{black_box, criterion_group, criterion_main, Criterion};

use board_ledger::agents::{play_turn, GreedyBuyer};
use board_ledger::board::TileId;
use board_ledger::core::{GameConfig, PlayerId, SeededDice};
use board_ledger::turn::TurnController;

fn bench_hundred_turns(c: &mut Criterion) {
    let table = TurnController::new(GameConfig::default()).unwrap();
    c.bench_function("greedy_100_turns_4_players", |b| {
        b.iter(|| {
            let mut table = table.clone();
            let mut dice = SeededDice::new(7);
            let mut policy = GreedyBuyer::default();
            for _ in 0..100 {
                play_turn(&mut table, &mut dice, &mut policy).unwrap();
            }
            black_box(table.turn_number())
        })
    });
}

fn bench_compute_rent(c: &mut Criterion) {
    let mut table = TurnController::new(GameConfig::default()).unwrap();
    {
        let (ledger, players) = table.setup_mut();
        for tile in [5, 15, 25, 37, 39] {
            ledger.purchase(players, PlayerId::new(0), TileId::new(tile)).unwrap();
        }
    }
    c.bench_function("compute_rent_all_tiles", |b| {
        b.iter(|| {
            let ledger = table.ledger();
            let total: i64 = (0..40)
                .filter_map(|t| ledger.compute_rent(TileId::new(t), Some(7)).ok())
                .sum();
            black_box(total)
        })
    });
}

fn bench_table_clone(c: &mut Criterion) {
    let mut table = TurnController::new(GameConfig::default()).unwrap();
    let mut dice = SeededDice::new(3);
    let mut policy = GreedyBuyer::default();
    for _ in 0..200 {
        play_turn(&mut table, &mut dice, &mut policy).unwrap();
    }
    c.bench_function("table_clone_after_200_turns", |b| {
        b.iter(|| black_box(table.clone()))
    });
}

criterion_group!(benches, bench_hundred_turns, bench_compute_rent, bench_table_clone);
criterion_main!(benches);
