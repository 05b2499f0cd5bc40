//! Bot-only simulation CLI.
//!
//! Seats a table of bots, plays a number of rounds and prints final
//! balances and holdings.
//!
//! Usage:
//!   cargo run --release --bin simulate -- [OPTIONS]
//!
//! Options:
//!   --players N     Seats at the table, 2-8 (default: 4)
//!   --rounds N      Full rounds to play (default: 50)
//!   --seed N        Dice and policy seed (default: 42)
//!   --reserve N     Cash the greedy bots keep in hand (default: 100)
//!   --stay-put      Bailed-out players stay on the jail tile
//!
//! Set `RUST_LOG=board_ledger=debug` to follow every ledger mutation.

use std::env;
use std::process;
use std::str::FromStr;

use tracing_subscriber::{prelude::*, EnvFilter};

use board_ledger::agents::{play_turn, DecisionPolicy, GreedyBuyer, PassivePolicy, RandomPolicy};
use board_ledger::core::{BailMovement, GameConfig, SeededDice};
use board_ledger::turn::TurnController;

struct Options {
    config: GameConfig,
    rounds: u32,
    reserve: i64,
}

fn parse_value<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|raw| raw.parse()) {
        Some(Ok(value)) => value,
        _ => {
            eprintln!("invalid or missing value for {flag}");
            print_usage();
            process::exit(1);
        }
    }
}

fn parse_args() -> Options {
    let args: Vec<String> = env::args().collect();
    let mut options = Options {
        config: GameConfig::default(),
        rounds: 50,
        reserve: 100,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--players" => {
                i += 1;
                let players = parse_value(&args, i, "--players");
                options.config = options.config.with_players(players, 0);
            }
            "--rounds" => {
                i += 1;
                options.rounds = parse_value(&args, i, "--rounds");
            }
            "--seed" => {
                i += 1;
                options.config = options.config.with_seed(parse_value(&args, i, "--seed"));
            }
            "--reserve" => {
                i += 1;
                options.reserve = parse_value(&args, i, "--reserve");
            }
            "--stay-put" => {
                options.config = options.config.with_bail_movement(BailMovement::StayPut);
            }
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }
    options
}

fn print_usage() {
    eprintln!("Usage: simulate [--players N] [--rounds N] [--seed N] [--reserve N] [--stay-put]");
}

/// Seat 0 is greedy, seat 1 passive, the rest alternate random and greedy.
fn seat_policies(count: usize, seed: u64, reserve: i64) -> Vec<Box<dyn DecisionPolicy>> {
    (0..count)
        .map(|seat| -> Box<dyn DecisionPolicy> {
            match seat {
                0 => Box::new(GreedyBuyer { reserve }),
                1 => Box::new(PassivePolicy),
                s if s % 2 == 0 => Box::new(RandomPolicy::new(seed.wrapping_add(s as u64))),
                _ => Box::new(GreedyBuyer { reserve: reserve * 2 }),
            }
        })
        .collect()
}

fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();

    let options = parse_args();
    let mut table = match TurnController::new(options.config.clone()) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            process::exit(1);
        }
    };

    let seats = options.config.player_count;
    let mut dice = SeededDice::new(options.config.seed);
    let mut policies = seat_policies(seats, options.config.seed, options.reserve);

    'rounds: for _ in 0..options.rounds {
        for _ in 0..seats {
            let seat = table.active_player().index();
            if let Err(err) = play_turn(&mut table, &mut dice, policies[seat].as_mut()) {
                eprintln!("turn aborted: {err}");
                break 'rounds;
            }
        }
    }

    println!("After {} rounds (turn {}):", options.rounds, table.turn_number());
    for player in table.players().iter() {
        let deeds: Vec<String> = player
            .holdings
            .iter()
            .map(|&t| table.board().tile(t).name.clone())
            .collect();
        println!(
            "  {:<9} ${:>6}  {:>2} deeds{}  {}",
            player.id.to_string(),
            player.balance,
            deeds.len(),
            if player.in_jail { " (jailed)" } else { "" },
            deeds.join(", ")
        );
    }
}
