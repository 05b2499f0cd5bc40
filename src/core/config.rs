//! Table configuration.
//!
//! Everything that varies between tables but not during a game: seat count,
//! opening cash, jail rules. Built with `Default` plus `with_*` methods and
//! checked once by [`GameConfig::validate`] when a table is created.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::Money;

/// What happens after a jailed player pays the fine on their final attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BailMovement {
    /// Leave jail and move by the roll that just failed to be a double.
    #[default]
    MoveRolledTotal,
    /// Leave jail but stay on the jail tile until next turn.
    StayPut,
}

/// Table configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seats at the table (2-8).
    pub player_count: usize,

    /// The first `human_count` seats are human; the rest are bots.
    pub human_count: usize,

    /// Cash each player starts with.
    pub starting_balance: Money,

    /// Fine paid to leave jail after the last failed attempt.
    pub jail_fine: Money,

    /// Failed double attempts before the fine is forced.
    pub max_jail_turns: u8,

    /// Consecutive doubles that send a player to jail instead of moving.
    pub max_consecutive_doubles: u8,

    pub bail_movement: BailMovement,

    /// Seed for the table's built-in dice.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 4,
            human_count: 0,
            starting_balance: 1500,
            jail_fine: 50,
            max_jail_turns: 3,
            max_consecutive_doubles: 3,
            bail_movement: BailMovement::MoveRolledTotal,
            seed: 42,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_players(mut self, player_count: usize, human_count: usize) -> Self {
        self.player_count = player_count;
        self.human_count = human_count;
        self
    }

    #[must_use]
    pub fn with_starting_balance(mut self, balance: Money) -> Self {
        self.starting_balance = balance;
        self
    }

    #[must_use]
    pub fn with_jail_fine(mut self, fine: Money) -> Self {
        self.jail_fine = fine;
        self
    }

    #[must_use]
    pub fn with_bail_movement(mut self, movement: BailMovement) -> Self {
        self.bail_movement = movement;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check every field; the first violation wins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=8).contains(&self.player_count) {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        if self.human_count > self.player_count {
            return Err(ConfigError::HumanCount {
                humans: self.human_count,
                players: self.player_count,
            });
        }
        let positives: [(&'static str, i64); 4] = [
            ("starting_balance", self.starting_balance),
            ("jail_fine", self.jail_fine),
            ("max_jail_turns", i64::from(self.max_jail_turns)),
            ("max_consecutive_doubles", i64::from(self.max_consecutive_doubles)),
        ];
        for (field, value) in positives {
            if value <= 0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        Ok(())
    }
}
