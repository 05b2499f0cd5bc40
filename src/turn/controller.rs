//! The turn state machine.

use std::sync::Arc;

use im::Vector;
use tracing::{debug, info, warn};

use super::error::TurnError;
use super::outcome::{
    ActionEffect, ActionOutcome, JailReason, JailRelease, RollOutcome, TurnEvent, TurnEvents,
};
use super::phase::{PendingDecision, TurnPhase};
use crate::board::{Board, Tile, TileId, TileKind};
use crate::core::{
    Action, ActionRecord, BailMovement, ConfigError, DiceRoll, DiceSource, GameConfig, PlayerId,
};
use crate::ledger::{PropertyLedger, HOTEL};
use crate::players::PlayerRegistry;

/// Drives turns for one table: consumes dice, moves tokens, resolves tiles
/// and routes the player's decisions to the ledger.
///
/// The controller owns the ledger and the registry; nothing else mutates
/// them during play. It never rolls and never decides: dice come from a
/// [`DiceSource`], decisions from the caller as [`Action`]s.
///
/// ```
/// use board_ledger::core::{Action, DiceRoll, GameConfig};
/// use board_ledger::turn::TurnController;
///
/// let mut table = TurnController::new(GameConfig::default()).unwrap();
/// let outcome = table.submit_roll(DiceRoll::new(2, 3).unwrap()).unwrap();
/// assert_eq!(outcome.landed_on().map(|t| t.0), Some(5));
///
/// // Railroad, unowned: the player decides.
/// assert!(table.legal_actions().contains(&Action::Buy));
/// table.apply(Action::Buy).unwrap();
/// assert_eq!(table.players().balance(outcome.player), Ok(1300));
/// ```
#[derive(Clone, Debug)]
pub struct TurnController {
    config: GameConfig,
    board: Arc<Board>,
    ledger: PropertyLedger,
    players: PlayerRegistry,
    phase: TurnPhase,
    turn_number: u32,
    history: Vector<ActionRecord>,
    sequence: u32,
    last_transaction: Option<Result<ActionEffect, TurnError>>,
}

impl TurnController {
    /// New table on the Glasgow board.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_board(config, Arc::new(Board::classic()))
    }

    pub fn with_board(config: GameConfig, board: Arc<Board>) -> Result<Self, ConfigError> {
        config.validate()?;
        let players = PlayerRegistry::new(&config);
        let ledger = PropertyLedger::new(Arc::clone(&board));
        Ok(Self {
            config,
            board,
            ledger,
            players,
            phase: TurnPhase::AwaitingRoll,
            turn_number: 1,
            history: Vector::new(),
            sequence: 0,
            last_transaction: None,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn ledger(&self) -> &PropertyLedger {
        &self.ledger
    }

    #[must_use]
    pub fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    /// Direct access for seeding a table (fixtures, scenario setup).
    ///
    /// Bypasses phase checks; ownership still goes through the ledger so
    /// both sides stay in step.
    pub fn setup_mut(&mut self) -> (&mut PropertyLedger, &mut PlayerRegistry) {
        (&mut self.ledger, &mut self.players)
    }

    #[must_use]
    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingDecision> {
        self.phase.pending()
    }

    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.players.active()
    }

    /// Starts at 1 and increases on every hand-off.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Every accepted action, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Result of the most recent roll rejection or requested action.
    #[must_use]
    pub fn last_transaction(&self) -> Option<&Result<ActionEffect, TurnError>> {
        self.last_transaction.as_ref()
    }

    // === Rolling ===

    /// Validate raw die faces and submit them.
    pub fn submit_faces(&mut self, first: u8, second: u8) -> Result<RollOutcome, TurnError> {
        let Some(roll) = DiceRoll::new(first, second) else {
            let err = TurnError::InvalidDie(first, second);
            warn!(first, second, "roll rejected: faces out of range");
            self.last_transaction = Some(Err(err.clone()));
            return Err(err);
        };
        self.submit_roll(roll)
    }

    /// Draw from `dice` and submit.
    pub fn roll_with<D: DiceSource + ?Sized>(
        &mut self,
        dice: &mut D,
    ) -> Result<RollOutcome, TurnError> {
        self.submit_roll(dice.roll())
    }

    /// Run one roll for the active player through movement and resolution.
    ///
    /// Rejected (not queued) while a decision point is open.
    pub fn submit_roll(&mut self, roll: DiceRoll) -> Result<RollOutcome, TurnError> {
        if let TurnPhase::AwaitingDecision(pending) = self.phase {
            let err = TurnError::RollRejected { player: pending.player };
            warn!(player = %pending.player, roll = %roll, "roll rejected while a decision is open");
            self.last_transaction = Some(Err(err.clone()));
            return Err(err);
        }

        let player = self.players.active();
        let mut outcome = RollOutcome::new(player, roll);
        debug!(player = %player, roll = %roll, turn = self.turn_number, "dice rolled");

        if self.players.get(player)?.in_jail {
            self.resolve_jail_roll(player, roll, &mut outcome.events)?;
        } else {
            self.resolve_free_roll(player, roll, &mut outcome.events)?;
        }
        Ok(outcome)
    }

    fn resolve_jail_roll(
        &mut self,
        player: PlayerId,
        roll: DiceRoll,
        events: &mut TurnEvents,
    ) -> Result<(), TurnError> {
        if roll.is_double() {
            self.players.release_from_jail(player)?;
            info!(player = %player, "released from jail on doubles");
            events.push(TurnEvent::ReleasedFromJail { player, how: JailRelease::Doubles });
            return self.move_and_resolve(player, roll, false, events);
        }

        let served = self.players.increment_jail_turns(player)?;
        if served < self.config.max_jail_turns {
            events.push(TurnEvent::StayedInJail {
                player,
                turns_served: served,
                fine_unpaid: false,
            });
            return self.end_turn(player, false, events);
        }

        let fine = self.config.jail_fine;
        if self.players.debit(player, fine).is_err() {
            self.players.reset_jail_turns(player)?;
            info!(player = %player, fine, "jail fine unaffordable; stays jailed");
            events.push(TurnEvent::StayedInJail {
                player,
                turns_served: served,
                fine_unpaid: true,
            });
            return self.end_turn(player, false, events);
        }

        self.players.release_from_jail(player)?;
        info!(player = %player, fine, "released from jail on fine");
        let how = JailRelease::Fine { amount: fine };
        events.push(TurnEvent::ReleasedFromJail { player, how });
        match self.config.bail_movement {
            BailMovement::MoveRolledTotal => self.move_and_resolve(player, roll, false, events),
            BailMovement::StayPut => self.end_turn(player, false, events),
        }
    }

    fn resolve_free_roll(
        &mut self,
        player: PlayerId,
        roll: DiceRoll,
        events: &mut TurnEvents,
    ) -> Result<(), TurnError> {
        if !roll.is_double() {
            self.players.reset_doubles(player)?;
            return self.move_and_resolve(player, roll, false, events);
        }

        let doubles = self.players.increment_doubles(player)?;
        if doubles >= self.config.max_consecutive_doubles {
            self.jail(player, JailReason::ConsecutiveDoubles, events)?;
            return self.end_turn(player, false, events);
        }
        self.move_and_resolve(player, roll, true, events)
    }

    fn jail(
        &mut self,
        player: PlayerId,
        reason: JailReason,
        events: &mut TurnEvents,
    ) -> Result<(), TurnError> {
        self.players.send_to_jail(player, self.board.jail())?;
        info!(player = %player, ?reason, "sent to jail");
        events.push(TurnEvent::SentToJail { player, reason });
        Ok(())
    }

    /// Step the token, pay Go if crossed, then resolve the landing tile.
    fn move_and_resolve(
        &mut self,
        player: PlayerId,
        roll: DiceRoll,
        extra_turn: bool,
        events: &mut TurnEvents,
    ) -> Result<(), TurnError> {
        let from = self.players.get(player)?.position;
        let steps = roll.total();
        let (to, passed_go) = from.advance(steps);
        self.players.set_position(player, to)?;
        events.push(TurnEvent::Moved { player, from, to, steps });

        if passed_go {
            let payout = self.board.go_payout();
            self.players.credit(player, payout)?;
            debug!(player = %player, payout, "passed go");
            events.push(TurnEvent::PassedGo { player, payout });
        }

        // Go itself pays nothing here: the crossing above already did.
        let kind = self.board.tile(to).kind;
        match kind {
            TileKind::GoToJail => {
                self.jail(player, JailReason::GoToJailTile, events)?;
                self.end_turn(player, false, events)
            }
            TileKind::Tax { amount } | TileKind::LuxuryTax { amount } => {
                if self.players.debit(player, amount).is_ok() {
                    debug!(player = %player, tile = %to, amount, "tax paid");
                    events.push(TurnEvent::TaxPaid { player, tile: to, amount });
                } else {
                    warn!(player = %player, tile = %to, amount, "tax unaffordable");
                    events.push(TurnEvent::TaxUnpaid { player, tile: to, amount });
                }
                self.end_turn(player, extra_turn, events)
            }
            TileKind::Property(_) | TileKind::Railroad(_) | TileKind::Utility(_) => {
                let rent = self.ledger.pay_rent(&mut self.players, player, to, Some(steps))?;
                if let Some(payment) = rent {
                    events.push(TurnEvent::RentPaid(payment));
                }
                let pending = PendingDecision {
                    player,
                    tile: to,
                    dice_total: steps,
                    extra_turn,
                    rent,
                };
                self.phase = TurnPhase::AwaitingDecision(pending);
                events.push(TurnEvent::DecisionOpened(pending));
                Ok(())
            }
            _ => self.end_turn(player, extra_turn, events),
        }
    }

    /// Grant the extra roll or hand the turn to the next seat.
    fn end_turn(
        &mut self,
        player: PlayerId,
        extra_turn: bool,
        events: &mut TurnEvents,
    ) -> Result<(), TurnError> {
        self.phase = TurnPhase::AwaitingRoll;
        if extra_turn && !self.players.get(player)?.in_jail {
            debug!(player = %player, "doubles: extra turn");
            events.push(TurnEvent::ExtraTurn { player });
            return Ok(());
        }

        self.players.reset_doubles(player)?;
        let next = self.players.advance_active();
        self.turn_number += 1;
        info!(from = %player, next = %next, turn = self.turn_number, "turn passed");
        events.push(TurnEvent::TurnPassed { from: player, next });
        Ok(())
    }

    // === Decisions ===

    /// Apply a decision from the active player.
    ///
    /// Accepted actions are recorded in [`history`](Self::history); refused
    /// ones leave the table untouched. Either way the result is kept as the
    /// last transaction.
    pub fn apply(&mut self, action: Action) -> Result<ActionOutcome, TurnError> {
        let player = self.players.active();
        let turn = self.turn_number;
        let result = if action.is_management() {
            self.manage(player, &action)
        } else {
            self.decide(player, &action)
        };

        match &result {
            Ok(outcome) => {
                self.history.push_back(ActionRecord {
                    player,
                    action,
                    turn,
                    sequence: self.sequence,
                });
                self.sequence += 1;
                self.last_transaction = Some(Ok(outcome.effect.clone()));
            }
            Err(err) => {
                warn!(player = %player, action = action.name(), error = %err, "action rejected");
                self.last_transaction = Some(Err(err.clone()));
            }
        }
        result
    }

    fn decide(&mut self, player: PlayerId, action: &Action) -> Result<ActionOutcome, TurnError> {
        let pending = self.pending_for(action)?;
        let effect = match *action {
            Action::Buy => {
                let cost = self.ledger.purchase(&mut self.players, player, pending.tile)?;
                ActionEffect::Purchased { tile: pending.tile, cost }
            }
            Action::Decline => {
                if self.ledger.owner(pending.tile).is_some() {
                    return Err(invalid(action, "the tile is not for sale"));
                }
                ActionEffect::Declined { tile: pending.tile }
            }
            Action::PayRent => {
                if pending.rent.is_none() {
                    return Err(invalid(action, "no rent was due here"));
                }
                ActionEffect::RentAcknowledged { tile: pending.tile }
            }
            Action::EndTurn => ActionEffect::TurnEnded,
            _ => return Err(invalid(action, "not a decision")),
        };
        self.close_decision(pending, effect)
    }

    /// Sales, trades and building. Open before a roll and at a decision point.
    fn manage(&mut self, player: PlayerId, action: &Action) -> Result<ActionOutcome, TurnError> {
        let effect = match *action {
            Action::SellToBank { tile } => {
                let proceeds = self.ledger.sell_to_bank(&mut self.players, player, tile)?;
                ActionEffect::SoldToBank { tile, proceeds }
            }
            Action::SellToPlayer { tile, buyer, price } => {
                self.ledger
                    .transfer_to_player(&mut self.players, player, buyer, tile, price)?;
                ActionEffect::SoldToPlayer { tile, buyer, price }
            }
            Action::Trade(ref offer) => {
                self.ledger.trade_bundles(
                    &mut self.players,
                    player,
                    offer.counterparty,
                    &offer.give,
                    &offer.receive,
                    offer.money_given,
                    offer.money_received,
                )?;
                ActionEffect::Traded { counterparty: offer.counterparty }
            }
            Action::BuildHouse { tile } => {
                let level = self.ledger.build_house(&mut self.players, player, tile)?;
                ActionEffect::HouseBuilt { tile, level }
            }
            Action::SellHouse { tile } => {
                let refund = self.ledger.sell_house(&mut self.players, player, tile)?;
                ActionEffect::HouseSold { tile, refund }
            }
            _ => return Err(invalid(action, "not a management action")),
        };
        Ok(ActionOutcome::new(effect))
    }

    fn pending_for(&self, action: &Action) -> Result<PendingDecision, TurnError> {
        match self.phase {
            TurnPhase::AwaitingDecision(pending) => Ok(pending),
            TurnPhase::AwaitingRoll if action.closes_decision() => {
                Err(TurnError::NoPendingDecision)
            }
            TurnPhase::AwaitingRoll => Err(invalid(action, "no decision is open")),
        }
    }

    fn close_decision(
        &mut self,
        pending: PendingDecision,
        effect: ActionEffect,
    ) -> Result<ActionOutcome, TurnError> {
        let mut outcome = ActionOutcome::new(effect);
        self.end_turn(pending.player, pending.extra_turn, &mut outcome.events)?;
        Ok(outcome)
    }

    /// Actions the active player may take right now.
    ///
    /// Sales to other players and trades are open-ended (any price, any
    /// bundle) and are not enumerated; they are accepted whenever management
    /// actions are.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        let player = self.players.active();
        let mut actions = Vec::new();

        if let Some(pending) = self.phase.pending() {
            if self.ledger.owner(pending.tile).is_none() {
                let cost = self.board.tile(pending.tile).purchase_cost();
                if cost.map_or(false, |c| self.players.can_afford(player, c)) {
                    actions.push(Action::Buy);
                }
                actions.push(Action::Decline);
            }
            if pending.rent.is_some() {
                actions.push(Action::PayRent);
            }
            actions.push(Action::EndTurn);
        }

        for tile in self.ledger.owned_by(player) {
            let Some(found) = self.board.get(tile) else {
                continue;
            };
            let deed = found.deed();
            let group_built = deed.map_or(false, |d| self.ledger.group_improved(d.group));
            if !group_built {
                actions.push(Action::SellToBank { tile });
            }
            if self.can_build(player, found) {
                actions.push(Action::BuildHouse { tile });
            }
            if self.ledger.houses(tile) > 0 {
                actions.push(Action::SellHouse { tile });
            }
        }
        actions
    }

    fn can_build(&self, player: PlayerId, tile: &Tile) -> bool {
        tile.deed().map_or(false, |deed| {
            self.ledger.has_monopoly(player, deed.group)
                && self.ledger.houses(tile.id) < HOTEL
                && self.players.can_afford(player, deed.house_cost)
        })
    }

    /// Tile the active player stands on.
    #[must_use]
    pub fn active_tile(&self) -> &Tile {
        self.board.tile(self.players.active_player().position)
    }

    /// Whether `tile` can currently be bought by the active player.
    #[must_use]
    pub fn is_for_sale(&self, tile: TileId) -> bool {
        self.board.get(tile).map_or(false, Tile::is_ownable) && self.ledger.owner(tile).is_none()
    }
}

fn invalid(action: &Action, reason: &'static str) -> TurnError {
    TurnError::InvalidRequest { action: action.name(), reason }
}
