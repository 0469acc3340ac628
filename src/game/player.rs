//! # Player Module
//!
//! Everything the miner carries: money, health, mineral stocks, market
//! prices, equipment, turn counters, and position.
//!
//! `Player` never holds a reference to the [`crate::game::Mine`]; functions
//! that need both (the rule engine, the dynamite subsystem) borrow the two
//! aggregates side by side.

use crate::game::{Mineral, Position};
use crate::config;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Current bank prices for the four minerals.
///
/// Prices drift: the bank rerolls them every
/// [`config::MARKET_REROLL_INTERVAL`] turns (see [`crate::town::bank`]).
/// Each reroll draws from `0..die` and rejects until the draw lands inside
/// the mineral's band, matching the documented price distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketPrices {
    pub coal: i64,
    pub silver: i64,
    pub gold: i64,
    pub platinum: i64,
}

impl MarketPrices {
    /// The opening-day prices a new game starts with.
    pub fn opening() -> Self {
        Self {
            coal: 15,
            silver: 50,
            gold: 100,
            platinum: 250,
        }
    }

    /// Current price of one unit of a mineral.
    pub fn get(&self, mineral: Mineral) -> i64 {
        match mineral {
            Mineral::Coal => self.coal,
            Mineral::Silver => self.silver,
            Mineral::Gold => self.gold,
            Mineral::Platinum => self.platinum,
        }
    }

    /// Rerolls the price of one mineral by rejection sampling against its
    /// band.
    pub fn reroll(&mut self, mineral: Mineral, rng: &mut StdRng) {
        let (low, high, die) = mineral.price_bounds();
        let price = loop {
            let draw = rng.gen_range(0..die);
            if draw >= low && draw <= high {
                break draw;
            }
        };
        match mineral {
            Mineral::Coal => self.coal = price,
            Mineral::Silver => self.silver = price,
            Mineral::Gold => self.gold = price,
            Mineral::Platinum => self.platinum = price,
        }
    }

    /// Rerolls all four prices.
    pub fn reroll_all(&mut self, rng: &mut StdRng) {
        for mineral in Mineral::all() {
            self.reroll(mineral, rng);
        }
    }
}

impl Default for MarketPrices {
    fn default() -> Self {
        Self::opening()
    }
}

/// Outcome of the once-per-turn health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// Health is above zero (or a legacy edge case let the player limp on)
    Alive,
    /// Health hit zero but insurance paid out: partially healed, policy gone
    Revived,
    /// Health hit zero with no insurance: the run is over
    Died,
}

/// All data pertaining to the miner.
///
/// Fields are public in the aggregate style used throughout this codebase;
/// the methods below exist where a mutation carries bookkeeping (turn
/// increments expiring insurance, stock accounting, the insurance revival
/// rule), not to hide state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Cash on hand; going negative ends the game (the driver checks)
    pub money: i64,
    /// Current health; the rules keep it in [0, 100]
    pub health: i32,

    pub coal: u32,
    pub silver: u32,
    pub gold: u32,
    pub platinum: u32,

    /// What the bank currently pays per unit
    pub prices: MarketPrices,

    /// Turns taken so far
    pub turn_number: i64,
    /// Turn the bank last rerolled prices
    pub previous_turn_number: i64,
    /// Turn insurance was purchased, or [`config::INSURANCE_NEVER`]
    pub insurance_turn_number: i64,

    pub has_axe: bool,
    pub has_bucket: bool,
    pub has_dynamite: bool,
    pub has_flashlight: bool,
    pub has_hardhat: bool,
    pub has_shovel: bool,
    pub has_diamond: bool,
    pub has_insurance: bool,

    /// Current position in the mine
    pub position: Position,
    /// Position before the last accepted move (the renderer animates
    /// between the two; the elevator uses it for direction)
    pub previous_position: Position,

    /// Whether a primed stick of dynamite is burning down
    pub dynamite_primed: bool,
    /// Ticks elapsed since priming
    pub dynamite_timer: u8,
    /// Where the dynamite was laid
    pub dynamite_origin: Position,
}

impl Player {
    /// Creates a fresh miner at the top of the shaft.
    ///
    /// # Examples
    ///
    /// ```
    /// use lode::Player;
    ///
    /// let player = Player::new();
    /// assert_eq!(player.money, 1500);
    /// assert_eq!(player.health, 100);
    /// assert!(!player.has_shovel);
    /// ```
    pub fn new() -> Self {
        Self {
            money: config::STARTING_MONEY,
            health: config::STARTING_HEALTH,
            coal: 0,
            silver: 0,
            gold: 0,
            platinum: 0,
            prices: MarketPrices::opening(),
            turn_number: 0,
            previous_turn_number: 0,
            insurance_turn_number: config::INSURANCE_NEVER,
            has_axe: false,
            has_bucket: false,
            has_dynamite: false,
            has_flashlight: false,
            has_hardhat: false,
            has_shovel: false,
            has_diamond: false,
            has_insurance: false,
            position: Position::origin(),
            previous_position: Position::origin(),
            dynamite_primed: false,
            dynamite_timer: 0,
            dynamite_origin: Position::origin(),
        }
    }

    /// How many units of a mineral the player is carrying.
    pub fn stock(&self, mineral: Mineral) -> u32 {
        match mineral {
            Mineral::Coal => self.coal,
            Mineral::Silver => self.silver,
            Mineral::Gold => self.gold,
            Mineral::Platinum => self.platinum,
        }
    }

    /// Adds freshly-dug units of a mineral to the pack.
    pub fn add_stock(&mut self, mineral: Mineral, amount: u32) {
        match mineral {
            Mineral::Coal => self.coal += amount,
            Mineral::Silver => self.silver += amount,
            Mineral::Gold => self.gold += amount,
            Mineral::Platinum => self.platinum += amount,
        }
    }

    /// Empties the pack of one mineral, returning how many units it held.
    pub fn take_stock(&mut self, mineral: Mineral) -> u32 {
        let held = self.stock(mineral);
        match mineral {
            Mineral::Coal => self.coal = 0,
            Mineral::Silver => self.silver = 0,
            Mineral::Gold => self.gold = 0,
            Mineral::Platinum => self.platinum = 0,
        }
        held
    }

    /// The cost of digging one tile, cheaper with a shovel.
    pub fn dig_cost(&self) -> i64 {
        if self.has_shovel {
            config::DIG_COST_SHOVEL
        } else {
            config::DIG_COST
        }
    }

    /// Charges the player for one dig.
    pub fn charge_dig(&mut self) {
        self.money -= self.dig_cost();
    }

    /// Advances the turn counter and expires insurance once it has been in
    /// force longer than [`config::INSURANCE_DURATION_TURNS`].
    pub fn increment_turn(&mut self) {
        self.turn_number += 1;
        if self.insurance_turn_number + config::INSURANCE_DURATION_TURNS < self.turn_number {
            self.has_insurance = false;
        }
    }

    /// Whether the player's insurance policy is still inside its window.
    pub fn insurance_in_force(&self) -> bool {
        self.has_insurance
            && self.insurance_turn_number + config::INSURANCE_DURATION_TURNS > self.turn_number
    }

    /// The once-per-turn health check the driver runs after movement.
    ///
    /// If health has hit zero and an insurance policy is in force, the
    /// policy is consumed and the player is revived at
    /// [`config::INSURANCE_REVIVAL_HEALTH`]. With no insurance the run is
    /// over. A still-flagged but out-of-window policy lets the player limp
    /// on unhealed; unreachable in normal play, since turn increments clear
    /// expired policies first.
    ///
    /// # Examples
    ///
    /// ```
    /// use lode::{HealthStatus, Player};
    ///
    /// let mut player = Player::new();
    /// player.health = 0;
    /// assert_eq!(player.check_health(), HealthStatus::Died);
    /// ```
    pub fn check_health(&mut self) -> HealthStatus {
        if self.health <= 0 {
            if !self.has_insurance {
                return HealthStatus::Died;
            }
            if self.insurance_in_force() {
                self.health = config::INSURANCE_REVIVAL_HEALTH;
                self.has_insurance = false;
                return HealthStatus::Revived;
            }
        }
        HealthStatus::Alive
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
