//! # Hospital Module
//!
//! Paid healing and the insurance desk. Insurance is the only thing in the
//! game that cheats death: one lethal event inside its 50-turn window
//! becomes a partial heal instead (see [`crate::game::Player::check_health`]).

use crate::config;
use crate::game::Player;
use log::debug;

/// How a hospital transaction went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreatmentOutcome {
    /// Treated and charged
    Treated,
    /// Nothing to heal
    AlreadyHealthy,
    /// The bill is out of reach
    InsufficientFunds,
    /// A policy is already in force
    AlreadyInsured,
}

/// Cost of one overnight stay.
pub const OVERNIGHT_COST: i64 = 100;

/// Health restored by one overnight stay.
pub const OVERNIGHT_HEAL: i32 = 10;

/// Cost per point of health under the full-heal plan.
pub const FULL_HEAL_COST_PER_POINT: i64 = 10;

/// Price of an insurance policy.
pub const INSURANCE_PREMIUM: i64 = 250;

/// One night's rest: +10 health (capped at 100) for $100.
pub fn overnight_stay(player: &mut Player) -> TreatmentOutcome {
    if player.health >= config::STARTING_HEALTH {
        return TreatmentOutcome::AlreadyHealthy;
    }
    if player.money < OVERNIGHT_COST {
        return TreatmentOutcome::InsufficientFunds;
    }

    player.health = (player.health + OVERNIGHT_HEAL).min(config::STARTING_HEALTH);
    player.money -= OVERNIGHT_COST;
    TreatmentOutcome::Treated
}

/// Heals one point at a time for $10 each until the player is at full
/// health or out of money. Returns the total spent.
///
/// # Examples
///
/// ```
/// use lode::town::hospital;
/// use lode::Player;
///
/// let mut player = Player::new();
/// player.health = 90;
/// assert_eq!(hospital::full_heal(&mut player), 100);
/// assert_eq!(player.health, 100);
/// ```
pub fn full_heal(player: &mut Player) -> i64 {
    let mut spent = 0;
    while player.health < config::STARTING_HEALTH && player.money >= FULL_HEAL_COST_PER_POINT {
        player.health += 1;
        player.money -= FULL_HEAL_COST_PER_POINT;
        spent += FULL_HEAL_COST_PER_POINT;
    }
    if spent > 0 {
        debug!("healed to {} for ${spent}", player.health);
    }
    spent
}

/// Sells an insurance policy: $250 for 50 turns of one-time death
/// protection, dated from the current turn.
pub fn buy_insurance(player: &mut Player) -> TreatmentOutcome {
    if player.has_insurance {
        return TreatmentOutcome::AlreadyInsured;
    }
    if player.money < INSURANCE_PREMIUM {
        return TreatmentOutcome::InsufficientFunds;
    }

    player.has_insurance = true;
    player.insurance_turn_number = player.turn_number;
    player.money -= INSURANCE_PREMIUM;
    debug!("insurance purchased on turn {}", player.turn_number);
    TreatmentOutcome::Treated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overnight_stay() {
        let mut player = Player::new();
        player.health = 75;
        assert_eq!(overnight_stay(&mut player), TreatmentOutcome::Treated);
        assert_eq!(player.health, 85);
        assert_eq!(player.money, 1400);
    }

    #[test]
    fn test_overnight_stay_caps_at_full() {
        let mut player = Player::new();
        player.health = 95;
        assert_eq!(overnight_stay(&mut player), TreatmentOutcome::Treated);
        assert_eq!(player.health, 100);

        assert_eq!(overnight_stay(&mut player), TreatmentOutcome::AlreadyHealthy);
        assert_eq!(player.money, 1400, "a healthy miner is not billed");
    }

    #[test]
    fn test_overnight_stay_needs_funds() {
        let mut player = Player::new();
        player.health = 50;
        player.money = 99;
        assert_eq!(
            overnight_stay(&mut player),
            TreatmentOutcome::InsufficientFunds
        );
        assert_eq!(player.health, 50);
    }

    #[test]
    fn test_full_heal_stops_when_broke() {
        let mut player = Player::new();
        player.health = 10;
        player.money = 45;
        let spent = full_heal(&mut player);
        assert_eq!(spent, 40, "four points at $10 each");
        assert_eq!(player.health, 14);
        assert_eq!(player.money, 5);
    }

    #[test]
    fn test_full_heal_at_full_health() {
        let mut player = Player::new();
        assert_eq!(full_heal(&mut player), 0);
        assert_eq!(player.money, 1500);
    }

    #[test]
    fn test_buy_insurance() {
        let mut player = Player::new();
        player.turn_number = 17;
        assert_eq!(buy_insurance(&mut player), TreatmentOutcome::Treated);
        assert!(player.has_insurance);
        assert_eq!(player.insurance_turn_number, 17);
        assert_eq!(player.money, 1250);

        assert_eq!(buy_insurance(&mut player), TreatmentOutcome::AlreadyInsured);
        assert_eq!(player.money, 1250);
    }

    #[test]
    fn test_insurance_needs_funds() {
        let mut player = Player::new();
        player.money = 249;
        assert_eq!(
            buy_insurance(&mut player),
            TreatmentOutcome::InsufficientFunds
        );
        assert!(!player.has_insurance);
        assert_eq!(
            player.insurance_turn_number,
            crate::config::INSURANCE_NEVER
        );
    }
}
