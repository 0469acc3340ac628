//! # Bank Module
//!
//! Where minerals turn into money. The bank pays the current market price
//! per unit, and its prices drift: once at least
//! [`crate::config::MARKET_REROLL_INTERVAL`] turns have passed since the
//! last reroll, the next visit rerolls all four.

use crate::config;
use crate::game::{Mineral, Player};
use log::debug;
use rand::rngs::StdRng;

/// Sells the player's entire stock of one mineral at the current price.
/// Returns the proceeds (zero when the pack held none).
///
/// # Examples
///
/// ```
/// use lode::town::bank;
/// use lode::{Mineral, Player};
///
/// let mut player = Player::new();
/// player.add_stock(Mineral::Gold, 3);
/// let proceeds = bank::sell(&mut player, Mineral::Gold);
/// assert_eq!(proceeds, 3 * player.prices.gold);
/// assert_eq!(player.stock(Mineral::Gold), 0);
/// ```
pub fn sell(player: &mut Player, mineral: Mineral) -> i64 {
    let units = player.take_stock(mineral);
    let proceeds = i64::from(units) * player.prices.get(mineral);
    player.money += proceeds;
    if units > 0 {
        debug!("sold {units} {} for ${proceeds}", mineral.name());
    }
    proceeds
}

/// Sells everything in the pack, highest-value minerals first. Returns the
/// total proceeds.
pub fn sell_all(player: &mut Player) -> i64 {
    sell(player, Mineral::Platinum)
        + sell(player, Mineral::Gold)
        + sell(player, Mineral::Silver)
        + sell(player, Mineral::Coal)
}

/// Rerolls all four market prices if the reroll interval has elapsed since
/// the last one, and records the reroll turn. Returns whether prices
/// changed. Called on every bank visit; harmless when the interval hasn't
/// passed.
pub fn reroll_market(player: &mut Player, rng: &mut StdRng) -> bool {
    if player.turn_number - player.previous_turn_number >= config::MARKET_REROLL_INTERVAL {
        player.prices.reroll_all(rng);
        player.previous_turn_number = player.turn_number;
        debug!(
            "market rerolled: coal {} silver {} gold {} platinum {}",
            player.prices.coal, player.prices.silver, player.prices.gold, player.prices.platinum
        );
        true
    } else {
        false
    }
}

/// What the pack would fetch at today's prices, without selling.
pub fn appraise(player: &Player) -> i64 {
    Mineral::all()
        .iter()
        .map(|&mineral| i64::from(player.stock(mineral)) * player.prices.get(mineral))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_sell_pays_and_empties() {
        let mut player = Player::new();
        player.add_stock(Mineral::Silver, 4);
        player.prices.silver = 50;

        let proceeds = sell(&mut player, Mineral::Silver);
        assert_eq!(proceeds, 200);
        assert_eq!(player.money, 1700);
        assert_eq!(player.stock(Mineral::Silver), 0);

        // Selling an empty stock is a harmless zero.
        assert_eq!(sell(&mut player, Mineral::Silver), 0);
        assert_eq!(player.money, 1700);
    }

    #[test]
    fn test_sell_all() {
        let mut player = Player::new();
        player.add_stock(Mineral::Coal, 2);
        player.add_stock(Mineral::Platinum, 1);
        let expected = 2 * player.prices.coal + player.prices.platinum;

        assert_eq!(sell_all(&mut player), expected);
        assert_eq!(player.money, 1500 + expected);
        assert_eq!(appraise(&player), 0);
    }

    #[test]
    fn test_reroll_gating() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut player = Player::new();
        player.turn_number = 9;

        // Nine elapsed turns: prices hold.
        assert!(!reroll_market(&mut player, &mut rng));
        assert_eq!(player.prices, crate::game::MarketPrices::opening());
        assert_eq!(player.previous_turn_number, 0);

        // The tenth turn opens the window.
        player.turn_number = 10;
        assert!(reroll_market(&mut player, &mut rng));
        assert_eq!(player.previous_turn_number, 10);
        assert!((5..=25).contains(&player.prices.coal));
        assert!((40..=60).contains(&player.prices.silver));
        assert!((80..=125).contains(&player.prices.gold));
        assert!((225..=275).contains(&player.prices.platinum));

        // And immediately closes again.
        assert!(!reroll_market(&mut player, &mut rng));
    }

    #[test]
    fn test_appraise_matches_sale() {
        let mut player = Player::new();
        player.add_stock(Mineral::Gold, 5);
        player.add_stock(Mineral::Coal, 3);
        let appraisal = appraise(&player);
        assert_eq!(sell_all(&mut player), appraisal);
    }
}
