//! # Store Module
//!
//! The general store: six pieces of equipment, each a one-time purchase.
//! Dynamite is the exception in practice: the flag clears when a stick is
//! primed, so the store will sell another.

use crate::game::Player;
use log::debug;
use serde::{Deserialize, Serialize};

/// Equipment on the store's shelves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreItem {
    /// Cuts the per-tile dig cost from 20 to 15
    Shovel,
    /// Lets the player chip through revealed granite
    Axe,
    /// Lets the player bail flooded tiles instead of drowning
    Bucket,
    /// One stick; prime it in the mine and run
    Dynamite,
    /// Reveals adjacent tile contents on screen (a renderer concern)
    Flashlight,
    /// Halves cave-in damage
    HardHat,
}

impl StoreItem {
    /// Everything on the shelves, in display order.
    pub fn all() -> [StoreItem; 6] {
        [
            StoreItem::Shovel,
            StoreItem::Axe,
            StoreItem::Bucket,
            StoreItem::Dynamite,
            StoreItem::Flashlight,
            StoreItem::HardHat,
        ]
    }

    /// Sticker price.
    pub fn price(self) -> i64 {
        match self {
            StoreItem::Shovel => 250,
            StoreItem::Axe => 200,
            StoreItem::Bucket => 250,
            StoreItem::Dynamite => 500,
            StoreItem::Flashlight => 300,
            StoreItem::HardHat => 200,
        }
    }

    /// Display name, lowercase.
    pub fn name(self) -> &'static str {
        match self {
            StoreItem::Shovel => "shovel",
            StoreItem::Axe => "axe",
            StoreItem::Bucket => "bucket",
            StoreItem::Dynamite => "dynamite",
            StoreItem::Flashlight => "flashlight",
            StoreItem::HardHat => "hard hat",
        }
    }

    fn owned_flag(self, player: &Player) -> bool {
        match self {
            StoreItem::Shovel => player.has_shovel,
            StoreItem::Axe => player.has_axe,
            StoreItem::Bucket => player.has_bucket,
            StoreItem::Dynamite => player.has_dynamite,
            StoreItem::Flashlight => player.has_flashlight,
            StoreItem::HardHat => player.has_hardhat,
        }
    }

    fn set_owned(self, player: &mut Player) {
        match self {
            StoreItem::Shovel => player.has_shovel = true,
            StoreItem::Axe => player.has_axe = true,
            StoreItem::Bucket => player.has_bucket = true,
            StoreItem::Dynamite => player.has_dynamite = true,
            StoreItem::Flashlight => player.has_flashlight = true,
            StoreItem::HardHat => player.has_hardhat = true,
        }
    }
}

/// How a purchase attempt went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// Paid for and in the pack
    Purchased,
    /// "You already own that!"
    AlreadyOwned,
    /// "You can't afford that!"
    InsufficientFunds,
}

/// Attempts to buy one item. Refusals leave the player untouched.
///
/// # Examples
///
/// ```
/// use lode::town::{purchase, PurchaseOutcome, StoreItem};
/// use lode::Player;
///
/// let mut player = Player::new();
/// assert_eq!(purchase(&mut player, StoreItem::Shovel), PurchaseOutcome::Purchased);
/// assert!(player.has_shovel);
/// assert_eq!(player.money, 1250);
/// assert_eq!(purchase(&mut player, StoreItem::Shovel), PurchaseOutcome::AlreadyOwned);
/// ```
pub fn purchase(player: &mut Player, item: StoreItem) -> PurchaseOutcome {
    if item.owned_flag(player) {
        return PurchaseOutcome::AlreadyOwned;
    }
    if player.money < item.price() {
        return PurchaseOutcome::InsufficientFunds;
    }

    item.set_owned(player);
    player.money -= item.price();
    debug!("purchased {} for ${}", item.name(), item.price());
    PurchaseOutcome::Purchased
}
