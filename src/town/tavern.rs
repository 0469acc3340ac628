//! # Tavern Module
//!
//! Rumors and romance. The tavern sells three grades of tip about where
//! the diamond is buried, and it is where the game ends: the barkeep's
//! daughter will marry a miner who shows up rich, and the wedding is a
//! grand one if he brings the diamond and a real fortune.

use crate::game::{Mine, Player, Position};
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Minimum fortune before courtship is even entertained.
pub const COURTSHIP_MINIMUM: i64 = 2500;

/// Fortune that upgrades the wedding from modest to grand.
pub const GRAND_FORTUNE: i64 = 5000;

/// The three grades of tip on offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TipQuality {
    /// Which quarter of the mine to search
    Cheap,
    /// A window a couple dozen tiles across
    Good,
    /// The exact cell
    Best,
}

impl TipQuality {
    /// What the tip costs.
    pub fn price(self) -> i64 {
        match self {
            TipQuality::Cheap => 250,
            TipQuality::Good => 750,
            TipQuality::Best => 1500,
        }
    }
}

/// A tip about the diamond: a rectangular search area guaranteed to
/// contain it. Cheaper tips hand back bigger rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiamondHint {
    /// Top-left corner of the search area
    pub origin: Position,
    pub width: u32,
    pub height: u32,
}

impl DiamondHint {
    /// Whether a position falls inside the hinted area.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.origin.x
            && pos.y >= self.origin.y
            && pos.x < self.origin.x + self.width as i32
            && pos.y < self.origin.y + self.height as i32
    }
}

/// Width of a good tip's search window, in tiles.
const GOOD_TIP_WIDTH: u32 = 12;

/// Height of a good tip's search window, in tiles.
const GOOD_TIP_HEIGHT: u32 = 24;

/// Buys a tip. Returns `None` (player untouched) when the price is out of
/// reach.
///
/// # Examples
///
/// ```
/// use lode::town::{buy_tip, TipQuality};
/// use lode::{GenerationConfig, Generator, MineGenerator, Player};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(5);
/// let mine = MineGenerator::new()
///     .generate(&GenerationConfig::for_testing(5), &mut rng)
///     .unwrap();
/// let mut player = Player::new();
///
/// let hint = buy_tip(&mut player, &mine, TipQuality::Cheap, &mut rng).unwrap();
/// assert!(hint.contains(mine.diamond_position()));
/// assert_eq!(player.money, 1250);
/// ```
pub fn buy_tip(
    player: &mut Player,
    mine: &Mine,
    quality: TipQuality,
    rng: &mut StdRng,
) -> Option<DiamondHint> {
    if player.money < quality.price() {
        return None;
    }
    player.money -= quality.price();

    let diamond = mine.diamond_position();
    let hint = match quality {
        TipQuality::Cheap => {
            // Which quadrant: split the mine down the middle both ways.
            let half_width = mine.width() / 2;
            let half_height = mine.height() / 2;
            let west = diamond.x < half_width as i32;
            let north = diamond.y < half_height as i32;
            DiamondHint {
                origin: Position::new(
                    if west { 0 } else { half_width as i32 },
                    if north { 0 } else { half_height as i32 },
                ),
                width: if west {
                    half_width
                } else {
                    mine.width() - half_width
                },
                height: if north {
                    half_height
                } else {
                    mine.height() - half_height
                },
            }
        }
        TipQuality::Good => {
            // A fixed-size window dropped at a random offset that still
            // covers the diamond, so the buyer can't reverse-engineer the
            // exact cell from the window's corner.
            let dx = rng.gen_range(0..GOOD_TIP_WIDTH as i32);
            let dy = rng.gen_range(0..GOOD_TIP_HEIGHT as i32);
            DiamondHint {
                origin: Position::new(diamond.x - dx, diamond.y - dy),
                width: GOOD_TIP_WIDTH,
                height: GOOD_TIP_HEIGHT,
            }
        }
        TipQuality::Best => DiamondHint {
            origin: diamond,
            width: 1,
            height: 1,
        },
    };

    debug!("sold a {quality:?} tip");
    Some(hint)
}

/// Where the player stands with the barkeep's daughter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourtshipOutcome {
    /// Under the courtship minimum: sent away
    TooPoor,
    /// Rich enough to be noticed, but no ring yet
    Interested,
    /// A real fortune, but no ring yet: she wants the diamond
    WantsDiamond,
    /// Diamond in hand, fortune modest: a wedding, and the game is won
    ModestWedding,
    /// Diamond in hand, fortune grand: the best ending
    GrandWedding,
}

impl CourtshipOutcome {
    /// Whether this outcome ends the game.
    pub fn is_ending(self) -> bool {
        matches!(
            self,
            CourtshipOutcome::ModestWedding | CourtshipOutcome::GrandWedding
        )
    }
}

/// Pays court. Pure read of the player's fortune and ring finger; the
/// driver decides what to do with a wedding.
pub fn court(player: &Player) -> CourtshipOutcome {
    if player.money < COURTSHIP_MINIMUM {
        CourtshipOutcome::TooPoor
    } else if player.has_diamond {
        if player.money > GRAND_FORTUNE {
            CourtshipOutcome::GrandWedding
        } else {
            CourtshipOutcome::ModestWedding
        }
    } else if player.money > GRAND_FORTUNE {
        CourtshipOutcome::WantsDiamond
    } else {
        CourtshipOutcome::Interested
    }
}
