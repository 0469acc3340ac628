//! # Rule Engine Module
//!
//! The single entry point that resolves a requested move and applies every
//! consequence: dig costs, hazard damage, inventory changes, tile mutation,
//! terrain side effects, and turn bookkeeping.
//!
//! One behavior here looks like a bug but is not: digging into granite, a
//! spring, a cave-in, or water charges the player and advances the turn
//! **without moving them onto the tile**. The same goes for the axe
//! clearing revealed granite. Preserve the stall-in-place behavior.

use crate::game::{Material, Mine, Mineral, Player, Position};
use crate::generation;
use crate::{config, LodeResult};
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

/// What happened when the engine resolved an action.
///
/// Events carry enough structure for a driver to animate, tally, or
/// narrate; [`GameEvent::message`] gives a ready-made status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The player stepped from one tile to another
    Moved { from: Position, to: Position },
    /// The player rode the elevator past the top of the shaft
    LeftMine,
    /// A first dig revealed granite; the way is still blocked
    GraniteRevealed,
    /// The axe chipped revealed granite into open floor
    GraniteChipped,
    /// Revealed granite, no axe: nothing happened
    GraniteBlocked,
    /// The dig opened an underground spring
    SpringStruck,
    /// The dig brought the roof down
    CaveInTriggered { hardhat: bool },
    /// A mineral deposit paid out
    MineralFound { mineral: Mineral, amount: u32 },
    /// The diamond is in the pack
    DiamondFound,
    /// The bucket cleared a flooded tile
    WaterBailed,
    /// Stepped into floodwater with no bucket
    Drowning,
    /// The elevator carried the player a row
    ElevatorMoved { descended: bool },
}

impl GameEvent {
    /// A status line for the HUD, if this event warrants one.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            GameEvent::LeftMine => Some("Daylight!"),
            GameEvent::GraniteRevealed => Some("Solid granite blocks the way!"),
            GameEvent::GraniteChipped => Some("You chip away at the granite!"),
            GameEvent::GraniteBlocked => Some("You can't dig through granite!"),
            GameEvent::SpringStruck => Some("Oh no, a spring!"),
            GameEvent::CaveInTriggered { .. } => Some("Ow, a cave-in!"),
            GameEvent::MineralFound { mineral, .. } => Some(match mineral {
                Mineral::Coal => "You found some coal!",
                Mineral::Silver => "You found some silver!",
                Mineral::Gold => "You found some gold!",
                Mineral::Platinum => "You found some platinum!",
            }),
            GameEvent::DiamondFound => Some("You found the diamond!"),
            GameEvent::WaterBailed => Some("You use your bucket!"),
            GameEvent::Drowning => Some("You start to drown!"),
            GameEvent::Moved { .. } | GameEvent::ElevatorMoved { .. } => None,
        }
    }
}

/// Attempts to move the player to `dest` and applies all consequent
/// effects. This is the core state machine of the game.
///
/// Out-of-bounds requests are silent no-ops, with one exception: the
/// sentinel `(0, -1)` means the elevator has carried the player past the
/// top of the shaft, and is accepted unconditionally so the driver can
/// hand control back to the town.
///
/// # Examples
///
/// ```
/// use lode::game::engine;
/// use lode::{GenerationConfig, Generator, MineGenerator, Player, Position};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let mut mine = MineGenerator::new()
///     .generate(&GenerationConfig::new(1), &mut rng)
///     .unwrap();
/// let mut player = Player::new();
///
/// // Stepping off the grid is rejected without side effects.
/// let events = engine::change_location(&mut player, &mut mine, Position::new(-5, 0), &mut rng).unwrap();
/// assert!(events.is_empty());
/// assert_eq!(player.position, Position::origin());
/// ```
pub fn change_location(
    player: &mut Player,
    mine: &mut Mine,
    dest: Position,
    rng: &mut StdRng,
) -> LodeResult<Vec<GameEvent>> {
    let mut events = Vec::new();

    let Some(material) = mine.material(dest) else {
        if dest == Position::EXIT {
            player.position = dest;
            events.push(GameEvent::LeftMine);
        }
        return Ok(events);
    };
    let explored = mine.is_explored(dest).unwrap_or(false);

    let from = player.position;
    player.previous_position = from;

    let benign_first_dig = !explored
        && !matches!(
            material,
            Material::Granite
                | Material::Spring
                | Material::Water
                | Material::CaveIn
                | Material::Coal
                | Material::Silver
                | Material::Gold
                | Material::Platinum
                | Material::Diamond
        );

    if benign_first_dig {
        mine.set_explored(dest, true)?;
        player.charge_dig();
        player.increment_turn();
        player.position = dest;
        events.push(GameEvent::Moved { from, to: dest });
    } else if material == Material::Granite {
        if !explored {
            player.charge_dig();
            mine.set_explored(dest, true)?;
            player.increment_turn();
            events.push(GameEvent::GraniteRevealed);
        } else if player.has_axe {
            // Flat rate, no shovel discount; the player stays put.
            player.money -= config::GRANITE_CHIP_COST;
            mine.set_material(dest, Material::Explored)?;
            player.increment_turn();
            events.push(GameEvent::GraniteChipped);
        } else {
            events.push(GameEvent::GraniteBlocked);
        }
    } else if material == Material::Spring {
        player.charge_dig();
        mine.set_explored(dest, true)?;
        player.health -= 10;
        player.increment_turn();
        generation::water_flow(mine, dest);
        events.push(GameEvent::SpringStruck);
    } else if material == Material::CaveIn {
        player.charge_dig();
        mine.set_explored(dest, true)?;
        player.health -= if player.has_hardhat { 5 } else { 10 };
        player.increment_turn();
        generation::cave_in(mine, dest, rng);
        events.push(GameEvent::CaveInTriggered {
            hardhat: player.has_hardhat,
        });
    } else if let Some(mineral) = material.as_mineral() {
        // A blast may have revealed the deposit already; only a fresh face
        // costs a dig.
        if !explored {
            player.charge_dig();
        }
        let (low, high) = mineral.yield_bounds();
        let amount = rng.gen_range(low..=high);
        player.add_stock(mineral, amount);
        player.increment_turn();
        mine.set_explored(dest, true)?;
        mine.set_material(dest, Material::Explored)?;
        player.position = dest;
        mine.add_recent_find(dest, material);
        debug!(
            "collected {} x{} at ({}, {})",
            mineral.name(),
            amount,
            dest.x,
            dest.y
        );
        events.push(GameEvent::Moved { from, to: dest });
        events.push(GameEvent::MineralFound { mineral, amount });
    } else if material == Material::Water {
        player.increment_turn();
        if player.has_bucket {
            player.money -= config::WATER_BAIL_COST;
            mine.set_material(dest, Material::Explored)?;
            events.push(GameEvent::WaterBailed);
        } else {
            player.health -= 5;
            events.push(GameEvent::Drowning);
        }
    } else if material == Material::Diamond {
        if !explored {
            player.charge_dig();
        }
        player.increment_turn();
        mine.set_material(dest, Material::Explored)?;
        mine.set_explored(dest, true)?;
        player.has_diamond = true;
        player.position = dest;
        mine.add_recent_find(dest, Material::Diamond);
        debug!("diamond collected at ({}, {})", dest.x, dest.y);
        events.push(GameEvent::Moved { from, to: dest });
        events.push(GameEvent::DiamondFound);
    } else if explored && material != Material::Shaft {
        // Re-entering cleared ground: free, no turn.
        player.position = dest;
        events.push(GameEvent::Moved { from, to: dest });
    } else if explored && mine.material(from) == Some(Material::Elevator) {
        // Riding the elevator along the shaft: the car moves with the
        // player, descending costs a fee, ascending is free, and no turn
        // passes either way.
        mine.set_material(dest, Material::Elevator)?;
        mine.set_material(from, Material::Shaft)?;
        let descended = from.y < dest.y;
        if descended {
            player.money -= config::ELEVATOR_DESCENT_FEE;
        }
        player.position = dest;
        events.push(GameEvent::ElevatorMoved { descended });
        events.push(GameEvent::Moved { from, to: dest });
    }

    Ok(events)
}

/// Express travel: rides the elevator down to the deepest row the player
/// has explored beside the shaft. Returns `None` when the ride is refused:
/// the player is not in the shaft column, nothing deeper is explored, or
/// the fare is out of reach.
pub fn ride_elevator_to_bottom(
    player: &mut Player,
    mine: &mut Mine,
    rng: &mut StdRng,
) -> LodeResult<Option<Vec<GameEvent>>> {
    if player.position.x != 0 {
        return Ok(None);
    }

    let deepest = mine.deepest_explored_row();
    if i64::from(deepest) <= player.money && player.position.y < deepest {
        // One coin per row, plus the regular descent fee on arrival.
        player.money -= i64::from(deepest - player.position.y);
        let events = change_location(player, mine, Position::new(0, deepest), rng)?;
        Ok(Some(events))
    } else {
        Ok(None)
    }
}

/// Express travel: rides the elevator straight back to the surface stop.
/// Ascending is always free. Returns `None` if the player is not riding
/// the shaft below the top.
pub fn ride_elevator_to_top(
    player: &mut Player,
    mine: &mut Mine,
    rng: &mut StdRng,
) -> LodeResult<Option<Vec<GameEvent>>> {
    if player.position.x == 0 && player.position.y != 0 {
        let events = change_location(player, mine, Position::origin(), rng)?;
        Ok(Some(events))
    } else {
        Ok(None)
    }
}
