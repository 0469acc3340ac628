//! # Dynamite Module
//!
//! The explosive state machine: Unprimed → Primed/Counting → Exploded.
//!
//! Priming lays the stick on a tile and starts a fuse with an armed delay
//! of exactly one tick; the second tick detonates. The blast clears a 5×5
//! area of hazards and floodwater and reveals everything inside it,
//! including minerals and the diamond, which become visible but must still
//! be walked onto to collect. The engine never auto-collects on a blast.
//!
//! The miner is "caught" when strictly within one tile of the origin on
//! both axes (a 3×3 near field, not a distance metric). The caller applies
//! the damage on a catch; see [`crate::config::BLAST_DAMAGE`].

use crate::game::{Material, Mine, Player, Position};
use crate::{LodeError, LodeResult};
use log::debug;

/// Result of one fuse tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlastTick {
    /// No dynamite is primed
    Idle,
    /// The fuse is burning; nothing happened yet
    Burning,
    /// The charge went off; `player_caught` reports whether the miner was
    /// inside the near field when it did
    Detonated { player_caught: bool },
}

impl Player {
    /// Primes the player's dynamite at `pos`.
    ///
    /// Rejected with no state change when the player owns no dynamite or is
    /// standing in the elevator.
    pub fn prime_dynamite(&mut self, mine: &mut Mine, pos: Position) -> LodeResult<()> {
        if !self.has_dynamite {
            return Err(LodeError::InvalidAction(
                "no dynamite to prime".to_string(),
            ));
        }
        if mine.material(self.position) == Some(Material::Elevator) {
            return Err(LodeError::InvalidAction(
                "cannot prime dynamite in the elevator".to_string(),
            ));
        }

        mine.set_material(pos, Material::Dynamite)?;
        self.dynamite_origin = pos;
        self.dynamite_primed = true;
        self.has_dynamite = false;
        self.dynamite_timer = 0;
        debug!("dynamite primed at ({}, {})", pos.x, pos.y);
        Ok(())
    }

    /// Burns the fuse one tick.
    ///
    /// The first tick after priming only arms the charge; the second
    /// detonates it, clearing the 5×5 blast area and reporting whether the
    /// player was caught. The caller applies blast damage on a catch.
    pub fn dynamite_countdown(&mut self, mine: &mut Mine) -> LodeResult<BlastTick> {
        if !self.dynamite_primed {
            return Ok(BlastTick::Idle);
        }
        if self.dynamite_timer < 1 {
            self.dynamite_timer += 1;
            return Ok(BlastTick::Burning);
        }

        let player_caught = self.in_blast_radius();
        explode(mine, self.dynamite_origin)?;
        self.dynamite_origin = Position::origin();
        self.dynamite_primed = false;
        Ok(BlastTick::Detonated { player_caught })
    }

    /// Whether the player stands inside the blast near field: strictly
    /// less than two tiles from the origin on both axes.
    pub fn in_blast_radius(&self) -> bool {
        (self.position.x - self.dynamite_origin.x).abs() < 2
            && (self.position.y - self.dynamite_origin.y).abs() < 2
    }
}

/// Detonates a charge at `origin`: every in-bounds cell of the 5×5 block
/// around it is marked explored, and hazardous contents (granite, springs,
/// floodwater, cave-ins, and the spent stick itself) are blasted into open
/// floor. Minerals and the diamond survive, revealed.
pub fn explode(mine: &mut Mine, origin: Position) -> LodeResult<()> {
    debug!("dynamite detonated at ({}, {})", origin.x, origin.y);
    for dx in -2..=2 {
        for dy in -2..=2 {
            let pos = Position::new(origin.x + dx, origin.y + dy);
            let Some(material) = mine.material(pos) else {
                continue;
            };
            mine.set_explored(pos, true)?;
            if matches!(
                material,
                Material::Granite
                    | Material::Spring
                    | Material::Water
                    | Material::CaveIn
                    | Material::Dynamite
            ) {
                mine.set_material(pos, Material::Explored)?;
            }
        }
    }
    Ok(())
}
