//! # Generation Module
//!
//! Procedural terrain for the mine: initial population, localized cave-in
//! regrowth, and water-flow spread.
//!
//! All three draw from one category table. A cell first rolls a category
//! in `0..=6`, then a nested die specific to that category; only a nested
//! roll of zero places the special content, anything else leaves dirt.
//! The table (content, die) is fixed:
//!
//! | roll | content   | die |
//! |------|-----------|-----|
//! | 0    | Coal      | 1   |
//! | 1    | Silver    | 3   |
//! | 2    | Gold      | 5   |
//! | 3    | Platinum  | 7   |
//! | 4    | Cave-in   | 5   |
//! | 5    | Spring    | 5   |
//! | 6    | Granite   | 2   |
//!
//! Every function takes the session `StdRng` as a parameter: generation is
//! a pure function of the seed and the grid dimensions, so a "new game" is
//! re-runnable and a "load game" simply bypasses this module.

use crate::game::{Material, Mine, Position};
use crate::{config, LodeError, LodeResult};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The category table: each entry is `(content, die)`. A category places
/// its content when a roll in `0..die` comes up zero, and dirt otherwise.
const CATEGORY_TABLE: [(Material, u32); 7] = [
    (Material::Coal, 1),
    (Material::Silver, 3),
    (Material::Gold, 5),
    (Material::Platinum, 7),
    (Material::CaveIn, 5),
    (Material::Spring, 5),
    (Material::Granite, 2),
];

/// Configuration for mine generation.
///
/// # Examples
///
/// ```
/// use lode::GenerationConfig;
///
/// let config = GenerationConfig::new(12345);
/// assert_eq!(config.width, 192);
/// assert_eq!(config.seed, 12345);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Mine width in tiles
    pub width: u32,
    /// Mine height in tiles
    pub height: u32,
}

impl GenerationConfig {
    /// Creates the standard full-size configuration.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            width: config::MINE_WIDTH,
            height: config::MINE_HEIGHT,
        }
    }

    /// Creates a configuration for testing with a small mine.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            width: 24,
            height: 24,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Trait for procedural generators.
///
/// Mirrors how the rest of the codebase treats generation: content comes
/// out of a config plus an explicit RNG, and can be validated after the
/// fact.
pub trait Generator<T> {
    /// Generates content using the provided configuration and RNG.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> LodeResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> LodeResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// The standard mine generator.
///
/// Column 0 becomes the explored elevator shaft with the car parked at the
/// top; every other cell rolls the category table; exactly one cell is
/// overwritten with the diamond.
#[derive(Debug, Clone, Default)]
pub struct MineGenerator;

impl MineGenerator {
    /// Creates a new mine generator.
    pub fn new() -> Self {
        Self
    }
}

impl Generator<Mine> for MineGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> LodeResult<Mine> {
        if config.width < 2 || config.height < 2 {
            return Err(LodeError::GenerationFailed(format!(
                "mine dimensions {}x{} are too small",
                config.width, config.height
            )));
        }

        let mut mine = Mine::new(config.width, config.height);

        // The far-left column is the shaft, pre-explored.
        for y in 0..config.height as i32 {
            mine.set_material(Position::new(0, y), Material::Shaft)?;
            mine.set_explored(Position::new(0, y), true)?;
        }

        // Roll everything east of the shaft.
        for x in 1..config.width as i32 {
            for y in 0..config.height as i32 {
                let pos = Position::new(x, y);
                mine.set_explored(pos, false)?;
                mine.set_material(pos, roll_material(rng))?;
            }
        }

        // Bury the diamond somewhere off the shaft column, overwriting
        // whatever was rolled there.
        let diamond = Position::new(
            rng.gen_range(1..config.width as i32),
            rng.gen_range(0..config.height as i32),
        );
        mine.set_material(diamond, Material::Diamond)?;
        mine.set_diamond_position(diamond);

        // Park the elevator at the surface stop.
        mine.set_material(Position::origin(), Material::Elevator)?;

        info!(
            "generated {}x{} mine (seed {})",
            config.width, config.height, config.seed
        );
        debug!("diamond buried at ({}, {})", diamond.x, diamond.y);

        Ok(mine)
    }

    fn validate(&self, mine: &Mine, config: &GenerationConfig) -> LodeResult<()> {
        if mine.width() != config.width || mine.height() != config.height {
            return Err(LodeError::GenerationFailed(
                "mine dimensions do not match configuration".to_string(),
            ));
        }

        // Shaft invariant: the whole left column is explored shaft, with
        // the elevator parked at the top.
        for y in 0..mine.height() as i32 {
            let pos = Position::new(0, y);
            let expected = if y == 0 {
                Material::Elevator
            } else {
                Material::Shaft
            };
            if mine.material(pos) != Some(expected) || mine.is_explored(pos) != Some(true) {
                return Err(LodeError::GenerationFailed(format!(
                    "shaft column broken at row {y}"
                )));
            }
        }

        // Exactly one diamond, where the mine says it is.
        let mut diamonds = 0;
        for x in 0..mine.width() as i32 {
            for y in 0..mine.height() as i32 {
                if mine.material(Position::new(x, y)) == Some(Material::Diamond) {
                    diamonds += 1;
                    if mine.diamond_position() != Position::new(x, y) {
                        return Err(LodeError::GenerationFailed(
                            "diamond location out of sync with grid".to_string(),
                        ));
                    }
                }
            }
        }
        if diamonds != 1 {
            return Err(LodeError::GenerationFailed(format!(
                "expected exactly one diamond, found {diamonds}"
            )));
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "MineGenerator"
    }
}

/// Rolls the category table once: a category in `0..=6`, then the nested
/// die; zero places the category's content, anything else is dirt.
fn roll_material(rng: &mut StdRng) -> Material {
    let (material, die) = CATEGORY_TABLE[rng.gen_range(0..CATEGORY_TABLE.len())];
    if rng.gen_range(0..die) == 0 {
        material
    } else {
        Material::Dirt
    }
}

/// Collapses the terrain around a disturbed cave-in at `center`.
///
/// The eight neighbors (excluding the center itself and any cell holding
/// the elevator, the shaft, or the diamond) are re-rolled from the same
/// category table and forced back to unexplored. The explored reset is
/// deliberate: the collapse re-hides the terrain.
///
/// Two placements are suppressed during regrowth: a fresh cave-in may not
/// land on row 1, and a fresh spring only below row 2.
pub fn cave_in(mine: &mut Mine, center: Position, rng: &mut StdRng) {
    debug!("cave-in at ({}, {})", center.x, center.y);
    for dx in -1..=1 {
        for dy in -1..=1 {
            let pos = Position::new(center.x + dx, center.y + dy);
            if pos == center {
                continue;
            }
            let Some(material) = mine.material(pos) else {
                continue;
            };
            if matches!(
                material,
                Material::Elevator | Material::Shaft | Material::Diamond
            ) {
                continue;
            }

            let mut rolled = roll_material(rng);
            if rolled == Material::CaveIn && pos.y == 1 {
                rolled = Material::Dirt;
            }
            if rolled == Material::Spring && pos.y <= 2 {
                rolled = Material::Dirt;
            }

            // In-bounds by construction; the material lookup proved it.
            let _ = mine.set_explored(pos, false);
            let _ = mine.set_material(pos, rolled);
        }
    }
}

/// Floods the neighborhood of a struck spring at `center`.
///
/// Every explored cell in the 5-wide × 3-tall window around the spring is
/// overwritten with water, except granite, the spring itself, the elevator,
/// the shaft, and the diamond. Columns 0..=2 never flood, which keeps the
/// water away from the shaft even when the window overlaps it.
pub fn water_flow(mine: &mut Mine, center: Position) {
    debug!("water flowing from ({}, {})", center.x, center.y);
    for dx in -2..=2 {
        for dy in -1..=1 {
            let pos = Position::new(center.x + dx, center.y + dy);
            let Some(tile) = mine.get_tile(pos) else {
                continue;
            };
            if !tile.explored {
                continue;
            }
            if matches!(
                tile.material,
                Material::Granite
                    | Material::Spring
                    | Material::Elevator
                    | Material::Shaft
                    | Material::Diamond
            ) {
                continue;
            }
            if pos.x > 2 {
                let _ = mine.set_material(pos, Material::Water);
            }
        }
    }
}
