//! # Mine Module
//!
//! The mine grid aggregate: tile storage, explored flags, the diamond
//! location, and the transient recently-found highlight.
//!
//! `Mine` is deliberately dumb storage with bounds-checked accessors. All
//! the interesting mutation lives in [`crate::generation`] (terrain) and
//! [`crate::game::engine`] (player actions); both operate through this
//! module's accessors so an out-of-range coordinate is always a typed
//! result, never a panic.

use crate::game::{Material, Position, RecentFind, Tile};
use crate::{config, LodeError, LodeResult};
use serde::{Deserialize, Serialize};

/// The mine: a fixed-size 2D grid of [`Tile`]s.
///
/// Created once per game session: fully regenerated on "new game" (see
/// [`crate::generation::MineGenerator`]), fully restored on "load game"
/// (see [`crate::save`]), and never resized in between.
///
/// # Examples
///
/// ```
/// use lode::{Material, Mine, Position};
///
/// let mine = Mine::new(16, 16);
/// assert_eq!(mine.width(), 16);
/// assert_eq!(mine.material(Position::new(3, 3)), Some(Material::Dirt));
/// assert_eq!(mine.material(Position::new(99, 0)), None);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mine {
    width: u32,
    height: u32,
    /// Row-major tile storage: `tiles[y][x]`
    tiles: Vec<Vec<Tile>>,
    /// Where the diamond is hidden
    diamond: Position,
    /// Highlight state for the last find
    recent_find: RecentFind,
}

impl Mine {
    /// Creates a mine of the given dimensions filled with unexplored dirt.
    ///
    /// The result is a blank slate: run it through a generator or a loader
    /// before play.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![vec![Tile::dirt(); width as usize]; height as usize],
            diamond: Position::origin(),
            recent_find: RecentFind::idle(),
        }
    }

    /// Creates a mine at the standard game dimensions.
    pub fn standard() -> Self {
        Self::new(config::MINE_WIDTH, config::MINE_HEIGHT)
    }

    /// Mine width in tiles.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mine height in tiles.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether a position lies inside the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Returns the tile at a position, or None if out of bounds.
    pub fn get_tile(&self, pos: Position) -> Option<&Tile> {
        if self.in_bounds(pos) {
            Some(&self.tiles[pos.y as usize][pos.x as usize])
        } else {
            None
        }
    }

    fn get_tile_mut(&mut self, pos: Position) -> LodeResult<&mut Tile> {
        if self.in_bounds(pos) {
            Ok(&mut self.tiles[pos.y as usize][pos.x as usize])
        } else {
            Err(LodeError::OutOfBounds { x: pos.x, y: pos.y })
        }
    }

    /// Returns the material at a position, or None if out of bounds.
    pub fn material(&self, pos: Position) -> Option<Material> {
        self.get_tile(pos).map(|tile| tile.material)
    }

    /// Returns the explored flag at a position, or None if out of bounds.
    pub fn is_explored(&self, pos: Position) -> Option<bool> {
        self.get_tile(pos).map(|tile| tile.explored)
    }

    /// Stores a material at a position.
    pub fn set_material(&mut self, pos: Position, material: Material) -> LodeResult<()> {
        self.get_tile_mut(pos)?.material = material;
        Ok(())
    }

    /// Sets the explored flag at a position.
    pub fn set_explored(&mut self, pos: Position, explored: bool) -> LodeResult<()> {
        self.get_tile_mut(pos)?.explored = explored;
        Ok(())
    }

    /// Where the diamond is hidden.
    pub fn diamond_position(&self) -> Position {
        self.diamond
    }

    /// Records the diamond location. Used by generation and by the
    /// load-game path; does not touch tile contents.
    pub fn set_diamond_position(&mut self, pos: Position) {
        self.diamond = pos;
    }

    /// The current recently-found highlight state.
    pub fn recent_find(&self) -> &RecentFind {
        &self.recent_find
    }

    /// Registers a fresh find: the renderer highlights `material` at `pos`
    /// for the next [`config::RECENT_FIND_FRAMES`] animation frames.
    pub fn add_recent_find(&mut self, pos: Position, material: Material) {
        self.recent_find = RecentFind {
            material,
            position: pos,
            countdown: config::RECENT_FIND_FRAMES,
        };
    }

    /// Ticks the recently-found countdown one animation frame, clearing
    /// the highlight once it runs out.
    pub fn tick_recent_find(&mut self) {
        if self.recent_find.countdown > 0 {
            self.recent_find.countdown -= 1;
        } else {
            self.recent_find = RecentFind::idle();
        }
    }

    /// The deepest row the player has uncovered next to the shaft, used by
    /// the express elevator. Column 1 is scanned because column 0 (the
    /// shaft itself) is always explored.
    pub fn deepest_explored_row(&self) -> i32 {
        let mut deepest = 0;
        for y in 0..self.height as i32 {
            if self.is_explored(Position::new(1, y)) == Some(true) {
                deepest = y;
            }
        }
        deepest
    }
}
