//! # Game Module
//!
//! Core game state: the mine grid, the player, the movement rule engine,
//! and the dynamite subsystem.
//!
//! The [`Mine`] and [`Player`] are sibling aggregates; neither owns the
//! other. The [`engine`] module ties them together: a driver passes both
//! (plus its `StdRng`) into [`engine::change_location`] and reads back the
//! resulting [`GameEvent`]s.

pub mod dynamite;
pub mod engine;
pub mod mine;
pub mod player;
pub mod tile;

pub use dynamite::*;
pub use engine::*;
pub use mine::*;
pub use player::*;
pub use tile::*;

use serde::{Deserialize, Serialize};

/// Represents a 2D coordinate in the mine.
///
/// `y` grows downward: row 0 is the surface, larger rows are deeper.
/// The out-of-grid position `(0, -1)` is a sentinel meaning the player has
/// ridden the elevator past the top of the shaft; see [`Position::EXIT`].
///
/// # Examples
///
/// ```
/// use lode::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Sentinel position signalling "the player has left the mine."
    pub const EXIT: Position = Position { x: 0, y: -1 };

    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0), the elevator's resting spot.
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Calculates the Manhattan distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use lode::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, 4);
    /// assert_eq!(pos1.manhattan_distance(pos2), 7);
    /// ```
    pub fn manhattan_distance(self, other: Position) -> u32 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as u32
    }

    /// Returns the position one tile away in the given direction.
    pub fn step(self, direction: Direction) -> Position {
        self + direction.to_delta()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// Directions the player can move. The mine is four-connected; there is no
/// diagonal digging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use lode::{Direction, Position};
    ///
    /// let delta = Direction::Up.to_delta();
    /// assert_eq!(delta, Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::Up => Position::new(0, -1),
            Direction::Down => Position::new(0, 1),
            Direction::Left => Position::new(-1, 0),
            Direction::Right => Position::new(1, 0),
        }
    }

    /// Converts a position delta to a direction.
    ///
    /// Returns None if the delta doesn't correspond to a single-tile move.
    pub fn from_delta(delta: Position) -> Option<Direction> {
        match (delta.x, delta.y) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }

    /// Returns all four directions.
    pub fn all() -> Vec<Direction> {
        vec![
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_creation() {
        let pos = Position::new(5, 10);
        assert_eq!(pos.x, 5);
        assert_eq!(pos.y, 10);
    }

    #[test]
    fn test_position_manhattan_distance() {
        let pos1 = Position::new(0, 0);
        let pos2 = Position::new(3, 4);
        assert_eq!(pos1.manhattan_distance(pos2), 7);
    }

    #[test]
    fn test_position_arithmetic() {
        let pos1 = Position::new(5, 10);
        let pos2 = Position::new(3, 2);
        assert_eq!(pos1 + pos2, Position::new(8, 12));
        assert_eq!(pos1 - pos2, Position::new(2, 8));
    }

    #[test]
    fn test_direction_round_trip() {
        for direction in Direction::all() {
            assert_eq!(Direction::from_delta(direction.to_delta()), Some(direction));
        }
        assert_eq!(Direction::from_delta(Position::new(1, 1)), None);
    }

    #[test]
    fn test_step() {
        let pos = Position::new(4, 4);
        assert_eq!(pos.step(Direction::Down), Position::new(4, 5));
        assert_eq!(pos.step(Direction::Left), Position::new(3, 4));
    }

    #[test]
    fn test_exit_sentinel() {
        assert_eq!(Position::origin().step(Direction::Up), Position::EXIT);
    }
}
