//! # Tile Module
//!
//! Tile contents and per-tile state for the mine grid.
//!
//! A tile's [`Material`] doubles as both "what is buried here" and "what
//! terrain state is this cell in". It is the same flat enumeration the
//! legacy save format persists as integers, so the discriminants are
//! load-bearing.
//! Combined with the `explored` flag the semantics are:
//!
//! | `material`            | `explored = false`        | `explored = true`                |
//! |-----------------------|---------------------------|----------------------------------|
//! | `Dirt`                | undug ground              | dug-out open passage             |
//! | `Granite`             | hidden rock               | revealed rock, still blocking    |
//! | mineral / `Diamond`   | undiscovered resource     | revealed by blast, uncollected   |
//! | `Explored`            | (not used)                | cleared floor                    |
//! | `Shaft` / `Elevator`  | (not used)                | the elevator column              |

use crate::game::Position;
use serde::{Deserialize, Serialize};

/// Everything a mine tile can hold.
///
/// The discriminants match the integers written by the legacy save format;
/// do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Material {
    /// Plain diggable ground; also what unexplored cells show on screen
    Dirt = 0,
    /// Impassable rock until chipped away with the axe
    Granite = 1,
    /// Unstable ceiling; disturbing it collapses the neighborhood
    CaveIn = 2,
    /// Underground spring; disturbing it floods the neighborhood
    Spring = 3,
    Coal = 4,
    Silver = 5,
    Gold = 6,
    Platinum = 7,
    /// A cell the player has dug clean
    Explored = 8,
    /// The open elevator shaft (column 0)
    Shaft = 9,
    /// The elevator car itself
    Elevator = 10,
    /// Floodwater spread from a spring
    Water = 11,
    /// A primed stick of dynamite
    Dynamite = 12,
    /// The one-of-a-kind diamond
    Diamond = 13,
    /// Only used by the recently-found marker, never stored in the grid
    Nothing = 14,
}

impl Material {
    /// Decodes a persisted integer back into a material.
    pub fn from_index(index: u8) -> Option<Material> {
        match index {
            0 => Some(Material::Dirt),
            1 => Some(Material::Granite),
            2 => Some(Material::CaveIn),
            3 => Some(Material::Spring),
            4 => Some(Material::Coal),
            5 => Some(Material::Silver),
            6 => Some(Material::Gold),
            7 => Some(Material::Platinum),
            8 => Some(Material::Explored),
            9 => Some(Material::Shaft),
            10 => Some(Material::Elevator),
            11 => Some(Material::Water),
            12 => Some(Material::Dynamite),
            13 => Some(Material::Diamond),
            14 => Some(Material::Nothing),
            _ => None,
        }
    }

    /// The integer the legacy save format stores for this material.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Whether this material is a sellable mineral.
    pub fn as_mineral(self) -> Option<Mineral> {
        match self {
            Material::Coal => Some(Mineral::Coal),
            Material::Silver => Some(Mineral::Silver),
            Material::Gold => Some(Mineral::Gold),
            Material::Platinum => Some(Mineral::Platinum),
            _ => None,
        }
    }
}

/// The four sellable minerals, in ascending order of value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mineral {
    Coal,
    Silver,
    Gold,
    Platinum,
}

impl Mineral {
    /// Returns all four minerals.
    pub fn all() -> [Mineral; 4] {
        [Mineral::Coal, Mineral::Silver, Mineral::Gold, Mineral::Platinum]
    }

    /// The grid material this mineral is buried as.
    pub fn material(self) -> Material {
        match self {
            Mineral::Coal => Material::Coal,
            Mineral::Silver => Material::Silver,
            Mineral::Gold => Material::Gold,
            Mineral::Platinum => Material::Platinum,
        }
    }

    /// How many units one deposit yields, inclusive on both ends.
    pub fn yield_bounds(self) -> (u32, u32) {
        match self {
            Mineral::Coal => (1, 4),
            Mineral::Silver => (1, 3),
            Mineral::Gold => (1, 3),
            Mineral::Platinum => (1, 2),
        }
    }

    /// The market price band `(low, high, die)`: prices are drawn from
    /// `0..die` and rejected until they land in `[low, high]`.
    pub fn price_bounds(self) -> (i64, i64, i64) {
        match self {
            Mineral::Coal => (5, 25, 25),
            Mineral::Silver => (40, 60, 60),
            Mineral::Gold => (80, 125, 125),
            Mineral::Platinum => (225, 275, 275),
        }
    }

    /// Display name, lowercase.
    pub fn name(self) -> &'static str {
        match self {
            Mineral::Coal => "coal",
            Mineral::Silver => "silver",
            Mineral::Gold => "gold",
            Mineral::Platinum => "platinum",
        }
    }
}

/// One cell of the mine grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// What this cell holds
    pub material: Material,
    /// Whether the player has uncovered this cell
    pub explored: bool,
}

impl Tile {
    /// Creates an unexplored tile holding the given material.
    pub fn new(material: Material) -> Self {
        Self {
            material,
            explored: false,
        }
    }

    /// Creates an unexplored dirt tile, the default fill.
    pub fn dirt() -> Self {
        Self::new(Material::Dirt)
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::dirt()
    }
}

/// Transient highlight state for a just-collected find.
///
/// Owned by the grid and exposed for the renderer: the driver ticks the
/// countdown once per animation frame and draws the sparkle while it is
/// non-negative. Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentFind {
    /// What was found; `Material::Nothing` while idle
    pub material: Material,
    /// Where it was found
    pub position: Position,
    /// Frames left to display; -1 while idle
    pub countdown: i32,
}

impl RecentFind {
    /// The idle marker: nothing found recently.
    pub fn idle() -> Self {
        Self {
            material: Material::Nothing,
            position: Position::origin(),
            countdown: -1,
        }
    }

    /// Whether the highlight is currently live.
    pub fn is_active(&self) -> bool {
        self.countdown >= 0
    }
}

impl Default for RecentFind {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_index_round_trip() {
        for index in 0..=14u8 {
            let material = Material::from_index(index).unwrap();
            assert_eq!(material.index(), index);
        }
        assert_eq!(Material::from_index(15), None);
    }

    #[test]
    fn test_legacy_discriminants() {
        // The save format depends on these exact values.
        assert_eq!(Material::Dirt.index(), 0);
        assert_eq!(Material::Explored.index(), 8);
        assert_eq!(Material::Shaft.index(), 9);
        assert_eq!(Material::Elevator.index(), 10);
        assert_eq!(Material::Diamond.index(), 13);
    }

    #[test]
    fn test_mineral_material_mapping() {
        for mineral in Mineral::all() {
            assert_eq!(mineral.material().as_mineral(), Some(mineral));
        }
        assert_eq!(Material::Granite.as_mineral(), None);
    }

    #[test]
    fn test_yield_bounds_ordering() {
        for mineral in Mineral::all() {
            let (low, high) = mineral.yield_bounds();
            assert!(low >= 1);
            assert!(low <= high);
        }
    }

    #[test]
    fn test_recent_find_idle() {
        let find = RecentFind::idle();
        assert!(!find.is_active());
        assert_eq!(find.material, Material::Nothing);
        assert_eq!(find.countdown, -1);
    }
}
