//! # Lode
//!
//! A turn-based mining roguelike. The player rides an elevator down a mine
//! shaft, digs through procedurally generated terrain, collects minerals,
//! and hauls them back to town to sell, all while managing health, money,
//! and the hazards lurking in the dark: granite, springs, cave-ins, and the
//! player's own dynamite.
//!
//! ## Architecture Overview
//!
//! The crate is split along the game's natural seams:
//!
//! - **Grid Model** ([`game::Mine`]): the 192×192 tile grid, explored flags,
//!   the hidden diamond, and the transient "recently found" highlight
//! - **Player State** ([`game::Player`]): money, health, mineral stocks,
//!   market prices, equipment, turn bookkeeping, and dynamite state
//! - **Rule Engine** ([`game::engine`]): the single entry point that resolves
//!   a requested move against the grid and applies every consequence
//! - **Terrain Generator** ([`generation`]): seeded procedural population of
//!   the mine, plus localized cave-in regrowth and water-flow spread
//! - **Town** ([`town`]): the store, bank, hospital, and tavern economies
//! - **Persistence** ([`save`]): the whitespace-delimited legacy save format
//!   and a JSON snapshot helper
//!
//! Rendering, input polling, and menu navigation are deliberately absent:
//! the engine reports what happened as [`game::GameEvent`] values and a
//! driver (see `src/main.rs` for a terminal one) decides how to show them.
//! All randomness flows through an explicitly-owned `StdRng` passed in by
//! the driver, so every roll in the game is reproducible from a seed.

pub mod game;
pub mod generation;
pub mod input;
pub mod save;
pub mod town;

// Explicit re-exports for the types drivers touch constantly.
pub use game::{
    BlastTick, Direction, GameEvent, HealthStatus, MarketPrices, Material, Mine, Mineral, Player,
    Position, RecentFind, Tile,
};
pub use generation::{GenerationConfig, Generator, MineGenerator};

/// Core error type for the Lode game engine.
#[derive(thiserror::Error, Debug)]
pub enum LodeError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Action cannot be performed
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// A coordinate fell outside the mine
    #[error("Position ({x}, {y}) is outside the mine")]
    OutOfBounds { x: i32, y: i32 },

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// A save file could not be decoded
    #[error("Corrupt save data: {0}")]
    SaveCorrupt(String),
}

/// Result type used throughout the Lode codebase.
pub type LodeResult<T> = Result<T, LodeError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Mine width in tiles (column 0 is the elevator shaft)
    pub const MINE_WIDTH: u32 = 192;

    /// Mine height in tiles
    pub const MINE_HEIGHT: u32 = 192;

    /// Money the player starts a new game with
    pub const STARTING_MONEY: i64 = 1500;

    /// Health the player starts a new game with
    pub const STARTING_HEALTH: i32 = 100;

    /// Cost of digging one tile without a shovel
    pub const DIG_COST: i64 = 20;

    /// Cost of digging one tile with a shovel
    pub const DIG_COST_SHOVEL: i64 = 15;

    /// Flat cost of chipping through revealed granite with the axe
    pub const GRANITE_CHIP_COST: i64 = 30;

    /// Cost of bailing a flooded tile with the bucket
    pub const WATER_BAIL_COST: i64 = 40;

    /// Fee charged per elevator ride that moves downward
    pub const ELEVATOR_DESCENT_FEE: i64 = 1;

    /// Turns an insurance policy stays in force after purchase
    pub const INSURANCE_DURATION_TURNS: i64 = 50;

    /// Health restored when insurance converts a lethal event
    pub const INSURANCE_REVIVAL_HEALTH: i32 = 35;

    /// Sentinel for "insurance never purchased / long expired"
    pub const INSURANCE_NEVER: i64 = -100;

    /// Turns that must elapse before the bank rerolls market prices
    pub const MARKET_REROLL_INTERVAL: i64 = 10;

    /// Animation frames a freshly-found mineral stays highlighted
    pub const RECENT_FIND_FRAMES: i32 = 24;

    /// Health lost when caught inside a dynamite blast
    pub const BLAST_DAMAGE: i32 = 50;
}
