//! # Input Module
//!
//! Command parsing for the terminal driver.
//!
//! The core engine is input-agnostic; this module just maps text lines to
//! commands so `src/main.rs` can stay a thin loop. Movement accepts words,
//! WASD, and Vi keys.

use crate::game::{Direction, Mineral};
use crate::town::{StoreItem, TipQuality};

/// A command while underground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MineCommand {
    /// Dig or walk one tile
    Move(Direction),
    /// Prime the dynamite where the player stands
    PrimeDynamite,
    /// Show the minimap
    Map,
    /// Express elevator to the surface
    RideToTop,
    /// Express elevator to the deepest explored row
    RideToBottom,
    /// Show player status
    Status,
    /// List commands
    Help,
    /// Abandon the expedition and return to town
    Leave,
}

/// A command while in town.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TownCommand {
    /// Descend into the mine
    Descend,
    /// Buy equipment at the store
    Buy(StoreItem),
    /// Sell one mineral at the bank
    Sell(Mineral),
    /// Sell everything at the bank
    SellAll,
    /// Current market prices
    Prices,
    /// One night at the hospital
    Stay,
    /// Heal to full at the hospital
    Heal,
    /// Buy an insurance policy
    Insurance,
    /// Buy a tip at the tavern
    Tip(TipQuality),
    /// Pay court at the tavern
    Court,
    /// Show player status
    Status,
    /// Save the game
    Save,
    /// List commands
    Help,
    /// Quit to the shell
    Quit,
}

fn parse_direction(word: &str) -> Option<Direction> {
    match word {
        "up" | "u" | "w" | "k" => Some(Direction::Up),
        "down" | "j" => Some(Direction::Down),
        "left" | "a" | "h" => Some(Direction::Left),
        "right" | "d" | "l" => Some(Direction::Right),
        _ => None,
    }
}

/// Parses one line of input while underground.
pub fn parse_mine_command(line: &str) -> Option<MineCommand> {
    let word = line.trim().to_lowercase();
    if let Some(direction) = parse_direction(&word) {
        return Some(MineCommand::Move(direction));
    }
    match word.as_str() {
        "dynamite" | "dyn" => Some(MineCommand::PrimeDynamite),
        "map" | "m" => Some(MineCommand::Map),
        "top" | "t" => Some(MineCommand::RideToTop),
        "bottom" | "b" => Some(MineCommand::RideToBottom),
        "status" | "st" => Some(MineCommand::Status),
        "help" | "?" => Some(MineCommand::Help),
        "leave" | "quit" | "q" => Some(MineCommand::Leave),
        _ => None,
    }
}

fn parse_store_item(word: &str) -> Option<StoreItem> {
    match word {
        "shovel" => Some(StoreItem::Shovel),
        "axe" => Some(StoreItem::Axe),
        "bucket" => Some(StoreItem::Bucket),
        "dynamite" => Some(StoreItem::Dynamite),
        "flashlight" => Some(StoreItem::Flashlight),
        "hardhat" => Some(StoreItem::HardHat),
        _ => None,
    }
}

fn parse_mineral(word: &str) -> Option<Mineral> {
    match word {
        "coal" => Some(Mineral::Coal),
        "silver" => Some(Mineral::Silver),
        "gold" => Some(Mineral::Gold),
        "platinum" => Some(Mineral::Platinum),
        _ => None,
    }
}

/// Parses one line of input while in town.
pub fn parse_town_command(line: &str) -> Option<TownCommand> {
    let lowered = line.trim().to_lowercase();
    let mut words = lowered.split_whitespace();
    let head = words.next()?;
    let arg = words.next();

    match (head, arg) {
        ("mine", None) | ("descend", None) => Some(TownCommand::Descend),
        ("buy", Some(item)) => parse_store_item(item).map(TownCommand::Buy),
        ("sell", Some("all")) | ("sellall", None) => Some(TownCommand::SellAll),
        ("sell", Some(mineral)) => parse_mineral(mineral).map(TownCommand::Sell),
        ("prices", None) => Some(TownCommand::Prices),
        ("stay", None) => Some(TownCommand::Stay),
        ("heal", None) => Some(TownCommand::Heal),
        ("insurance", None) => Some(TownCommand::Insurance),
        ("tip", Some("cheap")) => Some(TownCommand::Tip(TipQuality::Cheap)),
        ("tip", Some("good")) => Some(TownCommand::Tip(TipQuality::Good)),
        ("tip", Some("best")) => Some(TownCommand::Tip(TipQuality::Best)),
        ("court", None) => Some(TownCommand::Court),
        ("status", None) | ("st", None) => Some(TownCommand::Status),
        ("save", None) => Some(TownCommand::Save),
        ("help", None) | ("?", None) => Some(TownCommand::Help),
        ("quit", None) | ("q", None) => Some(TownCommand::Quit),
        _ => None,
    }
}
