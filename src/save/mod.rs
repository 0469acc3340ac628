//! # Save Module
//!
//! Persistence in two flavors.
//!
//! The canonical format is the legacy token layout: two plain-text files of
//! whitespace-delimited integers, one for the player and one for the mine.
//! The player file carries the stat fields in fixed order followed by eight
//! equipment booleans as 0/1; the mine file carries the full content grid
//! column-major (x outer, y inner, the same order generation walks), then
//! the explored grid as 0/1, then the diamond coordinates. Market prices
//! are deliberately absent: loading a game rerolls all four, so a save
//! can't freeze a good market.
//!
//! A JSON snapshot helper rides along for debugging and interop; the token
//! format is what the game actually reads and writes.
//!
//! Saves are whole-structure, last-writer-wins overwrites. Decoding builds
//! fresh values before anything is handed back, so a corrupt file yields a
//! typed error and no half-applied state.

use crate::game::{Material, Mine, Player, Position};
use crate::{config, LodeError, LodeResult};
use log::info;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// File name for the player half of a save.
pub const PLAYER_FILE: &str = "player_save";

/// File name for the mine half of a save.
pub const MINE_FILE: &str = "mine_save";

/// A whole-session snapshot for the JSON helper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub player: Player,
    pub mine: Mine,
}

/// Serializes a session to pretty JSON.
pub fn snapshot_json(player: &Player, mine: &Mine) -> LodeResult<String> {
    let snapshot = Snapshot {
        player: player.clone(),
        mine: mine.clone(),
    };
    serde_json::to_string_pretty(&snapshot).map_err(LodeError::from)
}

/// Deserializes a session from JSON.
pub fn snapshot_from_json(json: &str) -> LodeResult<Snapshot> {
    serde_json::from_str(json).map_err(LodeError::from)
}

/// Pulls the next whitespace token out of an iterator and parses it.
fn next_token<'a, T>(tokens: &mut impl Iterator<Item = &'a str>, field: &str) -> LodeResult<T>
where
    T: FromStr,
{
    let token = tokens
        .next()
        .ok_or_else(|| LodeError::SaveCorrupt(format!("missing field: {field}")))?;
    token
        .parse()
        .map_err(|_| LodeError::SaveCorrupt(format!("bad token {token:?} for field: {field}")))
}

fn next_bool<'a>(tokens: &mut impl Iterator<Item = &'a str>, field: &str) -> LodeResult<bool> {
    match next_token::<u8>(tokens, field)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(LodeError::SaveCorrupt(format!(
            "bad boolean {other} for field: {field}"
        ))),
    }
}

/// Encodes the player into the legacy token layout.
pub fn encode_player(player: &Player) -> String {
    let mut out = String::new();
    for value in [
        player.health as i64,
        player.money,
        i64::from(player.coal),
        i64::from(player.silver),
        i64::from(player.gold),
        i64::from(player.platinum),
        player.turn_number,
        player.insurance_turn_number,
        player.previous_turn_number,
    ] {
        out.push_str(&value.to_string());
        out.push('\n');
    }
    for flag in [
        player.has_axe,
        player.has_bucket,
        player.has_diamond,
        player.has_dynamite,
        player.has_flashlight,
        player.has_hardhat,
        player.has_insurance,
        player.has_shovel,
    ] {
        out.push_str(if flag { "1" } else { "0" });
        out.push('\n');
    }
    out
}

/// Decodes a player from the legacy token layout. Market prices come back
/// at their opening values; the caller rerolls them (see [`load_game`]).
pub fn decode_player(data: &str) -> LodeResult<Player> {
    let mut tokens = data.split_whitespace();
    let mut player = Player::new();

    player.health = next_token(&mut tokens, "health")?;
    player.money = next_token(&mut tokens, "money")?;
    player.coal = next_token(&mut tokens, "coal")?;
    player.silver = next_token(&mut tokens, "silver")?;
    player.gold = next_token(&mut tokens, "gold")?;
    player.platinum = next_token(&mut tokens, "platinum")?;
    player.turn_number = next_token(&mut tokens, "turn_number")?;
    player.insurance_turn_number = next_token(&mut tokens, "insurance_turn_number")?;
    player.previous_turn_number = next_token(&mut tokens, "previous_turn_number")?;

    player.has_axe = next_bool(&mut tokens, "has_axe")?;
    player.has_bucket = next_bool(&mut tokens, "has_bucket")?;
    player.has_diamond = next_bool(&mut tokens, "has_diamond")?;
    player.has_dynamite = next_bool(&mut tokens, "has_dynamite")?;
    player.has_flashlight = next_bool(&mut tokens, "has_flashlight")?;
    player.has_hardhat = next_bool(&mut tokens, "has_hardhat")?;
    player.has_insurance = next_bool(&mut tokens, "has_insurance")?;
    player.has_shovel = next_bool(&mut tokens, "has_shovel")?;

    Ok(player)
}

/// Encodes the mine into the legacy token layout.
pub fn encode_mine(mine: &Mine) -> String {
    let mut out = String::new();
    for x in 0..mine.width() as i32 {
        for y in 0..mine.height() as i32 {
            let material = mine
                .material(Position::new(x, y))
                .unwrap_or(Material::Dirt);
            out.push_str(&material.index().to_string());
            out.push('\n');
        }
    }
    for x in 0..mine.width() as i32 {
        for y in 0..mine.height() as i32 {
            let explored = mine.is_explored(Position::new(x, y)).unwrap_or(false);
            out.push_str(if explored { "1" } else { "0" });
            out.push('\n');
        }
    }
    out.push_str(&mine.diamond_position().x.to_string());
    out.push('\n');
    out.push_str(&mine.diamond_position().y.to_string());
    out.push('\n');
    out
}

/// Decodes a mine of the given dimensions from the legacy token layout.
pub fn decode_mine(data: &str, width: u32, height: u32) -> LodeResult<Mine> {
    let mut tokens = data.split_whitespace();
    let mut mine = Mine::new(width, height);

    for x in 0..width as i32 {
        for y in 0..height as i32 {
            let index: u8 = next_token(&mut tokens, "mine contents")?;
            let material = Material::from_index(index).ok_or_else(|| {
                LodeError::SaveCorrupt(format!("unknown material index {index}"))
            })?;
            mine.set_material(Position::new(x, y), material)?;
        }
    }
    for x in 0..width as i32 {
        for y in 0..height as i32 {
            let explored = next_bool(&mut tokens, "explored flag")?;
            mine.set_explored(Position::new(x, y), explored)?;
        }
    }
    let diamond_x = next_token(&mut tokens, "diamond x")?;
    let diamond_y = next_token(&mut tokens, "diamond y")?;
    mine.set_diamond_position(Position::new(diamond_x, diamond_y));

    Ok(mine)
}

/// Writes both halves of a save under `dir`.
pub fn save_game(dir: &Path, player: &Player, mine: &Mine) -> LodeResult<()> {
    fs::write(dir.join(PLAYER_FILE), encode_player(player))?;
    fs::write(dir.join(MINE_FILE), encode_mine(mine))?;
    info!("game saved to {}", dir.display());
    Ok(())
}

/// Reads both halves of a save from `dir` at the standard mine dimensions.
///
/// Market prices are rerolled from `rng` immediately; they are never
/// persisted. Decoding completes before anything is returned, so a corrupt
/// file produces an error and no state.
pub fn load_game(dir: &Path, rng: &mut StdRng) -> LodeResult<(Player, Mine)> {
    let player_data = fs::read_to_string(dir.join(PLAYER_FILE))?;
    let mine_data = fs::read_to_string(dir.join(MINE_FILE))?;

    let mut player = decode_player(&player_data)?;
    let mine = decode_mine(&mine_data, config::MINE_WIDTH, config::MINE_HEIGHT)?;
    player.prices.reroll_all(rng);

    info!("game loaded from {}", dir.display());
    Ok((player, mine))
}
