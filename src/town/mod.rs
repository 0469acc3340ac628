//! # Town Module
//!
//! Everything above ground: the general store, the bank, the hospital, and
//! the tavern.
//!
//! These are pure state-transition functions over [`crate::game::Player`]
//! (and, for the tavern's tips, the [`crate::game::Mine`]); the screens
//! and menus that front them belong to the driver. Every refused
//! transaction is a typed outcome, never an error.

pub mod bank;
pub mod hospital;
pub mod store;
pub mod tavern;

pub use bank::*;
pub use hospital::*;
pub use store::*;
pub use tavern::*;
