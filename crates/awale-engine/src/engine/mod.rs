//! Game flow on top of the board rules.
//!
//! - [`Player`] / [`Bot`] - what the engine asks a participant for
//! - [`Game`] - a single game until one of the end conditions holds
//! - [`Match`] - two games between the same players with colors swapped
//! - [`bots`] - simple reference bots
//!
//! # Game Flow
//!
//! 1. The side to move returns a [`Decision`](crate::Decision) for the board
//! 2. The board plays the highest-ranked legal hole
//! 3. The game ends on a forfeit (no move could be derived), when the mover
//!    reaches [`WINNING_SCORE`](crate::WINNING_SCORE), when at most
//!    [`MIN_SEEDS_ON_BOARD`](crate::MIN_SEEDS_ON_BOARD) seeds remain, or at the
//!    move limit

pub use self::{bot::*, game::*, game_match::*};

mod bot;
pub mod bots;
mod game;
mod game_match;
