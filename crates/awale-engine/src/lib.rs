//! Awale rule engine and the collaborators the trainer plays through.
//!
//! - [`core`] - board representation, sowing, captures and move selection
//! - [`engine`] - games, two-game matches and the [`Player`]/[`Bot`] contracts
//! - [`data`] - historical observations and the dataset loader
//!
//! # Example
//!
//! ```
//! use awale_engine::{Board, NB_HOLES, Side};
//!
//! let mut board = Board::new();
//! let mut decision = [0.0; NB_HOLES];
//! decision[2] = 1.0;
//!
//! let captured = board.play_move(Side::South, &decision).unwrap();
//! assert_eq!(captured, 0);
//! assert_eq!(board.current_player(), Side::North);
//! ```

pub use self::{core::*, data::*, engine::*};

pub mod core;
pub mod data;
pub mod engine;

/// Sentinel reported by the board when no move can be derived for a player.
///
/// The training core treats this as data (a forfeit), not as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum IllegalMove {
    #[display("it is not this player's turn")]
    NotCurrentPlayer,
    #[display("hole {_0} is out of range")]
    HoleOutOfRange(#[error(not(source))] usize),
    #[display("hole {_0} cannot be played")]
    UnplayableHole(#[error(not(source))] usize),
    #[display("no legal move could be derived from the decision")]
    NoLegalMove,
}
