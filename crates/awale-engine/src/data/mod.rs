//! Historical game observations used for supervised bootstrapping.
//!
//! An [`Observation`] records one board position, the move played from it and
//! whether the player who moved went on to win. A [`Dataset`] is an ordered
//! collection of observations loaded from CSV-like text or JSON.
//!
//! # Text Format
//!
//! One observation per line, comma separated:
//!
//! ```text
//! # own holes 1..6, opponent holes 1..6, move, outcome
//! 4,4,4,4,4,4,4,4,4,4,4,4,3,G
//! 0,5,5,5,5,4,4,4,4,4,4,4,6,P
//! ```
//!
//! The outcome is `G`/`W` for a won game and `P`/`L` for a lost one. Blank
//! lines and lines starting with `#` are ignored.

pub use self::{dataset::*, observation::*};

mod dataset;
mod observation;
