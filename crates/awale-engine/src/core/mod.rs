//! Core board data structures.
//!
//! - [`Board`] - hole contents, scores and the side to move
//! - [`Side`] - the two players
//! - [`features`] - the feature vector fed to move evaluators

pub use self::{board::*, side::*};

pub mod board;
pub mod features;
pub mod side;
