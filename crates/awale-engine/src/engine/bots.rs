//! Reference bots used as sparring partners and baselines.

use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::core::{Board, Decision, NB_HOLES};

use super::{Bot, BotIdentity, Player};

const AUTHOR: &str = "awale";

/// Always plays the lowest-indexed legal hole.
#[derive(Debug, Clone)]
pub struct FirstMoveBot {
    identity: BotIdentity,
}

impl Default for FirstMoveBot {
    fn default() -> Self {
        Self::new()
    }
}

impl FirstMoveBot {
    #[must_use]
    pub fn new() -> Self {
        Self {
            identity: BotIdentity::new("first", AUTHOR),
        }
    }
}

impl Player for FirstMoveBot {
    #[expect(clippy::cast_precision_loss)]
    fn decide(&mut self, _board: &Board) -> Decision {
        std::array::from_fn(|hole| (NB_HOLES - hole) as f64)
    }
}

impl Bot for FirstMoveBot {
    fn identity(&self) -> &BotIdentity {
        &self.identity
    }
}

/// Plays a uniformly random legal hole.
#[derive(Debug, Clone)]
pub struct RandomBot {
    identity: BotIdentity,
    rng: Pcg32,
}

impl Default for RandomBot {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomBot {
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(Pcg32::from_rng(&mut rand::rng()))
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed))
    }

    fn with_rng(rng: Pcg32) -> Self {
        Self {
            identity: BotIdentity::new("random", AUTHOR),
            rng,
        }
    }
}

impl Player for RandomBot {
    fn decide(&mut self, _board: &Board) -> Decision {
        std::array::from_fn(|_| self.rng.random())
    }
}

impl Bot for RandomBot {
    fn identity(&self) -> &BotIdentity {
        &self.identity
    }
}

/// Plays the hole capturing the most seeds right now.
///
/// Among equal captures it prefers holes leaving the opponent fewer seeds.
#[derive(Debug, Clone)]
pub struct GreedyBot {
    identity: BotIdentity,
}

impl Default for GreedyBot {
    fn default() -> Self {
        Self::new()
    }
}

impl GreedyBot {
    #[must_use]
    pub fn new() -> Self {
        Self {
            identity: BotIdentity::new("greedy", AUTHOR),
        }
    }
}

impl Player for GreedyBot {
    fn decide(&mut self, board: &Board) -> Decision {
        let side = board.current_player();
        let mut decision = [f64::NEG_INFINITY; NB_HOLES];
        for hole in board.legal_moves(side) {
            let mut next = board.clone();
            if let Ok(captured) = next.play_hole(side, hole) {
                let exposed = next.nb_seeds_of(side.opponent());
                decision[hole] = f64::from(captured) - f64::from(exposed) / 100.0;
            }
        }
        decision
    }
}

impl Bot for GreedyBot {
    fn identity(&self) -> &BotIdentity {
        &self.identity
    }
}

#[cfg(test)]
mod tests {
    use crate::Side;

    use super::*;

    #[test]
    fn test_first_move_bot_prefers_low_holes() {
        let board = Board::from_parts([[0, 3, 3, 0, 0, 0], [4; NB_HOLES]], [0; 2], Side::South);
        let decision = FirstMoveBot::new().decide(&board);
        assert_eq!(board.select_move(Side::South, &decision), Some(1));
    }

    #[test]
    fn test_greedy_bot_takes_capture() {
        let board = Board::from_parts(
            [[1, 0, 0, 0, 0, 2], [1, 2, 4, 4, 4, 4]],
            [0; 2],
            Side::South,
        );
        let decision = GreedyBot::new().decide(&board);
        assert_eq!(board.select_move(Side::South, &decision), Some(5));
    }

    #[test]
    fn test_seeded_random_bot_is_reproducible() {
        let board = Board::new();
        let a = RandomBot::with_seed(7).decide(&board);
        let b = RandomBot::with_seed(7).decide(&board);
        assert_eq!(a, b);
        assert!(board.select_move(Side::South, &a).is_some());
    }
}
