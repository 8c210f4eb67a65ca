use std::time::{Duration, Instant};

use crate::core::Side;

use super::{DEFAULT_MOVE_LIMIT, Game, GameOutcome, Player};

/// Two games between the same contestants, each moving first once.
///
/// Contestant 0 always sits on [`Side::South`] and contestant 1 on
/// [`Side::North`]; the first game is opened by contestant 0, the second by
/// contestant 1.
#[derive(Debug, Clone, Copy)]
pub struct Match {
    move_limit: usize,
}

impl Default for Match {
    fn default() -> Self {
        Self::new(DEFAULT_MOVE_LIMIT)
    }
}

impl Match {
    #[must_use]
    pub const fn new(move_limit: usize) -> Self {
        Self { move_limit }
    }

    #[must_use]
    pub fn play(&self, contestants: [&mut dyn Player; 2]) -> MatchOutcome {
        let [first, second] = contestants;
        let start = Instant::now();
        let games = Side::ALL.map(|opener| {
            Game::with_move_limit(opener, self.move_limit).play([&mut *first, &mut *second])
        });
        MatchOutcome {
            games,
            duration: start.elapsed(),
        }
    }
}

/// Result of a [`Match`], indexed by contestant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub games: [GameOutcome; 2],
    pub duration: Duration,
}

impl MatchOutcome {
    /// Games won by each contestant.
    #[must_use]
    pub fn game_wins(&self) -> [u32; 2] {
        let mut wins = [0; 2];
        for game in &self.games {
            if let Some(side) = game.winner() {
                wins[side.index()] += 1;
            }
        }
        wins
    }

    /// Seeds captured by each contestant over both games.
    #[must_use]
    pub fn total_scores(&self) -> [u32; 2] {
        let [a, b] = &self.games;
        [a.scores[0] + b.scores[0], a.scores[1] + b.scores[1]]
    }

    #[must_use]
    pub fn moves(&self) -> usize {
        self.games.iter().map(|game| game.moves).sum()
    }

    #[must_use]
    pub fn forfeits(&self) -> usize {
        self.games.iter().filter(|game| game.end.is_forfeit()).count()
    }
}
