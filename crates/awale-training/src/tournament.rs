//! Match scoring and the round robin used to rank a population.

use std::cmp::Ordering;

use awale_engine::{Match, MatchOutcome, Player};
use serde::{Deserialize, Serialize};

/// Points per game won by the contestant that won more games of a match.
pub const GAME_WIN_POINTS: u32 = 3;
/// Points for each contestant when both won as many games.
pub const SPLIT_POINTS: u32 = 1;

/// Fitness points earned by each contestant of a match.
///
/// The contestant with more game wins takes [`GAME_WIN_POINTS`] per game won
/// and the other nothing, so a 2-0 sweep is worth 6 and a win plus a draw 3.
/// A 1-1 split or two draws give [`SPLIT_POINTS`] to both.
#[must_use]
pub fn match_points(outcome: &MatchOutcome) -> [u32; 2] {
    let [a, b] = outcome.game_wins();
    match a.cmp(&b) {
        Ordering::Greater => [GAME_WIN_POINTS * a, 0],
        Ordering::Less => [0, GAME_WIN_POINTS * b],
        Ordering::Equal => [SPLIT_POINTS; 2],
    }
}

/// Activity counters of a round robin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRobinSummary {
    pub matches: usize,
    pub games: usize,
    pub moves: usize,
    pub forfeits: usize,
}

impl RoundRobinSummary {
    fn record(&mut self, outcome: &MatchOutcome) {
        self.matches += 1;
        self.games += outcome.games.len();
        self.moves += outcome.moves();
        self.forfeits += outcome.forfeits();
    }
}

/// Plays one match for every unordered pair of `players`.
///
/// Returns the [`match_points`] total of each player, in input order.
pub fn round_robin<P>(players: &mut [P], game_match: &Match) -> (Vec<u32>, RoundRobinSummary)
where
    P: Player,
{
    let mut points = vec![0; players.len()];
    let mut summary = RoundRobinSummary::default();
    for i in 0..players.len() {
        let (head, tail) = players.split_at_mut(i + 1);
        let first = &mut head[i];
        for (offset, second) in tail.iter_mut().enumerate() {
            let j = i + 1 + offset;
            let outcome = game_match.play([&mut *first, second]);
            let [a, b] = match_points(&outcome);
            log::debug!(
                "agent {i} vs agent {j}: {:?} games, {a}-{b} points",
                outcome.game_wins()
            );
            points[i] += a;
            points[j] += b;
            summary.record(&outcome);
        }
    }
    (points, summary)
}
