use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::IllegalMove;

use super::{
    features::{self, FEATURE_COUNT},
    side::Side,
};

/// Number of holes on each side of the board.
pub const NB_HOLES: usize = 6;

/// Seeds in every hole at the start of a game.
pub const INITIAL_SEEDS_PER_HOLE: u8 = 4;

/// A player reaching this score wins the game outright.
pub const WINNING_SCORE: u32 = 25;

/// A game stops once the board holds this many seeds or fewer.
pub const MIN_SEEDS_ON_BOARD: u32 = 6;

const RING_LEN: usize = NB_HOLES * 2;

/// Confidence per hole of the mover, as produced by a move evaluator.
pub type Decision = [f64; NB_HOLES];

/// Awale board: hole contents, captured seeds and the side to move.
///
/// # Rules
///
/// - Sowing is counter-clockwise: the mover's holes in increasing index, then
///   the opponent's holes in increasing index. The origin hole is skipped when
///   a move laps the board.
/// - When the last seed lands in an opponent hole that now holds 2 or 3 seeds,
///   that hole and the preceding opponent holes holding 2 or 3 seeds are
///   captured, unless the capture would take every opponent seed.
/// - When the opponent has no seeds, only moves reaching their side are legal.
///
/// # Example
///
/// ```
/// use awale_engine::{Board, Side};
///
/// let mut board = Board::new();
/// board.play_hole(Side::South, 5).unwrap();
///
/// assert_eq!(board.holes(Side::South), &[4, 4, 4, 4, 4, 0]);
/// assert_eq!(board.holes(Side::North), &[5, 5, 5, 5, 4, 4]);
/// assert_eq!(board.current_player(), Side::North);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    holes: [[u8; NB_HOLES]; 2],
    scores: [u32; 2],
    current: Side,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates the initial board with `South` to move.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_first_player(Side::South)
    }

    /// Creates the initial board with the given side to move.
    #[must_use]
    pub const fn with_first_player(first: Side) -> Self {
        Self {
            holes: [[INITIAL_SEEDS_PER_HOLE; NB_HOLES]; 2],
            scores: [0; 2],
            current: first,
        }
    }

    /// Creates a board from explicit hole contents, indexed by [`Side::index`].
    #[must_use]
    pub const fn from_parts(holes: [[u8; NB_HOLES]; 2], scores: [u32; 2], current: Side) -> Self {
        Self {
            holes,
            scores,
            current,
        }
    }

    #[must_use]
    pub const fn current_player(&self) -> Side {
        self.current
    }

    #[must_use]
    pub const fn holes(&self, side: Side) -> &[u8; NB_HOLES] {
        &self.holes[side.index()]
    }

    /// Seed counts of the side to move.
    #[must_use]
    pub const fn player_holes(&self) -> [u8; NB_HOLES] {
        self.holes[self.current.index()]
    }

    /// Seed counts of the side waiting for its turn.
    #[must_use]
    pub const fn opponent_holes(&self) -> [u8; NB_HOLES] {
        self.holes[self.current.opponent().index()]
    }

    /// Feature vector from the perspective of the side to move.
    #[must_use]
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        features::encode(&self.player_holes(), &self.opponent_holes())
    }

    #[must_use]
    pub const fn score(&self, side: Side) -> u32 {
        self.scores[side.index()]
    }

    /// Total seeds still on the board.
    #[must_use]
    pub fn nb_seeds(&self) -> u32 {
        Side::ALL.into_iter().map(|side| self.nb_seeds_of(side)).sum()
    }

    /// Seeds on one side of the board.
    #[must_use]
    pub fn nb_seeds_of(&self, side: Side) -> u32 {
        self.holes[side.index()].iter().copied().map(u32::from).sum()
    }

    /// Returns `true` if `side` may sow from `hole` on this board.
    ///
    /// Turn order is not checked.
    #[must_use]
    pub fn is_legal(&self, side: Side, hole: usize) -> bool {
        if hole >= NB_HOLES {
            return false;
        }
        let seeds = self.holes[side.index()][hole];
        if seeds == 0 {
            return false;
        }
        if self.nb_seeds_of(side.opponent()) == 0 {
            // the opponent must be fed
            return usize::from(seeds) >= NB_HOLES - hole;
        }
        true
    }

    #[must_use]
    pub fn legal_moves(&self, side: Side) -> ArrayVec<usize, NB_HOLES> {
        (0..NB_HOLES)
            .filter(|&hole| self.is_legal(side, hole))
            .collect()
    }

    /// Picks the legal hole with the highest finite confidence.
    ///
    /// Ties go to the lowest hole index. Returns `None` when no legal hole has a
    /// finite confidence.
    #[must_use]
    pub fn select_move(&self, side: Side, decision: &Decision) -> Option<usize> {
        self.legal_moves(side)
            .into_iter()
            .filter(|&hole| decision[hole].is_finite())
            .fold(None, |best, hole| match best {
                Some(best) if decision[best] >= decision[hole] => Some(best),
                _ => Some(hole),
            })
    }

    /// Plays the highest-ranked legal move encoded by `decision`.
    ///
    /// Returns the number of captured seeds.
    pub fn play_move(&mut self, side: Side, decision: &Decision) -> Result<u32, IllegalMove> {
        if side != self.current {
            return Err(IllegalMove::NotCurrentPlayer);
        }
        let hole = self
            .select_move(side, decision)
            .ok_or(IllegalMove::NoLegalMove)?;
        Ok(self.sow_and_capture(side, hole))
    }

    /// Plays an explicit hole (0-based).
    ///
    /// Returns the number of captured seeds.
    pub fn play_hole(&mut self, side: Side, hole: usize) -> Result<u32, IllegalMove> {
        if side != self.current {
            return Err(IllegalMove::NotCurrentPlayer);
        }
        if hole >= NB_HOLES {
            return Err(IllegalMove::HoleOutOfRange(hole));
        }
        if !self.is_legal(side, hole) {
            return Err(IllegalMove::UnplayableHole(hole));
        }
        Ok(self.sow_and_capture(side, hole))
    }

    fn sow_and_capture(&mut self, side: Side, hole: usize) -> u32 {
        let own = side.index();
        let opp = side.opponent().index();

        let mut seeds = self.holes[own][hole];
        self.holes[own][hole] = 0;
        let mut pos = hole;
        while seeds > 0 {
            pos = (pos + 1) % RING_LEN;
            if pos == hole {
                continue;
            }
            if pos < NB_HOLES {
                self.holes[own][pos] += 1;
            } else {
                self.holes[opp][pos - NB_HOLES] += 1;
            }
            seeds -= 1;
        }

        let captured = if pos >= NB_HOLES {
            self.capture(side, pos - NB_HOLES)
        } else {
            0
        };
        self.scores[own] += captured;
        self.current = side.opponent();
        captured
    }

    fn capture(&mut self, side: Side, last: usize) -> u32 {
        let opp = side.opponent().index();
        let mut captured = 0;
        let mut first = last + 1;
        for i in (0..=last).rev() {
            let seeds = self.holes[opp][i];
            if !(2..=3).contains(&seeds) {
                break;
            }
            captured += u32::from(seeds);
            first = i;
        }
        // no capture that would starve the opponent completely
        if captured == 0 || captured == self.nb_seeds_of(side.opponent()) {
            return 0;
        }
        for hole in &mut self.holes[opp][first..=last] {
            *hole = 0;
        }
        captured
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let north = self.holes(Side::North);
        let south = self.holes(Side::South);
        write!(f, "N |")?;
        for seeds in north.iter().rev() {
            write!(f, " {seeds:2}")?;
        }
        writeln!(f, " | {:2}", self.score(Side::North))?;
        write!(f, "S |")?;
        for seeds in south {
            write!(f, " {seeds:2}")?;
        }
        writeln!(f, " | {:2}", self.score(Side::South))?;
        write!(f, "to move: {}", self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_board() {
        let board = Board::new();
        assert_eq!(board.nb_seeds(), 48);
        assert_eq!(board.nb_seeds_of(Side::South), 24);
        assert_eq!(board.player_holes(), [4; NB_HOLES]);
        assert_eq!(board.score(Side::South), 0);
        assert_eq!(board.current_player(), Side::South);
        assert_eq!(
            Board::with_first_player(Side::North).current_player(),
            Side::North
        );
    }

    #[test]
    fn test_sowing_crosses_to_opponent() {
        let mut board = Board::new();
        let captured = board.play_hole(Side::South, 2).unwrap();
        assert_eq!(captured, 0);
        assert_eq!(board.holes(Side::South), &[4, 4, 0, 5, 5, 5]);
        assert_eq!(board.holes(Side::North), &[5, 4, 4, 4, 4, 4]);
        assert_eq!(board.nb_seeds(), 48);
        assert_eq!(board.player_holes(), [5, 4, 4, 4, 4, 4]);
        assert_eq!(board.opponent_holes(), [4, 4, 0, 5, 5, 5]);
    }

    #[test]
    fn test_lap_skips_origin_hole() {
        let mut board = Board::from_parts([[12, 0, 0, 0, 0, 0], [4; NB_HOLES]], [0; 2], Side::South);
        board.play_hole(Side::South, 0).unwrap();
        assert_eq!(board.holes(Side::South), &[0, 2, 1, 1, 1, 1]);
        assert_eq!(board.holes(Side::North), &[5; NB_HOLES]);
    }

    #[test]
    fn test_chained_capture() {
        let mut board = Board::from_parts(
            [[0, 0, 0, 0, 0, 2], [1, 2, 4, 4, 4, 4]],
            [0; 2],
            Side::South,
        );
        let captured = board.play_hole(Side::South, 5).unwrap();
        assert_eq!(captured, 5);
        assert_eq!(board.score(Side::South), 5);
        assert_eq!(board.holes(Side::North), &[0, 0, 4, 4, 4, 4]);
    }

    #[test]
    fn test_capture_stops_at_first_other_count() {
        let mut board = Board::from_parts(
            [[0, 0, 0, 0, 0, 3], [1, 4, 1, 4, 4, 4]],
            [0; 2],
            Side::South,
        );
        let captured = board.play_hole(Side::South, 5).unwrap();
        // [2, 5, 2, ...]: only the last hole is taken
        assert_eq!(captured, 2);
        assert_eq!(board.holes(Side::North), &[2, 5, 0, 4, 4, 4]);
    }

    #[test]
    fn test_grand_slam_captures_nothing() {
        let mut board = Board::from_parts(
            [[0, 0, 0, 0, 0, 2], [1, 2, 0, 0, 0, 0]],
            [0; 2],
            Side::South,
        );
        let captured = board.play_hole(Side::South, 5).unwrap();
        assert_eq!(captured, 0);
        assert_eq!(board.holes(Side::North), &[2, 3, 0, 0, 0, 0]);
    }

    #[test]
    fn test_starved_opponent_must_be_fed() {
        let board = Board::from_parts([[1, 0, 0, 0, 0, 1], [0; NB_HOLES]], [0; 2], Side::South);
        assert_eq!(board.legal_moves(Side::South).as_slice(), &[5]);
        assert!(!board.is_legal(Side::South, 0));
    }

    #[test]
    fn test_select_move_prefers_highest_legal_confidence() {
        let board = Board::from_parts([[0, 4, 4, 4, 4, 4], [4; NB_HOLES]], [0; 2], Side::South);
        let decision = [9.0, 0.1, 0.7, 0.7, f64::NAN, 0.2];
        // hole 0 is empty, ties go to the lowest index, NaN is ignored
        assert_eq!(board.select_move(Side::South, &decision), Some(2));

        let decision = [f64::NAN; NB_HOLES];
        assert_eq!(board.select_move(Side::South, &decision), None);
    }

    #[test]
    fn test_play_move_reports_sentinels() {
        let mut board = Board::new();
        assert_eq!(
            board.play_move(Side::North, &[1.0; NB_HOLES]),
            Err(IllegalMove::NotCurrentPlayer)
        );
        assert_eq!(
            board.play_move(Side::South, &[f64::NAN; NB_HOLES]),
            Err(IllegalMove::NoLegalMove)
        );
        assert_eq!(
            board.play_hole(Side::South, NB_HOLES),
            Err(IllegalMove::HoleOutOfRange(NB_HOLES))
        );
        // the board is unchanged by rejected moves
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_display_shows_both_rows() {
        let text = Board::new().to_string();
        assert!(text.starts_with("N |  4  4  4  4  4  4 |  0"));
        assert!(text.ends_with("to move: south"));
    }
}
