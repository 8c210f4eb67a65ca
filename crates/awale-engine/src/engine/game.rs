use std::cmp::Ordering;

use crate::core::{Board, MIN_SEEDS_ON_BOARD, Side, WINNING_SCORE};

use super::Player;

/// Moves after which a game is stopped and scored as it stands.
///
/// Sowing can cycle forever once captures become impossible.
pub const DEFAULT_MOVE_LIMIT: usize = 400;

/// Why a game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameEnd {
    /// No legal move could be derived from this side's decision.
    Forfeit(Side),
    /// The mover reached [`WINNING_SCORE`].
    ScoreReached,
    /// At most [`MIN_SEEDS_ON_BOARD`] seeds are left.
    BoardExhausted,
    MoveLimit,
}

/// Final state of a finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    pub first_player: Side,
    pub scores: [u32; 2],
    pub moves: usize,
    pub end: GameEnd,
}

impl GameOutcome {
    /// The winning side, or `None` on a draw.
    ///
    /// A forfeit loses regardless of the scores.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        if let GameEnd::Forfeit(side) = self.end {
            return Some(side.opponent());
        }
        match self.scores[0].cmp(&self.scores[1]) {
            Ordering::Greater => Some(Side::South),
            Ordering::Less => Some(Side::North),
            Ordering::Equal => None,
        }
    }
}

/// A single game in progress.
///
/// # Example
///
/// ```
/// use awale_engine::{Game, Side, bots::FirstMoveBot};
///
/// let mut south = FirstMoveBot::new();
/// let mut north = FirstMoveBot::new();
/// let outcome = Game::new(Side::South).play([&mut south, &mut north]);
/// assert!(outcome.moves > 0);
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    first_player: Side,
    moves: usize,
    move_limit: usize,
    end: Option<GameEnd>,
}

impl Game {
    #[must_use]
    pub fn new(first_player: Side) -> Self {
        Self::with_move_limit(first_player, DEFAULT_MOVE_LIMIT)
    }

    #[must_use]
    pub fn with_move_limit(first_player: Side, move_limit: usize) -> Self {
        Self {
            board: Board::with_first_player(first_player),
            first_player,
            moves: 0,
            move_limit,
            end: None,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn moves(&self) -> usize {
        self.moves
    }

    #[must_use]
    pub fn end(&self) -> Option<GameEnd> {
        self.end
    }

    /// Final state, once the game is over.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.end.map(|end| GameOutcome {
            first_player: self.first_player,
            scores: [self.board.score(Side::South), self.board.score(Side::North)],
            moves: self.moves,
            end,
        })
    }

    /// Asks `player` for the side to move and plays its decision.
    ///
    /// Returns how the game ended once it is over. Further calls after the end
    /// do nothing.
    pub fn step(&mut self, player: &mut dyn Player) -> Option<GameEnd> {
        if self.end.is_some() {
            return self.end;
        }
        let mover = self.board.current_player();
        let decision = player.decide(&self.board);
        self.moves += 1;
        self.end = match self.board.play_move(mover, &decision) {
            Err(err) => {
                log::debug!("{mover} forfeits at move {}: {err}", self.moves);
                Some(GameEnd::Forfeit(mover))
            }
            Ok(_) if self.board.score(mover) >= WINNING_SCORE => Some(GameEnd::ScoreReached),
            Ok(_) if self.board.nb_seeds() <= MIN_SEEDS_ON_BOARD => Some(GameEnd::BoardExhausted),
            Ok(_) if self.moves >= self.move_limit => Some(GameEnd::MoveLimit),
            Ok(_) => None,
        };
        self.end
    }

    /// Plays until the end. `players` is indexed by [`Side::index`].
    #[must_use]
    pub fn play(mut self, players: [&mut dyn Player; 2]) -> GameOutcome {
        let [south, north] = players;
        loop {
            let player: &mut dyn Player = match self.board.current_player() {
                Side::South => &mut *south,
                Side::North => &mut *north,
            };
            self.step(player);
            if let Some(outcome) = self.outcome() {
                return outcome;
            }
        }
    }
}
