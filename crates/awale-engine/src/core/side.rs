use serde::{Deserialize, Serialize};

/// One of the two players.
///
/// `South` is player 0 and `North` is player 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Side {
    #[display("south")]
    South,
    #[display("north")]
    North,
}

impl Side {
    pub const ALL: [Self; 2] = [Self::South, Self::North];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::South => 0,
            Self::North => 1,
        }
    }

    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::South => Self::North,
            Self::North => Self::South,
        }
    }
}
