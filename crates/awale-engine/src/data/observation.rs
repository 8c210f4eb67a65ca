use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{
    NB_HOLES,
    features::{self, FEATURE_COUNT},
};

const FIELD_COUNT: usize = NB_HOLES * 2 + 2;

/// One recorded position with the move played from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Seeds in the mover's holes.
    pub player_holes: [u8; NB_HOLES],
    /// Seeds in the opponent's holes.
    pub opponent_holes: [u8; NB_HOLES],
    /// Played hole, 1-based.
    #[serde(rename = "move")]
    pub move_number: u8,
    /// Whether the mover won the game this position comes from.
    pub won: bool,
}

impl Observation {
    /// 0-based index of the played hole, or `None` if the move is out of range.
    #[must_use]
    pub fn move_index(&self) -> Option<usize> {
        let index = usize::from(self.move_number).checked_sub(1)?;
        (index < NB_HOLES).then_some(index)
    }

    #[must_use]
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        features::encode(&self.player_holes, &self.opponent_holes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ObservationParseError {
    #[display("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[display("invalid value {value:?} in field {field}")]
    InvalidNumber { field: usize, value: String },
    #[display("move {_0} is outside 1..={NB_HOLES}")]
    MoveOutOfRange(#[error(not(source))] u8),
    #[display("unknown outcome {_0:?}")]
    InvalidOutcome(#[error(not(source))] String),
}

fn parse_number(field: usize, value: &str) -> Result<u8, ObservationParseError> {
    value
        .parse()
        .map_err(|_| ObservationParseError::InvalidNumber {
            field,
            value: value.to_owned(),
        })
}

impl FromStr for Observation {
    type Err = ObservationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = s.split(',').map(str::trim).collect::<Vec<_>>();
        if fields.len() != FIELD_COUNT {
            return Err(ObservationParseError::FieldCount {
                expected: FIELD_COUNT,
                found: fields.len(),
            });
        }

        let mut player_holes = [0; NB_HOLES];
        let mut opponent_holes = [0; NB_HOLES];
        for (i, value) in fields[..NB_HOLES * 2].iter().enumerate() {
            let seeds = parse_number(i, value)?;
            if i < NB_HOLES {
                player_holes[i] = seeds;
            } else {
                opponent_holes[i - NB_HOLES] = seeds;
            }
        }

        let move_number = parse_number(NB_HOLES * 2, fields[NB_HOLES * 2])?;
        let won = match fields[NB_HOLES * 2 + 1] {
            "G" | "W" | "g" | "w" => true,
            "P" | "L" | "p" | "l" => false,
            other => return Err(ObservationParseError::InvalidOutcome(other.to_owned())),
        };

        let observation = Self {
            player_holes,
            opponent_holes,
            move_number,
            won,
        };
        if observation.move_index().is_none() {
            return Err(ObservationParseError::MoveOutOfRange(move_number));
        }
        Ok(observation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        let obs: Observation = "1,2,3,4,5,6, 7,8,9,10,11,12, 3, G".parse().unwrap();
        assert_eq!(obs.player_holes, [1, 2, 3, 4, 5, 6]);
        assert_eq!(obs.opponent_holes, [7, 8, 9, 10, 11, 12]);
        assert_eq!(obs.move_number, 3);
        assert_eq!(obs.move_index(), Some(2));
        assert!(obs.won);
        assert_eq!(obs.features()[6], 7.0);

        let obs: Observation = "0,0,0,0,0,1,1,0,0,0,0,0,6,P".parse().unwrap();
        assert!(!obs.won);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "1,2,3".parse::<Observation>(),
            Err(ObservationParseError::FieldCount {
                expected: 14,
                found: 3
            })
        );
        assert_eq!(
            "1,2,x,4,5,6,7,8,9,10,11,12,3,G".parse::<Observation>(),
            Err(ObservationParseError::InvalidNumber {
                field: 2,
                value: "x".to_owned()
            })
        );
        assert_eq!(
            "1,2,3,4,5,6,7,8,9,10,11,12,7,G".parse::<Observation>(),
            Err(ObservationParseError::MoveOutOfRange(7))
        );
        assert_eq!(
            "1,2,3,4,5,6,7,8,9,10,11,12,0,G".parse::<Observation>(),
            Err(ObservationParseError::MoveOutOfRange(0))
        );
        assert_eq!(
            "1,2,3,4,5,6,7,8,9,10,11,12,1,?".parse::<Observation>(),
            Err(ObservationParseError::InvalidOutcome("?".to_owned()))
        );
    }

    #[test]
    fn test_json_uses_move_key() {
        let obs = Observation {
            player_holes: [4; NB_HOLES],
            opponent_holes: [4; NB_HOLES],
            move_number: 1,
            won: true,
        };
        let json = serde_json::to_value(&obs).unwrap();
        assert_eq!(json["move"], 1);
        let back: Observation = serde_json::from_value(json).unwrap();
        assert_eq!(back, obs);
    }
}
