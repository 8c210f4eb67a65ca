//! Feature encoding shared by live boards and historical observations.

use super::board::NB_HOLES;

/// Number of features: the mover's holes followed by the opponent's holes.
pub const FEATURE_COUNT: usize = NB_HOLES * 2;

/// Encodes seed counts as the evaluator input vector.
///
/// Own holes come first, then the opponent's, each in hole order.
#[must_use]
pub fn encode(player_holes: &[u8; NB_HOLES], opponent_holes: &[u8; NB_HOLES]) -> [f64; FEATURE_COUNT] {
    let mut features = [0.0; FEATURE_COUNT];
    for (i, seeds) in player_holes.iter().chain(opponent_holes).enumerate() {
        features[i] = f64::from(*seeds);
    }
    features
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_own_holes_come_first() {
        let features = encode(&[1, 2, 3, 4, 5, 6], &[7, 8, 9, 10, 11, 12]);
        assert_eq!(features[0], 1.0);
        assert_eq!(features[5], 6.0);
        assert_eq!(features[6], 7.0);
        assert_eq!(features[11], 12.0);
    }
}
