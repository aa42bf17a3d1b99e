use serde::{Deserialize, Serialize};

/// How well an AI contestant plays.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Low,
    Medium,
    High,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Low, Difficulty::Medium, Difficulty::High];

    /// Probability of playing the searched move instead of a random legal one.
    ///
    /// A value of 1 or more means the searched move is always played.
    pub fn smartness(self) -> f64 {
        match self {
            Difficulty::Low => 0.0,
            Difficulty::Medium => 0.5,
            Difficulty::High => 1.0,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Low => write!(f, "low"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::High => write!(f, "high"),
        }
    }
}

/// How many plies to search, given the number of pieces left in the pool.
///
/// The branching factor shrinks quickly towards the end of the game, so the
/// search gets deeper as the pool empties.
pub fn search_depth(pool_len: u32) -> u8 {
    match pool_len {
        12.. => 1,
        9..=11 => 2,
        6..=8 => 3,
        _ => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_grows_as_pool_shrinks() {
        assert_eq!(search_depth(16), 1);
        assert_eq!(search_depth(12), 1);
        assert_eq!(search_depth(11), 2);
        assert_eq!(search_depth(9), 2);
        assert_eq!(search_depth(8), 3);
        assert_eq!(search_depth(6), 3);
        assert_eq!(search_depth(5), 4);
        assert_eq!(search_depth(2), 4);
        assert_eq!(search_depth(0), 4);
    }

    #[test]
    fn smartness_per_tier() {
        assert_eq!(Difficulty::Low.smartness(), 0.0);
        assert_eq!(Difficulty::Medium.smartness(), 0.5);
        assert!(Difficulty::High.smartness() >= 1.0);
    }
}
