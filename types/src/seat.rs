use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::MatchError;

/// One of the two sides of a match. `One` is the persisted `player_1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Seat {
    One,
    Two,
}

impl Seat {
    pub const BOTH: [Seat; 2] = [Seat::One, Seat::Two];

    pub fn other(self) -> Seat {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Seat::One => 0,
            Seat::Two => 1,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Seat::One => 1,
            Seat::Two => 2,
        }
    }
}

impl Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

impl FromStr for Seat {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Seat::One),
            "2" => Ok(Seat::Two),
            other => Err(MatchError::UnknownSeat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_seat() {
        assert_eq!(Seat::One.other(), Seat::Two);
        assert_eq!(Seat::Two.other(), Seat::One);
        assert_eq!(Seat::One.other().other(), Seat::One);
    }

    #[test]
    fn test_parse_seat() {
        assert_eq!("1".parse::<Seat>().unwrap(), Seat::One);
        assert_eq!(" 2 ".parse::<Seat>().unwrap(), Seat::Two);
        assert!("3".parse::<Seat>().is_err());
    }
}
