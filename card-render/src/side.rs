//! The two faces of a card.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Front,
    Back,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Front => Side::Back,
            Side::Back => Side::Front,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Front => "front",
            Side::Back => "back",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    /// Accepts `front`/`back` and the `question`/`answer` aliases, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "front" | "question" | "q" => Ok(Side::Front),
            "back" | "answer" | "a" => Ok(Side::Back),
            other => Err(format!("unknown side '{other}' (expected 'front' or 'back')")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("front".parse::<Side>(), Ok(Side::Front));
        assert_eq!("Answer".parse::<Side>(), Ok(Side::Back));
        assert_eq!("q".parse::<Side>(), Ok(Side::Front));
        assert!("middle".parse::<Side>().is_err());
    }

    #[test]
    fn opposite_flips() {
        assert_eq!(Side::Front.opposite(), Side::Back);
        assert_eq!(Side::Back.opposite(), Side::Front);
        assert_eq!(Side::Back.to_string(), "back");
    }
}
