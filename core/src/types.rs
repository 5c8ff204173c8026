use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Position of a box on the shelf.
pub type BoxIndex = usize;

/// Number of boxes in every game.
pub const BOX_COUNT: usize = 3;

/// What a box holds, and also what its label claims it holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Contents {
    Apples,
    Mixed,
    Oranges,
}

impl Contents {
    /// Labels in their canonical shelf order.
    pub const ALL: [Self; BOX_COUNT] = [Self::Apples, Self::Mixed, Self::Oranges];

    pub const fn is_mixed(self) -> bool {
        matches!(self, Self::Mixed)
    }

    /// The single fruit kind a pure box holds, `None` for the mixed one.
    pub const fn pure_fruit(self) -> Option<Fruit> {
        match self {
            Self::Apples => Some(Fruit::Apple),
            Self::Mixed => None,
            Self::Oranges => Some(Fruit::Orange),
        }
    }

    pub(crate) const fn ordinal(self) -> usize {
        match self {
            Self::Apples => 0,
            Self::Mixed => 1,
            Self::Oranges => 2,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Apples => "apples",
            Self::Mixed => "mixed",
            Self::Oranges => "oranges",
        }
    }
}

impl fmt::Display for Contents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParseContentsError;

impl fmt::Display for ParseContentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected one of: apples, mixed, oranges")
    }
}

impl core::error::Error for ParseContentsError {}

impl FromStr for Contents {
    type Err = ParseContentsError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("apples") || s.eq_ignore_ascii_case("a") {
            Ok(Self::Apples)
        } else if s.eq_ignore_ascii_case("mixed") || s.eq_ignore_ascii_case("m") {
            Ok(Self::Mixed)
        } else if s.eq_ignore_ascii_case("oranges") || s.eq_ignore_ascii_case("o") {
            Ok(Self::Oranges)
        } else {
            Err(ParseContentsError)
        }
    }
}

/// A single fruit pulled out of a box.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fruit {
    Apple,
    Orange,
}

impl Fruit {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Apple => "apple",
            Self::Orange => "orange",
        }
    }
}

impl fmt::Display for Fruit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_initials() {
        assert_eq!("Apples".parse::<Contents>(), Ok(Contents::Apples));
        assert_eq!(" m ".parse::<Contents>(), Ok(Contents::Mixed));
        assert_eq!("o".parse::<Contents>(), Ok(Contents::Oranges));
        assert_eq!("pears".parse::<Contents>(), Err(ParseContentsError));
    }

    #[test]
    fn only_pure_boxes_have_a_single_fruit() {
        assert_eq!(Contents::Apples.pure_fruit(), Some(Fruit::Apple));
        assert_eq!(Contents::Mixed.pure_fruit(), None);
        assert_eq!(Contents::Oranges.pure_fruit(), Some(Fruit::Orange));
    }
}
