use std::fmt;
use std::str::FromStr;

use crate::error::InvalidDirectionError;

/// Ordering mode for a sorter. Fixed for the lifetime of a sorter instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[cfg_attr(feature = "serde", serde(rename = "ASC"))]
    Ascending,
    #[cfg_attr(feature = "serde", serde(rename = "DESC"))]
    Descending,
}

impl Direction {
    pub const ASC: &'static str = "ASC";
    pub const DESC: &'static str = "DESC";

    /// Strict token parsing: only `ASC` and `DESC` are recognised.
    pub fn parse(token: &str) -> Result<Self, InvalidDirectionError> {
        match token {
            Self::ASC => Ok(Direction::Ascending),
            Self::DESC => Ok(Direction::Descending),
            other => Err(InvalidDirectionError::new(other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ascending => Self::ASC,
            Direction::Descending => Self::DESC,
        }
    }
}

impl FromStr for Direction {
    type Err = InvalidDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Direction {
    type Error = InvalidDirectionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_tokens() {
        assert_eq!(Direction::parse("ASC"), Ok(Direction::Ascending));
        assert_eq!("DESC".parse::<Direction>(), Ok(Direction::Descending));
    }

    #[test]
    fn rejects_unrecognised_tokens() {
        for token in ["UP", "asc", "Desc", "", " ASC", "1", "-1", "Ascending"] {
            let err = Direction::parse(token).unwrap_err();
            assert_eq!(err.token(), token);
        }
    }

    #[test]
    fn display_round_trips_through_parse() {
        for direction in [Direction::Ascending, Direction::Descending] {
            assert_eq!(Direction::parse(&direction.to_string()), Ok(direction));
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_strict_tokens() {
        let json = serde_json::to_string(&Direction::Descending).unwrap();
        assert_eq!(json, "\"DESC\"");
        assert!(serde_json::from_str::<Direction>("\"desc\"").is_err());
    }
}
