//! Report rating value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A two-valued rating given to a weekly report.
///
/// The supervisor and chairman ratings are independent fields of the
/// same type; anything other than "good" or "bad" is rejected at the
/// parse boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "rating", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    /// Positive rating.
    Good,
    /// Negative rating.
    Bad,
}

impl Rating {
    /// Return the rating as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Bad => "bad",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Rating {
    type Err = dormwatch_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "good" => Ok(Self::Good),
            "bad" => Ok(Self::Bad),
            _ => Err(dormwatch_core::AppError::validation(format!(
                "Invalid rating value: '{s}', must be 'good' or 'bad'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_good_and_bad_parse() {
        assert_eq!("good".parse::<Rating>().unwrap(), Rating::Good);
        assert_eq!("BAD".parse::<Rating>().unwrap(), Rating::Bad);
        assert!("excellent".parse::<Rating>().is_err());
        assert!("".parse::<Rating>().is_err());
    }
}
