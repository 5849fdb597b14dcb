//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the inspection hierarchy.
///
/// Roles form a total order by privilege:
/// Supervisor < Starosta < Dgis < Chairman.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Floor supervisor — the least privileged role.
    Supervisor,
    /// Building starosta, coordinates supervisors.
    Starosta,
    /// Dormitory inspection staff.
    Dgis,
    /// Chairman — full administrative privileges.
    Chairman,
}

impl UserRole {
    /// Return the privilege rank (higher = more privileged).
    pub fn rank(&self) -> u8 {
        match self {
            Self::Supervisor => 1,
            Self::Starosta => 2,
            Self::Dgis => 3,
            Self::Chairman => 4,
        }
    }

    /// Check if this role strictly outranks the given role.
    pub fn has_higher_role(&self, other: &UserRole) -> bool {
        self.rank() > other.rank()
    }

    /// Check if this role has at least the given role's privileges.
    pub fn has_equal_or_higher_role(&self, other: &UserRole) -> bool {
        self.rank() >= other.rank()
    }

    /// Check if this role is the chairman.
    pub fn is_chairman(&self) -> bool {
        matches!(self, Self::Chairman)
    }

    /// Check if this role may administrate users (Dgis or above).
    pub fn is_dgis_or_above(&self) -> bool {
        self.has_equal_or_higher_role(&Self::Dgis)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Supervisor => "supervisor",
            Self::Starosta => "starosta",
            Self::Dgis => "dgis",
            Self::Chairman => "chairman",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = dormwatch_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "supervisor" => Ok(Self::Supervisor),
            "starosta" => Ok(Self::Starosta),
            "dgis" => Ok(Self::Dgis),
            "chairman" => Ok(Self::Chairman),
            _ => Err(dormwatch_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: supervisor, starosta, dgis, chairman"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [UserRole; 4] = [
        UserRole::Supervisor,
        UserRole::Starosta,
        UserRole::Dgis,
        UserRole::Chairman,
    ];

    #[test]
    fn test_privilege_ordering() {
        assert!(UserRole::Chairman.has_higher_role(&UserRole::Supervisor));
        assert!(UserRole::Dgis.has_higher_role(&UserRole::Starosta));
        assert!(!UserRole::Supervisor.has_higher_role(&UserRole::Supervisor));
        assert!(UserRole::Starosta.has_equal_or_higher_role(&UserRole::Starosta));
    }

    #[test]
    fn test_higher_role_is_antisymmetric() {
        for a in ALL {
            for b in ALL {
                if a.has_higher_role(&b) {
                    assert!(!b.has_higher_role(&a), "{a} vs {b}");
                }
            }
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("chairman".parse::<UserRole>().unwrap(), UserRole::Chairman);
        assert_eq!("STAROSTA".parse::<UserRole>().unwrap(), UserRole::Starosta);
        assert!("janitor".parse::<UserRole>().is_err());
    }
}
