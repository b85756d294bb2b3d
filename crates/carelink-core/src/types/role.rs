//! Platform roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Role a user holds on the coordination platform.
///
/// The role is bound into a session at issuance and embedded in every
/// access credential minted for that session; it does not change for the
/// lifetime of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// An elderly user receiving care coordination.
    Elderly,
    /// A guardian responsible for one or more elderly users.
    Guardian,
    /// A counselor providing welfare services.
    Counselor,
    /// A platform administrator.
    Admin,
}

impl Role {
    /// Whether this role grants access to administrative endpoints.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Elderly => write!(f, "elderly"),
            Self::Guardian => write!(f, "guardian"),
            Self::Counselor => write!(f, "counselor"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "elderly" => Ok(Self::Elderly),
            "guardian" => Ok(Self::Guardian),
            "counselor" => Ok(Self::Counselor),
            "admin" => Ok(Self::Admin),
            other => Err(AppError::validation(format!("unknown role: '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_parse_roundtrip() {
        for role in [Role::Elderly, Role::Guardian, Role::Counselor, Role::Admin] {
            let parsed: Role = role.to_string().parse().expect("should parse");
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Guardian.is_admin());
    }
}
