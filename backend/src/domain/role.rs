//! Roles and the access guard.
//!
//! Role is a closed enumeration; the guard is a pure predicate with no I/O.
//! It fails closed: a role absent from the required set is always
//! `Forbidden`, never silently allowed.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Error, token::Claims};

/// Caller role carried in token claims.
///
/// The wire vocabulary follows the HTTP surface: `"ADMIN"` for
/// administrators and `"SETOR"` for sector-scoped users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "SETOR")]
    Sector,
}

impl Role {
    /// Wire representation of the role.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Sector => "SETOR",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Require the caller to hold one of `required` roles.
///
/// Runs after token verification and before any ledger or report access.
pub fn authorize(claims: &Claims, required: &[Role]) -> Result<(), Error> {
    if required.contains(&claims.role) {
        Ok(())
    } else {
        Err(Error::forbidden("Sem permissão"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use uuid::Uuid;

    fn claims(role: Role) -> Claims {
        Claims {
            id: Uuid::new_v4(),
            role,
            setor_id: None,
            exp: 0,
        }
    }

    #[rstest]
    #[case(Role::Admin, &[Role::Admin])]
    #[case(Role::Sector, &[Role::Sector])]
    #[case(Role::Sector, &[Role::Admin, Role::Sector])]
    fn matching_role_is_allowed(#[case] role: Role, #[case] required: &[Role]) {
        assert!(authorize(&claims(role), required).is_ok());
    }

    #[rstest]
    #[case(Role::Sector, &[Role::Admin])]
    #[case(Role::Admin, &[Role::Sector])]
    #[case(Role::Admin, &[])]
    fn missing_role_is_forbidden(#[case] role: Role, #[case] required: &[Role]) {
        let err = authorize(&claims(role), required).expect_err("fails closed");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    fn roles_use_wire_vocabulary() {
        assert_eq!(
            serde_json::to_value(Role::Sector).expect("serializable"),
            serde_json::json!("SETOR")
        );
        assert_eq!(Role::Admin.to_string(), "ADMIN");
    }
}
