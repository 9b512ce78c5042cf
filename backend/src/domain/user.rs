//! User identity.

use serde::Serialize;
use uuid::Uuid;

use super::Role;

/// Provisioned user account.
///
/// ## Invariants
/// - `role` is fixed per session; claims derived at login carry it verbatim.
/// - A [`Role::Sector`] user is scoped to exactly one sector; a
///   [`Role::Admin`] user has no sector and may read everything.
/// - `senha_hash` is a PHC string and never crosses the store boundary; the
///   public profile view omits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub senha_hash: String,
    pub role: Role,
    pub setor_id: Option<Uuid>,
}

impl User {
    /// Public view of the account, safe to return to clients.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            nome: self.nome.clone(),
            email: self.email.clone(),
            role: self.role,
            setor_id: self.setor_id,
        }
    }
}

/// User fields exposed on the login response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct UserProfile {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub role: Role,
    pub setor_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_never_exposes_the_credential_hash() {
        let user = User {
            id: Uuid::new_v4(),
            nome: "Admin".into(),
            email: "admin@empresa.com".into(),
            senha_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".into(),
            role: Role::Admin,
            setor_id: None,
        };

        let value = serde_json::to_value(user.profile()).expect("serializable");
        let object = value.as_object().expect("object");
        assert!(!object.contains_key("senha_hash"));
        assert_eq!(object["email"], "admin@empresa.com");
        assert_eq!(object["role"], "ADMIN");
    }
}
