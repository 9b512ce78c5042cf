//! Login flow: credential check and token issuance.

use std::sync::Arc;

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use tracing::debug;

use super::auth::LoginCredentials;
use super::ports::UserRepository;
use super::token::TokenService;
use super::user::UserProfile;
use super::Error;

const INVALID_CREDENTIALS: &str = "Credenciais inválidas";

/// Successful login payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub token: String,
    pub user: UserProfile,
}

/// Authenticates credentials against the store and issues bearer tokens.
#[derive(Clone)]
pub struct LoginService {
    users: Arc<dyn UserRepository>,
    tokens: TokenService,
}

impl LoginService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    /// Verify the password against the stored hash and issue a token.
    ///
    /// Unknown email and wrong password answer with the same message so the
    /// response does not reveal which part failed.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error> {
        let user = self
            .users
            .find_by_email(credentials.email())
            .await?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;

        let parsed = PasswordHash::new(&user.senha_hash).map_err(|error| {
            // A stored hash that does not parse is a provisioning defect.
            Error::internal(format!("stored credential hash is invalid: {error}"))
        })?;
        Argon2::default()
            .verify_password(credentials.senha().as_bytes(), &parsed)
            .map_err(|_| Error::unauthorized(INVALID_CREDENTIALS))?;

        debug!(user = %user.id, role = %user.role, "login accepted");
        Ok(LoginOutcome {
            token: self.tokens.issue(&user),
            user: user.profile(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::StoreError;
    use crate::domain::{ErrorCode, Role};
    use argon2::password_hash::{PasswordHasher, SaltString, rand_core::OsRng};
    use async_trait::async_trait;
    use rstest::rstest;
    use uuid::Uuid;

    struct SingleUserRepository {
        user: Option<crate::domain::user::User>,
        fail: bool,
    }

    #[async_trait]
    impl UserRepository for SingleUserRepository {
        async fn find_by_email(
            &self,
            email: &str,
        ) -> Result<Option<crate::domain::user::User>, StoreError> {
            if self.fail {
                return Err(StoreError::connection("store offline"));
            }
            Ok(self.user.clone().filter(|user| user.email == email))
        }
    }

    fn hash(senha: &str) -> String {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(senha.as_bytes(), &salt)
            .expect("hashable")
            .to_string()
    }

    fn stored_user(senha: &str) -> crate::domain::user::User {
        crate::domain::user::User {
            id: Uuid::new_v4(),
            nome: "João Logística".into(),
            email: "joao@empresa.com".into(),
            senha_hash: hash(senha),
            role: Role::Sector,
            setor_id: Some(Uuid::new_v4()),
        }
    }

    fn service(repository: SingleUserRepository) -> LoginService {
        LoginService::new(
            Arc::new(repository),
            TokenService::with_default_ttl(b"test-secret".to_vec()),
        )
    }

    fn credentials(email: &str, senha: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts(email, senha).expect("valid shape")
    }

    #[rstest]
    #[tokio::test]
    async fn valid_credentials_issue_a_verifiable_token() {
        let user = stored_user("123456");
        let expected_sector = user.setor_id;
        let service = service(SingleUserRepository {
            user: Some(user),
            fail: false,
        });

        let outcome = service
            .login(&credentials("joao@empresa.com", "123456"))
            .await
            .expect("login succeeds");

        assert_eq!(outcome.user.email, "joao@empresa.com");
        assert_eq!(outcome.user.setor_id, expected_sector);
        let verifier = TokenService::with_default_ttl(b"test-secret".to_vec());
        let claims = verifier.verify(&outcome.token).expect("token verifies");
        assert_eq!(claims.id, outcome.user.id);
        assert_eq!(claims.setor_id, expected_sector);
    }

    #[rstest]
    #[case("joao@empresa.com", "wrong-password")]
    #[case("nobody@empresa.com", "123456")]
    #[tokio::test]
    async fn unknown_email_and_bad_password_are_indistinguishable(
        #[case] email: &str,
        #[case] senha: &str,
    ) {
        let service = service(SingleUserRepository {
            user: Some(stored_user("123456")),
            fail: false,
        });

        let err = service
            .login(&credentials(email, senha))
            .await
            .expect_err("must be rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), INVALID_CREDENTIALS);
    }

    #[rstest]
    #[tokio::test]
    async fn store_failure_is_not_an_authentication_failure() {
        let service = service(SingleUserRepository {
            user: None,
            fail: true,
        });

        let err = service
            .login(&credentials("joao@empresa.com", "123456"))
            .await
            .expect_err("store offline");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
