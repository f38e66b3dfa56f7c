use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument, warn};

use super::domain::{AdminUser, AuthSession, LoginInput, SessionClaims};
use super::errors::AuthError;
use super::repository::AuthRepository;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub session_ttl_hours: i64,
    pub password_algorithm: String,
}

impl From<&configs::AuthConfig> for AuthConfig {
    fn from(cfg: &configs::AuthConfig) -> Self {
        Self {
            jwt_secret: cfg.jwt_secret.clone(),
            session_ttl_hours: cfg.session_ttl_hours,
            password_algorithm: "argon2".into(),
        }
    }
}

/// Auth business service independent of web framework
#[derive(Clone)]
pub struct AuthService {
    repo: Arc<dyn AuthRepository>,
    cfg: AuthConfig,
}

impl AuthService {
    pub fn new(repo: Arc<dyn AuthRepository>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    pub fn session_ttl(&self) -> Duration { Duration::hours(self.cfg.session_ttl_hours) }

    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Ok(Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string())
    }

    /// Create the admin account unless one with this email already exists.
    /// Returns the new account, or `None` when it was already present.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), AuthConfig { jwt_secret: "s".into(), session_ttl_hours: 12, password_algorithm: "argon2".into() });
    /// let created = tokio_test::block_on(svc.bootstrap_admin("owner@example.com", "Secret123")).unwrap();
    /// assert!(created.is_some());
    /// let again = tokio_test::block_on(svc.bootstrap_admin("owner@example.com", "Secret123")).unwrap();
    /// assert!(again.is_none());
    /// ```
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn bootstrap_admin(&self, email: &str, password: &str) -> Result<Option<AdminUser>, AuthError> {
        let email = email.trim().to_lowercase();
        if !email.contains('@') {
            return Err(AuthError::Validation("invalid admin email".into()));
        }
        if password.len() < 8 {
            return Err(AuthError::Validation("password too short (>=8)".into()));
        }
        if let Some(existing) = self.repo.find_admin_by_email(&email).await? {
            debug!("admin exists: {}", existing.email);
            return Ok(None);
        }
        let hash = self.hash_password(password)?;
        let user = match self.repo.create_admin(&email, hash, self.cfg.password_algorithm.clone()).await {
            Ok(user) => user,
            Err(AuthError::Conflict) => {
                debug!("admin created concurrently: {}", email);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        info!(user_id = %user.id, email = %user.email, "admin_bootstrapped");
        Ok(Some(user))
    }

    /// Authenticate an admin and issue a session token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::LoginInput;
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), AuthConfig { jwt_secret: "secret".into(), session_ttl_hours: 12, password_algorithm: "argon2".into() });
    /// let _ = tokio_test::block_on(svc.bootstrap_admin("u@e.com", "Passw0rd"));
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// assert!(svc.verify_token(&session.token).is_ok());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let email = input.email.trim().to_lowercase();
        let user = self.repo
            .find_admin_by_email(&email)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let cred = self.repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            warn!("admin_login_rejected");
            return Err(AuthError::Unauthorized);
        }

        let now = Utc::now();
        let expires_at = now + self.session_ttl();
        let claims = SessionClaims { sub: user.email.clone(), uid: user.id, iat: now.timestamp(), exp: expires_at.timestamp() };
        let token = encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))?;

        if let Err(e) = self.repo.record_login(user.id).await {
            warn!(error = %e, "record_login_failed");
        }
        info!(user_id = %user.id, "admin_logged_in");
        Ok(AuthSession { user, token, expires_at })
    }

    /// Check signature and expiry of a session token.
    pub fn verify_token(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| AuthError::TokenError(e.to_string()))?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAuthRepository;

    fn svc(repo: Arc<MockAuthRepository>, secret: &str) -> AuthService {
        AuthService::new(repo, AuthConfig { jwt_secret: secret.into(), session_ttl_hours: 1, password_algorithm: "argon2".into() })
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let repo = Arc::new(MockAuthRepository::default());
        let s = svc(repo.clone(), "k");
        s.bootstrap_admin("Owner@Example.com", "Correct123").await.unwrap();
        let err = s.login(LoginInput { email: "owner@example.com".into(), password: "wrong-one".into() }).await.unwrap_err();
        assert_eq!(err.code(), 1004);
        assert_eq!(repo.login_count(), 0);
    }

    #[tokio::test]
    async fn token_round_trip_and_foreign_secret() {
        let repo = Arc::new(MockAuthRepository::default());
        let s = svc(repo.clone(), "k");
        s.bootstrap_admin("owner@example.com", "Correct123").await.unwrap();
        let session = s.login(LoginInput { email: "owner@example.com".into(), password: "Correct123".into() }).await.unwrap();
        let claims = s.verify_token(&session.token).unwrap();
        assert_eq!(claims.uid, session.user.id);
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(repo.login_count(), 1);

        let other = svc(Arc::new(MockAuthRepository::default()), "different");
        assert!(matches!(other.verify_token(&session.token), Err(AuthError::TokenError(_))));
    }

    #[tokio::test]
    async fn bootstrap_validates_input() {
        let s = svc(Arc::new(MockAuthRepository::default()), "k");
        assert!(matches!(s.bootstrap_admin("nobody", "Correct123").await, Err(AuthError::Validation(_))));
        assert!(matches!(s.bootstrap_admin("a@b.c", "short").await, Err(AuthError::Validation(_))));
    }

    #[tokio::test]
    async fn repository_reports_duplicates_and_unknown_users() {
        let repo = MockAuthRepository::default();
        repo.create_admin("a@b.c", "h".into(), "argon2".into()).await.unwrap();
        let dup = repo.create_admin("a@b.c", "h".into(), "argon2".into()).await.unwrap_err();
        assert_eq!(dup.code(), 1002);
        let missing = repo.record_login(uuid::Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(missing, AuthError::NotFound));
    }
}
