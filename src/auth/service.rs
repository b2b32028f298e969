use chrono::Duration;
use sqlx::SqlitePool;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::{AuthError, AuthResponse, JwtService, LoginRequest, UserSession};
use crate::models::{CreateUser, User, UserResponse};
use crate::services::UserService;

#[derive(Debug, Clone)]
pub struct AuthService {
    jwt_service: JwtService,
    users: UserService,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(db: SqlitePool, jwt_secret: &str, token_ttl: Duration, bcrypt_cost: u32) -> Self {
        Self {
            jwt_service: JwtService::new(jwt_secret, token_ttl),
            users: UserService::new(db),
            bcrypt_cost,
        }
    }

    /// Login user
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AuthError> {
        let user = self
            .users
            .get_user_by_email(&request.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&request.password, &user.password_hash)? {
            tracing::warn!(user_id = user.id, "Rejected login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self
            .jwt_service
            .create_access_token(user.id, &user.email, user.is_staff)?;

        tracing::info!(user_id = user.id, "User logged in");

        Ok(AuthResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.access_token_expires_in_seconds(),
            user: UserResponse::from(user),
        })
    }

    /// Validate a bearer token and confirm its user still exists. The staff flag is read
    /// from the database so revocations apply to tokens already issued.
    pub async fn validate_session(&self, token: &str) -> Result<UserSession, AuthError> {
        let mut session = self.jwt_service.extract_user_session(token)?;

        let user = self
            .users
            .get_user_by_id(session.user_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        session.is_staff = user.is_staff;
        session.email = user.email;
        Ok(session)
    }

    pub async fn current_user(&self, session: &UserSession) -> Result<User, AuthError> {
        self.users
            .get_user_by_id(session.user_id)
            .await?
            .ok_or(AuthError::InvalidToken)
    }

    /// Hash the password and store a new user
    pub async fn create_user(&self, form: &CreateUser) -> anyhow::Result<User> {
        let password_hash = hash_password(&form.password, self.bcrypt_cost)?;
        let user = self
            .users
            .create_user(&form.email, &password_hash, form.is_staff)
            .await?;

        Ok(user)
    }

    /// Create a staff user when the database has no users yet. On a fresh database this is
    /// user 1; ids of deleted users are never reused, so a later bootstrap gets a new id.
    pub async fn ensure_superuser(&self, email: &str, password: &str) -> anyhow::Result<Option<User>> {
        if self.users.count_users().await? > 0 {
            return Ok(None);
        }

        let form = CreateUser {
            email: email.to_string(),
            password: password.to_string(),
            is_staff: true,
        };
        form.validate()
            .map_err(|errors| anyhow::anyhow!("Invalid bootstrap admin: {}", errors))?;

        let user = self.create_user(&form).await?;
        tracing::info!(user_id = user.id, email = %user.email, "Created bootstrap staff user");
        Ok(Some(user))
    }
}
