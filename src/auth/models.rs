use serde::{Deserialize, Serialize};

use crate::models::UserResponse;

/// JWT token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,      // Subject (user ID)
    pub email: String,
    pub is_staff: bool,
    pub exp: usize,       // Expiration time
    pub iat: usize,       // Issued at
    pub jti: String,      // JWT ID
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: usize,
    pub user: UserResponse,
}

/// Authenticated user attached to request extensions by the JWT middleware
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub user_id: i64,
    pub email: String,
    pub is_staff: bool,
    pub jti: String,
}

impl UserSession {
    pub fn from_claims(claims: &Claims) -> Result<Self, std::num::ParseIntError> {
        Ok(Self {
            user_id: claims.sub.parse()?,
            email: claims.email.clone(),
            is_staff: claims.is_staff,
            jti: claims.jti.clone(),
        })
    }
}
