use axum::{extract::FromRequestParts, http::header};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    dto::users::{ADMIN_ROLE, Claims},
    error::AppError,
    models::User,
    state::AppState,
};

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
    pub email: String,
    pub role: String,
}

pub fn ensure_role(user: &AuthUser, role: &str) -> Result<(), AppError> {
    if user.role != role {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, ADMIN_ROLE)
}

pub fn is_admin(user: &AuthUser) -> bool {
    user.role == ADMIN_ROLE
}

/// Account-level writes are allowed on your own account, or by an admin.
pub fn ensure_self_or_admin(user: &AuthUser, user_id: i32) -> Result<(), AppError> {
    if user.user_id == user_id || is_admin(user) {
        return Ok(());
    }
    Err(AppError::Forbidden)
}

pub fn issue_token(user: &User, secret: &SecretString, ttl_hours: i64) -> Result<String, AppError> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(ttl_hours))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        role: user.role.clone(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub fn verify_token(token: &str, secret: &SecretString) -> Result<AuthUser, AppError> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

    let user_id = decoded
        .claims
        .sub
        .parse::<i32>()
        .map_err(|_| AppError::Unauthorized("Invalid user id in token".into()))?;

    Ok(AuthUser {
        user_id,
        email: decoded.claims.email,
        role: decoded.claims.role,
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .map(str::trim)
            .ok_or_else(|| AppError::Unauthorized("Invalid Authorization scheme".into()))?;

        verify_token(token, &state.config.jwt_secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str) -> User {
        User {
            id: 12,
            name: "Ana".into(),
            email: "ana@example.com".into(),
            image: "https://img/ana.png".into(),
            role: role.into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn issued_token_round_trips_identity() {
        let secret = SecretString::from("test-secret");
        let token = issue_token(&user("admin"), &secret, 1).unwrap();
        let auth = verify_token(&token, &secret).unwrap();
        assert_eq!(auth.user_id, 12);
        assert_eq!(auth.email, "ana@example.com");
        assert!(ensure_admin(&auth).is_ok());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = issue_token(&user("user"), &SecretString::from("a"), 1).unwrap();
        assert!(matches!(
            verify_token(&token, &SecretString::from("b")),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn account_writes_need_owner_or_admin() {
        let owner = AuthUser {
            user_id: 5,
            email: "cy@example.com".into(),
            role: "user".into(),
        };
        assert!(ensure_self_or_admin(&owner, 5).is_ok());
        assert!(matches!(
            ensure_self_or_admin(&owner, 6),
            Err(AppError::Forbidden)
        ));

        let admin = AuthUser {
            role: "admin".into(),
            ..owner
        };
        assert!(ensure_self_or_admin(&admin, 6).is_ok());
    }

    #[test]
    fn non_admin_is_forbidden() {
        let auth = AuthUser {
            user_id: 1,
            email: "bo@example.com".into(),
            role: "user".into(),
        };
        assert!(matches!(ensure_admin(&auth), Err(AppError::Forbidden)));
    }
}
