use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::require_text,
    error::{AppError, AppResult},
    models::User,
};

pub const DEFAULT_USER_IMAGE: &str = "https://via.placeholder.com/150";
pub const DEFAULT_ROLE: &str = "user";
pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub image: String,
    pub password: String,
    pub role: String,
}

fn check_email(email: &str) -> AppResult<()> {
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(AppError::validation("Invalid email address"));
    }
    Ok(())
}

impl CreateUserRequest {
    pub fn validate(&self) -> AppResult<NewUser> {
        const MISSING: &str = "Name, email, and password are required";
        let name = require_text(self.name.as_deref(), MISSING)?;
        let email = require_text(self.email.as_deref(), MISSING)?.to_lowercase();
        check_email(&email)?;
        let password = self
            .password
            .clone()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::validation(MISSING))?;
        let image = require_text(self.image.as_deref(), "")
            .unwrap_or_else(|_| DEFAULT_USER_IMAGE.to_string());
        // sign-up never grants privileges; roles change through an admin update
        Ok(NewUser {
            name,
            email,
            image,
            password,
            role: DEFAULT_ROLE.to_string(),
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(email) = self.email.as_deref() {
            check_email(email.trim())?;
        }
        if self.password.as_deref().is_some_and(str::is_empty) {
            return Err(AppError::validation("Password must not be empty"));
        }
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(AppError::validation("Name must not be empty"));
        }
        if self
            .role
            .as_deref()
            .is_some_and(|r| r != DEFAULT_ROLE && r != ADMIN_ROLE)
        {
            return Err(AppError::validation("Role must be user or admin"));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub exp: usize,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LinkIdentityRequest {
    pub firebase_uid: Option<String>,
}

impl LinkIdentityRequest {
    pub fn validate(&self) -> AppResult<String> {
        require_text(self.firebase_uid.as_deref(), "Firebase UID is required")
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct UserList {
    #[schema(value_type = Vec<User>)]
    pub items: Vec<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_applies_defaults() {
        let req = CreateUserRequest {
            name: Some("Ana".into()),
            email: Some("Ana@Example.com".into()),
            password: Some("secret".into()),
            ..Default::default()
        };
        let user = req.validate().unwrap();
        assert_eq!(user.email, "ana@example.com");
        assert_eq!(user.image, DEFAULT_USER_IMAGE);
        assert_eq!(user.role, DEFAULT_ROLE);
    }

    #[test]
    fn sign_up_ignores_a_requested_role() {
        let req: CreateUserRequest = serde_json::from_value(serde_json::json!({
            "name": "Eve",
            "email": "eve@example.com",
            "password": "secret",
            "role": "admin"
        }))
        .unwrap();
        assert_eq!(req.validate().unwrap().role, DEFAULT_ROLE);
    }

    #[test]
    fn role_updates_must_name_a_known_role() {
        let update = |role: &str| UpdateUserRequest {
            role: Some(role.into()),
            ..Default::default()
        };
        assert!(update(ADMIN_ROLE).validate().is_ok());
        assert!(matches!(
            update("superuser").validate(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn create_user_requires_password() {
        let req = CreateUserRequest {
            name: Some("Ana".into()),
            email: Some("ana@example.com".into()),
            ..Default::default()
        };
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let req = CreateUserRequest {
            name: Some("Ana".into()),
            email: Some("not-an-email".into()),
            password: Some("secret".into()),
            ..Default::default()
        };
        assert!(req.validate().is_err());

        let update = UpdateUserRequest {
            email: Some("@nowhere".into()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
