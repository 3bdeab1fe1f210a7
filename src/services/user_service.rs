use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait};

use crate::{
    dto::users::{
        CreateUserRequest, LinkIdentityRequest, LoginRequest, LoginResponse, UpdateUserRequest,
        UserList,
    },
    entity::{
        reviews::{Column as ReviewCol, Entity as Reviews},
        user_mapping::{ActiveModel as MappingActive, Column as MappingCol, Entity as UserMapping},
        users::{Column as UserCol, Entity as Users},
    },
    error::{AppError, AppResult, is_unique_violation},
    middleware::auth::{AuthUser, ensure_admin, ensure_self_or_admin, is_admin, issue_token},
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
};

const USER_COLUMNS: &str = "id, name, email, image, role, created_at";

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

fn email_taken(err: sqlx::Error) -> AppError {
    if is_unique_violation(&err) {
        AppError::Conflict("Email is already taken".into())
    } else {
        err.into()
    }
}

pub async fn create_user(
    state: &AppState,
    payload: CreateUserRequest,
) -> AppResult<ApiResponse<User>> {
    let new_user = payload.validate()?;
    let password_hash = hash_password(&new_user.password)?;

    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (name, email, image, password_hash, role) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {USER_COLUMNS}"
    ))
    .bind(&new_user.name)
    .bind(&new_user.email)
    .bind(&new_user.image)
    .bind(password_hash)
    .bind(&new_user.role)
    .fetch_one(&state.pool)
    .await
    .map_err(email_taken)?;

    tracing::info!(user_id = user.id, "user created");
    Ok(ApiResponse::success("User created", user, None))
}

pub async fn list_users(state: &AppState, admin: &AuthUser) -> AppResult<ApiResponse<UserList>> {
    ensure_admin(admin)?;

    let items: Vec<User> = Users::find()
        .order_by_desc(UserCol::CreatedAt)
        .order_by_desc(UserCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(User::from)
        .collect();

    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success("Users", UserList { items }, Some(meta)))
}

pub async fn get_user(state: &AppState, id: i32) -> AppResult<ApiResponse<User>> {
    let user = Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(User::from)
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(ApiResponse::success("User", user, None))
}

pub async fn get_user_by_email(state: &AppState, email: &str) -> AppResult<ApiResponse<User>> {
    let user = Users::find()
        .filter(UserCol::Email.eq(email.trim().to_lowercase()))
        .one(&state.orm)
        .await?
        .map(User::from)
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(ApiResponse::success("User", user, None))
}

/// Partial update of an account. Users may edit themselves; only an admin may
/// edit others or change a role.
pub async fn update_user(
    state: &AppState,
    caller: &AuthUser,
    id: i32,
    payload: UpdateUserRequest,
) -> AppResult<ApiResponse<User>> {
    ensure_self_or_admin(caller, id)?;
    payload.validate()?;
    if payload.role.is_some() && !is_admin(caller) {
        return Err(AppError::Forbidden);
    }

    let current = Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let name = payload
        .name
        .map(|n| n.trim().to_string())
        .unwrap_or(current.name);
    let email = payload
        .email
        .map(|e| e.trim().to_lowercase())
        .unwrap_or(current.email);
    let image = payload.image.unwrap_or(current.image);
    let role = payload.role.unwrap_or(current.role);
    let password_hash = match payload.password {
        Some(password) => hash_password(&password)?,
        None => current.password_hash,
    };

    let user = sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET name = $2, email = $3, image = $4, password_hash = $5, role = $6 \
         WHERE id = $1 RETURNING {USER_COLUMNS}"
    ))
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(image)
    .bind(password_hash)
    .bind(role)
    .fetch_optional(&state.pool)
    .await
    .map_err(email_taken)?
    .ok_or_else(|| AppError::not_found("User not found"))?;

    tracing::info!(user_id = user.id, caller_id = caller.user_id, "user updated");
    Ok(ApiResponse::success("User updated", user, None))
}

/// Remove a user. Cart lines, orders and identity links go with the FK
/// cascades; reviews are keyed by e-mail and are removed explicitly.
pub async fn delete_user(
    state: &AppState,
    caller: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<User>> {
    ensure_self_or_admin(caller, id)?;

    let txn = state.orm.begin().await?;

    let user = Users::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Reviews::delete_many()
        .filter(ReviewCol::UserEmail.eq(user.email.as_str()))
        .exec(&txn)
        .await?;
    Users::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(user_id = id, caller_id = caller.user_id, "user deleted");
    Ok(ApiResponse::success("User deleted", User::from(user), None))
}

pub async fn login(state: &AppState, payload: LoginRequest) -> AppResult<ApiResponse<LoginResponse>> {
    const INVALID: &str = "Invalid email or password";
    let email = payload
        .email
        .as_deref()
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::validation("Email and password are required"))?;
    let password = payload
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::validation("Email and password are required"))?;

    let user = Users::find()
        .filter(UserCol::Email.eq(email))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::Unauthorized(INVALID.into()))?;

    if !verify_password(&password, &user.password_hash)? {
        return Err(AppError::Unauthorized(INVALID.into()));
    }

    let user = User::from(user);
    let token = issue_token(&user, &state.config.jwt_secret, state.config.jwt_ttl_hours)?;

    tracing::info!(user_id = user.id, "user logged in");
    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse {
            token: format!("Bearer {token}"),
            user,
        },
        Some(Meta::empty()),
    ))
}

/// Point an identity-provider uid at a local user, replacing any earlier link.
pub async fn link_identity(
    state: &AppState,
    caller: &AuthUser,
    user_id: i32,
    payload: LinkIdentityRequest,
) -> AppResult<ApiResponse<User>> {
    ensure_self_or_admin(caller, user_id)?;
    let firebase_uid = payload.validate()?;

    let user = Users::find_by_id(user_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    UserMapping::insert(MappingActive {
        firebase_uid: Set(firebase_uid),
        database_user_id: Set(user_id),
        created_at: NotSet,
    })
    .on_conflict(
        OnConflict::column(MappingCol::FirebaseUid)
            .update_column(MappingCol::DatabaseUserId)
            .to_owned(),
    )
    .exec_without_returning(&state.orm)
    .await?;

    tracing::info!(user_id, "identity linked");
    Ok(ApiResponse::success("Identity linked", User::from(user), None))
}

pub async fn resolve_identity(state: &AppState, firebase_uid: &str) -> AppResult<ApiResponse<User>> {
    let found = UserMapping::find_by_id(firebase_uid.to_string())
        .find_also_related(Users)
        .one(&state.orm)
        .await?;

    match found {
        Some((_, Some(user))) => Ok(ApiResponse::success("User", User::from(user), None)),
        _ => Err(AppError::not_found("User not found")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_password_verifies_and_is_not_plaintext() {
        let hash = hash_password("hunter2").unwrap();
        assert_ne!(hash, "hunter2");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter2", &hash).unwrap());
        assert!(!verify_password("hunter3", &hash).unwrap());
    }
}
