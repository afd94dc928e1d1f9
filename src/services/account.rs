use sea_orm::ConnectionTrait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    config::jwt::JWTConfig,
    entity::user,
    error::{AppError, AppResult},
    repositories,
    utils::{
        jwt::{self, UserClaims},
        password::{check_password_rule, hash_password, verify_password},
        validate::{check, max_len, FieldKind},
    },
};

const NAME_MAX_LEN: usize = 50;
const EMAIL_MAX_LEN: usize = 320;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

fn check_name(name: &str) -> AppResult<()> {
    check("name", FieldKind::NonEmptyString(name))?;
    max_len("name", name.trim(), NAME_MAX_LEN)
}

pub fn issue_tokens(config: &JWTConfig, user: &user::Model) -> AppResult<TokenPair> {
    let (access_token, refresh_token) = jwt::generate_token_pair(config, user.id, user.role)
        .map_err(|e| AppError::Internal(format!("failed to encode token: {e}")))?;
    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}

/// Registers a `USER`. Emails are compared after trimming and lower casing.
pub async fn signup<C: ConnectionTrait>(
    db: &C,
    bcrypt_cost: u32,
    name: &str,
    email: &str,
    password: &str,
) -> AppResult<user::Model> {
    check_name(name)?;
    check("email", FieldKind::Email(email))?;
    max_len("email", email.trim(), EMAIL_MAX_LEN)?;
    check_password_rule(password)?;

    let email = email.trim().to_lowercase();
    if repositories::user::exist_by_email(db, &email).await? {
        return Err(AppError::conflict("email already registered"));
    }

    let hashed = hash_password(password, bcrypt_cost)?;
    let user = repositories::user::save(db, name.trim(), &email, &hashed).await?;
    info!("user {} signed up", user.id);
    Ok(user)
}

/// Checks the credentials and returns the matching user. An unknown email and
/// a wrong password produce the same error.
pub async fn login<C: ConnectionTrait>(
    db: &C,
    email: &str,
    password: &str,
) -> AppResult<user::Model> {
    check("email", FieldKind::Email(email))?;
    check("password", FieldKind::NonEmptyString(password))?;

    let rejected = || AppError::validation("wrong email or password");
    let user = repositories::user::find_by_email(db, &email.trim().to_lowercase())
        .await?
        .ok_or_else(rejected)?;
    if !verify_password(password, &user.password)? {
        warn!("failed login for user {}", user.id);
        return Err(rejected());
    }
    Ok(user)
}

/// Exchanges a refresh token for a new pair. The role in the new tokens is
/// read from the store, so a promotion shows up after one refresh.
pub async fn refresh<C: ConnectionTrait>(
    db: &C,
    config: &JWTConfig,
    refresh_token: &str,
) -> AppResult<(user::Model, TokenPair)> {
    let claims = UserClaims::decode(refresh_token, &config.refresh_token_secret)
        .map_err(|e| jwt::token_error(&e))?
        .claims;
    let user = repositories::user::find_by_id(db, claims.uid)
        .await?
        .ok_or_else(|| AppError::unauthorized("invalid token"))?;
    let tokens = issue_tokens(config, &user)?;
    Ok((user, tokens))
}

pub async fn rename<C: ConnectionTrait>(
    db: &C,
    user: user::Model,
    name: &str,
) -> AppResult<user::Model> {
    check_name(name)?;
    let name = name.trim();
    if user.name == name {
        return Err(AppError::validation("name is unchanged"));
    }
    Ok(repositories::user::update_name(db, user, name).await?)
}

pub struct PasswordChange<'a> {
    pub password: &'a str,
    pub new_password: &'a str,
    pub confirm_new_password: &'a str,
}

pub async fn change_password<C: ConnectionTrait>(
    db: &C,
    bcrypt_cost: u32,
    user_id: Uuid,
    change: PasswordChange<'_>,
) -> AppResult<()> {
    check_password_rule(change.new_password)?;
    if change.new_password == change.password {
        return Err(AppError::validation(
            "new password must differ from the current one",
        ));
    }
    if change.new_password != change.confirm_new_password {
        return Err(AppError::validation("password confirmation does not match"));
    }

    let user = repositories::user::find_by_id(db, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("user not found"))?;
    if !verify_password(change.password, &user.password)? {
        return Err(AppError::validation("current password is incorrect"));
    }

    let hashed = hash_password(change.new_password, bcrypt_cost)?;
    repositories::user::update_password(db, user, &hashed).await?;
    info!("user {} changed password", user_id);
    Ok(())
}
