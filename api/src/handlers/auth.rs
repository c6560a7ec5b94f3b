use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppState;
use crate::error::AppError;
use crate::models::users::{User, UserInfo};

#[derive(Debug, Deserialize, Validate)]
pub struct Credentials {
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    // bcrypt only reads the first 72 bytes of a password
    #[validate(length(min = 8, max = 72))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

#[tracing::instrument(skip_all, fields(username = %credentials.username))]
pub async fn sign_up(state: AppState, credentials: Credentials) -> Result<UserInfo, AppError> {
    credentials
        .validate()
        .map_err(|err| AppError::BadRequest(err.to_string()))?;

    if User::find_by_username(&state, &credentials.username)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "this username is already registered".into(),
        ));
    }

    let password_hash = bcrypt::hash(&credentials.password, bcrypt::DEFAULT_COST)
        .map_err(|err| AppError::ServerError(err.to_string()))?;

    let user = User::create(&state, &credentials.username, &password_hash).await?;
    tracing::info!(user_id = %user.id, "user registered");

    Ok(user.into())
}

#[tracing::instrument(skip_all, fields(username = %credentials.username))]
pub async fn log_in(state: AppState, credentials: Credentials) -> Result<LoginResponse, AppError> {
    let Some(user) = User::find_by_username(&state, &credentials.username).await? else {
        return Err(AppError::Unauthorized(
            "unknown username or wrong password".into(),
        ));
    };

    let password = credentials.password;
    let password_hash = user.password_hash.clone();
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
        .await
        .map_err(|err| AppError::ServerError(err.to_string()))?
        .map_err(|err| AppError::ServerError(err.to_string()))?;

    if !verified {
        return Err(AppError::Unauthorized(
            "unknown username or wrong password".into(),
        ));
    }

    let token = state
        .tokens
        .issue(&user)
        .map_err(|err| AppError::ServerError(err.to_string()))?;

    Ok(LoginResponse {
        token,
        user: user.into(),
    })
}
