use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};

use super::HttpResponse;
use crate::error::AppError;
use crate::handlers::auth::{Credentials, LoginResponse};
use crate::models::users::UserInfo;
use crate::{AppState, handlers};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/log-in", post(log_in))
}

async fn sign_up(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<(StatusCode, Json<HttpResponse<UserInfo>>), AppError> {
    let user = handlers::auth::sign_up(state, credentials).await?;
    Ok((
        StatusCode::CREATED,
        Json(HttpResponse::new(StatusCode::CREATED, user)),
    ))
}

async fn log_in(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<HttpResponse<LoginResponse>>, AppError> {
    let response = handlers::auth::log_in(state, credentials).await?;
    Ok(Json(response.into()))
}
