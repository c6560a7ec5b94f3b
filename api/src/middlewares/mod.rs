use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::AppState;
use crate::error::AppError;
use crate::models::users::User;

#[tracing::instrument(skip_all)]
pub async fn attach_user(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("missing bearer token".into()))?;

    let claims = state
        .tokens
        .verify(token)
        .map_err(|_| AppError::Unauthorized("invalid or expired token".into()))?;

    let user = User::get(&state, claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("user no longer exists".into()))?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
