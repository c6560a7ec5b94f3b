use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use sqlx::types::Uuid;

use super::HttpResponse;
use crate::error::AppError;
use crate::handlers::boards::{HabitReport, UploadReceipt};
use crate::models::boards::Board;
use crate::models::users::User;
use crate::{AppState, handlers};

pub fn board_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_boards).post(create_board))
        .route("/{id}", get(board_detail).delete(delete_board))
        .route("/{id}/good", post(press_good))
        .route("/{id}/read", post(press_read))
        .route("/{id}/habit", get(habit_report))
}

async fn list_boards(
    State(state): State<AppState>,
    Extension(_user): Extension<User>,
) -> Result<Json<HttpResponse<Vec<Board>>>, AppError> {
    let boards = Board::list(&state).await?;
    Ok(Json(boards.into()))
}

async fn create_board(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    body: Bytes,
) -> Result<(StatusCode, Json<HttpResponse<UploadReceipt>>), AppError> {
    let receipt = handlers::boards::create_board(state, user, body).await?;
    Ok((
        StatusCode::CREATED,
        Json(HttpResponse::new(StatusCode::CREATED, receipt)),
    ))
}

async fn board_detail(
    State(state): State<AppState>,
    Extension(_user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<HttpResponse<Board>>, AppError> {
    let board = Board::get(&state, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no board with id {id}")))?;
    Ok(Json(board.into()))
}

async fn delete_board(
    State(state): State<AppState>,
    Extension(_user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<HttpResponse<Board>>, AppError> {
    let board = handlers::boards::delete_board(state, id).await?;
    Ok(Json(board.into()))
}

async fn press_good(
    State(state): State<AppState>,
    Extension(_user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<HttpResponse<Board>>, AppError> {
    let board = Board::press_good(&state, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no board with id {id}")))?;
    Ok(Json(board.into()))
}

async fn press_read(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<HttpResponse<Board>>, AppError> {
    let board = Board::mark_read(&state, id, &user.username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no board with id {id}")))?;
    Ok(Json(board.into()))
}

async fn habit_report(
    State(state): State<AppState>,
    Extension(_user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<HttpResponse<HabitReport>>, AppError> {
    let report = handlers::boards::habit_report(state, id).await?;
    Ok(Json(report.into()))
}
