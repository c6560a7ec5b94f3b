use axum::body::Bytes;
use chrono::NaiveDate;
use food_habit::models::food_records::FoodRecord;
use food_habit::{CategoryTally, UnclassifiedFood, analyze, ingest, read_batch};
use serde::Serialize;
use sqlx::types::Uuid;

use crate::AppState;
use crate::error::AppError;
use crate::models::boards::Board;
use crate::models::users::User;

#[derive(Debug, Serialize)]
pub struct UploadReceipt {
    pub board: Board,
    pub ingested: usize,
    pub warnings: Vec<UnclassifiedFood>,
}

#[derive(Debug, Serialize)]
pub struct WeightPoint {
    pub date: Option<NaiveDate>,
    pub weight: f64,
}

/// Everything the client-side chart needs for one board: the weight series
/// for the trend panel, the tally for the balance panel, and the advice line.
#[derive(Debug, Serialize)]
pub struct HabitReport {
    pub series: Vec<WeightPoint>,
    pub tally: CategoryTally,
    pub advice: String,
}

/// Create a board for the uploaded CSV and ingest its records, all within
/// one transaction so a failed batch leaves nothing behind.
#[tracing::instrument(skip_all, fields(author = %user.username))]
pub async fn create_board(state: AppState, user: User, csv: Bytes) -> Result<UploadReceipt, AppError> {
    let batch = read_batch(csv.as_ref())?;

    let mut tx = state.db.begin().await?;

    let board = Board::create(tx.as_mut(), &user.username).await?;
    let outcome = ingest(&state.classifier, &batch, board.id)?;
    FoodRecord::bulk_insert(tx.as_mut(), &outcome.records).await?;

    tx.commit().await?;

    tracing::info!(
        board_id = %board.id,
        ingested = outcome.records.len(),
        unclassified = outcome.warnings.len(),
        "batch ingested"
    );

    Ok(UploadReceipt {
        board,
        ingested: outcome.records.len(),
        warnings: outcome.warnings,
    })
}

#[tracing::instrument(skip_all, fields(%board_id))]
pub async fn delete_board(state: AppState, board_id: Uuid) -> Result<Board, AppError> {
    let mut tx = state.db.begin().await?;

    let records_deleted = FoodRecord::delete_for_board(tx.as_mut(), board_id).await?;
    let Some(board) = Board::delete(tx.as_mut(), board_id).await? else {
        return Err(AppError::NotFound(format!("no board with id {board_id}")));
    };

    tx.commit().await?;

    tracing::info!(records_deleted, "board deleted");
    Ok(board)
}

#[tracing::instrument(skip_all, fields(%board_id))]
pub async fn habit_report(state: AppState, board_id: Uuid) -> Result<HabitReport, AppError> {
    if Board::get(&state, board_id).await?.is_none() {
        return Err(AppError::NotFound(format!("no board with id {board_id}")));
    }

    let mut conn = state.db.acquire().await?;
    let records = FoodRecord::get_for_board(conn.as_mut(), board_id).await?;

    let report = analyze(records.iter().map(|record| record.food_category));
    let series = records
        .iter()
        .map(|record| WeightPoint {
            date: record.date,
            weight: record.weight,
        })
        .collect();

    Ok(HabitReport {
        series,
        tally: report.tally,
        advice: report.advice.to_string(),
    })
}
