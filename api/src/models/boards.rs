use serde::Serialize;
use sqlx::PgConnection;
use sqlx::prelude::FromRow;
use sqlx::types::Uuid;
use sqlx::types::chrono::{DateTime, Utc};

use crate::AppState;

/// A post owning one ingested batch of food records, plus its social
/// counters.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Board {
    pub id: Uuid,
    pub author: String,
    pub good_count: i32,
    pub read_count: i32,
    pub created_at: DateTime<Utc>,
}

impl Board {
    pub async fn create(executor: &mut PgConnection, author: &str) -> sqlx::Result<Board> {
        sqlx::query_as::<_, Board>(
            r#"
            INSERT INTO boards (author)
            VALUES ($1)
            RETURNING *;
            "#,
        )
        .bind(author)
        .fetch_one(executor)
        .await
    }

    pub async fn list(state: &AppState) -> sqlx::Result<Vec<Board>> {
        sqlx::query_as::<_, Board>("SELECT * FROM boards ORDER BY created_at DESC")
            .fetch_all(&state.db)
            .await
    }

    pub async fn get(state: &AppState, id: Uuid) -> sqlx::Result<Option<Board>> {
        sqlx::query_as::<_, Board>("SELECT * FROM boards WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await
    }

    pub async fn delete(executor: &mut PgConnection, id: Uuid) -> sqlx::Result<Option<Board>> {
        sqlx::query_as::<_, Board>("DELETE FROM boards WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn press_good(state: &AppState, id: Uuid) -> sqlx::Result<Option<Board>> {
        sqlx::query_as::<_, Board>(
            "UPDATE boards SET good_count = good_count + 1 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&state.db)
        .await
    }

    /// Count a read once per reader. Membership lives in `board_readers`;
    /// the counter only moves when the insert actually inserts.
    pub async fn mark_read(
        state: &AppState,
        id: Uuid,
        username: &str,
    ) -> sqlx::Result<Option<Board>> {
        let mut tx = state.db.begin().await?;

        let board = sqlx::query_as::<_, Board>("SELECT * FROM boards WHERE id = $1")
            .bind(id)
            .fetch_optional(tx.as_mut())
            .await?;
        let Some(board) = board else {
            return Ok(None);
        };

        let inserted = sqlx::query(
            r#"
            INSERT INTO board_readers (board_id, username)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING;
            "#,
        )
        .bind(id)
        .bind(username)
        .execute(tx.as_mut())
        .await?
        .rows_affected();

        let board = if inserted == 1 {
            sqlx::query_as::<_, Board>(
                "UPDATE boards SET read_count = read_count + 1 WHERE id = $1 RETURNING *",
            )
            .bind(id)
            .fetch_one(tx.as_mut())
            .await?
        } else {
            board
        };

        tx.commit().await?;

        Ok(Some(board))
    }
}
