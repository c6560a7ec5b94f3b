use chrono::NaiveDate;
use sqlx::PgConnection;
use sqlx::prelude::FromRow;
use sqlx::types::Uuid;
use sqlx::types::chrono::{DateTime, Utc};

use crate::category::Category;

#[derive(Debug, Clone, FromRow)]
pub struct FoodRecord {
    pub id: Uuid,
    pub board_id: Uuid,
    pub date: Option<NaiveDate>,
    pub weight: f64,
    pub food_name: String,
    pub food_category: Category,
    pub created_at: DateTime<Utc>,
}

/// Pre-insert shape emitted by the ingestion pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFoodRecord {
    pub board_id: Uuid,
    pub date: Option<NaiveDate>,
    pub weight: f64,
    pub food_name: String,
    pub food_category: Category,
}

impl FoodRecord {
    /// Insert a whole ingested batch. Runs row by row on the given
    /// connection so the caller decides the transaction boundary.
    pub async fn bulk_insert(
        executor: &mut PgConnection,
        records: &[NewFoodRecord],
    ) -> sqlx::Result<()> {
        for record in records {
            sqlx::query(
                r#"
                INSERT INTO food_records (board_id, date, weight, food_name, food_category)
                VALUES ($1, $2, $3, $4, $5);
                "#,
            )
            .bind(record.board_id)
            .bind(record.date)
            .bind(record.weight)
            .bind(&record.food_name)
            .bind(record.food_category)
            .execute(&mut *executor)
            .await?;
        }

        Ok(())
    }

    pub async fn get_for_board(
        executor: &mut PgConnection,
        board_id: Uuid,
    ) -> sqlx::Result<Vec<FoodRecord>> {
        sqlx::query_as::<_, FoodRecord>(
            r#"
            SELECT * FROM food_records
            WHERE board_id = $1
            ORDER BY date, created_at;
            "#,
        )
        .bind(board_id)
        .fetch_all(executor)
        .await
    }

    pub async fn delete_for_board(
        executor: &mut PgConnection,
        board_id: Uuid,
    ) -> sqlx::Result<u64> {
        let result = sqlx::query("DELETE FROM food_records WHERE board_id = $1")
            .bind(board_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
