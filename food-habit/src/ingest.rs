use serde::Serialize;
use sqlx::types::Uuid;

use crate::batch::RawBatch;
use crate::category::{Category, Classifier};
use crate::clean::{CleanError, clean};
use crate::models::food_records::NewFoodRecord;

/// Non-fatal diagnostic for a food name no rule matched. The row is still
/// ingested with [`Category::Unknown`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnclassifiedFood {
    pub row: usize,
    pub food_name: String,
}

#[derive(Debug)]
pub struct IngestOutcome {
    pub records: Vec<NewFoodRecord>,
    pub warnings: Vec<UnclassifiedFood>,
}

/// Turn one uploaded batch into records for the given board: clean, classify
/// each row, stamp the board id.
///
/// Every input row produces exactly one record, in order. Persistence is the
/// caller's job; the only failure mode is a column the cleaner cannot impute
/// from, which aborts the whole batch.
pub fn ingest(
    classifier: &Classifier,
    batch: &RawBatch,
    board_id: Uuid,
) -> Result<IngestOutcome, CleanError> {
    let cleaned = clean(batch)?;

    let mut records = Vec::with_capacity(cleaned.rows.len());
    let mut warnings = Vec::new();

    for (row_idx, row) in cleaned.rows.iter().enumerate() {
        let food_name = row
            .food_name
            .clone()
            .expect("cleaned rows always carry a food name");
        let weight = row.weight.expect("cleaned rows always carry a weight");

        let food_category = classifier.classify(&food_name);
        if food_category == Category::Unknown {
            tracing::warn!(row = row_idx, %food_name, "unexpected food name");
            warnings.push(UnclassifiedFood {
                row: row_idx,
                food_name: food_name.clone(),
            });
        }

        records.push(NewFoodRecord {
            board_id,
            date: row.date,
            weight,
            food_name,
            food_category,
        });
    }

    Ok(IngestOutcome { records, warnings })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::batch::RawRow;

    fn board_id() -> Uuid {
        Uuid::from_u128(0x1234_5678_9abc_def0)
    }

    fn batch() -> RawBatch {
        RawBatch {
            rows: vec![
                RawRow {
                    date: NaiveDate::from_ymd_opt(2024, 1, 15),
                    weight: Some(60.0),
                    food_name: Some("焼肉定食".into()),
                },
                RawRow {
                    date: NaiveDate::from_ymd_opt(2024, 1, 16),
                    weight: None,
                    food_name: Some("きつねうどん".into()),
                },
                RawRow {
                    date: None,
                    weight: Some(62.0),
                    food_name: Some("謎の料理".into()),
                },
            ],
        }
    }

    #[test]
    fn test_output_length_matches_input() {
        let outcome = ingest(&Classifier::default(), &batch(), board_id()).unwrap();
        assert_eq!(outcome.records.len(), 3);
    }

    #[test]
    fn test_board_id_is_stamped_on_every_record() {
        let outcome = ingest(&Classifier::default(), &batch(), board_id()).unwrap();
        assert!(outcome.records.iter().all(|r| r.board_id == board_id()));
    }

    #[test]
    fn test_categories_and_cleaning_are_applied() {
        let outcome = ingest(&Classifier::default(), &batch(), board_id()).unwrap();

        assert_eq!(outcome.records[0].food_category, Category::Red);
        assert_eq!(outcome.records[1].food_category, Category::Yellow);
        assert_eq!(outcome.records[2].food_category, Category::Unknown);

        // The missing weight was mean-filled from 60.0 and 62.0.
        assert_eq!(outcome.records[1].weight, 61.0);
    }

    #[test]
    fn test_unmatched_names_are_reported_not_dropped() {
        let outcome = ingest(&Classifier::default(), &batch(), board_id()).unwrap();

        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].row, 2);
        assert_eq!(outcome.warnings[0].food_name, "謎の料理");
        // The unmatched row is still ingested.
        assert_eq!(outcome.records[2].food_name, "謎の料理");
    }

    #[test]
    fn test_empty_column_aborts_the_batch() {
        let all_weights_missing = RawBatch {
            rows: vec![RawRow {
                date: None,
                weight: None,
                food_name: Some("うどん".into()),
            }],
        };

        let err = ingest(&Classifier::default(), &all_weights_missing, board_id()).unwrap_err();
        assert_eq!(err, CleanError::EmptyColumn("weight"));
    }
}
