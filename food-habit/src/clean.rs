use std::collections::HashMap;

use thiserror::Error;

use crate::batch::{RawBatch, RawRow};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CleanError {
    #[error("column `{0}` has no values to impute from")]
    EmptyColumn(&'static str),
}

/// Fill missing values in a batch: food names with the column mode, weights
/// with the column mean. Dates are passed through untouched.
///
/// Returns a new batch; the input is never mutated. A required column with
/// no values at all (including the zero-row batch) is an error, since
/// neither mode nor mean is defined.
pub fn clean(batch: &RawBatch) -> Result<RawBatch, CleanError> {
    let name_fill = food_name_mode(batch)?;
    let weight_fill = weight_mean(batch)?;

    let rows = batch
        .rows
        .iter()
        .map(|row| RawRow {
            date: row.date,
            weight: Some(row.weight.unwrap_or(weight_fill)),
            food_name: Some(
                row.food_name
                    .clone()
                    .unwrap_or_else(|| name_fill.clone()),
            ),
        })
        .collect();

    Ok(RawBatch { rows })
}

/// Most frequent non-missing food name; ties break to the lexicographically
/// smallest name so imputation stays deterministic.
fn food_name_mode(batch: &RawBatch) -> Result<String, CleanError> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in &batch.rows {
        if let Some(name) = row.food_name.as_deref() {
            *counts.entry(name).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .max_by(|(name_a, count_a), (name_b, count_b)| {
            count_a.cmp(count_b).then_with(|| name_b.cmp(name_a))
        })
        .map(|(name, _)| name.to_string())
        .ok_or(CleanError::EmptyColumn("food_name"))
}

fn weight_mean(batch: &RawBatch) -> Result<f64, CleanError> {
    let weights: Vec<f64> = batch.rows.iter().filter_map(|row| row.weight).collect();
    if weights.is_empty() {
        return Err(CleanError::EmptyColumn("weight"));
    }

    Ok(weights.iter().sum::<f64>() / weights.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(weight: Option<f64>, food_name: Option<&str>) -> RawRow {
        RawRow {
            date: None,
            weight,
            food_name: food_name.map(ToOwned::to_owned),
        }
    }

    #[test]
    fn test_weight_mean_fill() {
        let batch = RawBatch {
            rows: vec![
                row(Some(60.0), Some("うどん")),
                row(None, Some("うどん")),
                row(Some(62.0), Some("うどん")),
            ],
        };

        let cleaned = clean(&batch).unwrap();
        assert_eq!(cleaned.rows[1].weight, Some(61.0));
        // Present values are untouched.
        assert_eq!(cleaned.rows[0].weight, Some(60.0));
        assert_eq!(cleaned.rows[2].weight, Some(62.0));
    }

    #[test]
    fn test_food_name_mode_fill() {
        let batch = RawBatch {
            rows: vec![
                row(Some(60.0), Some("うどん")),
                row(Some(60.0), None),
                row(Some(60.0), Some("うどん")),
                row(Some(60.0), Some("チャーハン")),
            ],
        };

        let cleaned = clean(&batch).unwrap();
        assert_eq!(cleaned.rows[1].food_name.as_deref(), Some("うどん"));
    }

    #[test]
    fn test_food_name_mode_tie_breaks_to_smallest() {
        let batch = RawBatch {
            rows: vec![
                row(Some(60.0), Some("b")),
                row(Some(60.0), Some("a")),
                row(Some(60.0), None),
            ],
        };

        let cleaned = clean(&batch).unwrap();
        assert_eq!(cleaned.rows[2].food_name.as_deref(), Some("a"));
    }

    #[test]
    fn test_dates_are_not_imputed() {
        let batch = RawBatch {
            rows: vec![row(Some(60.0), Some("うどん")), row(Some(61.0), Some("うどん"))],
        };

        let cleaned = clean(&batch).unwrap();
        assert!(cleaned.rows.iter().all(|row| row.date.is_none()));
    }

    #[test]
    fn test_all_weights_missing_is_an_error() {
        let batch = RawBatch {
            rows: vec![row(None, Some("うどん")), row(None, Some("うどん"))],
        };

        assert_eq!(clean(&batch), Err(CleanError::EmptyColumn("weight")));
    }

    #[test]
    fn test_all_food_names_missing_is_an_error() {
        let batch = RawBatch {
            rows: vec![row(Some(60.0), None), row(Some(61.0), None)],
        };

        assert_eq!(clean(&batch), Err(CleanError::EmptyColumn("food_name")));
    }

    #[test]
    fn test_empty_batch_is_an_error() {
        assert!(matches!(
            clean(&RawBatch::default()),
            Err(CleanError::EmptyColumn(_))
        ));
    }

    #[test]
    fn test_clean_does_not_mutate_input() {
        let batch = RawBatch {
            rows: vec![row(None, Some("うどん")), row(Some(62.0), Some("うどん"))],
        };
        let before = batch.clone();

        clean(&batch).unwrap();
        assert_eq!(batch, before);
    }
}
