use std::io::Read;

use chrono::NaiveDate;
use thiserror::Error;

/// Column names of the upload file format.
pub const DATE_COLUMN: &str = "日付";
pub const WEIGHT_COLUMN: &str = "体重";
pub const FOOD_NAME_COLUMN: &str = "食品名";

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("row {row}: `{value}` is not a valid weight")]
    InvalidWeight { row: usize, value: String },

    #[error("failed to read csv: {0}")]
    Csv(#[from] csv::Error),
}

/// One raw row of an uploaded batch. Missing cells are `None`, never empty
/// strings.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub date: Option<NaiveDate>,
    pub weight: Option<f64>,
    pub food_name: Option<String>,
}

/// An ordered batch of raw rows from a single uploaded file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawBatch {
    pub rows: Vec<RawRow>,
}

impl RawBatch {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Read an uploaded CSV into a [`RawBatch`].
///
/// The header must carry the 日付/体重/食品名 columns. Empty cells become
/// `None`; a non-empty weight that does not parse as a number is rejected
/// here so the cleaning stage only ever sees well-typed rows.
pub fn read_batch<R: Read>(reader: R) -> Result<RawBatch, BatchError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let col = |name: &'static str| -> Result<usize, BatchError> {
        headers
            .iter()
            .position(|header| header == name)
            .ok_or(BatchError::MissingColumn(name))
    };

    let idx_date = col(DATE_COLUMN)?;
    let idx_weight = col(WEIGHT_COLUMN)?;
    let idx_food_name = col(FOOD_NAME_COLUMN)?;

    let mut rows = Vec::new();

    for (line_num, result) in rdr.records().enumerate() {
        let record = result?;
        let cell = |idx: usize| record.get(idx).filter(|value| !value.is_empty());

        let date = cell(idx_date).and_then(parse_date);

        let weight = match cell(idx_weight) {
            Some(value) => Some(value.parse::<f64>().map_err(|_| BatchError::InvalidWeight {
                // +2 accounts for the header line and 1-based numbering
                row: line_num + 2,
                value: value.to_string(),
            })?),
            None => None,
        };

        let food_name = cell(idx_food_name).map(ToOwned::to_owned);

        rows.push(RawRow {
            date,
            weight,
            food_name,
        });
    }

    Ok(RawBatch { rows })
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y/%m/%d"))
        .ok()
}
