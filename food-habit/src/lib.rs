pub mod advice;
pub mod batch;
pub mod category;
pub mod clean;
pub mod ingest;
pub mod models;

pub use advice::{Advice, BalanceReport, CategoryTally, analyze};
pub use batch::{BatchError, RawBatch, RawRow, read_batch};
pub use category::{Category, Classifier};
pub use clean::{CleanError, clean};
pub use ingest::{IngestOutcome, UnclassifiedFood, ingest};
