use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimateRiskError {
    /// A seasonal-window endpoint is not a date in the non-leap reference year.
    #[error("Invalid window date: month {month}, day {day} does not exist in a non-leap year")]
    InvalidDate { month: u32, day: u32 },

    #[error("Invalid seasonal window '{0}', expected 'start_month,start_day,end_month,end_day'")]
    InvalidWindowSpec(String),

    #[error("Invalid year range {start}..={end}")]
    InvalidYearRange { start: i32, end: i32 },

    #[error("Invalid event parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    #[error("Failed to read CSV file '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error("Failed to read file '{0}'")]
    FileRead(PathBuf, #[source] std::io::Error),

    #[error("Invalid parameter file '{0}'")]
    ParameterFile(PathBuf, #[source] serde_json::Error),

    #[error("Event mask '{event}' has {mask_len} rows but the records have {records_len}")]
    MaskLengthMismatch {
        event: String,
        mask_len: usize,
        records_len: usize,
    },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
