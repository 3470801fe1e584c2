//! Loading of exported daily CSV files into a [`DailyClimateFrame`].

use crate::daily_data::daily_frame::{DailyClimateFrame, DATE_COLUMN};
use crate::types::variable::Variable;
use crate::ClimateRiskError;
use log::{info, warn};
use polars::prelude::*;
use serde::Serialize;
use std::io::Cursor;
use std::path::Path;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Row accounting for one load.
///
/// Rows whose `date` cannot be parsed as `YYYY-MM-DD` are dropped during the
/// load rather than zero-filled; `rows_dropped` keeps their count available
/// for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_dropped: usize,
}

impl LoadReport {
    pub fn rows_kept(&self) -> usize {
        self.rows_read - self.rows_dropped
    }
}

/// Reads daily CSV exports and normalises them into typed tables.
pub struct DailyDataLoader;

impl DailyDataLoader {
    /// Reads a CSV file with a header row.
    ///
    /// # Errors
    ///
    /// Returns [`ClimateRiskError::CsvRead`] when the file cannot be opened or is
    /// not valid CSV. Unparseable dates or values are not errors.
    pub fn load_csv(path: &Path) -> Result<DailyClimateFrame, ClimateRiskError> {
        info!("Loading daily CSV from {}", path.display());
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(|e| ClimateRiskError::CsvRead(path.to_path_buf(), e))?
            .finish()
            .map_err(|e| ClimateRiskError::CsvRead(path.to_path_buf(), e))?;
        Self::from_dataframe(df)
    }

    /// Reads CSV content already held in memory, e.g. an uploaded file.
    pub fn load_csv_bytes(bytes: Vec<u8>) -> Result<DailyClimateFrame, ClimateRiskError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;
        Self::from_dataframe(df)
    }

    /// Normalises an arbitrary frame.
    ///
    /// The `date` column is parsed from `YYYY-MM-DD` text, rows where that fails
    /// are dropped, known numeric fields are coerced to `Float64` (invalid values
    /// become null) and rows are sorted by date. A frame without a `date` column
    /// loses every row.
    pub fn from_dataframe(df: DataFrame) -> Result<DailyClimateFrame, ClimateRiskError> {
        let rows_read = df.height();

        let date_expr = if df.get_column_index(DATE_COLUMN).is_some() {
            col(DATE_COLUMN)
                .cast(DataType::String)
                .str()
                .to_date(StrptimeOptions {
                    format: Some(DATE_FORMAT.into()),
                    strict: false,
                    exact: true,
                    cache: true,
                })
        } else {
            warn!("No '{}' column found, every row is dropped", DATE_COLUMN);
            lit(LiteralValue::Null).cast(DataType::Date)
        };

        let mut exprs = vec![date_expr.alias(DATE_COLUMN)];
        exprs.extend(
            Variable::ALL
                .into_iter()
                .filter(|v| df.get_column_index(v.column_name()).is_some())
                .map(|v| col(v.column_name()).cast(DataType::Float64)),
        );

        let frame = df
            .lazy()
            .with_columns(exprs)
            .filter(col(DATE_COLUMN).is_not_null())
            .sort([DATE_COLUMN], SortMultipleOptions::default())
            .collect()?;

        let report = LoadReport {
            rows_read,
            rows_dropped: rows_read - frame.height(),
        };
        if report.rows_dropped > 0 {
            warn!(
                "Dropped {} of {} rows with an unparseable date",
                report.rows_dropped, report.rows_read
            );
        }
        if frame.height() == 0 {
            warn!("Loaded table has no usable daily records");
        }
        info!(
            "Loaded {} daily records with fields [{}]",
            frame.height(),
            Variable::ALL
                .into_iter()
                .filter(|v| frame.get_column_index(v.column_name()).is_some())
                .map(|v| v.column_name())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(DailyClimateFrame::from_parts(frame, report))
    }
}
