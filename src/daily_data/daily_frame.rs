// daily_frame.rs

//! Contains the `DailyClimateFrame` structure wrapping a polars `DataFrame` of
//! per-location daily records.

use crate::daily_data::loader::LoadReport;
use crate::types::variable::Variable;
use crate::ClimateRiskError;
use chrono::NaiveDate;
use polars::prelude::{BooleanChunked, DataFrame};

/// Name of the mandatory date column.
pub const DATE_COLUMN: &str = "date";

/// An immutable table of daily records for one location.
///
/// The wrapped `DataFrame` always has a `date` column of polars `Date` dtype
/// without nulls, sorted ascending, and every present field of [`Variable`] is
/// `Float64`. Extra columns from the export (e.g. `system:index`, `.geo`) are
/// carried along untouched.
///
/// Instances are obtained from [`crate::DailyDataLoader`]. Every transformation
/// returns a new frame; the original is never modified, so several analyses can
/// share one loaded table.
#[derive(Debug, Clone)]
pub struct DailyClimateFrame {
    frame: DataFrame,
    load_report: LoadReport,
}

impl DailyClimateFrame {
    pub(crate) fn from_parts(frame: DataFrame, load_report: LoadReport) -> Self {
        Self { frame, load_report }
    }

    /// The underlying polars frame.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Diagnostics from the load that produced this table.
    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    /// Number of daily records.
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn has_variable(&self, variable: Variable) -> bool {
        self.frame.get_column_index(variable.column_name()).is_some()
    }

    /// The known fields present in this table, in catalog order.
    pub fn available_variables(&self) -> Vec<Variable> {
        Variable::ALL
            .into_iter()
            .filter(|v| self.has_variable(*v))
            .collect()
    }

    /// Dates of all records, in row order.
    pub fn dates(&self) -> Result<Vec<NaiveDate>, ClimateRiskError> {
        let dates = self.frame.column(DATE_COLUMN)?.date()?;
        Ok(dates.as_date_iter().flatten().collect())
    }

    /// Values of one field in row order, or `None` when the field is absent.
    pub fn values(&self, variable: Variable) -> Result<Option<Vec<Option<f64>>>, ClimateRiskError> {
        if !self.has_variable(variable) {
            return Ok(None);
        }
        let values = self.frame.column(variable.column_name())?.f64()?;
        Ok(Some(values.into_iter().collect()))
    }

    /// First and last record date, or `None` for an empty table.
    pub fn date_bounds(&self) -> Result<Option<(NaiveDate, NaiveDate)>, ClimateRiskError> {
        let dates = self.dates()?;
        Ok(dates.first().copied().zip(dates.last().copied()))
    }

    /// Keeps the rows where `mask` is true, returning a new frame.
    ///
    /// The load report is carried over unchanged.
    pub fn filter_rows(&self, mask: &BooleanChunked) -> Result<DailyClimateFrame, ClimateRiskError> {
        if mask.len() != self.height() {
            return Err(ClimateRiskError::MaskLengthMismatch {
                event: mask.name().to_string(),
                mask_len: mask.len(),
                records_len: self.height(),
            });
        }
        Ok(DailyClimateFrame::from_parts(
            self.frame.filter(mask)?,
            self.load_report,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DailyDataLoader;
    use polars::prelude::*;

    fn sample() -> Result<DailyClimateFrame, Box<dyn std::error::Error>> {
        let df = df!(
            "date" => &["2021-01-03", "2021-01-01", "2021-01-02"],
            "precip_mm" => &[Some(3.0), None, Some(1.0)],
            "station" => &["a", "a", "a"],
        )?;
        Ok(DailyDataLoader::from_dataframe(df)?)
    }

    #[test]
    fn test_frame_is_sorted_and_typed() -> Result<(), Box<dyn std::error::Error>> {
        let frame = sample()?;
        assert_eq!(frame.frame().column("date")?.dtype(), &DataType::Date);
        let dates = frame.dates()?;
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2021, 1, 1).ok_or("date")?);
        assert_eq!(dates[2], NaiveDate::from_ymd_opt(2021, 1, 3).ok_or("date")?);
        assert_eq!(
            frame.values(Variable::Precipitation)?,
            Some(vec![None, Some(1.0), Some(3.0)])
        );
        assert_eq!(frame.values(Variable::GustMax)?, None);
        assert_eq!(frame.available_variables(), vec![Variable::Precipitation]);
        Ok(())
    }

    #[test]
    fn test_filter_rows_returns_new_frame() -> Result<(), Box<dyn std::error::Error>> {
        let frame = sample()?;
        let mask = BooleanChunked::from_slice("keep".into(), &[true, false, true]);
        let filtered = frame.filter_rows(&mask)?;
        assert_eq!(filtered.height(), 2);
        assert_eq!(frame.height(), 3, "input frame must stay untouched");

        let short = BooleanChunked::from_slice("short".into(), &[true]);
        assert!(matches!(
            frame.filter_rows(&short),
            Err(ClimateRiskError::MaskLengthMismatch { mask_len: 1, records_len: 3, .. })
        ));
        Ok(())
    }

    #[test]
    fn test_date_bounds_empty() -> Result<(), Box<dyn std::error::Error>> {
        let frame = sample()?;
        let none = BooleanChunked::from_slice("none".into(), &[false, false, false]);
        assert_eq!(frame.filter_rows(&none)?.date_bounds()?, None);
        let (first, last) = frame.date_bounds()?.ok_or("bounds")?;
        assert!(first < last);
        Ok(())
    }
}
