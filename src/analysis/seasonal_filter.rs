//! Seasonal-window filtering of daily records.

use crate::daily_data::daily_frame::{DailyClimateFrame, DATE_COLUMN};
use crate::types::calendar::{reference_doy, WindowKind};
use crate::types::seasonal_window::SeasonalWindow;
use crate::ClimateRiskError;
use log::{info, warn};
use polars::prelude::{BooleanChunked, NewChunkedArray};
use serde::Serialize;

/// Why a seasonal selection came out empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterIssue {
    /// The input table had no records.
    EmptyInput,
    /// The input table is empty because no `date` could be parsed at load time.
    UnparseableDates,
    /// The input had records but none fall inside the window.
    NoRecordsInWindow,
}

/// Description of one seasonal filtering pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalWindowInfo {
    pub window: SeasonalWindow,
    pub start_doy: u32,
    pub end_doy: u32,
    pub kind: WindowKind,
    pub wraps: bool,
    pub rows_before: usize,
    pub rows_after: usize,
    pub issue: Option<FilterIssue>,
}

/// The records selected by a seasonal window together with the filtering metadata.
#[derive(Debug, Clone)]
pub struct SeasonalSelection {
    frame: DailyClimateFrame,
    info: SeasonalWindowInfo,
}

impl SeasonalSelection {
    pub fn frame(&self) -> &DailyClimateFrame {
        &self.frame
    }

    pub fn info(&self) -> &SeasonalWindowInfo {
        &self.info
    }

    pub fn into_parts(self) -> (DailyClimateFrame, SeasonalWindowInfo) {
        (self.frame, self.info)
    }
}

pub trait SeasonalFilterExt {
    /// Keeps the records whose reference day of year lies inside `window`,
    /// inclusive at both ends, in every year of the table.
    ///
    /// A window that wraps the year boundary (start after end) keeps days on or
    /// after the start *or* on or before the end. Record dates are mapped onto
    /// the non-leap reference calendar first, so "15 Nov" selects the same
    /// calendar day in leap and non-leap years.
    ///
    /// The input is left untouched. Empty inputs never fail; the returned
    /// [`SeasonalWindowInfo::issue`] says why nothing was selected.
    fn filter_seasonal(&self, window: &SeasonalWindow) -> Result<SeasonalSelection, ClimateRiskError>;
}

impl SeasonalFilterExt for DailyClimateFrame {
    fn filter_seasonal(&self, window: &SeasonalWindow) -> Result<SeasonalSelection, ClimateRiskError> {
        let rows_before = self.height();
        let keep: Vec<bool> = self
            .frame()
            .column(DATE_COLUMN)?
            .date()?
            .as_date_iter()
            .map(|date| date.is_some_and(|d| window.contains_doy(reference_doy(d))))
            .collect();
        let mask = BooleanChunked::from_slice("in_window".into(), &keep);
        let frame = self.filter_rows(&mask)?;
        let rows_after = frame.height();

        let issue = if rows_before == 0 {
            if self.load_report().rows_dropped > 0 {
                Some(FilterIssue::UnparseableDates)
            } else {
                Some(FilterIssue::EmptyInput)
            }
        } else if rows_after == 0 {
            Some(FilterIssue::NoRecordsInWindow)
        } else {
            None
        };

        match issue {
            Some(issue) => warn!(
                "Seasonal window {} selected no records ({:?}, {} rows before filtering)",
                window, issue, rows_before
            ),
            None => info!(
                "Seasonal window {} kept {} of {} records",
                window, rows_after, rows_before
            ),
        }

        Ok(SeasonalSelection {
            frame,
            info: SeasonalWindowInfo {
                window: *window,
                start_doy: window.start_doy(),
                end_doy: window.end_doy(),
                kind: window.kind(),
                wraps: window.wraps(),
                rows_before,
                rows_after,
                issue,
            },
        })
    }
}

/// Convenience wrapper validating raw `(month, day)` endpoints before filtering.
///
/// # Errors
///
/// Returns [`ClimateRiskError::InvalidDate`] when an endpoint is not a date in
/// the non-leap reference year. This is the only condition that stops a run.
pub fn apply_seasonal_window(
    records: &DailyClimateFrame,
    start_month: u32,
    start_day: u32,
    end_month: u32,
    end_day: u32,
) -> Result<SeasonalSelection, ClimateRiskError> {
    let window = SeasonalWindow::new(start_month, start_day, end_month, end_day)?;
    records.filter_seasonal(&window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DailyDataLoader;
    use chrono::{Datelike, Duration, NaiveDate};
    use polars::prelude::*;

    fn daily_frame(start: NaiveDate, days: i64) -> Result<DailyClimateFrame, Box<dyn std::error::Error>> {
        let dates: Vec<String> = (0..days)
            .map(|i| (start + Duration::days(i)).format("%Y-%m-%d").to_string())
            .collect();
        let precip: Vec<f64> = (0..days).map(|i| i as f64).collect();
        let df = df!("date" => dates, "precip_mm" => precip)?;
        Ok(DailyDataLoader::from_dataframe(df)?)
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_wrapping_window_across_years() -> Result<(), Box<dyn std::error::Error>> {
        let records = daily_frame(ymd(2020, 1, 1), 731)?; // 2020-01-01 ..= 2021-12-31
        let selection = apply_seasonal_window(&records, 11, 15, 2, 15)?;
        let info = selection.info();
        assert!(info.wraps);
        assert_eq!(info.kind, WindowKind::WrapsYear);
        assert_eq!(info.rows_before, 731);
        assert_eq!(info.issue, None);

        let dates = selection.frame().dates()?;
        assert_eq!(info.rows_after, dates.len());
        assert!(dates.contains(&ymd(2020, 11, 15)));
        assert!(dates.contains(&ymd(2020, 12, 31)));
        assert!(dates.contains(&ymd(2021, 1, 1)));
        assert!(dates.contains(&ymd(2021, 2, 15)));
        assert!(!dates.contains(&ymd(2020, 11, 14)), "leap year must not shift the window");
        assert!(!dates.contains(&ymd(2021, 2, 16)));
        for d in &dates {
            let md = (d.month(), d.day());
            assert!(md >= (11, 15) || md <= (2, 15), "{} outside window", d);
        }
        // 2020: Jan 1-Feb 15 (46) + Nov 15-Dec 31 (47); 2021 the same.
        assert_eq!(dates.len(), 2 * (46 + 47));
        Ok(())
    }

    #[test]
    fn test_within_year_window_is_inclusive() -> Result<(), Box<dyn std::error::Error>> {
        let records = daily_frame(ymd(2019, 1, 1), 365)?;
        let selection = apply_seasonal_window(&records, 9, 5, 10, 15)?;
        let dates = selection.frame().dates()?;
        assert_eq!(dates.first(), Some(&ymd(2019, 9, 5)));
        assert_eq!(dates.last(), Some(&ymd(2019, 10, 15)));
        assert_eq!(dates.len(), 26 + 15);
        Ok(())
    }

    #[test]
    fn test_single_day_window_selects_that_day_every_year() -> Result<(), Box<dyn std::error::Error>> {
        let records = daily_frame(ymd(2018, 1, 1), 365 * 4)?;
        let selection = apply_seasonal_window(&records, 3, 1, 3, 1)?;
        let dates = selection.frame().dates()?;
        assert_eq!(
            dates,
            vec![ymd(2018, 3, 1), ymd(2019, 3, 1), ymd(2020, 3, 1), ymd(2021, 3, 1)]
        );
        Ok(())
    }

    #[test]
    fn test_wrapping_window_includes_calendar_extremes() -> Result<(), Box<dyn std::error::Error>> {
        let records = daily_frame(ymd(2019, 12, 30), 4)?; // Dec 30 .. Jan 2
        let selection = apply_seasonal_window(&records, 12, 31, 1, 1)?;
        assert_eq!(
            selection.frame().dates()?,
            vec![ymd(2019, 12, 31), ymd(2020, 1, 1)]
        );
        let leap_end = daily_frame(ymd(2020, 12, 31), 1)?;
        assert_eq!(apply_seasonal_window(&leap_end, 6, 1, 1, 1)?.info().rows_after, 1);
        Ok(())
    }

    #[test]
    fn test_filter_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
        let records = daily_frame(ymd(2020, 1, 1), 800)?;
        let window = SeasonalWindow::new(10, 1, 3, 31)?;
        let once = records.filter_seasonal(&window)?;
        let twice = once.frame().filter_seasonal(&window)?;
        assert_eq!(once.frame().dates()?, twice.frame().dates()?);
        assert!(once.frame().frame().equals(twice.frame().frame()));
        assert_eq!(records.height(), 800, "input must not be mutated");
        Ok(())
    }

    #[test]
    fn test_empty_and_unparseable_inputs() -> Result<(), Box<dyn std::error::Error>> {
        let window = SeasonalWindow::full_year();

        let empty = DailyDataLoader::from_dataframe(df!(
            "date" => Vec::<String>::new(),
            "precip_mm" => Vec::<f64>::new()
        )?)?;
        let selection = empty.filter_seasonal(&window)?;
        assert_eq!(selection.info().issue, Some(FilterIssue::EmptyInput));
        assert!(selection.frame().is_empty());

        let garbage = DailyDataLoader::from_dataframe(df!(
            "date" => &["01/02/2020", "yesterday"],
            "precip_mm" => &[1.0, 2.0]
        )?)?;
        let selection = garbage.filter_seasonal(&window)?;
        assert_eq!(selection.info().issue, Some(FilterIssue::UnparseableDates));
        assert_eq!(selection.info().rows_after, 0);

        let summer_only = daily_frame(ymd(2020, 6, 1), 30)?;
        let selection = apply_seasonal_window(&summer_only, 12, 1, 12, 31)?;
        assert_eq!(selection.info().issue, Some(FilterIssue::NoRecordsInWindow));
        Ok(())
    }

    #[test]
    fn test_invalid_window_bounds_are_errors() -> Result<(), Box<dyn std::error::Error>> {
        let records = daily_frame(ymd(2020, 1, 1), 10)?;
        assert!(matches!(
            apply_seasonal_window(&records, 2, 30, 3, 1),
            Err(ClimateRiskError::InvalidDate { month: 2, day: 30 })
        ));
        Ok(())
    }
}
