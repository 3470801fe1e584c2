//! Day-of-year arithmetic against a fixed non-leap reference year.
//!
//! Seasonal windows are expressed as `(month, day)` pairs and compared across
//! every year of a series, so both window endpoints and record dates are mapped
//! onto the same 365-day calendar. February 29th is never a valid window
//! endpoint; a leap-day record is folded onto February 28th.

use crate::ClimateRiskError;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Non-leap year used to resolve `(month, day)` pairs to a day of year.
pub const REFERENCE_YEAR: i32 = 2001;

/// Ordinal of February 29th in a leap year.
const LEAP_DAY_ORDINAL: u32 = 60;

/// Returns the day of year (1..=365) of `month`/`day` in [`REFERENCE_YEAR`].
///
/// # Errors
///
/// Returns [`ClimateRiskError::InvalidDate`] when the pair is not a calendar date
/// in a non-leap year, e.g. February 30th, February 29th or day 0.
///
/// # Examples
///
/// ```
/// use climate_risk::compute_doy;
///
/// assert_eq!(compute_doy(1, 1).unwrap(), 1);
/// assert_eq!(compute_doy(3, 1).unwrap(), 60);
/// assert!(compute_doy(2, 29).is_err());
/// ```
pub fn compute_doy(month: u32, day: u32) -> Result<u32, ClimateRiskError> {
    NaiveDate::from_ymd_opt(REFERENCE_YEAR, month, day)
        .map(|d| d.ordinal())
        .ok_or(ClimateRiskError::InvalidDate { month, day })
}

/// Maps a record date onto the reference calendar.
///
/// In leap years every day from February 29th onwards is shifted back by one,
/// so March 1st is always day 60 and December 31st always day 365.
pub fn reference_doy(date: NaiveDate) -> u32 {
    let ordinal = date.ordinal();
    if is_leap_year(date.year()) && ordinal >= LEAP_DAY_ORDINAL {
        ordinal - 1
    } else {
        ordinal
    }
}

fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// Whether a day-of-year window stays inside one calendar year or crosses the
/// year boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    WithinYear,
    WrapsYear,
}

/// Classifies a window. Equal bounds select a single day and count as
/// [`WindowKind::WithinYear`].
pub fn window_kind(start_doy: u32, end_doy: u32) -> WindowKind {
    if start_doy > end_doy {
        WindowKind::WrapsYear
    } else {
        WindowKind::WithinYear
    }
}

impl WindowKind {
    /// Whether `doy` falls inside `[start_doy, end_doy]` under this window kind.
    pub fn contains(self, doy: u32, start_doy: u32, end_doy: u32) -> bool {
        match self {
            WindowKind::WithinYear => doy >= start_doy && doy <= end_doy,
            WindowKind::WrapsYear => doy >= start_doy || doy <= end_doy,
        }
    }
}
