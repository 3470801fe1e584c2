//! Defines [`SeasonalWindow`], a validated `(month, day)` interval applied to every
//! year of a daily series.

use crate::types::calendar::{compute_doy, window_kind, WindowKind};
use crate::ClimateRiskError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A seasonal window such as "15 November to 15 February".
///
/// Both endpoints are validated against the non-leap reference calendar on
/// construction, so a `SeasonalWindow` always has resolvable day-of-year bounds.
///
/// # Examples
///
/// ```
/// use climate_risk::{SeasonalWindow, WindowKind};
///
/// let winter: SeasonalWindow = "11,15,2,15".parse().unwrap();
/// assert_eq!(winter.kind(), WindowKind::WrapsYear);
/// assert_eq!(winter.start_doy(), 319);
/// assert_eq!(winter.end_doy(), 46);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWindow", into = "RawWindow")]
pub struct SeasonalWindow {
    start_month: u32,
    start_day: u32,
    end_month: u32,
    end_day: u32,
    start_doy: u32,
    end_doy: u32,
}

#[derive(Serialize, Deserialize)]
struct RawWindow {
    start_month: u32,
    start_day: u32,
    end_month: u32,
    end_day: u32,
}

impl SeasonalWindow {
    /// Validates both endpoints and resolves them to day-of-year bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ClimateRiskError::InvalidDate`] for the first endpoint that is not
    /// a date in the non-leap reference year.
    pub fn new(
        start_month: u32,
        start_day: u32,
        end_month: u32,
        end_day: u32,
    ) -> Result<Self, ClimateRiskError> {
        let start_doy = compute_doy(start_month, start_day)?;
        let end_doy = compute_doy(end_month, end_day)?;
        Ok(Self {
            start_month,
            start_day,
            end_month,
            end_day,
            start_doy,
            end_doy,
        })
    }

    /// The window covering the whole year, 1 January to 31 December.
    pub fn full_year() -> Self {
        Self {
            start_month: 1,
            start_day: 1,
            end_month: 12,
            end_day: 31,
            start_doy: 1,
            end_doy: 365,
        }
    }

    pub fn start_month(&self) -> u32 {
        self.start_month
    }

    pub fn start_day(&self) -> u32 {
        self.start_day
    }

    pub fn end_month(&self) -> u32 {
        self.end_month
    }

    pub fn end_day(&self) -> u32 {
        self.end_day
    }

    pub fn start_doy(&self) -> u32 {
        self.start_doy
    }

    pub fn end_doy(&self) -> u32 {
        self.end_doy
    }

    pub fn kind(&self) -> WindowKind {
        window_kind(self.start_doy, self.end_doy)
    }

    pub fn wraps(&self) -> bool {
        self.kind() == WindowKind::WrapsYear
    }

    /// Whether a reference-calendar day of year is selected by this window.
    pub fn contains_doy(&self, doy: u32) -> bool {
        self.kind().contains(doy, self.start_doy, self.end_doy)
    }
}

impl TryFrom<RawWindow> for SeasonalWindow {
    type Error = ClimateRiskError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        SeasonalWindow::new(raw.start_month, raw.start_day, raw.end_month, raw.end_day)
    }
}

impl From<SeasonalWindow> for RawWindow {
    fn from(window: SeasonalWindow) -> Self {
        RawWindow {
            start_month: window.start_month,
            start_day: window.start_day,
            end_month: window.end_month,
            end_day: window.end_day,
        }
    }
}

/// Parses `start_month,start_day,end_month,end_day`.
impl FromStr for SeasonalWindow {
    type Err = ClimateRiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<u32> = s
            .split(',')
            .map(|p| p.trim().parse::<u32>())
            .collect::<Result<_, _>>()
            .map_err(|_| ClimateRiskError::InvalidWindowSpec(s.to_string()))?;
        match parts.as_slice() {
            [sm, sd, em, ed] => SeasonalWindow::new(*sm, *sd, *em, *ed),
            _ => Err(ClimateRiskError::InvalidWindowSpec(s.to_string())),
        }
    }
}

/// Formats as `DD/MM - DD/MM`.
impl fmt::Display for SeasonalWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}/{:02} - {:02}/{:02}",
            self.start_day, self.start_month, self.end_day, self.end_month
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wrapping_window() -> Result<(), Box<dyn std::error::Error>> {
        let window: SeasonalWindow = "11, 15, 2, 15".parse()?;
        assert!(window.wraps());
        assert_eq!(window.to_string(), "15/11 - 15/02");
        assert!(window.contains_doy(1));
        assert!(window.contains_doy(365));
        assert!(!window.contains_doy(100));
        Ok(())
    }

    #[test]
    fn test_single_day_window_is_within_year() -> Result<(), Box<dyn std::error::Error>> {
        let window = SeasonalWindow::new(7, 4, 7, 4)?;
        assert_eq!(window.kind(), WindowKind::WithinYear);
        assert!(window.contains_doy(window.start_doy()));
        assert!(!window.contains_doy(window.start_doy() + 1));
        Ok(())
    }

    #[test]
    fn test_rejects_leap_day_and_malformed_specs() {
        assert!(matches!(
            SeasonalWindow::new(2, 29, 3, 1),
            Err(ClimateRiskError::InvalidDate { month: 2, day: 29 })
        ));
        assert!(matches!(
            "1,1,2".parse::<SeasonalWindow>(),
            Err(ClimateRiskError::InvalidWindowSpec(_))
        ));
        assert!(matches!(
            "a,1,2,3".parse::<SeasonalWindow>(),
            Err(ClimateRiskError::InvalidWindowSpec(_))
        ));
        assert!(matches!(
            "4,31,5,1".parse::<SeasonalWindow>(),
            Err(ClimateRiskError::InvalidDate { month: 4, day: 31 })
        ));
    }

    #[test]
    fn test_full_year_matches_new() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(SeasonalWindow::full_year(), SeasonalWindow::new(1, 1, 12, 31)?);
        Ok(())
    }

    #[test]
    fn test_serde_validates_endpoints() -> Result<(), Box<dyn std::error::Error>> {
        let window: SeasonalWindow = serde_json::from_str(
            r#"{"start_month":9,"start_day":5,"end_month":10,"end_day":15}"#,
        )?;
        assert_eq!(window, SeasonalWindow::new(9, 5, 10, 15)?);
        let invalid = serde_json::from_str::<SeasonalWindow>(
            r#"{"start_month":2,"start_day":30,"end_month":10,"end_day":15}"#,
        );
        assert!(invalid.is_err());
        Ok(())
    }
}
