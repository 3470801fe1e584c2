//! Detection of multi-day rain episodes.

use crate::daily_data::daily_frame::DailyClimateFrame;
use crate::types::variable::Variable;
use crate::ClimateRiskError;
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

/// A run of consecutive calendar days with rain at or above a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RainEpisode {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: usize,
}

struct Streak {
    start: NaiveDate,
    last: NaiveDate,
    days: usize,
}

impl Streak {
    fn into_episode(self, min_days: usize) -> Option<RainEpisode> {
        (self.days >= min_days).then_some(RainEpisode {
            start: self.start,
            end: self.last,
            days: self.days,
        })
    }
}

/// Finds runs of at least `min_consecutive_days` days with
/// `precip_mm >= threshold_mm`.
///
/// Days are consecutive only when their dates are: a missing day in the table
/// ends the current run, as does a null precipitation value. Returns an empty
/// sequence when `precip_mm` is absent.
pub fn detect_persistent_rain(
    records: &DailyClimateFrame,
    threshold_mm: f64,
    min_consecutive_days: usize,
) -> Result<Vec<RainEpisode>, ClimateRiskError> {
    let Some(precip) = records.values(Variable::Precipitation)? else {
        debug!("No precipitation field, skipping persistent rain detection");
        return Ok(Vec::new());
    };
    let dates = records.dates()?;
    let min_days = min_consecutive_days.max(1);

    let mut episodes = Vec::new();
    let mut current: Option<Streak> = None;
    for (date, value) in dates.into_iter().zip(precip) {
        let wet = value.is_some_and(|v| v >= threshold_mm);
        current = match (current.take(), wet) {
            (Some(mut streak), true) if streak.last.succ_opt() == Some(date) => {
                streak.last = date;
                streak.days += 1;
                Some(streak)
            }
            (previous, wet) => {
                if let Some(episode) = previous.and_then(|s| s.into_episode(min_days)) {
                    episodes.push(episode);
                }
                wet.then_some(Streak {
                    start: date,
                    last: date,
                    days: 1,
                })
            }
        };
    }
    if let Some(episode) = current.and_then(|s| s.into_episode(min_days)) {
        episodes.push(episode);
    }
    Ok(episodes)
}
