//! Per-year aggregation of event days and of raw daily fields.

use crate::analysis::event_detector::EventMasks;
use crate::daily_data::daily_frame::{DailyClimateFrame, DATE_COLUMN};
use crate::types::event::EventKey;
use crate::types::variable::Variable;
use crate::ClimateRiskError;
use chrono::Datelike;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Number of event days of one event in one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearlyCountRow {
    pub year: i32,
    pub event_key: EventKey,
    pub day_count: usize,
}

/// Counts event days per calendar year.
///
/// Only years with at least one event day appear, ordered by event (display
/// order) then year. Charts that need every year of a range should pass the
/// result through [`densify_years`].
pub fn yearly_counts(
    records: &DailyClimateFrame,
    masks: &EventMasks,
) -> Result<Vec<YearlyCountRow>, ClimateRiskError> {
    let years: Vec<i32> = records.dates()?.iter().map(|d| d.year()).collect();
    let mut rows = Vec::new();
    for (event_key, mask) in masks.iter() {
        if mask.len() != years.len() {
            return Err(ClimateRiskError::MaskLengthMismatch {
                event: event_key.to_string(),
                mask_len: mask.len(),
                records_len: years.len(),
            });
        }
        let mut per_year: BTreeMap<i32, usize> = BTreeMap::new();
        for (year, hit) in years.iter().zip(mask.into_iter()) {
            if hit == Some(true) {
                *per_year.entry(*year).or_default() += 1;
            }
        }
        rows.extend(per_year.into_iter().map(|(year, day_count)| YearlyCountRow {
            year,
            event_key,
            day_count,
        }));
    }
    Ok(rows)
}

/// Zero-fills the yearly counts of `event` over a contiguous year range.
///
/// The range is `years` when given, otherwise the min..=max year found in
/// `rows` for that event. Rows of other events are ignored.
pub fn densify_years(
    rows: &[YearlyCountRow],
    event: EventKey,
    years: Option<(i32, i32)>,
) -> Vec<YearlyCountRow> {
    let counts: BTreeMap<i32, usize> = rows
        .iter()
        .filter(|r| r.event_key == event)
        .map(|r| (r.year, r.day_count))
        .collect();
    let range = years.or_else(|| {
        counts
            .keys()
            .next()
            .copied()
            .zip(counts.keys().next_back().copied())
    });
    match range {
        Some((first, last)) => (first..=last)
            .map(|year| YearlyCountRow {
                year,
                event_key: event,
                day_count: counts.get(&year).copied().unwrap_or(0),
            })
            .collect(),
        None => Vec::new(),
    }
}

/// Aggregation applied per calendar year by [`annual_statistics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnualAggregate {
    Mean,
    Min,
    Max,
    Sum,
    Median,
}

impl AnnualAggregate {
    fn apply(self, expr: Expr) -> Expr {
        match self {
            AnnualAggregate::Mean => expr.mean(),
            AnnualAggregate::Min => expr.min(),
            AnnualAggregate::Max => expr.max(),
            AnnualAggregate::Sum => expr.sum(),
            AnnualAggregate::Median => expr.median(),
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            AnnualAggregate::Mean => "mean",
            AnnualAggregate::Min => "min",
            AnnualAggregate::Max => "max",
            AnnualAggregate::Sum => "sum",
            AnnualAggregate::Median => "median",
        }
    }
}

impl fmt::Display for AnnualAggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AnnualAggregate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mean" => Ok(AnnualAggregate::Mean),
            "min" => Ok(AnnualAggregate::Min),
            "max" => Ok(AnnualAggregate::Max),
            "sum" => Ok(AnnualAggregate::Sum),
            "median" => Ok(AnnualAggregate::Median),
            other => Err(format!("unknown aggregate '{}'", other)),
        }
    }
}

/// One aggregated value of a field for one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnualStatRow {
    pub year: i32,
    pub variable: Variable,
    pub aggregate: AnnualAggregate,
    /// `None` when the year has no non-null value for the field, for every
    /// aggregate including [`AnnualAggregate::Sum`].
    pub value: Option<f64>,
}

/// Aggregates one field per calendar year, ordered by year.
///
/// Returns an empty sequence when the field is absent.
pub fn annual_statistics(
    records: &DailyClimateFrame,
    variable: Variable,
    aggregate: AnnualAggregate,
) -> Result<Vec<AnnualStatRow>, ClimateRiskError> {
    if !records.has_variable(variable) {
        return Ok(Vec::new());
    }
    let grouped = records
        .frame()
        .clone()
        .lazy()
        .select([
            col(DATE_COLUMN).dt().year().alias("year"),
            col(variable.column_name()).alias("value"),
        ])
        .group_by([col("year")])
        .agg([when(col("value").count().gt(lit(0)))
            .then(aggregate.apply(col("value")))
            .otherwise(lit(LiteralValue::Null))
            .cast(DataType::Float64)
            .alias("value")])
        .sort(["year"], SortMultipleOptions::default())
        .collect()?;

    let years = grouped.column("year")?.i32()?;
    let values = grouped.column("value")?.f64()?;
    Ok(years
        .into_iter()
        .zip(values.into_iter())
        .filter_map(|(year, value)| {
            year.map(|year| AnnualStatRow {
                year,
                variable,
                aggregate,
                value,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DailyDataLoader;

    fn records() -> Result<DailyClimateFrame, Box<dyn std::error::Error>> {
        Ok(DailyDataLoader::from_dataframe(df!(
            "date" => &["2018-06-01", "2018-06-02", "2020-01-01", "2020-01-02", "2021-05-05"],
            "precip_mm" => &[Some(1.0), Some(3.0), Some(10.0), None, Some(4.0)]
        )?)?)
    }

    #[test]
    fn test_yearly_counts_emit_only_years_with_hits() -> Result<(), Box<dyn std::error::Error>> {
        let records = records()?;
        let masks = EventMasks::from_vecs(
            5,
            [
                (EventKey::RainDay, vec![true, true, true, false, true]),
                (EventKey::HeavyRain, vec![false, false, true, false, false]),
            ],
        )?;
        let rows = yearly_counts(&records, &masks)?;
        assert_eq!(
            rows,
            vec![
                YearlyCountRow { year: 2018, event_key: EventKey::RainDay, day_count: 2 },
                YearlyCountRow { year: 2020, event_key: EventKey::RainDay, day_count: 1 },
                YearlyCountRow { year: 2021, event_key: EventKey::RainDay, day_count: 1 },
                YearlyCountRow { year: 2020, event_key: EventKey::HeavyRain, day_count: 1 },
            ]
        );
        Ok(())
    }

    #[test]
    fn test_densify_fills_missing_years() {
        let rows = vec![
            YearlyCountRow { year: 2018, event_key: EventKey::Heat, day_count: 4 },
            YearlyCountRow { year: 2021, event_key: EventKey::Heat, day_count: 1 },
            YearlyCountRow { year: 2019, event_key: EventKey::Frost, day_count: 9 },
        ];
        let dense = densify_years(&rows, EventKey::Heat, None);
        assert_eq!(
            dense.iter().map(|r| (r.year, r.day_count)).collect::<Vec<_>>(),
            vec![(2018, 4), (2019, 0), (2020, 0), (2021, 1)]
        );
        let widened = densify_years(&rows, EventKey::Heat, Some((2017, 2018)));
        assert_eq!(
            widened.iter().map(|r| (r.year, r.day_count)).collect::<Vec<_>>(),
            vec![(2017, 0), (2018, 4)]
        );
        assert!(densify_years(&rows, EventKey::StrongWind, None).is_empty());
    }

    #[test]
    fn test_annual_statistics() -> Result<(), Box<dyn std::error::Error>> {
        let records = records()?;
        let sums = annual_statistics(&records, Variable::Precipitation, AnnualAggregate::Sum)?;
        assert_eq!(
            sums.iter().map(|r| (r.year, r.value)).collect::<Vec<_>>(),
            vec![(2018, Some(4.0)), (2020, Some(10.0)), (2021, Some(4.0))]
        );
        let means = annual_statistics(&records, Variable::Precipitation, AnnualAggregate::Mean)?;
        assert_eq!(means[0].value, Some(2.0));
        assert!(annual_statistics(&records, Variable::GustMax, AnnualAggregate::Max)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_all_null_year_has_no_value_for_any_aggregate() -> Result<(), Box<dyn std::error::Error>> {
        let records = DailyDataLoader::from_dataframe(df!(
            "date" => &["2018-02-01", "2018-02-02", "2019-02-01"],
            "precip_mm" => &[None, None, Some(2.5)]
        )?)?;
        for aggregate in [
            AnnualAggregate::Sum,
            AnnualAggregate::Mean,
            AnnualAggregate::Min,
            AnnualAggregate::Max,
            AnnualAggregate::Median,
        ] {
            let rows = annual_statistics(&records, Variable::Precipitation, aggregate)?;
            assert_eq!(
                rows.iter().map(|r| (r.year, r.value)).collect::<Vec<_>>(),
                vec![(2018, None), (2019, Some(2.5))],
                "aggregate {}",
                aggregate
            );
        }
        Ok(())
    }

    #[test]
    fn test_aggregate_parse() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!("median".parse::<AnnualAggregate>()?, AnnualAggregate::Median);
        assert!("mode".parse::<AnnualAggregate>().is_err());
        Ok(())
    }
}
