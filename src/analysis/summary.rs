use crate::daily_data::daily_frame::DailyClimateFrame;
use crate::types::variable::Variable;
use crate::ClimateRiskError;
use serde::Serialize;

/// Descriptive statistics of one field over a whole table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VariableSummary {
    pub variable: Variable,
    /// Number of non-null values.
    pub count: usize,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl VariableSummary {
    pub(crate) fn from_values(variable: Variable, values: impl IntoIterator<Item = f64>) -> Self {
        let mut summary = VariableSummary {
            variable,
            count: 0,
            mean: None,
            min: None,
            max: None,
        };
        let mut sum = 0.0;
        for v in values {
            summary.count += 1;
            sum += v;
            summary.min = Some(summary.min.map_or(v, |m: f64| m.min(v)));
            summary.max = Some(summary.max.map_or(v, |m: f64| m.max(v)));
        }
        if summary.count > 0 {
            summary.mean = Some(sum / summary.count as f64);
        }
        summary
    }
}

/// Summarises every known field present in `records`, in catalog order.
pub fn summarize_variables(records: &DailyClimateFrame) -> Result<Vec<VariableSummary>, ClimateRiskError> {
    let mut out = Vec::new();
    for variable in records.available_variables() {
        let values = records.values(variable)?.unwrap_or_default();
        out.push(VariableSummary::from_values(variable, values.into_iter().flatten()));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DailyDataLoader;
    use polars::prelude::*;

    #[test]
    fn test_summaries_skip_nulls() -> Result<(), Box<dyn std::error::Error>> {
        let records = DailyDataLoader::from_dataframe(df!(
            "date" => &["2020-01-01", "2020-01-02", "2020-01-03"],
            "tmin_C" => &[Some(-2.0), None, Some(4.0)],
            "soilw1_mean" => &[0.25, 0.25, 0.25]
        )?)?;
        let summaries = summarize_variables(&records)?;
        assert_eq!(summaries.len(), 2);
        assert_eq!(
            summaries[0],
            VariableSummary {
                variable: Variable::TemperatureMin,
                count: 2,
                mean: Some(1.0),
                min: Some(-2.0),
                max: Some(4.0),
            }
        );
        assert_eq!(summaries[1].variable, Variable::SoilWaterLayer1);
        Ok(())
    }

    #[test]
    fn test_empty_table_has_null_statistics() -> Result<(), Box<dyn std::error::Error>> {
        let records = DailyDataLoader::load_csv_bytes(b"date,precip_mm\n".to_vec())?;
        let summaries = summarize_variables(&records)?;
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].count, 0);
        assert_eq!((summaries[0].mean, summaries[0].min, summaries[0].max), (None, None, None));
        Ok(())
    }
}
