//! The structured result of one analysis run, handed to renderers.

use crate::analysis::event_detector::EventMasks;
use crate::analysis::frequency::{frequency_pct, masked_mean, FrequencySeverityRow};
use crate::analysis::seasonal_filter::SeasonalWindowInfo;
use crate::analysis::summary::{summarize_variables, VariableSummary};
use crate::analysis::yearly::{yearly_counts, YearlyCountRow};
use crate::daily_data::daily_frame::DailyClimateFrame;
use crate::daily_data::loader::LoadReport;
use crate::types::event::EventKey;
use crate::types::event_parameters::EventParameters;
use crate::types::location::Location;
use crate::types::variable::Variable;
use crate::ClimateRiskError;
use chrono::NaiveDate;
use serde::Serialize;

/// First and last date of the analysed records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Frequency, severity and descriptive statistics of one event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventReportRow {
    pub event_key: EventKey,
    /// False when a field the event needs is missing from the records. All
    /// counts are then zero and nothing is known about the event.
    pub computable: bool,
    pub n_days: usize,
    pub total_days: usize,
    pub freq_pct: f64,
    pub severity_metric: Variable,
    pub severity_mean: Option<f64>,
    /// Statistics over the event days of the report fields present in the
    /// records, in [`Variable::REPORT_STATS`] order.
    pub stats: Vec<VariableSummary>,
}

/// Everything a report needs, with every key always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportPayload {
    pub location: Location,
    pub period: Option<ReportPeriod>,
    pub total_days: usize,
    pub seasonal_window: Option<SeasonalWindowInfo>,
    /// Statistics over all records of every known field present, in catalog
    /// order. The fields listed here are the available variables.
    pub variables: Vec<VariableSummary>,
    /// One row per event of [`EventKey::ALL`], in display order.
    pub events: Vec<EventReportRow>,
    pub yearly_counts: Vec<YearlyCountRow>,
    pub parameters: EventParameters,
    pub load_report: LoadReport,
}

impl ReportPayload {
    /// Combines the outputs of one run into a payload.
    ///
    /// Events missing from `masks` get a non-computable all-zero row. Event rows
    /// reuse `freq_rows` where available so the report matches the summary the
    /// caller already shows. An empty `records` table yields zero counts and
    /// null severities, never an error.
    ///
    /// # Errors
    ///
    /// Returns [`ClimateRiskError::MaskLengthMismatch`] when `masks` were
    /// computed from another table.
    pub fn assemble(
        records: &DailyClimateFrame,
        window_info: Option<&SeasonalWindowInfo>,
        masks: &EventMasks,
        freq_rows: &[FrequencySeverityRow],
        params: &EventParameters,
        location: &Location,
    ) -> Result<Self, ClimateRiskError> {
        if masks.height() != records.height() {
            return Err(ClimateRiskError::MaskLengthMismatch {
                event: masks.keys().next().map(|k| k.to_string()).unwrap_or_default(),
                mask_len: masks.height(),
                records_len: records.height(),
            });
        }
        let total_days = records.height();

        let mut report_fields = Vec::new();
        for variable in Variable::REPORT_STATS {
            if let Some(values) = records.values(variable)? {
                report_fields.push((variable, values));
            }
        }
        let severity_values = |variable: Variable| {
            report_fields
                .iter()
                .find(|(v, _)| *v == variable)
                .map(|(_, values)| values.as_slice())
        };

        let events = EventKey::ALL
            .into_iter()
            .map(|event_key| {
                let severity_metric = event_key.severity_variable();
                let Some(flags) = masks.to_vec(event_key) else {
                    return EventReportRow {
                        event_key,
                        computable: false,
                        n_days: 0,
                        total_days,
                        freq_pct: 0.0,
                        severity_metric,
                        severity_mean: None,
                        stats: Vec::new(),
                    };
                };
                let (n_days, severity_mean) = match freq_rows.iter().find(|r| r.event_key == event_key) {
                    Some(row) => (row.n_days, row.severity_mean),
                    None => {
                        let n_days = flags.iter().filter(|f| **f).count();
                        let mean = severity_values(severity_metric).and_then(|values| masked_mean(values, &flags));
                        (n_days, mean)
                    }
                };
                let stats = report_fields
                    .iter()
                    .map(|(variable, values)| {
                        VariableSummary::from_values(
                            *variable,
                            values
                                .iter()
                                .zip(&flags)
                                .filter(|(_, hit)| **hit)
                                .filter_map(|(v, _)| *v),
                        )
                    })
                    .collect();
                EventReportRow {
                    event_key,
                    computable: true,
                    n_days,
                    total_days,
                    freq_pct: frequency_pct(n_days, total_days),
                    severity_metric,
                    severity_mean,
                    stats,
                }
            })
            .collect();

        Ok(ReportPayload {
            location: location.clone(),
            period: records
                .date_bounds()?
                .map(|(start, end)| ReportPeriod { start, end }),
            total_days,
            seasonal_window: window_info.cloned(),
            variables: summarize_variables(records)?,
            events,
            yearly_counts: yearly_counts(records, masks)?,
            parameters: *params,
            load_report: *records.load_report(),
        })
    }

    pub fn event(&self, event: EventKey) -> Option<&EventReportRow> {
        self.events.iter().find(|row| row.event_key == event)
    }

    /// True when no computable event occurred on any day.
    pub fn has_no_occurrences(&self) -> bool {
        self.events.iter().all(|row| row.n_days == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::event_detector::compute_event_masks;
    use crate::analysis::frequency::summarize_event_frequency_severity;
    use crate::analysis::seasonal_filter::SeasonalFilterExt;
    use crate::types::location::LatLon;
    use crate::types::seasonal_window::SeasonalWindow;
    use crate::DailyDataLoader;
    use polars::prelude::*;

    fn run(records: &DailyClimateFrame) -> Result<ReportPayload, Box<dyn std::error::Error>> {
        let params = EventParameters::default();
        let masks = compute_event_masks(records, &params)?;
        let rows = summarize_event_frequency_severity(records, &masks)?;
        Ok(ReportPayload::assemble(
            records,
            None,
            &masks,
            &rows,
            &params,
            &Location::new("Évora", Some(LatLon(38.57, -7.91))),
        )?)
    }

    #[test]
    fn test_payload_has_every_event() -> Result<(), Box<dyn std::error::Error>> {
        let records = DailyDataLoader::from_dataframe(df!(
            "date" => &["2020-07-01", "2020-07-02", "2021-07-01", "2021-07-02"],
            "precip_mm" => &[0.0, 25.0, 1.0, 0.0],
            "tmax_C" => &[36.0, 30.0, 38.0, 20.0],
            "tmin_C" => &[18.0, 17.0, 20.0, 10.0]
        )?)?;
        let payload = run(&records)?;
        assert_eq!(
            payload.events.iter().map(|r| r.event_key).collect::<Vec<_>>(),
            EventKey::ALL.to_vec()
        );
        assert_eq!(payload.total_days, 4);

        let frost = payload.event(EventKey::Frost).ok_or("frost row")?;
        assert!(!frost.computable, "frost needs wind and dew point");
        assert_eq!((frost.n_days, frost.freq_pct, frost.severity_mean), (0, 0.0, None));

        let heat = payload.event(EventKey::Heat).ok_or("heat row")?;
        assert!(heat.computable);
        assert_eq!(heat.n_days, 2);
        assert_eq!(heat.freq_pct, 50.0);
        assert_eq!(heat.severity_mean, Some(37.0));
        assert_eq!(
            heat.stats.iter().map(|s| s.variable).collect::<Vec<_>>(),
            vec![Variable::Precipitation, Variable::TemperatureMin, Variable::TemperatureMax]
        );
        assert_eq!(heat.stats[1].min, Some(18.0));
        assert_eq!(heat.stats[1].max, Some(20.0));

        let heavy = payload.event(EventKey::HeavyRain).ok_or("heavy row")?;
        assert_eq!(heavy.n_days, 1);
        assert_eq!(payload.yearly_counts.iter().filter(|r| r.event_key == EventKey::Heat).count(), 2);
        assert_eq!(
            payload.period,
            Some(ReportPeriod {
                start: NaiveDate::from_ymd_opt(2020, 7, 1).ok_or("date")?,
                end: NaiveDate::from_ymd_opt(2021, 7, 2).ok_or("date")?,
            })
        );
        assert!(!payload.has_no_occurrences());

        assert_eq!(
            payload.variables.iter().map(|v| v.variable).collect::<Vec<_>>(),
            vec![Variable::Precipitation, Variable::TemperatureMin, Variable::TemperatureMax]
        );
        let tmax = payload.variables[2];
        assert_eq!((tmax.count, tmax.min, tmax.max, tmax.mean), (4, Some(20.0), Some(38.0), Some(31.0)));
        Ok(())
    }

    #[test]
    fn test_empty_records_give_a_complete_payload() -> Result<(), Box<dyn std::error::Error>> {
        let records = DailyDataLoader::load_csv_bytes(b"date,precip_mm,tmax_C\n".to_vec())?;
        let selection = records.filter_seasonal(&SeasonalWindow::new(11, 15, 2, 15)?)?;
        let params = EventParameters::default();
        let masks = compute_event_masks(selection.frame(), &params)?;
        let rows = summarize_event_frequency_severity(selection.frame(), &masks)?;
        let payload = ReportPayload::assemble(
            selection.frame(),
            Some(selection.info()),
            &masks,
            &rows,
            &params,
            &Location::default(),
        )?;
        assert_eq!(payload.total_days, 0);
        assert_eq!(payload.period, None);
        assert_eq!(payload.events.len(), EventKey::ALL.len());
        assert!(payload.events.iter().all(|r| r.n_days == 0 && r.severity_mean.is_none()));
        assert!(payload.has_no_occurrences());

        let json = serde_json::to_value(&payload)?;
        for key in [
            "location",
            "period",
            "total_days",
            "seasonal_window",
            "variables",
            "events",
            "yearly_counts",
            "parameters",
            "load_report",
        ] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(json["seasonal_window"]["wraps"], serde_json::json!(true));
        assert_eq!(json["variables"].as_array().map(Vec::len), Some(2));
        assert!(payload.variables.iter().all(|v| v.count == 0 && v.mean.is_none()));
        Ok(())
    }

    #[test]
    fn test_missing_freq_rows_are_recomputed() -> Result<(), Box<dyn std::error::Error>> {
        let records = DailyDataLoader::from_dataframe(df!(
            "date" => &["2020-01-01", "2020-01-02"],
            "gust_max_ms" => &[25.0, 5.0]
        )?)?;
        let params = EventParameters::default();
        let masks = compute_event_masks(&records, &params)?;
        let payload = ReportPayload::assemble(&records, None, &masks, &[], &params, &Location::default())?;
        let wind = payload.event(EventKey::StrongWind).ok_or("wind row")?;
        assert_eq!((wind.n_days, wind.severity_mean), (1, Some(25.0)));
        Ok(())
    }
}
