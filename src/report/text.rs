//! Plain-text rendering of a [`ReportPayload`].

use crate::report::labels::{Labels, Language};
use crate::report::payload::{EventReportRow, ReportPayload};
use crate::types::event::EventKey;
use std::fmt;

fn fmt_stat(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

/// A payload paired with the language to render it in.
///
/// Rendering goes through [`fmt::Display`], so `to_string()` produces the full
/// report.
pub struct TextReport<'a> {
    payload: &'a ReportPayload,
    language: Language,
}

impl<'a> TextReport<'a> {
    pub fn new(payload: &'a ReportPayload, language: Language) -> Self {
        Self { payload, language }
    }

    fn labels(&self) -> &'static Labels {
        self.language.labels()
    }

    fn write_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = self.labels();
        let payload = self.payload;
        writeln!(f, "{}", labels.title)?;
        writeln!(f, "{}", "=".repeat(labels.title.chars().count()))?;
        writeln!(f, "{}: {}", labels.location, payload.location.name)?;
        if let Some((lat, lon)) = payload.location.latitude().zip(payload.location.longitude()) {
            writeln!(f, "{}: {:.4}, {:.4}", labels.coords, lat, lon)?;
        }
        if let Some(period) = payload.period {
            writeln!(f, "{}: {} - {}", labels.period, period.start, period.end)?;
        }
        if let Some(info) = &payload.seasonal_window {
            writeln!(
                f,
                "{}: {} ({}/{})",
                labels.seasonal_window, info.window, info.rows_after, info.rows_before
            )?;
        }
        Ok(())
    }

    fn write_variables(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = self.labels();
        let variables = &self.payload.variables;
        let names: Vec<&str> = variables.iter().map(|s| s.variable.column_name()).collect();
        writeln!(f, "{}: {}", labels.available_variables, names.join(", "))?;
        writeln!(f)?;
        writeln!(f, "{}", labels.variables_summary)?;
        writeln!(f, "  {:<26} {:>7} {:>9} {:>9} {:>9}", "", "n", "min", labels.mean, "max")?;
        for stat in variables {
            writeln!(
                f,
                "  {:<26} {:>7} {:>9} {:>9} {:>9}",
                labels.variable(stat.variable),
                stat.count,
                fmt_stat(stat.min),
                fmt_stat(stat.mean),
                fmt_stat(stat.max)
            )?;
        }
        Ok(())
    }

    fn write_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = self.labels();
        writeln!(f, "{}", labels.events_summary)?;
        writeln!(
            f,
            "{:<16} {:>12} {:>14} {:>18}",
            labels.event, labels.days, labels.prob, labels.severity
        )?;
        for row in &self.payload.events {
            let severity = match row.severity_mean {
                Some(mean) => format!("{:.2} ({})", mean, row.severity_metric),
                None => "-".to_string(),
            };
            writeln!(
                f,
                "{:<16} {:>12} {:>12.1} % {:>18}",
                labels.event(row.event_key),
                row.n_days,
                row.freq_pct,
                severity
            )?;
        }
        Ok(())
    }

    fn write_event(&self, f: &mut fmt::Formatter<'_>, row: &EventReportRow) -> fmt::Result {
        let labels = self.labels();
        let title = labels.event(row.event_key);
        writeln!(f, "{}", title)?;
        writeln!(f, "{}", "-".repeat(title.chars().count()))?;

        writeln!(f, "{}", labels.params)?;
        let values = self.payload.parameters.named_values();
        for (name, label) in labels.event_parameters(row.event_key) {
            if let Some((_, value)) = values.iter().find(|(n, _)| *n == name) {
                writeln!(f, "  {}: {}", label, value)?;
            }
        }

        if !row.computable {
            return writeln!(f, "{}", labels.not_computable);
        }
        if row.n_days == 0 {
            return writeln!(f, "{}", labels.no_data);
        }
        writeln!(f, "{}", labels.stats)?;
        writeln!(f, "  {:<26} {:>9} {:>9} {:>9}", "", "min", labels.mean, "max")?;
        for stat in &row.stats {
            writeln!(
                f,
                "  {:<26} {:>9} {:>9} {:>9}",
                labels.variable(stat.variable),
                fmt_stat(stat.min),
                fmt_stat(stat.mean),
                fmt_stat(stat.max)
            )?;
        }
        Ok(())
    }

    fn write_yearly(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = self.labels();
        writeln!(f, "{}", labels.yearly)?;
        for event in EventKey::ALL {
            let years: Vec<String> = self
                .payload
                .yearly_counts
                .iter()
                .filter(|r| r.event_key == event)
                .map(|r| format!("{}: {}", r.year, r.day_count))
                .collect();
            if !years.is_empty() {
                writeln!(f, "  {:<16} {}", labels.event(event), years.join(", "))?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_header(f)?;
        writeln!(f)?;
        if self.payload.total_days == 0 {
            writeln!(f, "{}", self.labels().no_records)?;
            writeln!(f)?;
        }
        if !self.payload.variables.is_empty() {
            self.write_variables(f)?;
            writeln!(f)?;
        }
        self.write_summary(f)?;
        for row in &self.payload.events {
            writeln!(f)?;
            self.write_event(f, row)?;
        }
        if !self.payload.yearly_counts.is_empty() {
            writeln!(f)?;
            self.write_yearly(f)?;
        }
        Ok(())
    }
}
