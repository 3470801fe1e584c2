//! Frequency and severity of detected events.

use crate::analysis::event_detector::{count_true, EventMasks};
use crate::daily_data::daily_frame::DailyClimateFrame;
use crate::types::event::EventKey;
use crate::types::variable::Variable;
use crate::ClimateRiskError;
use serde::Serialize;

/// Frequency and severity of one event over one record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencySeverityRow {
    pub event_key: EventKey,
    pub n_days: usize,
    /// Size of the record set; identical for every row of one summary.
    pub total_days: usize,
    pub freq_pct: f64,
    pub severity_metric: Variable,
    /// Mean of [`Self::severity_metric`] over event days. `None` when the event
    /// never occurred, never a fabricated `0.0`.
    pub severity_mean: Option<f64>,
}

/// Mean of the non-null `values` on rows where `mask` holds.
pub(crate) fn masked_mean(values: &[Option<f64>], mask: &[bool]) -> Option<f64> {
    let (sum, n) = values
        .iter()
        .zip(mask)
        .filter(|(_, m)| **m)
        .filter_map(|(v, _)| *v)
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

pub(crate) fn frequency_pct(n_days: usize, total_days: usize) -> f64 {
    if total_days == 0 {
        0.0
    } else {
        100.0 * n_days as f64 / total_days as f64
    }
}

fn check_alignment(records: &DailyClimateFrame, masks: &EventMasks) -> Result<(), ClimateRiskError> {
    if masks.height() != records.height() {
        let event = masks
            .keys()
            .next()
            .map(|k| k.to_string())
            .unwrap_or_default();
        return Err(ClimateRiskError::MaskLengthMismatch {
            event,
            mask_len: masks.height(),
            records_len: records.height(),
        });
    }
    Ok(())
}

/// Summarises every event present in `masks`, in display order.
///
/// Events absent from `masks` are absent from the output. An empty record set
/// produces rows with zero days, `0.0` frequency and no severity.
///
/// # Errors
///
/// Returns [`ClimateRiskError::MaskLengthMismatch`] when `masks` was computed
/// from a different record set.
pub fn summarize_event_frequency_severity(
    records: &DailyClimateFrame,
    masks: &EventMasks,
) -> Result<Vec<FrequencySeverityRow>, ClimateRiskError> {
    check_alignment(records, masks)?;
    let total_days = records.height();

    masks
        .iter()
        .map(|(event_key, mask)| -> Result<FrequencySeverityRow, ClimateRiskError> {
            let n_days = count_true(mask);
            let severity_metric = event_key.severity_variable();
            let severity_mean = if n_days == 0 {
                None
            } else {
                let flags: Vec<bool> = mask.into_iter().map(|v| v.unwrap_or(false)).collect();
                records
                    .values(severity_metric)?
                    .and_then(|values| masked_mean(&values, &flags))
            };
            Ok(FrequencySeverityRow {
                event_key,
                n_days,
                total_days,
                freq_pct: frequency_pct(n_days, total_days),
                severity_metric,
                severity_mean,
            })
        })
        .collect()
}
