//! Threshold-based detection of climate events.

use crate::daily_data::daily_frame::DailyClimateFrame;
use crate::types::event::EventKey;
use crate::types::event_parameters::EventParameters;
use crate::types::variable::Variable;
use crate::ClimateRiskError;
use log::debug;
use polars::prelude::*;
use std::collections::BTreeMap;

/// One boolean indicator per computable event, aligned row-by-row with the
/// records it was computed from.
///
/// An event missing from the map could not be evaluated (some required field is
/// absent). That is different from an event that is present with zero hits.
#[derive(Debug, Clone, Default)]
pub struct EventMasks {
    height: usize,
    masks: BTreeMap<EventKey, BooleanChunked>,
}

impl EventMasks {
    /// An empty set of masks for a table of `height` records.
    pub fn new(height: usize) -> Self {
        Self {
            height,
            masks: BTreeMap::new(),
        }
    }

    /// Adds or replaces the mask of `event`.
    ///
    /// # Errors
    ///
    /// Returns [`ClimateRiskError::MaskLengthMismatch`] when the mask length differs
    /// from the record count.
    pub fn insert(&mut self, event: EventKey, mask: BooleanChunked) -> Result<(), ClimateRiskError> {
        if mask.len() != self.height {
            return Err(ClimateRiskError::MaskLengthMismatch {
                event: event.to_string(),
                mask_len: mask.len(),
                records_len: self.height,
            });
        }
        self.masks.insert(event, mask.with_name(event.as_str().into()));
        Ok(())
    }

    /// Builds masks from plain boolean vectors.
    pub fn from_vecs(
        height: usize,
        masks: impl IntoIterator<Item = (EventKey, Vec<bool>)>,
    ) -> Result<Self, ClimateRiskError> {
        let mut out = Self::new(height);
        for (event, values) in masks {
            out.insert(event, BooleanChunked::from_slice(event.as_str().into(), &values))?;
        }
        Ok(out)
    }

    /// Number of records every mask covers.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, event: EventKey) -> Option<&BooleanChunked> {
        self.masks.get(&event)
    }

    pub fn contains(&self, event: EventKey) -> bool {
        self.masks.contains_key(&event)
    }

    /// Computed events in display order.
    pub fn keys(&self) -> impl Iterator<Item = EventKey> + '_ {
        self.masks.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EventKey, &BooleanChunked)> + '_ {
        self.masks.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    /// Number of event days, or `None` when the event was not computable.
    pub fn count(&self, event: EventKey) -> Option<usize> {
        self.get(event).map(count_true)
    }

    /// The mask of `event` as plain booleans.
    pub fn to_vec(&self, event: EventKey) -> Option<Vec<bool>> {
        self.get(event)
            .map(|mask| mask.into_iter().map(|v| v.unwrap_or(false)).collect())
    }
}

pub(crate) fn count_true(mask: &BooleanChunked) -> usize {
    mask.into_iter().filter(|v| *v == Some(true)).count()
}

fn column(variable: Variable) -> Expr {
    col(variable.column_name())
}

/// The predicate of `event`, with nulls in any input counted as "no event".
fn event_expr(event: EventKey, params: &EventParameters) -> Expr {
    let predicate = match event {
        EventKey::Frost => {
            let dew_delta = column(Variable::TemperatureMin) - column(Variable::DewPointMean);
            column(Variable::TemperatureMin)
                .lt_eq(lit(params.frost_temp_c))
                .and(column(Variable::WindMean).lt_eq(lit(params.frost_max_wind_ms)))
                // |delta| <= max, written as two bounds
                .and(dew_delta.clone().lt_eq(lit(params.frost_max_dew_delta_c)))
                .and(dew_delta.gt_eq(lit(-params.frost_max_dew_delta_c)))
        }
        EventKey::RainDay => column(Variable::Precipitation).gt_eq(lit(params.rain_threshold_mm)),
        EventKey::HeavyRain => {
            column(Variable::Precipitation).gt_eq(lit(params.heavy_rain_threshold_mm))
        }
        EventKey::Heat => column(Variable::TemperatureMax).gt_eq(lit(params.heat_threshold_c)),
        EventKey::StrongWind => column(Variable::GustMax).gt_eq(lit(params.wind_gust_threshold_ms)),
    };
    predicate.fill_null(lit(false)).alias(event.as_str())
}

/// Computes one indicator per event whose required fields are all present.
///
/// Events with a missing field are left out of the result entirely. When no
/// event is computable the result is empty, which is not an error.
///
/// The thresholds are used exactly as given; in particular the ordering of the
/// rain and heavy-rain thresholds is not enforced here (see
/// [`EventParameters::validate`]).
pub fn compute_event_masks(
    records: &DailyClimateFrame,
    params: &EventParameters,
) -> Result<EventMasks, ClimateRiskError> {
    let present = records.available_variables();
    let computable = EventKey::computable_with(&present);
    for skipped in EventKey::ALL.iter().filter(|e| !computable.contains(e)) {
        debug!(
            "Skipping event '{}': requires [{}]",
            skipped,
            skipped
                .required_variables()
                .iter()
                .map(|v| v.column_name())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    let mut masks = EventMasks::new(records.height());
    if computable.is_empty() {
        return Ok(masks);
    }

    let exprs: Vec<Expr> = computable.iter().map(|e| event_expr(*e, params)).collect();
    let indicators = records.frame().clone().lazy().select(exprs).collect()?;
    for event in computable {
        let mask = indicators.column(event.as_str())?.bool()?.clone();
        masks.insert(event, mask)?;
    }
    debug!(
        "Computed masks for [{}] over {} records",
        masks.keys().map(|k| k.as_str()).collect::<Vec<_>>().join(", "),
        masks.height()
    );
    Ok(masks)
}
