//! Thresholds for the event predicates.

use crate::ClimateRiskError;
use bon::bon;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One threshold per rule component of the event predicates.
///
/// The detector reads these values as given; nothing in detection falls back to
/// a default. [`EventParameters::default`] only exists as a starting point for
/// interactive use and carries the values the screening tool presents first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventParameters {
    /// Frost when `tmin_C <= frost_temp_C`.
    #[serde(alias = "frost_temp_C")]
    pub frost_temp_c: f64,
    /// Frost requires `wind_mean_ms <= frost_max_wind_ms`.
    pub frost_max_wind_ms: f64,
    /// Frost requires `|tmin_C - dew2m_mean_C| <= frost_max_dew_delta_C`.
    #[serde(alias = "frost_max_dew_delta_C")]
    pub frost_max_dew_delta_c: f64,
    /// Rain day when `precip_mm >= rain_threshold_mm`.
    pub rain_threshold_mm: f64,
    /// Heavy rain when `precip_mm >= heavy_rain_threshold_mm`.
    pub heavy_rain_threshold_mm: f64,
    /// Heat when `tmax_C >= heat_threshold_C`.
    #[serde(alias = "heat_threshold_C")]
    pub heat_threshold_c: f64,
    /// Strong wind when `gust_max_ms >= wind_gust_threshold_ms`.
    pub wind_gust_threshold_ms: f64,
}

impl Default for EventParameters {
    fn default() -> Self {
        Self {
            frost_temp_c: 0.0,
            frost_max_wind_ms: 3.0,
            frost_max_dew_delta_c: 2.0,
            rain_threshold_mm: 0.2,
            heavy_rain_threshold_mm: 20.0,
            heat_threshold_c: 35.0,
            wind_gust_threshold_ms: 20.0,
        }
    }
}

#[bon]
impl EventParameters {
    /// Builds a validated parameter set. Every threshold must be given.
    ///
    /// # Errors
    ///
    /// Returns [`ClimateRiskError::InvalidParameter`] when [`EventParameters::validate`] fails.
    ///
    /// # Example
    ///
    /// ```
    /// use climate_risk::EventParameters;
    ///
    /// let params = EventParameters::builder()
    ///     .frost_temp_c(0.0)
    ///     .frost_max_wind_ms(3.0)
    ///     .frost_max_dew_delta_c(2.0)
    ///     .rain_threshold_mm(0.2)
    ///     .heavy_rain_threshold_mm(20.0)
    ///     .heat_threshold_c(35.0)
    ///     .wind_gust_threshold_ms(20.0)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(params, EventParameters::default());
    /// ```
    #[builder]
    pub fn new(
        frost_temp_c: f64,
        frost_max_wind_ms: f64,
        frost_max_dew_delta_c: f64,
        rain_threshold_mm: f64,
        heavy_rain_threshold_mm: f64,
        heat_threshold_c: f64,
        wind_gust_threshold_ms: f64,
    ) -> Result<Self, ClimateRiskError> {
        let params = Self {
            frost_temp_c,
            frost_max_wind_ms,
            frost_max_dew_delta_c,
            rain_threshold_mm,
            heavy_rain_threshold_mm,
            heat_threshold_c,
            wind_gust_threshold_ms,
        };
        params.validate()?;
        Ok(params)
    }
}

impl EventParameters {
    /// Parameter names as accepted by [`EventParameters::set`].
    pub const NAMES: [&'static str; 7] = [
        "frost_temp_c",
        "frost_max_wind_ms",
        "frost_max_dew_delta_c",
        "rain_threshold_mm",
        "heavy_rain_threshold_mm",
        "heat_threshold_c",
        "wind_gust_threshold_ms",
    ];

    /// Checks that every value is finite and that a heavy-rain day is always a
    /// rain day (`heavy_rain_threshold_mm >= rain_threshold_mm`).
    pub fn validate(&self) -> Result<(), ClimateRiskError> {
        for (name, value) in self.named_values() {
            if !value.is_finite() {
                return Err(ClimateRiskError::InvalidParameter {
                    name: name.to_string(),
                    message: format!("value {} is not finite", value),
                });
            }
        }
        if self.heavy_rain_threshold_mm < self.rain_threshold_mm {
            return Err(ClimateRiskError::InvalidParameter {
                name: "heavy_rain_threshold_mm".to_string(),
                message: format!(
                    "{} mm is below rain_threshold_mm ({} mm)",
                    self.heavy_rain_threshold_mm, self.rain_threshold_mm
                ),
            });
        }
        Ok(())
    }

    /// All parameters as `(name, value)` pairs in declaration order.
    pub fn named_values(&self) -> [(&'static str, f64); 7] {
        [
            (Self::NAMES[0], self.frost_temp_c),
            (Self::NAMES[1], self.frost_max_wind_ms),
            (Self::NAMES[2], self.frost_max_dew_delta_c),
            (Self::NAMES[3], self.rain_threshold_mm),
            (Self::NAMES[4], self.heavy_rain_threshold_mm),
            (Self::NAMES[5], self.heat_threshold_c),
            (Self::NAMES[6], self.wind_gust_threshold_ms),
        ]
    }

    /// Overrides one parameter by name. Does not re-validate.
    ///
    /// Temperature parameters also accept their `_C` spelling, e.g. `heat_threshold_C`.
    pub fn set(&mut self, name: &str, value: f64) -> Result<(), ClimateRiskError> {
        let slot = match name {
            "frost_temp_c" | "frost_temp_C" => &mut self.frost_temp_c,
            "frost_max_wind_ms" => &mut self.frost_max_wind_ms,
            "frost_max_dew_delta_c" | "frost_max_dew_delta_C" => &mut self.frost_max_dew_delta_c,
            "rain_threshold_mm" => &mut self.rain_threshold_mm,
            "heavy_rain_threshold_mm" => &mut self.heavy_rain_threshold_mm,
            "heat_threshold_c" | "heat_threshold_C" => &mut self.heat_threshold_c,
            "wind_gust_threshold_ms" => &mut self.wind_gust_threshold_ms,
            _ => {
                return Err(ClimateRiskError::InvalidParameter {
                    name: name.to_string(),
                    message: format!("unknown parameter, expected one of {}", Self::NAMES.join(", ")),
                })
            }
        };
        *slot = value;
        Ok(())
    }

    /// Reads a full parameter set from a JSON object keyed by [`Self::NAMES`]
    /// and validates it.
    pub fn from_json_file(path: &Path) -> Result<Self, ClimateRiskError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ClimateRiskError::FileRead(path.to_path_buf(), e))?;
        let params: EventParameters = serde_json::from_str(&text)
            .map_err(|e| ClimateRiskError::ParameterFile(path.to_path_buf(), e))?;
        params.validate()?;
        Ok(params)
    }

    /// Applies a `key=value` override.
    pub fn apply_assignment(&mut self, assignment: &str) -> Result<(), ClimateRiskError> {
        let (name, raw_value) =
            assignment
                .split_once('=')
                .ok_or_else(|| ClimateRiskError::InvalidParameter {
                    name: assignment.to_string(),
                    message: "expected key=value".to_string(),
                })?;
        let name = name.trim();
        let value = raw_value
            .trim()
            .parse::<f64>()
            .map_err(|e| ClimateRiskError::InvalidParameter {
                name: name.to_string(),
                message: format!("'{}' is not a number ({})", raw_value.trim(), e),
            })?;
        self.set(name, value)
    }
}
