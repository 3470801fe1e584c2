//! Event identifiers and the static catalog describing what each event needs.
//!
//! The catalog is the single capability query used by detection, aggregation and
//! reporting: an event is computable exactly when all of its
//! [`EventKey::required_variables`] are present in the record set.

use crate::types::variable::Variable;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named boolean climate condition.
///
/// The declaration order is the report display order, and `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKey {
    Frost,
    RainDay,
    HeavyRain,
    Heat,
    StrongWind,
}

impl EventKey {
    /// All events in display order.
    pub const ALL: [EventKey; 5] = [
        EventKey::Frost,
        EventKey::RainDay,
        EventKey::HeavyRain,
        EventKey::Heat,
        EventKey::StrongWind,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKey::Frost => "frost",
            EventKey::RainDay => "rain_day",
            EventKey::HeavyRain => "heavy_rain",
            EventKey::Heat => "heat",
            EventKey::StrongWind => "strong_wind",
        }
    }

    /// Fields the event predicate reads.
    pub fn required_variables(&self) -> &'static [Variable] {
        match self {
            EventKey::Frost => &[
                Variable::TemperatureMin,
                Variable::DewPointMean,
                Variable::WindMean,
            ],
            EventKey::RainDay | EventKey::HeavyRain => &[Variable::Precipitation],
            EventKey::Heat => &[Variable::TemperatureMax],
            EventKey::StrongWind => &[Variable::GustMax],
        }
    }

    /// Field whose mean over event days is reported as the event severity.
    pub fn severity_variable(&self) -> Variable {
        match self {
            EventKey::Frost => Variable::TemperatureMin,
            EventKey::RainDay | EventKey::HeavyRain => Variable::Precipitation,
            EventKey::Heat => Variable::TemperatureMax,
            EventKey::StrongWind => Variable::GustMax,
        }
    }

    /// Whether the event can be evaluated given the fields present.
    pub fn is_computable_with(&self, present: &[Variable]) -> bool {
        self.required_variables()
            .iter()
            .all(|required| present.contains(required))
    }

    /// Events that can be evaluated given the fields present, in display order.
    pub fn computable_with(present: &[Variable]) -> Vec<EventKey> {
        EventKey::ALL
            .into_iter()
            .filter(|event| event.is_computable_with(present))
            .collect()
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKey::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| format!("unknown event '{}'", s))
    }
}
