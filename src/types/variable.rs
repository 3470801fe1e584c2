//! The daily fields a remote export may contain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the optional numeric fields of a daily record.
///
/// Every field is optional in an export: a CSV only carries the fields the
/// generating query selected. The declaration order is the CSV column order the
/// script generator writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Variable {
    /// Daily precipitation total (mm).
    #[serde(rename = "precip_mm")]
    Precipitation,
    /// Daily minimum 2 m temperature (C).
    #[serde(rename = "tmin_C")]
    TemperatureMin,
    /// Daily maximum 2 m temperature (C).
    #[serde(rename = "tmax_C")]
    TemperatureMax,
    /// Daily mean 2 m temperature (C).
    #[serde(rename = "tmean_C")]
    TemperatureMean,
    /// Daily mean 2 m dew point (C).
    #[serde(rename = "dew2m_mean_C")]
    DewPointMean,
    /// Mean volumetric soil water, layer 1 (0-7 cm), as a fraction.
    #[serde(rename = "soilw1_mean")]
    SoilWaterLayer1,
    /// Daily surface solar radiation sum (J/m2).
    #[serde(rename = "rad_Jm2_day")]
    RadiationDaily,
    /// Mean surface solar radiation (W/m2).
    #[serde(rename = "rad_Wm2_mean")]
    RadiationMean,
    /// Daily potential evaporation (mm).
    #[serde(rename = "pev_mm_day")]
    PotentialEvaporation,
    /// Daily mean 10 m wind speed (m/s).
    #[serde(rename = "wind_mean_ms")]
    WindMean,
    /// Daily maximum 10 m wind gust (m/s).
    #[serde(rename = "gust_max_ms")]
    GustMax,
}

impl Variable {
    pub const ALL: [Variable; 11] = [
        Variable::Precipitation,
        Variable::TemperatureMin,
        Variable::TemperatureMax,
        Variable::TemperatureMean,
        Variable::DewPointMean,
        Variable::SoilWaterLayer1,
        Variable::RadiationDaily,
        Variable::RadiationMean,
        Variable::PotentialEvaporation,
        Variable::WindMean,
        Variable::GustMax,
    ];

    /// Fields summarised per event in reports, in display order.
    pub const REPORT_STATS: [Variable; 7] = [
        Variable::Precipitation,
        Variable::TemperatureMin,
        Variable::TemperatureMax,
        Variable::TemperatureMean,
        Variable::DewPointMean,
        Variable::WindMean,
        Variable::GustMax,
    ];

    /// The CSV column name of this field.
    pub fn column_name(&self) -> &'static str {
        match self {
            Variable::Precipitation => "precip_mm",
            Variable::TemperatureMin => "tmin_C",
            Variable::TemperatureMax => "tmax_C",
            Variable::TemperatureMean => "tmean_C",
            Variable::DewPointMean => "dew2m_mean_C",
            Variable::SoilWaterLayer1 => "soilw1_mean",
            Variable::RadiationDaily => "rad_Jm2_day",
            Variable::RadiationMean => "rad_Wm2_mean",
            Variable::PotentialEvaporation => "pev_mm_day",
            Variable::WindMean => "wind_mean_ms",
            Variable::GustMax => "gust_max_ms",
        }
    }

    pub fn from_column_name(name: &str) -> Option<Variable> {
        Variable::ALL
            .into_iter()
            .find(|v| v.column_name() == name)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_name())
    }
}
