use crate::types::event::EventKey;
use crate::types::variable::Variable;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language of a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Pt,
    En,
    Es,
}

/// Fixed strings of a report in one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub title: &'static str,
    pub location: &'static str,
    pub coords: &'static str,
    pub period: &'static str,
    pub seasonal_window: &'static str,
    pub available_variables: &'static str,
    pub variables_summary: &'static str,
    pub events_summary: &'static str,
    pub event: &'static str,
    pub days: &'static str,
    pub prob: &'static str,
    pub severity: &'static str,
    pub params: &'static str,
    pub stats: &'static str,
    pub mean: &'static str,
    pub no_data: &'static str,
    pub no_records: &'static str,
    pub not_computable: &'static str,
    pub yearly: &'static str,
    frost: &'static str,
    rain_day: &'static str,
    heavy_rain: &'static str,
    heat: &'static str,
    strong_wind: &'static str,
    precip: &'static str,
    tmin: &'static str,
    tmax: &'static str,
    tmean: &'static str,
    dew: &'static str,
    wind: &'static str,
    gust: &'static str,
    frost_temp: &'static str,
    frost_max_wind: &'static str,
    frost_dew_delta: &'static str,
    rain_thresh: &'static str,
    heavy_rain_thresh: &'static str,
    heat_thresh: &'static str,
    wind_gust_thresh: &'static str,
}

const PT: Labels = Labels {
    title: "Análise de Risco Climático",
    location: "Localização",
    coords: "Coordenadas",
    period: "Período analisado",
    seasonal_window: "Janela sazonal aplicada",
    available_variables: "Variáveis disponíveis",
    variables_summary: "Resumo estatístico",
    events_summary: "Resumo de frequência e severidade dos eventos",
    event: "Evento",
    days: "N.º de dias",
    prob: "Probabilidade",
    severity: "Severidade média",
    params: "Parâmetros utilizados",
    stats: "Estatísticas principais",
    mean: "média",
    no_data: "Sem ocorrências neste período.",
    no_records: "Sem registos diários para analisar.",
    not_computable: "Não calculável: faltam variáveis no ficheiro.",
    yearly: "Dias de evento por ano",
    frost: "Geada",
    rain_day: "Dia chuvoso",
    heavy_rain: "Chuva forte",
    heat: "Calor extremo",
    strong_wind: "Vento forte",
    precip: "Precipitação (mm/dia)",
    tmin: "Tmin (°C)",
    tmax: "Tmax (°C)",
    tmean: "Tmean (°C)",
    dew: "Ponto de orvalho (°C)",
    wind: "Vento médio (m/s)",
    gust: "Rajada máx. (m/s)",
    frost_temp: "Tmin geada ≤ (°C)",
    frost_max_wind: "Vento máx. (m/s)",
    frost_dew_delta: "|Tmin - Td| máx. (°C)",
    rain_thresh: "Dia chuvoso ≥ (mm)",
    heavy_rain_thresh: "Chuva forte ≥ (mm)",
    heat_thresh: "Calor extremo Tmax ≥ (°C)",
    wind_gust_thresh: "Rajada forte ≥ (m/s)",
};

const EN: Labels = Labels {
    title: "Climate Risk Analysis",
    location: "Location",
    coords: "Coordinates",
    period: "Analysed period",
    seasonal_window: "Applied seasonal window",
    available_variables: "Available variables",
    variables_summary: "Statistical summary",
    events_summary: "Summary of event frequency and severity",
    event: "Event",
    days: "No. of days",
    prob: "Probability",
    severity: "Mean severity",
    params: "Parameters used",
    stats: "Key statistics",
    mean: "mean",
    no_data: "No occurrences in this period.",
    no_records: "No daily records to analyse.",
    not_computable: "Not computable: required fields are missing from the file.",
    yearly: "Event days per year",
    frost: "Frost",
    rain_day: "Rainy day",
    heavy_rain: "Heavy rain",
    heat: "Heatwave",
    strong_wind: "Strong wind",
    precip: "Precipitation (mm/day)",
    tmin: "Tmin (°C)",
    tmax: "Tmax (°C)",
    tmean: "Tmean (°C)",
    dew: "Dew point (°C)",
    wind: "Mean wind (m/s)",
    gust: "Max gust (m/s)",
    frost_temp: "Frost Tmin ≤ (°C)",
    frost_max_wind: "Max wind (m/s)",
    frost_dew_delta: "|Tmin - Td| max (°C)",
    rain_thresh: "Rainy day ≥ (mm)",
    heavy_rain_thresh: "Heavy rain ≥ (mm)",
    heat_thresh: "Heatwave Tmax ≥ (°C)",
    wind_gust_thresh: "Strong gust ≥ (m/s)",
};

const ES: Labels = Labels {
    title: "Análisis de Riesgo Climático",
    location: "Localización",
    coords: "Coordenadas",
    period: "Período analizado",
    seasonal_window: "Ventana estacional aplicada",
    available_variables: "Variables disponibles",
    variables_summary: "Resumen estadístico",
    events_summary: "Resumen de frecuencia y severidad de eventos",
    event: "Evento",
    days: "N.º de días",
    prob: "Probabilidad",
    severity: "Severidad media",
    params: "Parámetros utilizados",
    stats: "Estadísticas principales",
    mean: "media",
    no_data: "Sin ocurrencias en este período.",
    no_records: "Sin registros diarios para analizar.",
    not_computable: "No calculable: faltan variables en el archivo.",
    yearly: "Días de evento por año",
    frost: "Helada",
    rain_day: "Día lluvioso",
    heavy_rain: "Lluvia intensa",
    heat: "Calor extremo",
    strong_wind: "Viento fuerte",
    precip: "Precipitación (mm/día)",
    tmin: "Tmin (°C)",
    tmax: "Tmax (°C)",
    tmean: "Tmean (°C)",
    dew: "Punto de rocío (°C)",
    wind: "Viento medio (m/s)",
    gust: "Ráfaga máx. (m/s)",
    frost_temp: "Tmin helada ≤ (°C)",
    frost_max_wind: "Viento máx. (m/s)",
    frost_dew_delta: "|Tmin - Td| máx. (°C)",
    rain_thresh: "Día lluvioso ≥ (mm)",
    heavy_rain_thresh: "Lluvia intensa ≥ (mm)",
    heat_thresh: "Calor extremo Tmax ≥ (°C)",
    wind_gust_thresh: "Ráfaga fuerte ≥ (m/s)",
};

impl Language {
    pub fn labels(&self) -> &'static Labels {
        match self {
            Language::Pt => &PT,
            Language::En => &EN,
            Language::Es => &ES,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::Pt => "pt",
            Language::En => "en",
            Language::Es => "es",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pt" => Ok(Language::Pt),
            "en" => Ok(Language::En),
            "es" => Ok(Language::Es),
            other => Err(format!("unsupported language '{}', expected pt, en or es", other)),
        }
    }
}

impl Labels {
    pub fn event(&self, event: EventKey) -> &'static str {
        match event {
            EventKey::Frost => self.frost,
            EventKey::RainDay => self.rain_day,
            EventKey::HeavyRain => self.heavy_rain,
            EventKey::Heat => self.heat,
            EventKey::StrongWind => self.strong_wind,
        }
    }

    /// Row label of a report statistic. Fields outside
    /// [`Variable::REPORT_STATS`] fall back to their column name.
    pub fn variable(&self, variable: Variable) -> &'static str {
        match variable {
            Variable::Precipitation => self.precip,
            Variable::TemperatureMin => self.tmin,
            Variable::TemperatureMax => self.tmax,
            Variable::TemperatureMean => self.tmean,
            Variable::DewPointMean => self.dew,
            Variable::WindMean => self.wind,
            Variable::GustMax => self.gust,
            other => other.column_name(),
        }
    }

    /// Labels of the parameters that drive `event`, keyed by parameter name.
    pub fn event_parameters(&self, event: EventKey) -> Vec<(&'static str, &'static str)> {
        match event {
            EventKey::Frost => vec![
                ("frost_temp_c", self.frost_temp),
                ("frost_max_wind_ms", self.frost_max_wind),
                ("frost_max_dew_delta_c", self.frost_dew_delta),
            ],
            EventKey::RainDay => vec![("rain_threshold_mm", self.rain_thresh)],
            EventKey::HeavyRain => vec![("heavy_rain_threshold_mm", self.heavy_rain_thresh)],
            EventKey::Heat => vec![("heat_threshold_c", self.heat_thresh)],
            EventKey::StrongWind => vec![("wind_gust_threshold_ms", self.wind_gust_thresh)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EventParameters;

    #[test]
    fn test_parse_language() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!("EN".parse::<Language>()?, Language::En);
        assert_eq!(Language::default(), Language::Pt);
        assert!("fr".parse::<Language>().is_err());
        Ok(())
    }

    #[test]
    fn test_event_parameter_keys_exist() {
        for event in EventKey::ALL {
            for (name, _) in EN.event_parameters(event) {
                assert!(EventParameters::NAMES.contains(&name), "{} is not a parameter", name);
            }
        }
    }

    #[test]
    fn test_labels_differ_per_language() {
        assert_eq!(Language::Pt.labels().event(EventKey::Frost), "Geada");
        assert_eq!(Language::En.labels().event(EventKey::Frost), "Frost");
        assert_eq!(Language::Es.labels().event(EventKey::Frost), "Helada");
        assert_eq!(Language::En.labels().variable(Variable::SoilWaterLayer1), "soilw1_mean");
    }
}
