//! Subcommands of the `climate-risk` binary.

use clap::{Subcommand, ValueEnum};
use climate_risk::{Language, SeasonalWindow};
use std::path::PathBuf;

pub mod analyze;
pub mod generate;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Detect events in a daily CSV export and summarise them
    Analyze {
        /// Daily CSV with a `date` column and any of the known fields
        #[arg(long)]
        csv: PathBuf,

        /// Seasonal window as start_month,start_day,end_month,end_day
        #[arg(long, value_parser = parse_window)]
        seasonal_window: Option<SeasonalWindow>,

        /// JSON file with every event parameter
        #[arg(long)]
        params: Option<PathBuf>,

        /// Parameter override as name=value, repeatable
        #[arg(long = "param", value_name = "NAME=VALUE")]
        param_overrides: Vec<String>,

        #[arg(long, default_value = "Location")]
        location_name: String,

        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Report language: pt, en or es
        #[arg(long, default_value = "pt", value_parser = parse_language)]
        lang: Language,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Zero-fill yearly counts over every year of the analysed period
        #[arg(long)]
        densify: bool,
    },

    /// Print the remote script that exports daily CSV series
    Generate {
        #[arg(long)]
        start_year: i32,

        #[arg(long)]
        end_year: i32,

        /// Seasonal window as start_month,start_day,end_month,end_day
        #[arg(long, value_parser = parse_window)]
        seasonal_window: Option<SeasonalWindow>,

        /// Text file with one `Name, lon, lat` per line
        #[arg(long)]
        locations: PathBuf,
    },
}

fn parse_window(value: &str) -> Result<SeasonalWindow, String> {
    value.parse::<SeasonalWindow>().map_err(|e| e.to_string())
}

fn parse_language(value: &str) -> Result<Language, String> {
    value.parse::<Language>()
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Analyze {
            csv,
            seasonal_window,
            params,
            param_overrides,
            location_name,
            lat,
            lon,
            lang,
            format,
            densify,
        } => analyze::run_analyze(analyze::AnalyzeArgs {
            csv,
            seasonal_window,
            params,
            param_overrides,
            location_name,
            coordinate: lat.zip(lon),
            lang,
            format,
            densify,
        }),
        Command::Generate {
            start_year,
            end_year,
            seasonal_window,
            locations,
        } => generate::run_generate(start_year, end_year, seasonal_window, &locations),
    }
}
