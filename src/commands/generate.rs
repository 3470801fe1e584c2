use anyhow::Context;
use climate_risk::{build_daily_script, parse_locations, ScriptRequest, SeasonalWindow};
use log::warn;
use std::path::Path;

pub fn run_generate(
    start_year: i32,
    end_year: i32,
    seasonal_window: Option<SeasonalWindow>,
    locations: &Path,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(locations)
        .with_context(|| format!("Could not read locations from {}", locations.display()))?;
    let locations = parse_locations(&text);
    if locations.is_empty() {
        warn!("No valid location found, the script only explains the expected format");
    }
    let request = ScriptRequest::builder()
        .start_year(start_year)
        .end_year(end_year)
        .maybe_seasonal_window(seasonal_window)
        .locations(locations)
        .build()?;
    println!("{}", build_daily_script(&request));
    Ok(())
}
