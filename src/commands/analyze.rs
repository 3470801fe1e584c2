use crate::commands::OutputFormat;
use anyhow::Context;
use chrono::Datelike;
use climate_risk::{
    compute_event_masks, densify_years, summarize_event_frequency_severity, DailyDataLoader,
    EventParameters, LatLon, Language, Location, ReportPayload, SeasonalFilterExt, SeasonalWindow,
    TextReport,
};
use log::info;
use std::path::PathBuf;

pub struct AnalyzeArgs {
    pub csv: PathBuf,
    pub seasonal_window: Option<SeasonalWindow>,
    pub params: Option<PathBuf>,
    pub param_overrides: Vec<String>,
    pub location_name: String,
    /// `(lat, lon)`
    pub coordinate: Option<(f64, f64)>,
    pub lang: Language,
    pub format: OutputFormat,
    pub densify: bool,
}

fn resolve_parameters(args: &AnalyzeArgs) -> anyhow::Result<EventParameters> {
    let mut params = match &args.params {
        Some(path) => EventParameters::from_json_file(path)?,
        None => EventParameters::default(),
    };
    for assignment in &args.param_overrides {
        params.apply_assignment(assignment)?;
    }
    params.validate()?;
    Ok(params)
}

pub fn run_analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let params = resolve_parameters(&args)?;
    let records = DailyDataLoader::load_csv(&args.csv)
        .with_context(|| format!("Could not load {}", args.csv.display()))?;

    let (records, window_info) = match &args.seasonal_window {
        Some(window) => {
            let (frame, info) = records.filter_seasonal(window)?.into_parts();
            (frame, Some(info))
        }
        None => (records, None),
    };

    let masks = compute_event_masks(&records, &params)?;
    let freq_rows = summarize_event_frequency_severity(&records, &masks)?;
    let location = Location::new(
        args.location_name.as_str(),
        args.coordinate.map(|(lat, lon)| LatLon(lat, lon)),
    );
    let mut payload = ReportPayload::assemble(
        &records,
        window_info.as_ref(),
        &masks,
        &freq_rows,
        &params,
        &location,
    )?;

    if args.densify {
        if let Some(period) = payload.period {
            let years = (period.start.year(), period.end.year());
            payload.yearly_counts = masks
                .keys()
                .flat_map(|event| densify_years(&payload.yearly_counts, event, Some(years)))
                .collect();
        }
    }
    info!(
        "Analysed {} records, {} computable events",
        payload.total_days,
        masks.len()
    );

    match args.format {
        OutputFormat::Text => print!("{}", TextReport::new(&payload, args.lang)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&payload)?),
    }
    Ok(())
}
