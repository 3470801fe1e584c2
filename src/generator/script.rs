//! Text generation of the remote script that exports daily CSV series.
//!
//! The generated script aggregates hourly ERA5-Land and ERA5 reanalysis to one
//! row per day and location, restricted to the seasonal window, and exports a
//! CSV whose columns are exactly the fields [`crate::DailyDataLoader`] reads.
//! Nothing here talks to the remote platform.

use crate::generator::locations::sanitize_name;
use crate::types::location::Location;
use crate::types::seasonal_window::SeasonalWindow;
use crate::ClimateRiskError;
use bon::bon;

/// Everything needed to generate one export script.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptRequest {
    pub start_year: i32,
    pub end_year: i32,
    pub seasonal_window: SeasonalWindow,
    pub locations: Vec<Location>,
}

#[bon]
impl ScriptRequest {
    /// Validated request. The seasonal window defaults to the whole year.
    ///
    /// # Errors
    ///
    /// Returns [`ClimateRiskError::InvalidYearRange`] when `start_year > end_year`.
    #[builder]
    pub fn new(
        start_year: i32,
        end_year: i32,
        seasonal_window: Option<SeasonalWindow>,
        #[builder(default)] locations: Vec<Location>,
    ) -> Result<Self, ClimateRiskError> {
        if start_year > end_year {
            return Err(ClimateRiskError::InvalidYearRange {
                start: start_year,
                end: end_year,
            });
        }
        Ok(Self {
            start_year,
            end_year,
            seasonal_window: seasonal_window.unwrap_or_else(SeasonalWindow::full_year),
            locations,
        })
    }

    /// Export task name of one location.
    pub fn export_name(&self, location: &Location) -> String {
        format!(
            "ERA5_daily_{}_{}_{}",
            sanitize_name(&location.name),
            self.start_year,
            self.end_year
        )
    }
}

fn js_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

const NO_LOCATIONS: &str = "\
// ERROR: no valid location was found.
// Expected one location per line: Name, lon, lat
// Example: Futrono, -72.4, -40.15
";

const SCRIPT_BODY: &str = r#"
// Day of year in a non-leap reference year; Feb 29 folds onto Feb 28.
var referenceDoy = function(day) {
  var ref = ee.Date.fromYMD(2001, day.get('month'), ee.Number(day.get('day')).min(
    ee.Date.fromYMD(2001, day.get('month'), 1).advance(1, 'month').advance(-1, 'day').get('day')));
  return ref.getRelative('day', 'year').add(1);
};

var startDoy = ee.Date.fromYMD(2001, startMonth, startDay).getRelative('day', 'year').add(1);
var endDoy = ee.Date.fromYMD(2001, endMonth, endDay).getRelative('day', 'year').add(1);
var wrapsYear = startDoy.gt(endDoy);

var land = ee.ImageCollection('ECMWF/ERA5_LAND/HOURLY')
  .filter(ee.Filter.calendarRange(startYear, endYear, 'year'));
var atmos = ee.ImageCollection('ECMWF/ERA5/HOURLY')
  .filter(ee.Filter.calendarRange(startYear, endYear, 'year'));

var dailyRow = function(day, point) {
  var next = day.advance(1, 'day');
  var landDay = land.filterDate(day, next);
  var atmosDay = atmos.filterDate(day, next);

  var image = ee.Image.cat([
    landDay.select('total_precipitation').max().rename('precip_m'),
    landDay.select('temperature_2m').min().rename('tmin_K'),
    landDay.select('temperature_2m').max().rename('tmax_K'),
    landDay.select('temperature_2m').mean().rename('tmean_K'),
    landDay.select('dewpoint_temperature_2m').mean().rename('dew_K'),
    landDay.select('volumetric_soil_water_layer_1').mean().rename('soilw1'),
    landDay.select('surface_solar_radiation_downwards').sum().rename('rad_Jm2'),
    landDay.select('surface_solar_radiation_downwards').mean().rename('rad_Jm2_h'),
    landDay.select('potential_evaporation').sum().rename('pev_m'),
    atmosDay.select('u_component_of_wind_10m').mean().rename('u10'),
    atmosDay.select('v_component_of_wind_10m').mean().rename('v10'),
    atmosDay.select('instantaneous_10m_wind_gust').max().rename('gust10')
  ]);
  var v = image.reduceRegion({
    reducer: ee.Reducer.mean(),
    geometry: point,
    scale: 11100,
    bestEffort: true
  });
  var u10 = ee.Number(v.get('u10'));
  var v10 = ee.Number(v.get('v10'));

  return ee.Feature(null, {
    'date': day.format('YYYY-MM-dd'),
    'precip_mm': ee.Number(v.get('precip_m')).multiply(1000),
    'tmin_C': ee.Number(v.get('tmin_K')).subtract(273.15),
    'tmax_C': ee.Number(v.get('tmax_K')).subtract(273.15),
    'tmean_C': ee.Number(v.get('tmean_K')).subtract(273.15),
    'dew2m_mean_C': ee.Number(v.get('dew_K')).subtract(273.15),
    'soilw1_mean': v.get('soilw1'),
    'rad_Jm2_day': v.get('rad_Jm2'),
    'rad_Wm2_mean': ee.Number(v.get('rad_Jm2_h')).divide(3600),
    'pev_mm_day': ee.Number(v.get('pev_m')).multiply(1000),
    'wind_mean_ms': u10.pow(2).add(v10.pow(2)).sqrt(),
    'gust_max_ms': ee.Number(v.get('gust10'))
  });
};

var dailySeries = function(point) {
  var first = ee.Date.fromYMD(startYear, 1, 1);
  var last = ee.Date.fromYMD(endYear, 12, 31);
  var offsets = ee.List.sequence(0, last.difference(first, 'day'));

  var rows = offsets.map(function(offset) {
    var day = first.advance(ee.Number(offset), 'day');
    var doy = referenceDoy(day);
    var inWindow = ee.Algorithms.If(
      wrapsYear,
      doy.gte(startDoy).or(doy.lte(endDoy)),
      doy.gte(startDoy).and(doy.lte(endDoy)));
    var hasData = land.filterDate(day, day.advance(1, 'day')).size().gt(0);
    return ee.Algorithms.If(ee.Number(inWindow).and(hasData), dailyRow(day, point), null);
  }, true);

  return ee.FeatureCollection(rows).filter(ee.Filter.notNull(['precip_mm']));
};

locations.forEach(function(loc) {
  Export.table.toDrive({
    collection: dailySeries(ee.Geometry.Point([loc.lon, loc.lat])),
    description: loc.exportName,
    fileFormat: 'CSV'
  });
});
"#;

/// Renders the export script for `request`.
///
/// Locations without coordinates are left out. When no location remains the
/// result is a script made only of comments explaining the expected location
/// format.
pub fn build_daily_script(request: &ScriptRequest) -> String {
    let entries: Vec<String> = request
        .locations
        .iter()
        .filter_map(|location| {
            location.coordinate.map(|coordinate| {
                format!(
                    "  {{name: '{}', lon: {}, lat: {}, exportName: '{}'}}",
                    js_string(&location.name),
                    coordinate.1,
                    coordinate.0,
                    request.export_name(location)
                )
            })
        })
        .collect();
    if entries.is_empty() {
        return NO_LOCATIONS.to_string();
    }

    let window = &request.seasonal_window;
    let lines = [
        "// Daily ERA5-Land + ERA5 series per location".to_string(),
        format!("// Seasonal window {}", window),
        String::new(),
        format!("var startYear = {};", request.start_year),
        format!("var endYear = {};", request.end_year),
        format!("var startMonth = {};", window.start_month()),
        format!("var startDay = {};", window.start_day()),
        format!("var endMonth = {};", window.end_month()),
        format!("var endDay = {};", window.end_day()),
        String::new(),
        format!("var locations = [\n{}\n];", entries.join(",\n")),
    ];
    let mut script = lines.join("\n");
    script.push_str(SCRIPT_BODY);
    script
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::locations::parse_locations;

    #[test]
    fn test_script_contains_request_values() -> Result<(), Box<dyn std::error::Error>> {
        let request = ScriptRequest::builder()
            .start_year(1991)
            .end_year(2020)
            .seasonal_window(SeasonalWindow::new(11, 15, 2, 15)?)
            .locations(parse_locations("Quinta d'Ouro, -7.9, 38.5\nLisboa, -9.14, 38.70"))
            .build()?;
        let script = build_daily_script(&request);

        assert!(script.contains("var startYear = 1991;"));
        assert!(script.contains("var endYear = 2020;"));
        assert!(script.contains("var startMonth = 11;"));
        assert!(script.contains("var endDay = 15;"));
        assert!(script.contains("name: 'Quinta d\\'Ouro', lon: -7.9, lat: 38.5"));
        assert!(script.contains("exportName: 'ERA5_daily_Quinta_d_Ouro_1991_2020'"));
        assert!(script.contains("exportName: 'ERA5_daily_Lisboa_1991_2020'}\n];"));
        for column in crate::Variable::ALL {
            assert!(script.contains(&format!("'{}'", column.column_name())), "missing {}", column);
        }
        Ok(())
    }

    #[test]
    fn test_no_locations_gives_comment_only_script() -> Result<(), Box<dyn std::error::Error>> {
        let request = ScriptRequest::builder()
            .start_year(2000)
            .end_year(2001)
            .locations(parse_locations("not a location"))
            .build()?;
        let script = build_daily_script(&request);
        assert!(script.lines().all(|line| line.starts_with("//")));
        Ok(())
    }

    #[test]
    fn test_request_validation() -> Result<(), Box<dyn std::error::Error>> {
        let result = ScriptRequest::builder().start_year(2021).end_year(2020).build();
        assert!(matches!(
            result,
            Err(ClimateRiskError::InvalidYearRange { start: 2021, end: 2020 })
        ));
        let request = ScriptRequest::builder().start_year(2020).end_year(2020).build()?;
        assert_eq!(request.seasonal_window, SeasonalWindow::full_year());
        Ok(())
    }
}
