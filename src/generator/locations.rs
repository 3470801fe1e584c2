use crate::types::location::{LatLon, Location};
use log::warn;

fn parse_coordinate(field: &str) -> Option<f64> {
    field.replace(',', ".").parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses one location per line in the form `Name, lon, lat`.
///
/// Blank lines are ignored. Lines that do not split into exactly three fields,
/// whose coordinates are not numbers, or whose coordinates fall outside the
/// valid latitude/longitude ranges are skipped with a warning.
///
/// ```
/// use climate_risk::parse_locations;
///
/// let locations = parse_locations("Futrono, -72.4, -40.15\nbroken line\nLisboa,-9.14,38.70");
/// assert_eq!(locations.len(), 2);
/// assert_eq!(locations[1].latitude(), Some(38.70));
/// ```
pub fn parse_locations(text: &str) -> Vec<Location> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(index, line)| {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let parsed = match fields.as_slice() {
                [name, lon, lat] if !name.is_empty() => parse_coordinate(lon)
                    .zip(parse_coordinate(lat))
                    .filter(|(lon, lat)| (-180.0..=180.0).contains(lon) && (-90.0..=90.0).contains(lat))
                    .map(|(lon, lat)| Location::new(*name, Some(LatLon(lat, lon)))),
                _ => None,
            };
            if parsed.is_none() {
                warn!("Skipping location line {}: '{}'", index + 1, line.trim());
            }
            parsed
        })
        .collect()
}

/// Replaces every run of characters outside `[0-9A-Za-z_]` with one `_`.
pub fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locations_skips_malformed_lines() {
        let text = "\
Futrono, -72.4, -40.15

Lisboa,-9.14,38.70
Porto, -8.61
Madrid, west, 40.4
, -3.7, 40.4
Nowhere, 200.0, 10.0
Quinta da Serra, 1.5, 2.5, 3.5
";
        let locations = parse_locations(text);
        assert_eq!(
            locations,
            vec![
                Location::new("Futrono", Some(LatLon(-40.15, -72.4))),
                Location::new("Lisboa", Some(LatLon(38.70, -9.14))),
            ]
        );
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("Évora - Herdade"), "_vora_Herdade");
        assert_eq!(sanitize_name("site_01"), "site_01");
        assert_eq!(sanitize_name("a  b..c"), "a_b_c");
    }
}
