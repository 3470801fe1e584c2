use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon(pub f64, pub f64);

/// A named point location, as analysed in a report or requested from the
/// script generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub coordinate: Option<LatLon>,
}

impl Location {
    pub fn new(name: impl Into<String>, coordinate: Option<LatLon>) -> Self {
        Self {
            name: name.into(),
            coordinate,
        }
    }

    pub fn latitude(&self) -> Option<f64> {
        self.coordinate.map(|c| c.0)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.coordinate.map(|c| c.1)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new("Location", None)
    }
}
