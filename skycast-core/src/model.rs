use serde::{Deserialize, Serialize};

/// One candidate place returned by the geocoding lookup.
///
/// The list a lookup returns is kept in the order the remote service sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    pub state: Option<String>,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Suggestion {
    /// Label shown in the dropdown and copied into the query on selection,
    /// e.g. `"Paris, Île-de-France, FR"`. The state segment is omitted when
    /// the service returned none.
    pub fn label(&self) -> String {
        match &self.state {
            Some(state) => format!("{}, {}, {}", self.name, state, self.country),
            None => format!("{}, {}", self.name, self.country),
        }
    }
}

/// Current conditions for one place, as returned by a successful search.
///
/// Created fresh on every successful search and replaced wholesale by the
/// next one; units are metric throughout (°C, m/s, hPa, metres).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Free-text condition description, e.g. "light rain".
    pub condition: String,
    /// Provider icon id, e.g. "10d".
    pub icon: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub pressure_hpa: u32,
    pub visibility_m: u32,
    pub cloud_cover_pct: u8,
    /// Unix timestamps, seconds.
    pub sunrise_unix: i64,
    pub sunset_unix: i64,
}
