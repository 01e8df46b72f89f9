use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::SearchError,
    model::{Suggestion, WeatherReport},
};

use super::WeatherProvider;

const WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const GEOCODE_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    lang: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, lang: String) -> Self {
        Self {
            api_key,
            lang,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_by_name(&self, city: &str) -> Result<WeatherReport, SearchError> {
        debug!(%city, "requesting current weather");

        let res = self
            .http
            .get(WEATHER_URL)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", self.lang.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            // Whatever the body says, the user sees a single "not found".
            debug!(%status, "weather request failed");
            return Err(SearchError::NotFound);
        }

        let body = res.text().await?;
        report_from_json(&body)
    }

    async fn suggest(&self, query: &str, limit: u8) -> Result<Vec<Suggestion>, SearchError> {
        debug!(%query, limit, "requesting geocoding candidates");

        let limit = limit.to_string();
        let res = self
            .http
            .get(GEOCODE_URL)
            .query(&[
                ("q", query),
                ("limit", limit.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            debug!(%status, "geocoding request failed");
            return Err(SearchError::NotFound);
        }

        let body = res.text().await?;
        suggestions_from_json(&body)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    weather: Vec<OwWeather>,
    main: OwMain,
    wind: OwWind,
    // Absent in some responses (e.g. sandstorms); treat as zero.
    #[serde(default)]
    visibility: u32,
    clouds: OwClouds,
    coord: OwCoord,
}

#[derive(Debug, Deserialize)]
struct OwGeoEntry {
    name: String,
    state: Option<String>,
    country: String,
    lat: f64,
    lon: f64,
}

fn report_from_json(body: &str) -> Result<WeatherReport, SearchError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)?;

    let (condition, icon) = parsed
        .weather
        .first()
        .map(|w| (w.description.clone(), w.icon.clone()))
        .unwrap_or_else(|| ("unknown".to_string(), String::new()));

    Ok(WeatherReport {
        city: parsed.name,
        country: parsed.sys.country,
        latitude: parsed.coord.lat,
        longitude: parsed.coord.lon,
        condition,
        icon,
        temperature_c: parsed.main.temp,
        feels_like_c: parsed.main.feels_like,
        temp_min_c: parsed.main.temp_min,
        temp_max_c: parsed.main.temp_max,
        humidity_pct: parsed.main.humidity,
        wind_speed_mps: parsed.wind.speed,
        pressure_hpa: parsed.main.pressure,
        visibility_m: parsed.visibility,
        cloud_cover_pct: parsed.clouds.all,
        sunrise_unix: parsed.sys.sunrise,
        sunset_unix: parsed.sys.sunset,
    })
}

fn suggestions_from_json(body: &str) -> Result<Vec<Suggestion>, SearchError> {
    let parsed: Vec<OwGeoEntry> = serde_json::from_str(body)?;

    Ok(parsed
        .into_iter()
        .map(|e| Suggestion {
            name: e.name,
            state: e.state,
            country: e.country,
            latitude: e.lat,
            longitude: e.lon,
        })
        .collect())
}
