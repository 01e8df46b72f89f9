//! Terminal rendering of a search session snapshot.

use chrono::{DateTime, Local, TimeZone};
use skycast_core::{Snapshot, WeatherReport};

/// Temperature rounded to whole degrees, e.g. `20.4` → `"20°C"`.
pub fn temperature(celsius: f64) -> String {
    format!("{}°C", celsius.round() as i64)
}

/// Visibility in kilometres with one decimal, e.g. `10000` → `"10.0 km"`.
pub fn visibility(metres: u32) -> String {
    format!("{:.1} km", f64::from(metres) / 1000.0)
}

/// Unix timestamp as local wall-clock `HH:MM`.
pub fn sun_time(unix: i64) -> String {
    sun_time_in(unix, &Local)
}

fn sun_time_in<Tz: TimeZone>(unix: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    DateTime::from_timestamp(unix, 0)
        .map(|utc| utc.with_timezone(tz).format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// Multi-line weather panel for one report.
pub fn weather_panel(report: &WeatherReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}, {}\n", report.city, report.country));
    out.push_str(&format!("{} (icon {})\n", report.condition, report.icon));
    out.push_str(&format!(
        "{}  feels like {}\n",
        temperature(report.temperature_c),
        temperature(report.feels_like_c),
    ));
    out.push_str(&format!(
        "min/max:     {} / {}\n",
        temperature(report.temp_min_c),
        temperature(report.temp_max_c),
    ));
    out.push_str(&format!(
        "humidity:    {}%   wind: {} m/s\n",
        report.humidity_pct, report.wind_speed_mps,
    ));
    out.push_str(&format!(
        "pressure:    {} hPa   visibility: {}\n",
        report.pressure_hpa,
        visibility(report.visibility_m),
    ));
    out.push_str(&format!("clouds:      {}%\n", report.cloud_cover_pct));
    out.push_str(&format!(
        "sunrise {}   sunset {}\n",
        sun_time(report.sunrise_unix),
        sun_time(report.sunset_unix),
    ));
    out.push_str(&format!(
        "coordinates: {}°, {}°",
        report.latitude, report.longitude,
    ));

    out
}

/// Print the outcome of the last search: the error or the panel, never both.
pub fn print_outcome(snapshot: &Snapshot) {
    if let Some(err) = &snapshot.error {
        eprintln!("error: {err}");
    } else if let Some(report) = &snapshot.report {
        println!("{}", weather_panel(report));
    }
}
