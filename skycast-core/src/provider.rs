use crate::{
    Config,
    error::SearchError,
    model::{Suggestion, WeatherReport},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// The two remote lookups a search session needs.
///
/// Both are plain HTTP GETs against external services; the trait exists so
/// session tests can substitute a scripted in-memory implementation.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a free-text city name.
    async fn current_by_name(&self, city: &str) -> Result<WeatherReport, SearchError>;

    /// Candidate places matching a partial query, in the order the remote
    /// service returned them.
    async fn suggest(&self, query: &str, limit: u8) -> Result<Vec<Suggestion>, SearchError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.resolve_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `skycast configure` and enter your OpenWeather API key,\n\
             or set the {} environment variable.",
            crate::config::API_KEY_ENV
        )
    })?;

    Ok(Arc::new(OpenWeatherProvider::new(
        api_key,
        config.language.clone(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config {
            api_key: None,
            ..Config::default()
        };
        // The env var may leak in from the host; only assert on the message
        // when resolution actually failed.
        if cfg.resolve_api_key().is_none() {
            let err = provider_from_config(&cfg).unwrap_err();
            assert!(err.to_string().contains("No API key configured"));
        }
    }

    #[test]
    fn provider_from_config_works_with_file_key() {
        let cfg = Config {
            api_key: Some("KEY".to_string()),
            ..Config::default()
        };
        assert!(provider_from_config(&cfg).is_ok());
    }
}
