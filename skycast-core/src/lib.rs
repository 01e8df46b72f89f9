//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider abstraction (current weather, geocoding)
//! - The search session: debounced city-name autocomplete and the
//!   weather search lifecycle
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod session;

pub use config::Config;
pub use error::SearchError;
pub use model::{Suggestion, WeatherReport};
pub use provider::{WeatherProvider, provider_from_config};
pub use session::{SearchSession, SessionOptions, Snapshot};
