use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};
use skycast_core::{
    Config, SearchError, SearchSession, Suggestion, provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "City weather lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name, e.g. "London" or "Paris, Texas, US".
        city: String,

        /// Response language code, overriding the configured one.
        #[arg(long)]
        lang: Option<String>,
    },

    /// Interactive search with city-name autocomplete.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, lang } => show(&city, lang).await,
            Command::Interactive => interactive().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.api_key = Some(key.trim().to_string());
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: &str, lang: Option<String>) -> anyhow::Result<()> {
    if city.trim().is_empty() {
        anyhow::bail!("{}", SearchError::EmptyQuery);
    }

    let mut config = Config::load()?;
    if let Some(lang) = lang {
        config.language = lang;
    }
    let provider = provider_from_config(&config)?;

    match provider.current_by_name(city.trim()).await {
        Ok(report) => println!("{}", render::weather_panel(&report)),
        Err(err) => anyhow::bail!("{err}"),
    }

    Ok(())
}

async fn interactive() -> anyhow::Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    let session = SearchSession::new(provider);

    println!("Type a city name; Esc quits.");

    loop {
        let line = match Text::new("City:").prompt_skippable()? {
            Some(line) => line,
            None => break,
        };

        session.input(&line);
        session.settle().await;

        let snap = session.snapshot();
        if snap.dropdown_open {
            let labels: Vec<String> = snap.suggestions.iter().map(Suggestion::label).collect();
            match Select::new("Did you mean:", labels).raw_prompt() {
                Ok(choice) => session.select(choice.index).await,
                Err(InquireError::OperationCanceled) => {
                    // Esc stands in for clicking outside the dropdown.
                    session.dismiss();
                    session.submit().await;
                }
                Err(err) => return Err(err.into()),
            }
        } else {
            session.submit().await;
        }

        render::print_outcome(&session.snapshot());
    }

    Ok(())
}
