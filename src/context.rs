use crate::config::UniverseConfig;
use anyhow::{Context, Result};
use log::info;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared application wiring: one HTTP client plus the immutable universe
/// configuration. The engine itself stays stateless; this only carries what
/// the commands need to run it.
pub struct AppContext {
    http: Client,
    config: UniverseConfig,
}

impl AppContext {
    pub fn initialize(
        config_path: Option<&Path>,
        interval_override: Option<String>,
        period_override: Option<String>,
    ) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => {
                info!("Loading universe config from {}", path.display());
                UniverseConfig::from_file(path)?
            }
            None => UniverseConfig::default(),
        };

        if let Some(interval) = interval_override {
            config.intraday_interval = interval;
        }
        if let Some(period) = period_override {
            config.period = period;
        }
        config.validate()?;

        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { http, config })
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn config(&self) -> &UniverseConfig {
        &self.config
    }
}
