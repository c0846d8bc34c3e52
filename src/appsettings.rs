use std::time::Duration;

use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;

use crate::scheduling::DEFAULT_POLL_INTERVAL;

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

#[derive(Deserialize, Debug)]
pub struct TelegramSettings {
    pub token: String,
}

#[derive(Deserialize, Debug)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
}

#[derive(Deserialize, Debug)]
pub struct SchedulerSettings {
    pub poll_interval_secs: u64,
}

impl SchedulerSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

#[derive(Deserialize, Debug)]
pub struct AppSettings {
    pub telegram: TelegramSettings,
    pub gemini: GeminiSettings,
    pub scheduler: SchedulerSettings,
}

impl AppSettings {
    /// Layers `appsettings`, `appsettings.local` and `APP_` environment variables
    /// (e.g. `APP_TELEGRAM__TOKEN`), later sources winning.
    pub fn new() -> Result<Self, ConfigError> {
        Self::build(
            Config::builder()
                .add_source(File::with_name("appsettings").required(false))
                .add_source(File::with_name("appsettings.local").required(false))
                .add_source(
                    Environment::with_prefix("APP")
                        .prefix_separator("_")
                        .separator("__"),
                ),
        )
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder
            .set_default("gemini.model", DEFAULT_GEMINI_MODEL)?
            .set_default(
                "scheduler.poll_interval_secs",
                DEFAULT_POLL_INTERVAL.as_secs(),
            )?
            .build()?
            .try_deserialize()
    }
}
