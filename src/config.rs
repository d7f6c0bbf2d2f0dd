//! Module for global bot configuration.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// The number of "other" languages listed per embed field by `/languages`.
pub(crate) const OTHER_LANGUAGES_PER_PAGE: usize = 15;
/// Discord caps autocomplete responses at this many choices.
pub(crate) const MAX_AUTOCOMPLETE_CHOICES: usize = 25;
/// How long a single detection or translation call may take, unless configured otherwise.
pub(crate) const DEFAULT_GATEWAY_TIMEOUT_SECS: u64 = 10;
/// Base URL of the translation backend.
pub(crate) const DEFAULT_TRANSLATE_URL: &str = "https://translate.google.com";

#[derive(Debug, Clone)]
pub(crate) struct Config {
    /// Discord bot token.
    pub discord_token: String,
    /// Optional language table overriding the bundled one.
    pub languages_file: Option<PathBuf>,
    /// Upper bound on each backend call.
    pub gateway_timeout: Duration,
    pub translate_url: String,
    /// Minimum relative distance lingua needs between its top two guesses.
    pub detection_min_distance: f64,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from a variable lookup.
    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let discord_token = var("DISCORD_TOKEN").context("DISCORD_TOKEN not set")?;
        if discord_token.trim().is_empty() {
            bail!("DISCORD_TOKEN is empty");
        }

        let gateway_timeout = match var("GATEWAY_TIMEOUT_SECS") {
            Some(secs) => secs
                .parse::<u64>()
                .with_context(|| format!("GATEWAY_TIMEOUT_SECS is not a number: {}", secs))?,
            None => DEFAULT_GATEWAY_TIMEOUT_SECS,
        };

        let detection_min_distance = match var("DETECTION_MIN_DISTANCE") {
            Some(d) => d
                .parse::<f64>()
                .with_context(|| format!("DETECTION_MIN_DISTANCE is not a number: {}", d))?,
            None => 0.0,
        };
        if !(0.0..0.99).contains(&detection_min_distance) {
            bail!("DETECTION_MIN_DISTANCE must be at least 0.0 and below 0.99");
        }

        Ok(Self {
            discord_token,
            languages_file: var("LANGUAGES_FILE").map(PathBuf::from),
            gateway_timeout: Duration::from_secs(gateway_timeout),
            translate_url: var("TRANSLATE_URL")
                .unwrap_or_else(|| DEFAULT_TRANSLATE_URL.to_string()),
            detection_min_distance,
        })
    }
}
