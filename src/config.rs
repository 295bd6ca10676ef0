use std::str::FromStr;

use anyhow::{Context, Result, ensure};

/// Largest accepted generator temperature.
pub const MAX_TEMPERATURE: f64 = 10.0;

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

/// Settings for the mock AI modules.
///
/// Defaults can be overridden with `MOLSCOUT_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Seed shared by the generator, trainer and analyzer.
    pub seed: u64,
    /// Molecules produced per "Generate" click.
    pub generated_batch: usize,
    pub training_epochs: usize,
    pub latent_dim: usize,
    pub temperature: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            generated_batch: 24,
            training_epochs: 100,
            latent_dim: 64,
            temperature: 1.0,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by whichever `MOLSCOUT_*` variables are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let temperature: f64 =
            parse_var(&lookup, "MOLSCOUT_TEMPERATURE", defaults.temperature)?;
        ensure!(
            (0.0..=MAX_TEMPERATURE).contains(&temperature),
            "MOLSCOUT_TEMPERATURE: {temperature} is outside 0..={MAX_TEMPERATURE}"
        );
        Ok(Self {
            seed: parse_var(&lookup, "MOLSCOUT_SEED", defaults.seed)?,
            generated_batch: parse_var(&lookup, "MOLSCOUT_BATCH", defaults.generated_batch)?,
            training_epochs: parse_var(&lookup, "MOLSCOUT_EPOCHS", defaults.training_epochs)?,
            latent_dim: parse_var(&lookup, "MOLSCOUT_LATENT_DIM", defaults.latent_dim)?,
            temperature,
        })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key}: invalid value '{raw}'")),
        None => Ok(default),
    }
}
