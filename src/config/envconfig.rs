use ::config as config_rs;
use anyhow::{Context, Result};
use ::config::{ConfigBuilder, builder::DefaultState};
use serde::de::DeserializeOwned;

/// Configuration read from prefixed environment variables.
pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str;
    const SEPARATOR: &'static str = "__";

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Loads `.env` from the working directory if present, then the environment.
    fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let builder = config_rs::Config::builder().add_source(
            config_rs::Environment::with_prefix(Self::PREFIX)
                .prefix_separator("_")
                .separator(Self::SEPARATOR)
                .try_parsing(true),
        );
        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let settings = builder
            .build()
            .with_context(|| format!("failed to read {} configuration", Self::PREFIX))?;

        let cfg = settings
            .try_deserialize::<Self>()
            .with_context(|| format!("failed to deserialize {} configuration", Self::PREFIX))?;

        cfg.validate()?;
        Ok(cfg)
    }
}
