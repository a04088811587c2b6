use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;
pub mod telemetry;

// Re-export the core types to provide a clean public API.
pub use settings::{DatabaseSettings, LoggingSettings, ServerOverrides, ServerSettings, Settings};
pub use telemetry::init_tracing;

/// Environment prefix for overrides, e.g. `CAMP__SERVER__PORT=8080`.
const ENV_PREFIX: &str = "CAMP";

/// Loads the application configuration.
///
/// Sources are layered, later ones winning: built-in defaults, the TOML file
/// (`path`, or an optional `config.toml` in the working directory),
/// `CAMP__SECTION__KEY` environment variables, and finally `DATABASE_URL`
/// (or the older `DB_URI`) for the database location.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("config.toml").required(false),
    };

    let database_url = std::env::var("DATABASE_URL")
        .or_else(|_| std::env::var("DB_URI"))
        .ok();

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("database.url", database_url)?
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate().map_err(ConfigError::ValidationError)?;

    Ok(settings)
}
